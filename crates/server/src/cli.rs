//! CLI argument parsing.

use clap::{Parser, Subcommand};

/// Mock backend for the data-modeling assistant.
#[derive(Parser, Debug)]
#[command(name = "modeler-server", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start the HTTP server (the default when no command is given).
    Serve {
        /// Bind address; overrides HOST.
        #[arg(long)]
        host: Option<String>,

        /// Listen port; overrides PORT.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved configuration as JSON and exit.
    Config,
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            host: None,
            port: None,
        }
    }
}
