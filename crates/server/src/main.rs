mod api;
mod cli;
mod router;
mod state;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cli::{Cli, Command};

fn load_config() -> modeler_core::Config {
    modeler_core::config::load_dotenv();
    modeler_core::Config::from_env()
}

async fn serve(mut config: modeler_core::Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.log_summary();

    let state = Arc::new(state::AppState::new(config.stream.clone()));
    let app = router::build_router(state, &config.server)?;

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config();

    match cli.command.unwrap_or_default() {
        Command::Serve { host, port } => serve(config, host, port).await?,
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.redacted_summary())?);
        }
    }

    Ok(())
}
