use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Key lookup used while building a [`Config`]. Production code reads the
/// process environment; tests hand in a map.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Read a profiled key: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_opt(lookup: Lookup<'_>, profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = lookup(&prefixed).filter(|s| !s.is_empty()) {
            return Some(v);
        }
    }
    lookup(key).filter(|s| !s.is_empty())
}

fn profiled_or(lookup: Lookup<'_>, profile: &str, key: &str, default: &str) -> String {
    profiled_opt(lookup, profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_u16(lookup: Lookup<'_>, profile: &str, key: &str, default: u16) -> u16 {
    profiled_opt(lookup, profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_u64(lookup: Lookup<'_>, profile: &str, key: &str, default: u64) -> u64 {
    profiled_opt(lookup, profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub stream: StreamConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `MODELER_PROFILE`. When set (e.g. `DEV`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = process_env("MODELER_PROFILE").unwrap_or_default();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        Self::from_lookup(profile, &process_env)
    }

    fn from_lookup(profile: &str, lookup: Lookup<'_>) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_lookup(lookup, p),
            stream: StreamConfig::from_lookup(lookup, p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:  host={}, port={}", self.server.host, self.server.port);
        tracing::info!("  cors:    origin={}", self.server.cors_origin);
        tracing::info!(
            "  stream:  chunk_delay={}ms, row_delay={}ms",
            self.stream.chunk_delay_ms,
            self.stream.row_delay_ms
        );
    }

    /// Return a view safe for API responses and the `config` subcommand.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": {
                "host": self.server.host,
                "port": self.server.port,
                "cors_origin": self.server.cors_origin,
            },
            "stream": {
                "chunk_delay_ms": self.stream.chunk_delay_ms,
                "row_delay_ms": self.stream.row_delay_ms,
            },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `*` allows any origin; anything else is the single allowed origin.
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_lookup(lookup: Lookup<'_>, p: &str) -> Self {
        Self {
            host: profiled_or(lookup, p, "HOST", "0.0.0.0"),
            port: profiled_u16(lookup, p, "PORT", 8000),
            cors_origin: profiled_or(lookup, p, "CORS_ORIGIN", "*"),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origin == "*"
    }
}

// ── Streaming ─────────────────────────────────────────────────

/// Artificial pacing of the canned plan stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Pause after each narration chunk.
    pub chunk_delay_ms: u64,
    /// Pause after each streamed table row.
    pub row_delay_ms: u64,
}

impl StreamConfig {
    fn from_lookup(lookup: Lookup<'_>, p: &str) -> Self {
        Self {
            chunk_delay_ms: profiled_u64(lookup, p, "STREAM_CHUNK_DELAY_MS", 2000),
            row_delay_ms: profiled_u64(lookup, p, "STREAM_ROW_DELAY_MS", 100),
        }
    }

    /// No pacing at all; used by tests and scripted clients.
    pub fn immediate() -> Self {
        Self {
            chunk_delay_ms: 0,
            row_delay_ms: 0,
        }
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    pub fn row_delay(&self) -> Duration {
        Duration::from_millis(self.row_delay_ms)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_delay_ms: 2000,
            row_delay_ms: 100,
        }
    }
}
