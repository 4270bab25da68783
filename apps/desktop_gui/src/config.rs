//! Launch options: command line first, then environment, then defaults.

use std::time::Duration;

use clap::Parser;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug, Default)]
#[command(name = "desktop_gui", about = "Plan order fulfillment against a pack-size service")]
pub struct Args {
    /// Base URL of the fulfillment service.
    #[arg(long)]
    pub server_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
    /// tracing filter used when RUST_LOG is unset.
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub server_url: String,
    pub request_timeout: Duration,
    pub log_filter: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

pub fn load_startup_config(args: Args) -> StartupConfig {
    resolve_startup_config(args, |name| std::env::var(name).ok())
}

pub fn resolve_startup_config(args: Args, env: impl Fn(&str) -> Option<String>) -> StartupConfig {
    let mut config = StartupConfig::default();

    if let Some(v) = env("APP__SERVER_URL") {
        config.server_url = v;
    }
    if let Some(v) = env("FULFILLMENT_SERVER_URL") {
        config.server_url = v;
    }
    if let Some(secs) = env("APP__REQUEST_TIMEOUT_SECS").and_then(|v| parse_timeout_secs(&v)) {
        config.request_timeout = Duration::from_secs(secs);
    }

    if let Some(v) = args.server_url {
        config.server_url = v;
    }
    if let Some(secs) = args.request_timeout_secs.filter(|secs| *secs > 0) {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(v) = args.log_filter {
        config.log_filter = v;
    }

    config.server_url = normalize_server_url(&config.server_url);
    config
}

/// Zero would fail every request immediately, so it counts as unset.
fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

fn normalize_server_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_SERVER_URL.to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
