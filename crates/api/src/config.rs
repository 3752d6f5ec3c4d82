use std::str::FromStr;

use anyhow::Context;
use groundwork_assist::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown log format '{other}' (expected text or json)"),
        }
    }
}

/// Text-generation provider settings.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// Provider API key. Without one every AI operation uses its fallback.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for in-flight requests to drain on shutdown.
    pub shutdown_timeout_secs: u64,
    /// Load the demo companies, projects and records at startup.
    pub seed_demo_data: bool,
    pub log_format: LogFormat,
    pub assist: AssistConfig,
    /// Share of uploads the simulated scanner lets through.
    pub scan_pass_rate: f64,
    pub scan_delay_ms: u64,
    /// Pause between simulated upload chunks.
    pub upload_chunk_delay_ms: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                       |
    /// |-------------------------|-----------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                     |
    /// | `PORT`                  | `3000`                                        |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`                       |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                          |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                                          |
    /// | `SEED_DEMO_DATA`        | `true`                                        |
    /// | `LOG_FORMAT`            | `text`                                        |
    /// | `ASSIST_API_KEY`        | unset (offline)                               |
    /// | `ASSIST_MODEL`          | `gemini-2.5-flash`                            |
    /// | `ASSIST_BASE_URL`       | `https://generativelanguage.googleapis.com`   |
    /// | `SCAN_PASS_RATE`        | `0.9`                                         |
    /// | `SCAN_DELAY_MS`         | `1500`                                        |
    /// | `UPLOAD_CHUNK_DELAY_MS` | `80`                                          |
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let api_key = std::env::var("ASSIST_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        Ok(Self {
            host,
            port: parse_var("PORT", 3000)?,
            cors_origins,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
            shutdown_timeout_secs: parse_var("SHUTDOWN_TIMEOUT_SECS", 30)?,
            seed_demo_data: parse_var("SEED_DEMO_DATA", true)?,
            log_format: parse_var("LOG_FORMAT", LogFormat::Text)?,
            assist: AssistConfig {
                api_key,
                model: std::env::var("ASSIST_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
                base_url: std::env::var("ASSIST_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            },
            scan_pass_rate: parse_var("SCAN_PASS_RATE", 0.9)?,
            scan_delay_ms: parse_var("SCAN_DELAY_MS", 1500)?,
            upload_chunk_delay_ms: parse_var("UPLOAD_CHUNK_DELAY_MS", 80)?,
        })
    }
}

/// Read and parse `key`, falling back to `default` when it is unset.
fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
