use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Where uploaded photos live for the duration of one submission.
    pub upload_dir: PathBuf,
    /// Where the published resume is written.
    pub output_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// `None` when `MAIL_API_URL` is unset: submissions are not mailed.
    pub mail: Option<MailConfig>,
}

/// Outbound mail API settings. All four strings are required once
/// `MAIL_API_URL` is set.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub recipient: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: parse_env(&var, "PORT", 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            output_dir: var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            max_upload_bytes: parse_env(&var, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            mail: MailConfig::from_lookup(&var)?,
        })
    }
}

impl MailConfig {
    fn from_lookup(var: &impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let Some(api_url) = var("MAIL_API_URL") else {
            return Ok(None);
        };

        Ok(Some(MailConfig {
            api_url,
            api_key: require_env(var, "MAIL_API_KEY")?,
            from: require_env(var, "MAIL_FROM")?,
            recipient: require_env(var, "MAIL_RECIPIENT")?,
            timeout_secs: parse_env(var, "MAIL_TIMEOUT_SECS", 30)?,
        }))
    }
}

fn require_env(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
