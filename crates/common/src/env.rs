use std::path::PathBuf;

const BOT_TOKEN: &str = "BOT_TOKEN";
const API_ID: &str = "API_ID";
const API_HASH: &str = "API_HASH";
const LOG_FILE: &str = "LOG_FILE";

const DEFAULT_LOG_FILE: &str = "translatebot.log";

/// Credentials of the bot account, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub api_id: i32,
    pub api_hash: String,
}

impl Config {
    /// Load config from environment, `.env` file is loaded beforehand if present
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let bot_token = required(BOT_TOKEN)?;
        let api_id = required(API_ID)?
            .trim()
            .parse()
            .map_err(ConfigError::InvalidApiId)?;
        let api_hash = required(API_HASH)?;

        Ok(Self {
            bot_token,
            api_id,
            api_hash,
        })
    }
}

/// Where to append log lines
pub fn log_file() -> PathBuf {
    match std::env::var(LOG_FILE) {
        Ok(s) if !s.is_empty() => PathBuf::from(s),
        _ => PathBuf::from(DEFAULT_LOG_FILE),
    }
}

/// Load `.env` from the working directory, missing file is fine
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to load .env: {e}");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} env variable is not set")]
    Missing(&'static str),
    #[error("API_ID should be an integer: {0}")]
    InvalidApiId(std::num::ParseIntError),
}
