use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ODWB_BASE_URL: &str = "https://www.odwb.be/api/explore/v2.1";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub odwb_base_url: String,
    pub trees_dataset: String,
    pub communes_dataset: String,
    pub words_file: Option<String>,
    pub session_timeout_minutes: u64,
    pub cache_ttl_seconds: u64,
}

impl Config {
    /// Read the configuration from the environment, falling back to defaults for unset keys
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            odwb_base_url: env::var("ODWB_BASE_URL").unwrap_or(defaults.odwb_base_url),
            trees_dataset: env::var("TREES_DATASET").unwrap_or(defaults.trees_dataset),
            communes_dataset: env::var("COMMUNES_DATASET").unwrap_or(defaults.communes_dataset),
            words_file: env::var("WORDS_FILE").ok().filter(|path| !path.is_empty()),
            session_timeout_minutes: parse_var(
                "SESSION_TIMEOUT_MINUTES",
                defaults.session_timeout_minutes,
            )?,
            cache_ttl_seconds: parse_var("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds)?,
        })
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_minutes * 60)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            odwb_base_url: DEFAULT_ODWB_BASE_URL.to_string(),
            trees_dataset: "namur-arbres".to_string(),
            communes_dataset: "communes_s3".to_string(),
            words_file: None,
            session_timeout_minutes: 60,
            cache_ttl_seconds: 3600,
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
