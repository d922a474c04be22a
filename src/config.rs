use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Port used when `SERVER_PORT` is not set.
pub const DEFAULT_SERVER_PORT: u16 = 8080;
/// Generation endpoint used when `OLLAMA_URL` is not set.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
/// Model requested when `SUMMARY_MODEL` is not set.
pub const DEFAULT_SUMMARY_MODEL: &str = "mistral";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
    /// Configuration was installed more than once.
    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

/// Runtime configuration for the Rusty Roster server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds on all interfaces.
    pub server_port: u16,
    /// Base URL of the Ollama runtime used for student summaries.
    pub ollama_url: String,
    /// Model identifier passed to the generation endpoint.
    pub summary_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            server_port: read("SERVER_PORT")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?
                .unwrap_or(defaults.server_port),
            ollama_url: read("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            summary_model: read("SUMMARY_MODEL").unwrap_or(defaults.summary_model),
        })
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, or the defaults when initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        server_port = config.server_port,
        ollama_url = %config.ollama_url,
        summary_model = %config.summary_model,
        "Loaded configuration"
    );
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    Ok(get_config())
}
