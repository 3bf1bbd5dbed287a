// Configuration module entry point
// Loads configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, FactsConfig, LoggingConfig};

/// Prefix for environment overrides, e.g. `CLASSIFIER__SERVER__PORT=9000`
const ENV_PREFIX: &str = "CLASSIFIER";

impl Config {
    /// Load configuration from the given file path (without extension).
    /// The file is optional; environment variables override it.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize::<Self>()?
            .validate()
    }

    /// Reject values the runtime cannot start with
    fn validate(self) -> Result<Self, config::ConfigError> {
        if self.server.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "server.workers must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.backlog", 128)?
            .set_default("performance.shutdown_timeout", 15)?
            .set_default("http.server_name", "number-classifier/0.1")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("routes.classify_path", "/api/classify-number")?
            .set_default("facts.base_url", "http://numbersapi.com")?
            .set_default("facts.timeout", 10)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
impl Config {
    /// Defaults only, no file or environment
    pub fn defaults() -> Self {
        Self::builder()
            .and_then(|builder| builder.build())
            .and_then(|settings| settings.try_deserialize())
            .unwrap()
    }
}
