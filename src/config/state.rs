// Application state module
// Everything a request handler needs, shared behind an Arc

use super::types::Config;
use crate::facts::{FactError, FactFetcher};
use crate::logger::Logger;

/// Application state
pub struct AppState {
    pub config: Config,
    pub logger: Logger,
    pub facts: FactFetcher,
}

impl AppState {
    /// Build state from loaded configuration; fails if the HTTP client
    /// for the fact service cannot be created
    pub fn new(config: Config, logger: Logger) -> Result<Self, FactError> {
        let facts = FactFetcher::new(&config.facts, logger.clone())?;
        Ok(Self {
            config,
            logger,
            facts,
        })
    }
}
