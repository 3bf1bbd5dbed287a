//! Fun fact module
//!
//! Fetches trivia about a number from the numbers fact service. Every
//! failure is folded into a fallback sentence so a classification never
//! fails because of the upstream service.

mod error;

pub use error::FactError;

use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::config::FactsConfig;
use crate::logger::Logger;

pub const SERVICE_UNAVAILABLE: &str = "Fun fact service is unavailable.";

/// Client for the numbers fact service
pub struct FactFetcher {
    client: Client,
    base_url: String,
    timeout: Duration,
    logger: Logger,
}

impl FactFetcher {
    pub fn new(config: &FactsConfig, logger: Logger) -> Result<Self, FactError> {
        let timeout = Duration::from_secs(config.timeout);
        Self::with_timeout(&config.base_url, timeout, logger)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration, logger: Logger) -> Result<Self, FactError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FactError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            logger,
        })
    }

    /// Fun fact for `number`, or a fallback sentence.
    ///
    /// The service is always asked about the magnitude. For negative numbers
    /// a successful answer is replaced by a fixed sentence about the magnitude.
    pub async fn fun_fact(&self, number: i64) -> String {
        match self.fetch(number.unsigned_abs()).await {
            Ok(Some(_)) if number < 0 => {
                format!("{} is an unremarkable number.", number.unsigned_abs())
            }
            Ok(Some(fact)) => fact,
            Ok(None) => format!("No fun fact available for {number}"),
            Err(e) => {
                self.logger.error(&format!("Error fetching fun fact: {e}"));
                SERVICE_UNAVAILABLE.to_string()
            }
        }
    }

    /// `Ok(None)` for any status other than 200
    async fn fetch(&self, magnitude: u64) -> Result<Option<String>, FactError> {
        let url = format!("{}/{magnitude}", self.base_url);
        self.logger.debug(&format!("[Facts] GET {url}"));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FactError::from_request(&url, self.timeout, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            self.logger
                .warn(&format!("Fun fact service answered {status} for {url}"));
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| FactError::from_body(&url, self.timeout, e))?;
        Ok(Some(body.trim().to_string()))
    }
}
