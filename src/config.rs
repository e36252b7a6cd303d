use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

use crate::market::client::CoinQuery;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String, // Coin list endpoint
    pub skip: u32, // Pagination offset sent as `skip`
    pub limit: u32, // Page size sent as `limit`
    pub currency: String, // Settlement currency code, e.g. "eur"
    pub refresh_secs: u64, // Polling period, in seconds
    pub request_timeout_secs: u64, // Per-request timeout, in seconds
    pub html_output: Option<String>, // Where the HTML page is written, null to disable
    pub log_level: String, // One of trace, debug, info, warn, error
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://api.coinstats.app/public/v1/coins".to_string(),
            skip: 0,
            limit: 100,
            currency: "eur".to_string(),
            refresh_secs: 3,
            request_timeout_secs: 10,
            html_output: Some("coin_board.html".to_string()),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn query(&self) -> CoinQuery {
        CoinQuery {
            skip: self.skip,
            limit: self.limit,
            currency: self.currency.clone(),
        }
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn log_level(&self) -> Level {
        Level::from_str(self.log_level.trim()).unwrap_or(Level::INFO)
    }
}
