use crate::market::coin::{parse_coin_list, Coin};
use crate::market::error::DataFetchFailure;
use async_trait::async_trait;
use reqwest::header;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use tracing::instrument;

/// Anything that can produce the current coin list, one call per tick.
#[async_trait]
pub trait CoinSource: Send + Sync {
    async fn fetch_coins(&self) -> Result<Vec<Coin>, DataFetchFailure>;
}

/// Query parameters sent with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct CoinQuery {
    pub skip: u32,
    pub limit: u32,
    pub currency: String,
}

impl CoinQuery {
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
            ("currency", self.currency.clone()),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct CoinStatsClient {
    http_client: reqwest::Client,
    base_url: String,
    query: CoinQuery,
}

impl CoinStatsClient {
    pub fn new(
        base_url: &str,
        query: CoinQuery,
        request_timeout: Duration,
    ) -> Result<Self, DataFetchFailure> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.to_string(),
            query,
        })
    }
}

fn check_status(status: StatusCode) -> Result<(), DataFetchFailure> {
    if status.is_success() {
        Ok(())
    } else {
        Err(DataFetchFailure::HttpStatus(status))
    }
}

#[async_trait]
impl CoinSource for CoinStatsClient {
    #[instrument(skip(self))]
    async fn fetch_coins(&self) -> Result<Vec<Coin>, DataFetchFailure> {
        debug!(
            "Sending request to {} for {} coins priced in {}",
            self.base_url, self.query.limit, self.query.currency
        );

        let response = self
            .http_client
            .get(&self.base_url)
            .header(header::ACCEPT, "application/json")
            .query(&self.query.params())
            .send()
            .await?;

        check_status(response.status())?;

        let body = response.text().await?;
        let coins = parse_coin_list(body.as_str())?;

        debug!("Received {} coins", coins.len());
        Ok(coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let query = CoinQuery {
            skip: 0,
            limit: 100,
            currency: "eur".to_string(),
        };
        assert_eq!(
            [
                ("skip", "0".to_string()),
                ("limit", "100".to_string()),
                ("currency", "eur".to_string()),
            ],
            query.params()
        );
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(matches!(
            check_status(StatusCode::TOO_MANY_REQUESTS),
            Err(DataFetchFailure::HttpStatus(StatusCode::TOO_MANY_REQUESTS))
        ));
        assert!(matches!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(DataFetchFailure::HttpStatus(_))
        ));
        assert!(matches!(
            check_status(StatusCode::MOVED_PERMANENTLY),
            Err(DataFetchFailure::HttpStatus(_))
        ));
    }

    #[test]
    fn test_client_builds_with_timeout() {
        let query = CoinQuery {
            skip: 0,
            limit: 10,
            currency: "usd".to_string(),
        };
        let client = CoinStatsClient::new(
            "https://api.example.test/coins",
            query.clone(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!("https://api.example.test/coins", client.base_url);
        assert_eq!(query, client.query);
    }
}
