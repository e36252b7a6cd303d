use crate::market::error::DataFetchFailure;
use bigdecimal::BigDecimal;
use serde::Deserialize;
use std::str::FromStr;

/// Body of the coin list endpoint. Only `coins` is read.
#[derive(Debug, Deserialize)]
pub struct CoinListResponse {
    pub coins: Vec<CoinRecord>,
}

// example record
// {"id":"bitcoin","icon":"https://static.coinstats.app/coins/Bitcoin6l39t.png","name":"Bitcoin",
//  "symbol":"BTC","rank":1,"price":50000.005,"marketCap":123456.789,...}
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub rank: u32,
    pub icon: String,
    pub market_cap: serde_json::Number,
    pub price: serde_json::Number,
}

/// One listed asset from the latest snapshot.
///
/// Amounts keep the exact decimal literal sent by the API, so rounding for
/// display never sees binary floating-point error.
#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    pub id: String,
    pub icon: String,
    pub market_cap: BigDecimal,
    pub price: BigDecimal,
}

impl TryFrom<CoinRecord> for Coin {
    type Error = DataFetchFailure;

    fn try_from(record: CoinRecord) -> Result<Self, Self::Error> {
        let market_cap = BigDecimal::from_str(record.market_cap.as_str())?;
        let price = BigDecimal::from_str(record.price.as_str())?;

        Ok(Coin {
            rank: record.rank,
            name: record.name,
            symbol: record.symbol,
            id: record.id,
            icon: record.icon,
            market_cap,
            price,
        })
    }
}

/// Parses a full response body. One bad record fails the whole list.
pub fn parse_coin_list(body: &str) -> Result<Vec<Coin>, DataFetchFailure> {
    let response: CoinListResponse = serde_json::from_str(body)?;
    response.coins.into_iter().map(Coin::try_from).collect()
}
