use std::error;
use std::fmt;

/// Any reason a fetch cycle did not produce a coin list. The cycle is treated
/// as failed as a whole, whatever the variant. `Other` covers a fetch that was
/// still running when the next tick superseded it.
#[derive(Debug)]
pub enum DataFetchFailure {
    HttpRequest(reqwest::Error),
    HttpStatus(reqwest::StatusCode),
    JsonParse(serde_json::Error),
    ParseBigDecimal(bigdecimal::ParseBigDecimalError),
    Other(String),
}

impl fmt::Display for DataFetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DataFetchFailure::HttpRequest(ref err) => write!(f, "HTTP Request Error: {}", err),
            DataFetchFailure::HttpStatus(status) => write!(f, "HTTP Status Error: {}", status),
            DataFetchFailure::JsonParse(ref err) => write!(f, "JSON Parse Error: {}", err),
            DataFetchFailure::ParseBigDecimal(ref err) => {
                write!(f, "BigDecimal Parse Error: {}", err)
            }
            DataFetchFailure::Other(ref err) => write!(f, "Other Error: {}", err),
        }
    }
}

impl error::Error for DataFetchFailure {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            DataFetchFailure::HttpRequest(ref err) => Some(err),
            DataFetchFailure::JsonParse(ref err) => Some(err),
            DataFetchFailure::ParseBigDecimal(ref err) => Some(err),
            DataFetchFailure::HttpStatus(_) | DataFetchFailure::Other(_) => None,
        }
    }
}

impl From<reqwest::Error> for DataFetchFailure {
    fn from(err: reqwest::Error) -> DataFetchFailure {
        DataFetchFailure::HttpRequest(err)
    }
}

impl From<serde_json::Error> for DataFetchFailure {
    fn from(err: serde_json::Error) -> DataFetchFailure {
        DataFetchFailure::JsonParse(err)
    }
}

impl From<bigdecimal::ParseBigDecimalError> for DataFetchFailure {
    fn from(err: bigdecimal::ParseBigDecimalError) -> DataFetchFailure {
        DataFetchFailure::ParseBigDecimal(err)
    }
}
