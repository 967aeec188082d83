use thiserror::Error;

/// The response body does not have the shape of a result set.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of sites")]
    NotAnArray,

    #[error("Site #{index} has no `tests` array")]
    MissingTests { index: usize },

    #[error("Site #{index} does not match the result schema: {source}")]
    InvalidSite {
        index: usize,
        source: serde_json::Error,
    },
}

/// A formatted metric string could not be turned into a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("`{0}` is not a duration like `120ms` or `3.1s`")]
    Duration(String),

    #[error("`{0}` is not a percentage like `90%`")]
    PassRate(String),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server responded with HTTP {status}")]
    Status { status: u16 },

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Unexpected response: {0}")]
    Schema(#[from] SchemaError),
}
