use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid symbol input: {0:?}")]
    InvalidSymbolInput(String),

    #[error("No reference price for symbol: {0}")]
    UnknownSymbolReference(String),

    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Parse(e.to_string())
    }
}
