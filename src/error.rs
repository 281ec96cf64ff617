use thiserror::Error;

/// Main error type for the bot library
#[derive(Error, Debug)]
pub enum BotError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid wallet key #{index}: {reason}")]
    Wallet { index: usize, reason: String },

    #[error("Proxy pool is empty: {0}")]
    EmptyProxyPool(String),

    #[error("Invalid proxy entry '{entry}': {reason}")]
    InvalidProxy { entry: String, reason: String },

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected API response ({status}): {body}")]
    Api { status: u16, body: String },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Chain errors
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Contract ABI error: {0}")]
    Abi(String),

    #[error("Gas quote unavailable: {0}")]
    GasQuote(String),

    #[error("Unit conversion error: {0}")]
    Units(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for BotError
pub type Result<T> = std::result::Result<T, BotError>;

impl From<alloy::primitives::utils::UnitsError> for BotError {
    fn from(err: alloy::primitives::utils::UnitsError) -> Self {
        BotError::Units(err.to_string())
    }
}
