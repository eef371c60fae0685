use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Unknown token: {0}")]
    UnknownToken(String),
    #[error("Price lookup failed for {token}: {reason}")]
    PriceLookup { token: String, reason: String },
    #[error("No price history available for {0}")]
    PriceHistoryUnavailable(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VolumeError>;

impl From<reqwest::Error> for VolumeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            VolumeError::MalformedResponse(err.to_string())
        } else {
            VolumeError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for VolumeError {
    fn from(err: serde_json::Error) -> Self {
        VolumeError::MalformedResponse(err.to_string())
    }
}

impl VolumeError {
    /// Build a transport error from a non-2xx response
    pub fn http_status(service: &str, status: reqwest::StatusCode, body: &str) -> Self {
        VolumeError::Transport(format!("{} API error {}: {}", service, status, body))
    }
}
