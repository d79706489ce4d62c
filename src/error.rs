use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Relay request failed: {0}")]
    Transport(String),
    #[error("Relay rejected the message with status {status}")]
    Rejected { status: u16 },
    #[error("Failed to encode relay payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for DispatchError {
    fn from(e: reqwest::Error) -> Self {
        DispatchError::Transport(e.to_string())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Required fields are empty: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid relay endpoint: {0}")]
    InvalidRelayEndpoint(#[from] url::ParseError),
    #[error("Business number must contain digits only, got {0:?}")]
    InvalidBusinessNumber(String),
    #[error("Invalid duration in {var}: {value:?}")]
    InvalidDuration { var: &'static str, value: String },
}
