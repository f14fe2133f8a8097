use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapsServiceError {
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl MapsServiceError {
    /// Whether another attempt at the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MapsServiceError::NetworkFailure(_) => true,
            MapsServiceError::UnexpectedStatus(code) => code.is_server_error(),
            MapsServiceError::MalformedResponse(_) => false,
        }
    }
}
