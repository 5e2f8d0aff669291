use thiserror::Error;

use crate::gateways::FetchError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Cannot reach geolocation service — check internet")]
    Unreachable,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Reported by the lookup service itself.
    #[error("{0}")]
    Service(String),
}

impl From<FetchError> for LookupError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(_) => Self::Unreachable,
            FetchError::Status(status) => Self::Status(status),
            FetchError::Body(msg) => Self::InvalidResponse(msg),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Cannot reach geocoding service — check internet")]
    Unreachable,
    #[error("Geocoding failed")]
    Failed,
    #[error("Place not found")]
    NotFound,
}

impl From<FetchError> for SearchError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(_) => Self::Unreachable,
            FetchError::Status(_) | FetchError::Body(_) => Self::Failed,
        }
    }
}
