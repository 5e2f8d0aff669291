use async_trait::async_trait;
use thiserror::Error;

use geotrack_boundary::{GeocodingResponse, IpLookupResponse};

/// Failure of a single HTTP request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The service could not be reached at all.
    #[error("{0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("{0}")]
    Body(String),
}

#[async_trait(?Send)]
pub trait IpLookupGateway {
    /// Looks up `ip` or, if `None`, the IP address of the caller.
    async fn lookup(&self, ip: Option<&str>) -> Result<IpLookupResponse, FetchError>;
}

#[async_trait(?Send)]
pub trait GeocodingGateway {
    /// Resolves a free-text place name.
    async fn forward(&self, text: &str) -> Result<GeocodingResponse, FetchError>;
}
