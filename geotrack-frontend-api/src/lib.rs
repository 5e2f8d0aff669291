//! Browser implementations of the geotrack gateways based on `gloo-net`.

use gloo_net::http::Response;
use serde::de::DeserializeOwned;

use geotrack_core::gateways::FetchError;

mod geocoding;
mod ip_lookup;

pub use self::{geocoding::*, ip_lookup::*};

type Result<T> = std::result::Result<T, FetchError>;

fn fetch_error(err: gloo_net::Error) -> FetchError {
    match err {
        gloo_net::Error::SerdeError(err) => FetchError::Body(err.to_string()),
        err => FetchError::Transport(err.to_string()),
    }
}

pub async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if response.ok() {
        response.json().await.map_err(fetch_error)
    } else {
        Err(FetchError::Status(response.status()))
    }
}
