use async_trait::async_trait;
use reqwest::{header, Client};

use geotrack_boundary::{ip_lookup_url, IpLookupResponse};
use geotrack_core::gateways::{FetchError, IpLookupGateway};

use crate::{fetch_error, into_json};

/// IP lookup via ipapi.co
#[derive(Debug, Clone)]
pub struct IpApi {
    pub client: Client,
    pub api_base_url: String,
}

#[async_trait(?Send)]
impl IpLookupGateway for IpApi {
    async fn lookup(&self, ip: Option<&str>) -> Result<IpLookupResponse, FetchError> {
        let url = ip_lookup_url(&self.api_base_url, ip);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(fetch_error)?;
        into_json(response).await
    }
}
