use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::RequestCache;

use geotrack_boundary::{ip_lookup_url, IpLookupResponse, IP_LOOKUP_BASE_URL};
use geotrack_core::gateways::IpLookupGateway;

use crate::{fetch_error, into_json, Result};

/// IP lookup via ipapi.co
#[derive(Clone)]
pub struct IpApi {
    url: String,
}

impl Default for IpApi {
    fn default() -> Self {
        Self::new(IP_LOOKUP_BASE_URL.to_string())
    }
}

impl IpApi {
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait(?Send)]
impl IpLookupGateway for IpApi {
    async fn lookup(&self, ip: Option<&str>) -> Result<IpLookupResponse> {
        let url = ip_lookup_url(&self.url, ip);
        let response = Request::get(&url)
            .cache(RequestCache::NoStore)
            .send()
            .await
            .map_err(fetch_error)?;
        into_json(response).await
    }
}

