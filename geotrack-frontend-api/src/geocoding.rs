use async_trait::async_trait;
use gloo_net::http::Request;

use geotrack_boundary::{
    geocoding_url, GeocodingQuery, GeocodingResponse, DEFAULT_GEOCODING_COUNTRY,
    DEFAULT_GEOCODING_LIMIT, GEOCODING_BASE_URL,
};
use geotrack_core::gateways::GeocodingGateway;

use crate::{fetch_error, into_json, Result};

/// Forward geocoding via Mapbox
#[derive(Clone)]
pub struct MapboxGeocoding {
    url: String,
    access_token: String,
    country: String,
    limit: u32,
}

impl MapboxGeocoding {
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            url: GEOCODING_BASE_URL.to_string(),
            access_token: access_token.into(),
            country: DEFAULT_GEOCODING_COUNTRY.to_string(),
            limit: DEFAULT_GEOCODING_LIMIT,
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }
}

#[async_trait(?Send)]
impl GeocodingGateway for MapboxGeocoding {
    async fn forward(&self, text: &str) -> Result<GeocodingResponse> {
        let query = GeocodingQuery {
            text,
            access_token: &self.access_token,
            limit: self.limit,
            country: &self.country,
        };
        let url = geocoding_url(&self.url, &query);
        if self.access_token.is_empty() {
            log::warn!("No Mapbox access token configured");
        }
        let response = Request::get(&url).send().await.map_err(fetch_error)?;
        into_json(response).await
    }
}
