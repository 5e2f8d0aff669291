use async_trait::async_trait;
use reqwest::Client;

use geotrack_boundary::{geocoding_url, GeocodingQuery, GeocodingResponse};
use geotrack_core::gateways::{FetchError, GeocodingGateway};

use crate::{fetch_error, into_json};

/// Forward geocoding via the Mapbox places API.
#[derive(Debug, Clone)]
pub struct Mapbox {
    pub client: Client,
    pub api_base_url: String,
    pub access_token: String,
    pub country: String,
    pub limit: u32,
}

#[async_trait(?Send)]
impl GeocodingGateway for Mapbox {
    async fn forward(&self, text: &str) -> Result<GeocodingResponse, FetchError> {
        let Self {
            client,
            api_base_url,
            access_token,
            country,
            limit,
        } = self;
        if access_token.is_empty() {
            log::warn!("No Mapbox access token found");
        }
        let query = GeocodingQuery {
            text,
            access_token,
            limit: *limit,
            country,
        };
        let url = geocoding_url(api_base_url, &query);
        let response = client.get(&url).send().await.map_err(fetch_error)?;
        into_json(response).await
    }
}
