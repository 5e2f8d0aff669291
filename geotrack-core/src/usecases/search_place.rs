use geotrack_boundary::GeocodingResponse;

use super::prelude::*;

const PLACE_ZOOM: Zoom = 13.0;

/// A non-blank place name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Returns `None` for empty or blank input.
    pub fn new(input: &str) -> Option<Self> {
        let text = input.trim();
        (!text.is_empty()).then(|| Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceMatch {
    pub name: String,
    pub pos: MapPoint,
}

impl PlaceMatch {
    pub const fn zoom(&self) -> Zoom {
        PLACE_ZOOM
    }

    /// The place marker opens its popup right away.
    pub fn marker(&self) -> Marker {
        let popup = Popup {
            title: self.name.clone(),
            lines: vec!["Found via Mapbox Geocoding".to_string()],
            open: true,
        };
        Marker::new(MarkerSlot::Place, self.pos, popup)
    }
}

impl TryFrom<GeocodingResponse> for PlaceMatch {
    type Error = SearchError;

    fn try_from(res: GeocodingResponse) -> Result<Self, Self::Error> {
        let feature = res.features.into_iter().next().ok_or(SearchError::NotFound)?;
        let [lng, lat] = feature.center;
        let pos = MapPoint::try_from_lat_lng_deg(lat, lng).ok_or(SearchError::Failed)?;
        Ok(Self {
            name: feature.place_name,
            pos,
        })
    }
}

pub async fn search_place<G>(gateway: &G, query: &PlaceQuery) -> Result<PlaceMatch, SearchError>
where
    G: GeocodingGateway + ?Sized,
{
    log::debug!("Searching place '{}'", query.as_str());
    let response = gateway.forward(query.as_str()).await.map_err(|err| {
        log::warn!("Geocoding of '{}' failed: {err}", query.as_str());
        SearchError::from(err)
    })?;
    PlaceMatch::try_from(response)
}
