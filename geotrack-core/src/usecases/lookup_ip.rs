use std::fmt;

use geotrack_boundary::IpLookupResponse;

use super::prelude::*;

const DEFAULT_SERVICE_ERROR: &str = "Failed";
const CITY_ZOOM: Zoom = 13.0;
const REGION_ZOOM: Zoom = 8.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpQuery {
    /// The IP address the request originates from.
    Caller,
    Address(String),
}

impl IpQuery {
    /// Empty or blank input refers to the caller.
    pub fn from_input(input: &str) -> Self {
        let ip = input.trim();
        if ip.is_empty() {
            Self::Caller
        } else {
            Self::Address(ip.to_string())
        }
    }

    pub fn ip(&self) -> Option<&str> {
        match self {
            Self::Caller => None,
            Self::Address(ip) => Some(ip),
        }
    }
}

impl fmt::Display for IpQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caller => f.write_str("own IP"),
            Self::Address(ip) => f.write_str(ip),
        }
    }
}

/// Outcome of a successful IP lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct IpLocation {
    pub details: IpDetails,
    /// Only known if the service delivered valid coordinates.
    pub pos: Option<MapPoint>,
    pub zoom: Zoom,
    pub popup: Popup,
}

impl IpLocation {
    pub fn marker(&self) -> Option<Marker> {
        self.pos
            .map(|pos| Marker::new(MarkerSlot::Ip, pos, self.popup.clone()))
    }
}

fn non_empty(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

impl TryFrom<IpLookupResponse> for IpLocation {
    type Error = LookupError;

    fn try_from(res: IpLookupResponse) -> Result<Self, Self::Error> {
        if res.error.as_ref().is_some_and(|e| e.is_set()) {
            let reason = non_empty(res.reason.as_ref()).unwrap_or(DEFAULT_SERVICE_ERROR);
            return Err(LookupError::Service(reason.to_string()));
        }
        let city = non_empty(res.city.as_ref());
        let region = non_empty(res.region.as_ref());
        let country = non_empty(res.country_name.as_ref());
        let org = non_empty(res.org.as_ref());

        let address = non_empty(res.ip.as_ref())
            .or_else(|| non_empty(res.query.as_ref()))
            .unwrap_or(PLACEHOLDER);
        let location = [city, region, country, non_empty(res.postal.as_ref())]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        let timezone = non_empty(res.timezone.as_ref()).unwrap_or(PLACEHOLDER);
        let network = org
            .or_else(|| non_empty(res.asn.as_ref()))
            .unwrap_or(PLACEHOLDER);
        let details = IpDetails {
            address: address.to_string(),
            location: if location.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                location
            },
            timezone: timezone.to_string(),
            network: network.to_string(),
        };

        let lat = res.latitude.as_ref().and_then(|d| d.to_f64());
        let lng = res.longitude.as_ref().and_then(|d| d.to_f64());
        let pos = lat
            .zip(lng)
            .and_then(|(lat, lng)| MapPoint::try_from_lat_lng_deg(lat, lng));
        let zoom = if city.is_some() { CITY_ZOOM } else { REGION_ZOOM };
        let popup = Popup {
            title: "IP Location".to_string(),
            lines: vec![
                city.unwrap_or(PLACEHOLDER).to_string(),
                format!("{}, {}", region.unwrap_or_default(), country.unwrap_or_default()),
                format!("ISP: {}", org.unwrap_or(PLACEHOLDER)),
            ],
            open: false,
        };
        Ok(Self {
            details,
            pos,
            zoom,
            popup,
        })
    }
}

pub async fn lookup_ip<G>(gateway: &G, query: &IpQuery) -> Result<IpLocation, LookupError>
where
    G: IpLookupGateway + ?Sized,
{
    log::debug!("Looking up location of {query}");
    let response = gateway.lookup(query.ip()).await.map_err(|err| {
        log::warn!("IP lookup of {query} failed: {err}");
        LookupError::from(err)
    })?;
    IpLocation::try_from(response)
}
