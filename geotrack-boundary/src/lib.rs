//! # geotrack-boundary
//!
//! Wire format of the external services consumed by geotrack:
//! the [ipapi.co](https://ipapi.co) IP lookup and the
//! [Mapbox geocoding](https://docs.mapbox.com/api/search/geocoding-v5/) API.

use serde::{Deserialize, Serialize};

mod url;

pub use self::url::*;

/// Response of the IP lookup service.
///
/// All fields are optional: the service omits what it does not know
/// and an error response only carries `error` and `reason`.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct IpLookupResponse {
    pub ip           : Option<String>,
    pub query        : Option<String>,
    pub city         : Option<String>,
    pub region       : Option<String>,
    pub country_name : Option<String>,
    pub postal       : Option<String>,
    pub timezone     : Option<String>,
    pub org          : Option<String>,
    pub asn          : Option<String>,
    pub latitude     : Option<Degrees>,
    pub longitude    : Option<Degrees>,
    pub error        : Option<ErrorFlag>,
    pub reason       : Option<String>,
}

/// A coordinate component as delivered by the lookup service.
///
/// Usually a JSON number, but some mirrors of the API send numeric strings.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(untagged)]
pub enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(untagged)]
pub enum ErrorFlag {
    Flag(bool),
    Message(String),
}

impl ErrorFlag {
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Message(msg) => !msg.is_empty(),
        }
    }
}

/// Response of the forward geocoding endpoint.
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct GeocodingResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Feature {
    /// `[lng, lat]`
    pub center: [f64; 2],
    pub place_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_ip_lookup_response() {
        let json = r#"{
            "ip": "8.8.8.8",
            "city": "Mountain View",
            "region": "California",
            "country_name": "United States",
            "postal": "94043",
            "latitude": 37.42301,
            "longitude": "-122.083352",
            "timezone": "America/Los_Angeles",
            "asn": "AS15169",
            "org": "GOOGLE",
            "in_eu": false
        }"#;
        let res: IpLookupResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.ip.as_deref(), Some("8.8.8.8"));
        assert_eq!(res.latitude.and_then(|d| d.to_f64()), Some(37.42301));
        assert_eq!(res.longitude.and_then(|d| d.to_f64()), Some(-122.083352));
        assert!(res.error.is_none());
    }

    #[test]
    fn deserialize_ip_lookup_error() {
        let json = r#"{"ip": "foo", "error": true, "reason": "Invalid IP Address"}"#;
        let res: IpLookupResponse = serde_json::from_str(json).unwrap();
        assert!(res.error.unwrap().is_set());
        assert_eq!(res.reason.as_deref(), Some("Invalid IP Address"));
    }

    #[test]
    fn degrees_must_be_numeric() {
        assert_eq!(Degrees::Text("abc".into()).to_f64(), None);
        assert_eq!(Degrees::Text(" 6.5 ".into()).to_f64(), Some(6.5));
        assert_eq!(Degrees::Number(f64::NAN).to_f64(), None);
        assert_eq!(Degrees::Number(0.0).to_f64(), Some(0.0));
    }

    #[test]
    fn deserialize_geocoding_response() {
        let json = r#"{
            "type": "FeatureCollection",
            "query": ["lagos"],
            "features": [{
                "id": "place.123",
                "place_name": "Lagos, Lagos, Nigeria",
                "center": [3.39467, 6.45407]
            }]
        }"#;
        let res: GeocodingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.features.len(), 1);
        assert_eq!(res.features[0].place_name, "Lagos, Lagos, Nigeria");
        assert_eq!(res.features[0].center, [3.39467, 6.45407]);
    }

    #[test]
    fn missing_features_are_empty() {
        let res: GeocodingResponse = serde_json::from_str("{}").unwrap();
        assert!(res.features.is_empty());
    }
}
