use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const IP_LOOKUP_BASE_URL: &str = "https://ipapi.co";
pub const GEOCODING_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

pub const DEFAULT_GEOCODING_COUNTRY: &str = "ng";
pub const DEFAULT_GEOCODING_LIMIT: u32 = 1;

// Characters left untouched by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// IPv4 and IPv6 addresses pass unchanged.
const IP_PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b':');

/// URL of the IP lookup endpoint.
///
/// Without an address the service resolves the caller's own IP.
#[must_use]
pub fn ip_lookup_url(base_url: &str, ip: Option<&str>) -> String {
    let base_url = base_url.trim_end_matches('/');
    match ip {
        Some(ip) => {
            let ip = utf8_percent_encode(ip, IP_PATH_SEGMENT);
            format!("{base_url}/{ip}/json")
        }
        None => format!("{base_url}/json"),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GeocodingQuery<'a> {
    pub text: &'a str,
    pub access_token: &'a str,
    pub limit: u32,
    pub country: &'a str,
}

/// URL of the forward geocoding endpoint.
#[must_use]
pub fn geocoding_url(base_url: &str, query: &GeocodingQuery) -> String {
    let GeocodingQuery {
        text,
        access_token,
        limit,
        country,
    } = query;
    let base_url = base_url.trim_end_matches('/');
    let text = utf8_percent_encode(text, URI_COMPONENT);
    let access_token = utf8_percent_encode(access_token, URI_COMPONENT);
    let country = utf8_percent_encode(country, URI_COMPONENT);
    format!("{base_url}/{text}.json?access_token={access_token}&limit={limit}&country={country}")
}
