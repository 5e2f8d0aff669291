use std::cell::RefCell;

use async_trait::async_trait;

use geotrack_boundary::{GeocodingResponse, IpLookupResponse};

use crate::gateways::*;

pub struct MockIpLookup {
    response: Result<IpLookupResponse, FetchError>,
    requests: RefCell<Vec<Option<String>>>,
}

impl MockIpLookup {
    pub fn responding(response: IpLookupResponse) -> Self {
        Self {
            response: Ok(response),
            requests: RefCell::default(),
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            response: Err(err),
            requests: RefCell::default(),
        }
    }

    pub fn requests(&self) -> Vec<Option<String>> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl IpLookupGateway for MockIpLookup {
    async fn lookup(&self, ip: Option<&str>) -> Result<IpLookupResponse, FetchError> {
        self.requests.borrow_mut().push(ip.map(ToString::to_string));
        self.response.clone()
    }
}

pub struct MockGeocoding {
    response: Result<GeocodingResponse, FetchError>,
    requests: RefCell<Vec<String>>,
}

impl MockGeocoding {
    pub fn responding(response: GeocodingResponse) -> Self {
        Self {
            response: Ok(response),
            requests: RefCell::default(),
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            response: Err(err),
            requests: RefCell::default(),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl GeocodingGateway for MockGeocoding {
    async fn forward(&self, text: &str) -> Result<GeocodingResponse, FetchError> {
        self.requests.borrow_mut().push(text.to_string());
        self.response.clone()
    }
}
