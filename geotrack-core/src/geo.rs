/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `None` unless both values are finite and within range.
    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        let pos = Self { lat, lng };
        pos.is_valid().then_some(pos)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub const fn lat(&self) -> f64 {
        self.lat
    }

    pub const fn lng(&self) -> f64 {
        self.lng
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

pub type Zoom = f64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_positions() {
        assert!(MapPoint::try_from_lat_lng_deg(0.0, 0.0).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(90.0, -180.0).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(6.45407, 3.39467).is_some());
    }

    #[test]
    fn invalid_positions() {
        assert!(MapPoint::try_from_lat_lng_deg(90.1, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, 180.5).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(f64::NAN, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn display_with_six_decimals() {
        let pos = MapPoint::new_unchecked(6.5, -0.1234567);
        assert_eq!(pos.to_string(), "6.500000, -0.123457");
    }
}
