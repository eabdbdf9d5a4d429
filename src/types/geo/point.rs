use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Point { lat, lon }
    }
    /// Great-circle distance to `other` in kilometers, haversine formula.
    pub fn haversine_distance_km(&self, other: &Point) -> f64 {
        let lat_from = self.lat.to_radians();
        let lat_to = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();
        let a = (delta_lat / 2.0).sin().powi(2)
            + lat_from.cos() * lat_to.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_haversine_distance_of_known_pairs() {
        let tashkent = Point::new(41.2995, 69.2401);
        let samarkand = Point::new(39.6542, 66.9597);
        let distance = tashkent.haversine_distance_km(&samarkand);
        // straight-line distance between the two cities is ~266 km
        assert!(
            (distance - 265.8).abs() < 1.0,
            "unexpected distance: {distance}"
        );
    }

    #[test]
    fn test_haversine_distance_is_symmetric_and_zero_on_self() {
        let nukus = Point::new(42.4731, 59.6103);
        let termez = Point::new(37.2242, 67.2783);
        assert_eq!(
            nukus.haversine_distance_km(&termez),
            termez.haversine_distance_km(&nukus)
        );
        assert_eq!(nukus.haversine_distance_km(&nukus), 0.0);
    }
}
