use serde::{Deserialize, Serialize};

use crate::constants::ASSUMED_AVERAGE_SPEED_KMH;
use crate::types::geo::Point;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub distance_km: f64,
    pub duration_min: u32,
    /// Polyline of the route. For straight-line estimates this is just the
    /// origin and the destination.
    pub points: Vec<Point>,
}

impl RouteInfo {
    /// Straight-line estimate between two points: great-circle distance and
    /// a duration derived from an assumed constant average speed.
    pub fn straight_line(origin: &Point, destination: &Point) -> Self {
        let distance_km = origin.haversine_distance_km(destination);
        let duration_min = (distance_km / ASSUMED_AVERAGE_SPEED_KMH * 60.0).round() as u32;
        RouteInfo {
            distance_km,
            duration_min,
            points: vec![origin.to_owned(), destination.to_owned()],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_straight_line_duration_follows_assumed_speed() {
        let origin = Point::new(41.2995, 69.2401);
        let destination = Point::new(39.6542, 66.9597);
        let route = RouteInfo::straight_line(&origin, &destination);
        assert_eq!(
            route.duration_min,
            (route.distance_km / ASSUMED_AVERAGE_SPEED_KMH * 60.0).round() as u32
        );
        assert_eq!(route.points, vec![origin, destination]);
    }
}
