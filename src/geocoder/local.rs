use futures::future;
use itertools::Itertools;

use crate::constants::{LOCAL_CITIES, REVERSE_GEOCODE_PLACEHOLDER};
use crate::geocoder::GeocoderTransport;
use crate::runtime::{EnvFutureExt, TryEnvFuture};
use crate::types::city;
use crate::types::geo::{PlaceSuggestion, Point, RouteInfo};

/// Geocoder over the bundled city list. Serves both as a provider on its
/// own and as the offline fallback of the HTTP transports.
#[derive(Default)]
pub struct LocalGeocoder;

/// Bundled cities whose name contains the query, case-insensitively.
pub fn local_suggestions(query: &str) -> Vec<PlaceSuggestion> {
    let needle = city::normalize(query);
    if needle.is_empty() {
        return vec![];
    }
    LOCAL_CITIES
        .iter()
        .filter(|local_city| local_city.name.to_lowercase().contains(&needle))
        .unique_by(|local_city| &local_city.name)
        .map(|local_city| local_city.to_suggestion())
        .collect()
}

impl GeocoderTransport for LocalGeocoder {
    fn min_query_len(&self) -> usize {
        2
    }
    fn suggest(&self, query: &str) -> TryEnvFuture<Vec<PlaceSuggestion>> {
        if query.chars().count() < self.min_query_len() {
            return future::ok(vec![]).boxed_env();
        }
        future::ok(local_suggestions(query)).boxed_env()
    }
    fn reverse(&self, point: &Point) -> TryEnvFuture<String> {
        let address = LOCAL_CITIES
            .iter()
            .min_by(|a, b| {
                a.point
                    .haversine_distance_km(point)
                    .total_cmp(&b.point.haversine_distance_km(point))
            })
            .map(|local_city| format!("{}, Узбекистан", local_city.name))
            .unwrap_or_else(|| REVERSE_GEOCODE_PLACEHOLDER.to_owned());
        future::ok(address).boxed_env()
    }
    fn route(&self, origin: &Point, destination: &Point) -> TryEnvFuture<Option<RouteInfo>> {
        future::ok(Some(RouteInfo::straight_line(origin, destination))).boxed_env()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_local_suggestions_match_substrings_case_insensitively() {
        let suggestions = local_suggestions("таш");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Ташкент");
        assert_eq!(local_suggestions("ТАШ").len(), 1);
        assert!(local_suggestions("xyz").is_empty());
    }

    #[test]
    fn test_local_suggestions_ignore_trailing_qualifiers() {
        let suggestions = local_suggestions("Самарканд, Узбекистан");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Самарканд");
    }
}
