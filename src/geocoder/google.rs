use std::marker::PhantomData;

use futures::{future, FutureExt, TryFutureExt};
use serde::Deserialize;

use crate::constants::REVERSE_GEOCODE_PLACEHOLDER;
use crate::geocoder::{fetch_proxy, GeocodeOperation, GeocoderProvider, GeocoderTransport};
use crate::runtime::{Env, EnvFutureExt, TryEnvFuture};
use crate::types::city;
use crate::types::geo::{PlaceSuggestion, Point, RouteInfo};

/// Google through the geocoding proxy. Failed suggestion calls resolve to
/// an empty list, failed route calls to `None`; there is no local
/// fallback for this provider.
pub struct GoogleGeocoder<E: Env> {
    env: PhantomData<E>,
}

impl<E: Env> GoogleGeocoder<E> {
    pub fn new() -> Self {
        GoogleGeocoder { env: PhantomData }
    }
}

impl<E: Env> Default for GoogleGeocoder<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Deserialize)]
struct Place {
    #[serde(default)]
    name: String,
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    results: Vec<ReverseResult>,
}

#[derive(Deserialize)]
struct ReverseResult {
    formatted_address: String,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    legs: Vec<Leg>,
}

#[derive(Deserialize)]
struct Leg {
    distance: ValueField,
    duration: ValueField,
}

#[derive(Deserialize)]
struct ValueField {
    /// meters for distances, seconds for durations
    value: u64,
}

impl<E: Env + 'static> GeocoderTransport for GoogleGeocoder<E> {
    fn min_query_len(&self) -> usize {
        3
    }
    fn suggest(&self, query: &str) -> TryEnvFuture<Vec<PlaceSuggestion>> {
        if query.chars().count() < self.min_query_len() {
            return future::ok(vec![]).boxed_env();
        }
        fetch_proxy::<E, SearchResponse>(
            GeocoderProvider::Google,
            GeocodeOperation::Suggest {
                query: query.to_owned(),
            },
        )
        .map_ok(|response| {
            response
                .results
                .into_iter()
                .map(|place| {
                    let name = if place.name.is_empty() {
                        place.formatted_address.to_owned()
                    } else {
                        place.name
                    };
                    PlaceSuggestion {
                        name: city::standardize(&name),
                        description: place.formatted_address,
                        point: Point::new(place.geometry.location.lat, place.geometry.location.lng),
                    }
                })
                .collect()
        })
        .or_else(|_| future::ok(vec![]))
        .boxed_env()
    }
    fn reverse(&self, point: &Point) -> TryEnvFuture<String> {
        fetch_proxy::<E, ReverseResponse>(
            GeocoderProvider::Google,
            GeocodeOperation::Reverse {
                lat: point.lat,
                lng: point.lon,
            },
        )
        .map(|result| {
            let address = result
                .ok()
                .and_then(|response| {
                    response
                        .results
                        .into_iter()
                        .next()
                        .map(|result| result.formatted_address)
                })
                .unwrap_or_else(|| REVERSE_GEOCODE_PLACEHOLDER.to_owned());
            Ok(address)
        })
        .boxed_env()
    }
    fn route(&self, origin: &Point, destination: &Point) -> TryEnvFuture<Option<RouteInfo>> {
        let (origin, destination) = (origin.to_owned(), destination.to_owned());
        fetch_proxy::<E, DirectionsResponse>(
            GeocoderProvider::Google,
            GeocodeOperation::Route {
                origin,
                destination,
            },
        )
        .map(move |result| {
            let route = result.ok().and_then(|response| {
                response.routes.into_iter().next().map(|route| {
                    let meters = route.legs.iter().map(|leg| leg.distance.value).sum::<u64>();
                    let seconds = route.legs.iter().map(|leg| leg.duration.value).sum::<u64>();
                    RouteInfo {
                        distance_km: meters as f64 / 1000.0,
                        duration_min: (seconds as f64 / 60.0).round() as u32,
                        points: vec![origin, destination],
                    }
                })
            });
            Ok(route)
        })
        .boxed_env()
    }
}
