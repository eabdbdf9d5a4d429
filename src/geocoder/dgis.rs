use std::marker::PhantomData;

use futures::{future, FutureExt, TryFutureExt};
use serde::Deserialize;

use crate::constants::REVERSE_GEOCODE_PLACEHOLDER;
use crate::geocoder::{
    fetch_proxy, local_suggestions, GeocodeOperation, GeocoderProvider, GeocoderTransport,
};
use crate::runtime::{Env, EnvFutureExt, TryEnvFuture};
use crate::types::city;
use crate::types::geo::{PlaceSuggestion, Point, RouteInfo};

/// 2GIS through the geocoding proxy. Failed suggestion calls fall back to
/// the bundled city list; routes are straight-line estimates since the
/// proxy exposes no 2GIS routing operation.
pub struct DGisGeocoder<E: Env> {
    env: PhantomData<E>,
}

impl<E: Env> DGisGeocoder<E> {
    pub fn new() -> Self {
        DGisGeocoder { env: PhantomData }
    }
}

impl<E: Env> Default for DGisGeocoder<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct ItemsResponse {
    #[serde(default)]
    result: Option<ItemsResult>,
}

#[derive(Deserialize)]
struct ItemsResult {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct Item {
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    point: Option<ItemPoint>,
}

#[derive(Deserialize)]
struct ItemPoint {
    lat: f64,
    lon: f64,
}

impl<E: Env + 'static> GeocoderTransport for DGisGeocoder<E> {
    fn min_query_len(&self) -> usize {
        2
    }
    fn suggest(&self, query: &str) -> TryEnvFuture<Vec<PlaceSuggestion>> {
        if query.chars().count() < self.min_query_len() {
            return future::ok(vec![]).boxed_env();
        }
        let query = query.to_owned();
        fetch_proxy::<E, ItemsResponse>(
            GeocoderProvider::DGis,
            GeocodeOperation::Suggest {
                query: query.to_owned(),
            },
        )
        .map_ok(|response| {
            response
                .result
                .map(|result| result.items)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|item| {
                    let point = item.point?;
                    Some(PlaceSuggestion {
                        name: city::standardize(&item.name),
                        description: item.full_name.unwrap_or_default(),
                        point: Point::new(point.lat, point.lon),
                    })
                })
                .collect()
        })
        .or_else(move |_| future::ok(local_suggestions(&query)))
        .boxed_env()
    }
    fn reverse(&self, point: &Point) -> TryEnvFuture<String> {
        fetch_proxy::<E, ItemsResponse>(
            GeocoderProvider::DGis,
            GeocodeOperation::Reverse {
                lat: point.lat,
                lng: point.lon,
            },
        )
        .map(|result| {
            let address = result
                .ok()
                .and_then(|response| response.result)
                .and_then(|result| result.items.into_iter().next())
                .map(|item| item.full_name.unwrap_or(item.name))
                .unwrap_or_else(|| REVERSE_GEOCODE_PLACEHOLDER.to_owned());
            Ok(address)
        })
        .boxed_env()
    }
    fn route(&self, origin: &Point, destination: &Point) -> TryEnvFuture<Option<RouteInfo>> {
        future::ok(Some(RouteInfo::straight_line(origin, destination))).boxed_env()
    }
}
