use std::marker::PhantomData;

use futures::{future, FutureExt, TryFutureExt};
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError, NoneAsEmptyString};

use crate::constants::REVERSE_GEOCODE_PLACEHOLDER;
use crate::geocoder::{
    fetch_proxy, local_suggestions, GeocodeOperation, GeocoderProvider, GeocoderTransport,
};
use crate::runtime::{Env, EnvFutureExt, TryEnvFuture};
use crate::types::city;
use crate::types::geo::{PlaceSuggestion, Point, RouteInfo};

/// Yandex through the geocoding proxy. Failed suggestion calls fall back
/// to the bundled city list; routes are straight-line estimates since the
/// proxy exposes no Yandex routing operation.
pub struct YandexGeocoder<E: Env> {
    env: PhantomData<E>,
}

impl<E: Env> YandexGeocoder<E> {
    pub fn new() -> Self {
        YandexGeocoder { env: PhantomData }
    }
}

impl<E: Env> Default for YandexGeocoder<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    response: ResponseBody,
}

#[derive(Deserialize)]
struct ResponseBody {
    #[serde(rename = "GeoObjectCollection")]
    geo_object_collection: GeoObjectCollection,
}

#[derive(Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    feature_member: Vec<FeatureMember>,
}

#[derive(Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[serde_as]
#[derive(Deserialize)]
struct GeoObject {
    name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<NoneAsEmptyString>")]
    description: Option<String>,
    #[serde(rename = "Point")]
    point: PosPoint,
}

#[derive(Deserialize)]
struct PosPoint {
    /// `"<lon> <lat>"`
    pos: String,
}

impl PosPoint {
    fn to_point(&self) -> Option<Point> {
        let mut parts = self.pos.split_whitespace();
        let lon = parts.next()?.parse().ok()?;
        let lat = parts.next()?.parse().ok()?;
        Some(Point::new(lat, lon))
    }
}

impl GeoObject {
    fn to_address(&self) -> String {
        match &self.description {
            Some(description) => format!("{}, {}", self.name, description),
            None => self.name.to_owned(),
        }
    }
}

impl<E: Env + 'static> GeocoderTransport for YandexGeocoder<E> {
    fn min_query_len(&self) -> usize {
        3
    }
    fn suggest(&self, query: &str) -> TryEnvFuture<Vec<PlaceSuggestion>> {
        if query.chars().count() < self.min_query_len() {
            return future::ok(vec![]).boxed_env();
        }
        let query = query.to_owned();
        fetch_proxy::<E, GeocodeResponse>(
            GeocoderProvider::Yandex,
            GeocodeOperation::Suggest {
                query: query.to_owned(),
            },
        )
        .map_ok(|response| {
            response
                .response
                .geo_object_collection
                .feature_member
                .into_iter()
                .filter_map(|member| {
                    let point = member.geo_object.point.to_point()?;
                    Some(PlaceSuggestion {
                        name: city::standardize(&member.geo_object.name),
                        description: member.geo_object.description.unwrap_or_default(),
                        point,
                    })
                })
                .collect()
        })
        .or_else(move |_| future::ok(local_suggestions(&query)))
        .boxed_env()
    }
    fn reverse(&self, point: &Point) -> TryEnvFuture<String> {
        fetch_proxy::<E, GeocodeResponse>(
            GeocoderProvider::Yandex,
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
                        .response
                        .geo_object_collection
                        .feature_member
                        .first()
                        .map(|member| member.geo_object.to_address())
                })
                .unwrap_or_else(|| REVERSE_GEOCODE_PLACEHOLDER.to_owned());
            Ok(address)
        })
        .boxed_env()
    }
    fn route(&self, origin: &Point, destination: &Point) -> TryEnvFuture<Option<RouteInfo>> {
        future::ok(Some(RouteInfo::straight_line(origin, destination))).boxed_env()
    }
}
