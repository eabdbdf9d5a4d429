use http::Request;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::constants::GEOCODE_PROXY_URL;
use crate::runtime::{ConditionalSend, Env, TryEnvFuture};
use crate::types::geo::{PlaceSuggestion, Point, RouteInfo};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Debug)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GeocoderProvider {
    Google,
    Yandex,
    #[serde(rename = "2gis")]
    #[strum(serialize = "2gis")]
    DGis,
    /// The bundled city list, no network at all
    Local,
}

/// Body of a geocoding proxy call. The proxy resolves the provider API key
/// server-side and returns the raw provider JSON unchanged.
#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeProxyRequest {
    pub service: GeocoderProvider,
    #[serde(flatten)]
    pub operation: GeocodeOperation,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum GeocodeOperation {
    Suggest {
        query: String,
    },
    Reverse {
        lat: f64,
        lng: f64,
    },
    Route {
        origin: Point,
        destination: Point,
    },
}

/// One geocoding provider. Implementations are independent: each call is a
/// fresh, uncoordinated round trip with no retry, caching or
/// de-duplication, and failure behavior is deliberately per-provider.
pub trait GeocoderTransport {
    /// Queries shorter than this resolve to an empty suggestion list
    /// without any network call.
    fn min_query_len(&self) -> usize;
    fn suggest(&self, query: &str) -> TryEnvFuture<Vec<PlaceSuggestion>>;
    /// Best-effort human-readable address, a fixed placeholder on any
    /// failure. Never resolves to an error.
    fn reverse(&self, point: &Point) -> TryEnvFuture<String>;
    /// `None` when no route could be produced.
    fn route(&self, origin: &Point, destination: &Point) -> TryEnvFuture<Option<RouteInfo>>;
}

pub(crate) fn fetch_proxy<
    E: Env,
    OUT: for<'de> Deserialize<'de> + ConditionalSend + 'static,
>(
    service: GeocoderProvider,
    operation: GeocodeOperation,
) -> TryEnvFuture<OUT> {
    let url = GEOCODE_PROXY_URL
        .join(&service.to_string())
        .expect("url builder failed");
    let request = Request::post(url.as_str())
        .body(GeocodeProxyRequest { service, operation })
        .expect("request builder failed");
    E::fetch(request)
}
