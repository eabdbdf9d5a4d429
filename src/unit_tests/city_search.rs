use std::any::Any;

use futures::future;
use serde_json::json;

use crate::geocoder::{GeocodeOperation, GeocodeProxyRequest, GeocoderProvider};
use crate::models::city_search::{CitySearch, Selected};
use crate::models::common::Loadable;
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionCitySearch, ActionLoad, Msg};
use crate::runtime::{Effects, EnvFutureExt, Runtime, TryEnvFuture, Update, UpdateWithCtx};
use crate::types::geo::Point;
use crate::unit_tests::{
    default_fetch_handler, failing_fetch_handler, Request, TestEnv, FETCH_HANDLER, REQUESTS,
};

struct TestModel {
    ctx: Ctx,
    city_search: CitySearch,
}

impl Update<TestEnv> for TestModel {
    fn update(&mut self, msg: &Msg) -> Effects {
        let ctx_effects = Update::<TestEnv>::update(&mut self.ctx, msg);
        let city_search_effects =
            UpdateWithCtx::<TestEnv>::update(&mut self.city_search, msg, &self.ctx);
        ctx_effects.join(city_search_effects)
    }
}

fn new_runtime() -> (
    Runtime<TestEnv, TestModel>,
    futures::channel::mpsc::Receiver<crate::runtime::RuntimeEvent>,
) {
    Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::default(),
            city_search: CitySearch::default(),
        },
        Effects::none().unchanged(),
        1000,
    )
}

fn google_fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    match request.url.as_str() {
        "https://functions.hamroh.uz/geocode/google" => future::ok(Box::new(json!({
            "results": [
                {
                    "name": "Tashkent",
                    "formatted_address": "Tashkent, Uzbekistan",
                    "geometry": { "location": { "lat": 41.2995, "lng": 69.2401 } }
                }
            ],
            "status": "OK"
        })) as Box<dyn Any + Send>)
        .boxed_env(),
        _ => default_fetch_handler(request),
    }
}

#[test]
fn test_short_queries_resolve_empty_without_a_network_call() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = new_runtime();
    TestEnv::run(|| {
        runtime.dispatch(Action::Load(ActionLoad::CitySearch(Selected {
            provider: GeocoderProvider::Google,
        })));
        runtime.dispatch(Action::CitySearch(ActionCitySearch::Search {
            search_query: "та".to_owned(),
        }));
    });

    let city_search = runtime.model().unwrap().city_search.to_owned();
    assert!(
        matches!(city_search.suggestions, Some(Loadable::Ready(suggestions)) if suggestions.is_empty()),
        "Should have resolved to an empty list"
    );
    assert!(
        REQUESTS.read().unwrap().is_empty(),
        "Should not have issued any request"
    );
}

#[test]
fn test_google_suggestions_are_normalized_to_the_common_shape() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(google_fetch_handler);

    let (runtime, _rx) = new_runtime();
    TestEnv::run(|| {
        runtime.dispatch(Action::Load(ActionLoad::CitySearch(Selected {
            provider: GeocoderProvider::Google,
        })));
        runtime.dispatch(Action::CitySearch(ActionCitySearch::Search {
            search_query: "Tashkent".to_owned(),
        }));
    });

    let city_search = runtime.model().unwrap().city_search.to_owned();
    let suggestions = match &city_search.suggestions {
        Some(Loadable::Ready(suggestions)) => suggestions.to_owned(),
        suggestions => panic!("Unexpected suggestions state: {suggestions:?}"),
    };
    assert_eq!(suggestions.len(), 1);
    assert_eq!(
        suggestions[0].name, "Ташкент",
        "Should have standardized the city name"
    );
    assert_eq!(suggestions[0].description, "Tashkent, Uzbekistan");
    assert_eq!(suggestions[0].point, Point::new(41.2995, 69.2401));
    assert_eq!(
        REQUESTS.read().unwrap().first().map(|request| (
            request.url.to_owned(),
            request.body.to_owned()
        )),
        Some((
            "https://functions.hamroh.uz/geocode/google".to_owned(),
            serde_json::to_string(&GeocodeProxyRequest {
                service: GeocoderProvider::Google,
                operation: GeocodeOperation::Suggest {
                    query: "Tashkent".to_owned()
                },
            })
            .unwrap(),
        )),
        "Should have called the proxy with the provider and the operation"
    );
}

#[test]
fn test_failed_google_suggestions_resolve_empty() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(failing_fetch_handler);

    let (runtime, _rx) = new_runtime();
    TestEnv::run(|| {
        runtime.dispatch(Action::Load(ActionLoad::CitySearch(Selected {
            provider: GeocoderProvider::Google,
        })));
        runtime.dispatch(Action::CitySearch(ActionCitySearch::Search {
            search_query: "Tashkent".to_owned(),
        }));
    });

    let city_search = runtime.model().unwrap().city_search.to_owned();
    assert!(
        matches!(city_search.suggestions, Some(Loadable::Ready(suggestions)) if suggestions.is_empty()),
        "Should have resolved to an empty list"
    );
}

#[test]
fn test_failed_dgis_suggestions_fall_back_to_the_bundled_cities() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(failing_fetch_handler);

    let (runtime, _rx) = new_runtime();
    TestEnv::run(|| {
        runtime.dispatch(Action::Load(ActionLoad::CitySearch(Selected {
            provider: GeocoderProvider::DGis,
        })));
        runtime.dispatch(Action::CitySearch(ActionCitySearch::Search {
            search_query: "Самар".to_owned(),
        }));
    });

    let city_search = runtime.model().unwrap().city_search.to_owned();
    let suggestions = match &city_search.suggestions {
        Some(Loadable::Ready(suggestions)) => suggestions.to_owned(),
        suggestions => panic!("Unexpected suggestions state: {suggestions:?}"),
    };
    assert_eq!(suggestions.len(), 1);
    assert_eq!(
        suggestions[0].name, "Самарканд",
        "Should have fallen back to the bundled city list"
    );
}
