use std::any::Any;

use futures::future;
use serde_json::json;

use crate::constants::ASSUMED_AVERAGE_SPEED_KMH;
use crate::geocoder::GeocoderProvider;
use crate::models::common::Loadable;
use crate::models::ctx::Ctx;
use crate::models::route_planner::{RoutePlanner, Selected};
use crate::runtime::msg::{Action, ActionLoad, ActionRoutePlanner, Msg};
use crate::runtime::{Effects, EnvFutureExt, Runtime, TryEnvFuture, Update, UpdateWithCtx};
use crate::types::geo::Point;
use crate::unit_tests::{default_fetch_handler, Request, TestEnv, FETCH_HANDLER, REQUESTS};

struct TestModel {
    ctx: Ctx,
    route_planner: RoutePlanner,
}

impl Update<TestEnv> for TestModel {
    fn update(&mut self, msg: &Msg) -> Effects {
        let ctx_effects = Update::<TestEnv>::update(&mut self.ctx, msg);
        let route_planner_effects =
            UpdateWithCtx::<TestEnv>::update(&mut self.route_planner, msg, &self.ctx);
        ctx_effects.join(route_planner_effects)
    }
}

fn new_runtime() -> (
    Runtime<TestEnv, TestModel>,
    futures::channel::mpsc::Receiver<crate::runtime::RuntimeEvent>,
) {
    Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::default(),
            route_planner: RoutePlanner::default(),
        },
        Effects::none().unchanged(),
        1000,
    )
}

fn tashkent() -> Point {
    Point::new(41.2995, 69.2401)
}

fn samarkand() -> Point {
    Point::new(39.6542, 66.9597)
}

#[test]
fn test_yandex_routes_are_straight_line_estimates() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = new_runtime();
    TestEnv::run(|| {
        runtime.dispatch(Action::Load(ActionLoad::RoutePlanner(Selected {
            provider: GeocoderProvider::Yandex,
            origin: tashkent(),
            destination: samarkand(),
        })));
    });

    let route_planner = runtime.model().unwrap().route_planner.to_owned();
    let route = match &route_planner.route {
        Some(Loadable::Ready(Some(route))) => route.to_owned(),
        route => panic!("Unexpected route state: {route:?}"),
    };
    assert!(
        (route.distance_km - 265.8).abs() < 1.0,
        "Should be close to the great-circle distance, got {}",
        route.distance_km
    );
    assert_eq!(
        route.duration_min,
        (route.distance_km / ASSUMED_AVERAGE_SPEED_KMH * 60.0).round() as u32,
        "Duration should be derived from the assumed average speed"
    );
    assert_eq!(route.points, vec![tashkent(), samarkand()]);
    assert!(
        REQUESTS.read().unwrap().is_empty(),
        "Should not have issued any request"
    );
}

fn google_route_fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    match request.url.as_str() {
        "https://functions.hamroh.uz/geocode/google" => future::ok(Box::new(json!({
            "routes": [
                {
                    "legs": [
                        { "distance": { "value": 280_000 }, "duration": { "value": 14_400 } }
                    ]
                }
            ]
        })) as Box<dyn Any + Send>)
        .boxed_env(),
        _ => default_fetch_handler(request),
    }
}

#[test]
fn test_google_routes_use_the_provider_distance_and_duration() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(google_route_fetch_handler);

    let (runtime, _rx) = new_runtime();
    TestEnv::run(|| {
        runtime.dispatch(Action::Load(ActionLoad::RoutePlanner(Selected {
            provider: GeocoderProvider::Google,
            origin: tashkent(),
            destination: samarkand(),
        })));
    });

    let route_planner = runtime.model().unwrap().route_planner.to_owned();
    let route = match &route_planner.route {
        Some(Loadable::Ready(Some(route))) => route.to_owned(),
        route => panic!("Unexpected route state: {route:?}"),
    };
    assert_eq!(route.distance_km, 280.0);
    assert_eq!(route.duration_min, 240);
}

#[test]
fn test_locate_resolves_the_device_position_to_an_address() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = new_runtime();
    TestEnv::run(|| {
        runtime.dispatch(Action::RoutePlanner(ActionRoutePlanner::Locate {
            provider: GeocoderProvider::Local,
        }));
    });

    let route_planner = runtime.model().unwrap().route_planner.to_owned();
    assert_eq!(route_planner.current_location, Some(tashkent()));
    assert_eq!(
        route_planner.resolved_address.as_deref(),
        Some("Ташкент, Узбекистан"),
        "Should have resolved the nearest bundled city"
    );
}
