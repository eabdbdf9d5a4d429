use std::any::Any;

use futures::future;

use crate::models::common::Loadable;
use crate::models::ctx::{Ctx, CtxError, CtxStatus, OtherError};
use crate::models::trip_history::TripHistory;
use crate::runtime::msg::{Action, ActionLoad, Msg};
use crate::runtime::{Effects, EnvFutureExt, Runtime, TryEnvFuture, Update, UpdateWithCtx};
use crate::types::api::{APIRequest, APIResult};
use crate::types::booking::BookingStatus;
use crate::types::search_history::SearchHistoryBucket;
use crate::types::trip::TripSummary;
use crate::unit_tests::{
    authenticated_profile, default_fetch_handler, Request, TestEnv, FETCH_HANDLER, REQUESTS,
};

struct TestModel {
    ctx: Ctx,
    trip_history: TripHistory,
}

impl Update<TestEnv> for TestModel {
    fn update(&mut self, msg: &Msg) -> Effects {
        let ctx_effects = Update::<TestEnv>::update(&mut self.ctx, msg);
        let trip_history_effects =
            UpdateWithCtx::<TestEnv>::update(&mut self.trip_history, msg, &self.ctx);
        ctx_effects.join(trip_history_effects)
    }
}

fn trip_fixture() -> TripSummary {
    TripSummary {
        id: "trip-1".to_owned(),
        from_city: "Ташкент".to_owned(),
        to_city: "Бухара".to_owned(),
        departure_date: "2023-08-20".parse().unwrap(),
        driver_name: "Бахтиёр".to_owned(),
        driver_avatar: None,
        price: 120_000,
        seats: 1,
        status: BookingStatus::Completed,
        completed_at: None,
    }
}

fn fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    match request.url.as_str() {
        "https://api.hamroh.uz/api/tripHistory" => future::ok(Box::new(APIResult::Ok {
            result: vec![trip_fixture()],
        }) as Box<dyn Any + Send>)
        .boxed_env(),
        _ => default_fetch_handler(request),
    }
}

#[test]
fn test_load_trip_history_invokes_the_aggregation_with_the_user_id() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::new(
                authenticated_profile(),
                SearchHistoryBucket::new(Some("user-1".to_owned()), vec![]),
            ),
            trip_history: TripHistory::default(),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Load(ActionLoad::TripHistory));
    });

    let trip_history = runtime.model().unwrap().trip_history.to_owned();
    assert!(
        matches!(&trip_history.trips, Some(Loadable::Ready(trips)) if trips == &vec![trip_fixture()]),
        "Should have loaded the denormalized trip list"
    );
    assert_eq!(
        REQUESTS.read().unwrap().first().map(|request| (
            request.url.to_owned(),
            request.body.to_owned()
        )),
        Some((
            "https://api.hamroh.uz/api/tripHistory".to_owned(),
            serde_json::to_string(&APIRequest::TripHistory {
                user_id: "user-1".to_owned()
            })
            .unwrap(),
        )),
        "Should have invoked the aggregation by name with the user id"
    );
}

#[test]
fn test_load_trip_history_requires_a_logged_in_user() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::default(),
            trip_history: TripHistory::default(),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Load(ActionLoad::TripHistory));
    });

    let trip_history = runtime.model().unwrap().trip_history.to_owned();
    assert!(
        matches!(
            trip_history.trips,
            Some(Loadable::Err(CtxError::Other(OtherError::UserNotLoggedIn)))
        ),
        "Should have failed synchronously"
    );
    assert!(
        REQUESTS.read().unwrap().is_empty(),
        "Should not have issued any request"
    );
}
