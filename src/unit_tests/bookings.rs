use std::any::Any;

use futures::future;

use crate::models::bookings::Bookings;
use crate::models::common::Loadable;
use crate::models::ctx::{Ctx, CtxStatus};
use crate::runtime::msg::{Action, ActionBookings, ActionLoad, Msg};
use crate::runtime::{Effects, EnvFutureExt, Runtime, TryEnvFuture, Update, UpdateWithCtx};
use crate::types::api::{APIError, APIResult, SuccessResponse};
use crate::types::booking::BookingStatus;
use crate::types::search_history::SearchHistoryBucket;
use crate::unit_tests::{
    authenticated_profile, default_booking, default_fetch_handler, Request, TestEnv,
    FETCH_HANDLER, REQUESTS,
};

struct TestModel {
    ctx: Ctx,
    bookings: Bookings,
}

impl Update<TestEnv> for TestModel {
    fn update(&mut self, msg: &Msg) -> Effects {
        let ctx_effects = Update::<TestEnv>::update(&mut self.ctx, msg);
        let bookings_effects =
            UpdateWithCtx::<TestEnv>::update(&mut self.bookings, msg, &self.ctx);
        ctx_effects.join(bookings_effects)
    }
}

fn new_runtime(bookings: Bookings) -> (
    Runtime<TestEnv, TestModel>,
    futures::channel::mpsc::Receiver<crate::runtime::RuntimeEvent>,
) {
    Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx {
                profile: authenticated_profile(),
                search_history: SearchHistoryBucket::new(Some("user-1".to_owned()), vec![]),
                notification_preferences: None,
                theme_preferences: None,
                status: CtxStatus::Ready,
            },
            bookings,
        },
        Effects::none().unchanged(),
        1000,
    )
}

fn preloaded_bookings(status: BookingStatus) -> Bookings {
    Bookings {
        bookings: Some(Loadable::Ready(vec![default_booking(status)])),
    }
}

fn success_fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    match request.url.as_str() {
        "https://api.hamroh.uz/api/bookingStatusSet" => future::ok(Box::new(APIResult::Ok {
            result: SuccessResponse { success: true },
        }) as Box<dyn Any + Send>)
        .boxed_env(),
        _ => default_fetch_handler(request),
    }
}

fn failing_set_fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    match request.url.as_str() {
        "https://api.hamroh.uz/api/bookingStatusSet" => {
            future::ok(Box::new(APIResult::<SuccessResponse>::Err {
                error: APIError {
                    message: "booking is already closed".to_owned(),
                    code: 409,
                },
            }) as Box<dyn Any + Send>)
            .boxed_env()
        }
        _ => default_fetch_handler(request),
    }
}

fn model_status(runtime: &Runtime<TestEnv, TestModel>) -> Option<BookingStatus> {
    runtime
        .model()
        .unwrap()
        .bookings
        .bookings
        .as_ref()
        .and_then(|bookings| bookings.ready())
        .and_then(|bookings| bookings.first())
        .map(|booking| booking.status)
}

#[test]
fn test_load_bookings_pulls_the_list_of_the_user() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(|request: Request| match request.url.as_str() {
        "https://api.hamroh.uz/api/bookingsGet" => future::ok(Box::new(APIResult::Ok {
            result: vec![default_booking(BookingStatus::Pending)],
        }) as Box<dyn Any + Send>)
        .boxed_env(),
        _ => default_fetch_handler(request),
    });

    let (runtime, _rx) = new_runtime(Bookings::default());
    TestEnv::run(|| {
        runtime.dispatch(Action::Load(ActionLoad::Bookings));
    });

    assert_eq!(
        model_status(&runtime),
        Some(BookingStatus::Pending),
        "Should have loaded the bookings"
    );
}

#[test]
fn test_invalid_status_transitions_are_rejected_without_a_network_call() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = new_runtime(preloaded_bookings(BookingStatus::Completed));
    TestEnv::run(|| {
        runtime.dispatch(Action::Bookings(ActionBookings::UpdateStatus {
            id: "booking-1".to_owned(),
            status: BookingStatus::Cancelled,
        }));
    });

    assert_eq!(
        model_status(&runtime),
        Some(BookingStatus::Completed),
        "Should have left the booking untouched"
    );
    assert!(
        REQUESTS.read().unwrap().is_empty(),
        "Should not have issued any request"
    );
}

#[test]
fn test_valid_status_transitions_are_optimistic() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(success_fetch_handler);

    let (runtime, _rx) = new_runtime(preloaded_bookings(BookingStatus::Pending));
    TestEnv::run(|| {
        runtime.dispatch(Action::Bookings(ActionBookings::UpdateStatus {
            id: "booking-1".to_owned(),
            status: BookingStatus::Confirmed,
        }));
    });

    assert_eq!(
        model_status(&runtime),
        Some(BookingStatus::Confirmed),
        "Should have applied the transition"
    );
    assert_eq!(
        REQUESTS.read().unwrap().len(),
        1,
        "Should have pushed the status change"
    );
}

#[test]
fn test_failed_status_pushes_are_rolled_back() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(failing_set_fetch_handler);

    let (runtime, _rx) = new_runtime(preloaded_bookings(BookingStatus::Pending));
    TestEnv::run(|| {
        runtime.dispatch(Action::Bookings(ActionBookings::UpdateStatus {
            id: "booking-1".to_owned(),
            status: BookingStatus::Confirmed,
        }));
    });

    assert_eq!(
        model_status(&runtime),
        Some(BookingStatus::Pending),
        "Should have restored the previous status"
    );
}
