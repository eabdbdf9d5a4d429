use std::any::Any;

use futures::future;

use crate::models::ctx::{Ctx, CtxStatus};
use crate::runtime::msg::{Action, ActionCtx};
use crate::runtime::{Effects, EnvFutureExt, Runtime, TryEnvFuture};
use crate::types::api::{APIError, APIResult, SuccessResponse};
use crate::types::preferences::{
    NotificationPreferences, NotificationPreferencesPatch, ThemeMode, ThemePreferences,
    ThemePreferencesPatch,
};
use crate::types::search_history::SearchHistoryBucket;
use crate::unit_tests::ctx::TestModel;
use crate::unit_tests::{
    authenticated_profile, default_fetch_handler, Request, TestEnv, FETCH_HANDLER, REQUESTS,
};

fn pull_fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    match request.url.as_str() {
        "https://api.hamroh.uz/api/notificationPreferencesGet" => {
            future::ok(Box::new(APIResult::Ok {
                result: Option::<NotificationPreferences>::None,
            }) as Box<dyn Any + Send>)
            .boxed_env()
        }
        "https://api.hamroh.uz/api/themePreferencesGet" => {
            future::ok(Box::new(APIResult::Ok {
                result: Option::<ThemePreferences>::None,
            }) as Box<dyn Any + Send>)
            .boxed_env()
        }
        "https://api.hamroh.uz/api/notificationPreferencesSet"
        | "https://api.hamroh.uz/api/themePreferencesSet" => {
            future::ok(Box::new(APIResult::Ok {
                result: SuccessResponse { success: true },
            }) as Box<dyn Any + Send>)
            .boxed_env()
        }
        _ => default_fetch_handler(request),
    }
}

fn failing_set_fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    match request.url.as_str() {
        "https://api.hamroh.uz/api/notificationPreferencesSet"
        | "https://api.hamroh.uz/api/themePreferencesSet" => {
            future::ok(Box::new(APIResult::<SuccessResponse>::Err {
                error: APIError {
                    message: "row level security violation".to_owned(),
                    code: 42501,
                },
            }) as Box<dyn Any + Send>)
            .boxed_env()
        }
        _ => default_fetch_handler(request),
    }
}

fn preloaded_ctx() -> Ctx {
    Ctx {
        profile: authenticated_profile(),
        search_history: SearchHistoryBucket::new(Some("user-1".to_owned()), vec![]),
        notification_preferences: Some(NotificationPreferences::default_with_consent(true)),
        theme_preferences: Some(ThemePreferences {
            mode: ThemeMode::Light,
        }),
        status: CtxStatus::Ready,
    }
}

#[test]
fn test_pull_preferences_synthesizes_and_persists_missing_rows() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(pull_fetch_handler);

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::new(
                authenticated_profile(),
                SearchHistoryBucket::new(Some("user-1".to_owned()), vec![]),
            ),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::PullPreferencesFromAPI));
    });

    let ctx = runtime.model().unwrap().ctx.to_owned();
    assert_eq!(
        ctx.notification_preferences,
        // the profile fixture has marketing consent given
        Some(NotificationPreferences::default_with_consent(true)),
        "Should have synthesized the notification default"
    );
    assert_eq!(
        ctx.theme_preferences,
        Some(ThemePreferences::default()),
        "Should have synthesized the theme default"
    );
    let set_requests = REQUESTS
        .read()
        .unwrap()
        .iter()
        .filter(|request| request.url.ends_with("PreferencesSet"))
        .count();
    assert_eq!(set_requests, 2, "Should have persisted both defaults");
}

#[test]
fn test_update_preferences_is_optimistic_on_success() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(pull_fetch_handler);

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: preloaded_ctx(),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::UpdateNotificationPreferences(
            NotificationPreferencesPatch {
                ride_updates: Some(false),
                chat_messages: None,
            },
        )));
        runtime.dispatch(Action::Ctx(ActionCtx::UpdateThemePreferences(
            ThemePreferencesPatch {
                mode: Some(ThemeMode::Dark),
            },
        )));
    });

    let ctx = runtime.model().unwrap().ctx.to_owned();
    assert_eq!(
        ctx.notification_preferences.map(|preferences| (
            preferences.ride_updates,
            preferences.chat_messages
        )),
        Some((false, true)),
        "Should have applied the partial patch"
    );
    assert_eq!(
        ctx.theme_preferences.map(|preferences| preferences.mode),
        Some(ThemeMode::Dark),
        "Should have applied the theme patch"
    );
}

#[test]
fn test_update_preferences_rolls_back_on_failed_push() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(failing_set_fetch_handler);

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: preloaded_ctx(),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::UpdateThemePreferences(
            ThemePreferencesPatch {
                mode: Some(ThemeMode::Dark),
            },
        )));
        runtime.dispatch(Action::Ctx(ActionCtx::UpdateNotificationPreferences(
            NotificationPreferencesPatch {
                ride_updates: Some(false),
                chat_messages: None,
            },
        )));
    });

    let ctx = runtime.model().unwrap().ctx.to_owned();
    assert_eq!(
        ctx.theme_preferences.map(|preferences| preferences.mode),
        Some(ThemeMode::Light),
        "Should have restored the previously displayed theme"
    );
    assert_eq!(
        ctx.notification_preferences,
        Some(NotificationPreferences::default_with_consent(true)),
        "Should have restored the previously displayed notification settings"
    );
}

#[test]
fn test_update_preferences_requires_a_logged_in_user() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::default(),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::PullPreferencesFromAPI));
        runtime.dispatch(Action::Ctx(ActionCtx::UpdateThemePreferences(
            ThemePreferencesPatch {
                mode: Some(ThemeMode::Dark),
            },
        )));
    });

    assert!(
        REQUESTS.read().unwrap().is_empty(),
        "Should not have issued any request"
    );
    assert!(
        runtime.model().unwrap().ctx.theme_preferences.is_none(),
        "Should not have mutated anything"
    );
}
