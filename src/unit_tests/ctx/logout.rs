use std::any::Any;

use chrono::Utc;
use futures::future;

use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionCtx};
use crate::runtime::{Effects, EnvFutureExt, Runtime, TryEnvFuture};
use crate::types::api::{APIResult, SuccessResponse};
use crate::types::search_history::{SearchHistoryBucket, SearchHistoryItem, SearchQuery};
use crate::unit_tests::ctx::TestModel;
use crate::unit_tests::{
    authenticated_profile, default_fetch_handler, Request, TestEnv, FETCH_HANDLER, REQUESTS,
    STORAGE,
};

fn fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    match request.url.as_str() {
        "https://api.hamroh.uz/api/logout" => future::ok(Box::new(APIResult::Ok {
            result: SuccessResponse { success: true },
        }) as Box<dyn Any + Send>)
        .boxed_env(),
        _ => default_fetch_handler(request),
    }
}

#[test]
fn test_logout_resets_to_guest_but_keeps_the_user_history_persisted() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);

    let user_history = SearchHistoryBucket::new(
        Some("user-1".to_owned()),
        vec![SearchHistoryItem::new(
            SearchQuery {
                from_city: "Ташкент".to_owned(),
                to_city: "Самарканд".to_owned(),
                departure_date: None,
            },
            Utc::now(),
        )],
    );
    STORAGE.write().unwrap().insert(
        user_history.storage_key(),
        serde_json::to_string(&user_history).unwrap(),
    );

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::new(authenticated_profile(), user_history),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::Logout));
    });

    let ctx = runtime.model().unwrap().ctx.to_owned();
    assert_eq!(ctx.profile.auth, None, "Should have logged out");
    assert_eq!(
        ctx.search_history,
        SearchHistoryBucket::default(),
        "Should have reset the in-memory history to the guest bucket"
    );
    assert!(
        ctx.notification_preferences.is_none() && ctx.theme_preferences.is_none(),
        "Should have dropped the preference records"
    );
    assert!(
        REQUESTS
            .read()
            .unwrap()
            .iter()
            .any(|request| request.url == "https://api.hamroh.uz/api/logout"),
        "Should have deleted the session"
    );
    assert!(
        STORAGE
            .read()
            .unwrap()
            .contains_key("search_history_user-1"),
        "Should keep the persisted history of the user for the next session"
    );
}
