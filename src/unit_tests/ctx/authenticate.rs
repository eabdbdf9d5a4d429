use std::any::Any;

use futures::future;

use crate::constants::PROFILE_STORAGE_KEY;
use crate::models::ctx::{Ctx, CtxStatus};
use crate::runtime::msg::{Action, ActionCtx};
use crate::runtime::{Effects, EnvFutureExt, Runtime, TryEnvFuture};
use crate::types::api::{APIRequest, APIResult, AuthRequest, AuthResponse};
use crate::types::profile::Profile;
use crate::unit_tests::ctx::TestModel;
use crate::unit_tests::{
    default_fetch_handler, default_user, Request, TestEnv, FETCH_HANDLER, REQUESTS, STORAGE,
};

fn login_request() -> AuthRequest {
    AuthRequest::Login {
        email: "aziz@example.com".to_owned(),
        password: "qwerty123".to_owned(),
    }
}

fn fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    match request.url.as_str() {
        "https://api.hamroh.uz/api/login" => future::ok(Box::new(APIResult::Ok {
            result: AuthResponse {
                key: "auth-key-1".to_owned(),
                user: default_user(),
            },
        }) as Box<dyn Any + Send>)
        .boxed_env(),
        _ => default_fetch_handler(request),
    }
}

#[test]
fn test_authenticate_installs_the_profile_and_rekeys_the_history() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::default(),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::Authenticate(login_request())));
    });

    let ctx = runtime.model().unwrap().ctx.to_owned();
    assert_eq!(
        ctx.profile.uid(),
        Some("user-1".to_owned()),
        "Should have authenticated the user"
    );
    assert!(
        matches!(ctx.status, CtxStatus::Ready),
        "Should be ready again"
    );
    assert_eq!(
        ctx.search_history.uid,
        Some("user-1".to_owned()),
        "Should have re-keyed the search history"
    );
    assert_eq!(
        REQUESTS.read().unwrap().first().map(|request| (
            request.url.to_owned(),
            request.body.to_owned()
        )),
        Some((
            "https://api.hamroh.uz/api/login".to_owned(),
            serde_json::to_string(&APIRequest::Auth(login_request())).unwrap(),
        )),
        "Should have issued the login request"
    );
    assert!(
        STORAGE
            .read()
            .unwrap()
            .get(PROFILE_STORAGE_KEY)
            .map_or(false, |data| {
                serde_json::from_str::<Profile>(data).unwrap().uid() == Some("user-1".to_owned())
            }),
        "Should have persisted the profile"
    );
}

#[test]
fn test_authenticate_rejects_invalid_credentials_synchronously() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

    let (runtime, _rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::default(),
        },
        Effects::none().unchanged(),
        1000,
    );

    TestEnv::run(|| {
        runtime.dispatch(Action::Ctx(ActionCtx::Authenticate(AuthRequest::Login {
            email: "not-an-email".to_owned(),
            password: "qwerty123".to_owned(),
        })));
        runtime.dispatch(Action::Ctx(ActionCtx::Authenticate(AuthRequest::Login {
            email: "aziz@example.com".to_owned(),
            password: "".to_owned(),
        })));
    });

    let ctx = runtime.model().unwrap().ctx.to_owned();
    assert_eq!(ctx.profile, Profile::default(), "Should stay logged out");
    assert!(
        matches!(ctx.status, CtxStatus::Ready),
        "Should not start loading"
    );
    assert!(
        REQUESTS.read().unwrap().is_empty(),
        "Should not have issued any request"
    );
}
