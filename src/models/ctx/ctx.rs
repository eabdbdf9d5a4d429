use crate::models::ctx::{
    update_preferences, update_profile, update_search_history, CtxError, OtherError,
};
use crate::runtime::{
    msg::{Action, ActionCtx, Event, Internal, Msg},
    Effect, EffectFuture, Effects, Env, EnvFutureExt, Update,
};
use crate::types::api::{
    fetch_api, APIRequest, APIResult, AuthRequest, AuthResponse, SuccessResponse,
};
use crate::types::preferences::{NotificationPreferences, ThemePreferences};
use crate::types::profile::{Auth, AuthKey, Profile};
use crate::types::search_history::SearchHistoryBucket;
use derivative::Derivative;
use enclose::enclose;
use futures::{future, FutureExt, TryFutureExt};
use serde::Serialize;

#[derive(PartialEq, Serialize, Clone, Debug)]
pub enum CtxStatus {
    Loading(AuthRequest),
    Ready,
}

#[derive(Derivative, Serialize, Clone, Debug)]
#[derivative(Default)]
pub struct Ctx {
    pub profile: Profile,
    pub search_history: SearchHistoryBucket,
    /// `None` until pulled from the API for the current user
    pub notification_preferences: Option<NotificationPreferences>,
    /// `None` until pulled from the API for the current user
    pub theme_preferences: Option<ThemePreferences>,
    #[serde(skip)]
    #[derivative(Default(value = "CtxStatus::Ready"))]
    pub status: CtxStatus,
}

impl Ctx {
    pub fn new(profile: Profile, search_history: SearchHistoryBucket) -> Self {
        Self {
            profile,
            search_history,
            ..Self::default()
        }
    }
}

impl<E: Env + 'static> Update<E> for Ctx {
    fn update(&mut self, msg: &Msg) -> Effects {
        match msg {
            Msg::Action(Action::Ctx(ActionCtx::Authenticate(auth_request))) => {
                // Validation failures stay synchronous, nothing reaches the
                // network for a request that cannot succeed.
                if let Err(error) = validate_auth_request(auth_request) {
                    return Effects::msg(Msg::Event(Event::Error {
                        error: CtxError::from(error),
                        source: Box::new(Event::UserAuthenticated {
                            auth_request: auth_request.to_owned(),
                        }),
                    }))
                    .unchanged();
                }
                self.status = CtxStatus::Loading(auth_request.to_owned());
                Effects::one(authenticate::<E>(auth_request)).unchanged()
            }
            Msg::Action(Action::Ctx(ActionCtx::Logout)) => {
                let uid = self.profile.uid();
                let session_effects = match self.profile.auth_key() {
                    Some(auth_key) => Effects::one(delete_session::<E>(auth_key)).unchanged(),
                    _ => Effects::none().unchanged(),
                };
                let profile_effects = update_profile::<E>(&mut self.profile, &self.status, msg);
                let search_history_effects =
                    update_search_history::<E>(&mut self.search_history, &self.status, msg);
                let preferences_effects = update_preferences::<E>(
                    &mut self.notification_preferences,
                    &mut self.theme_preferences,
                    &self.profile,
                    &self.status,
                    msg,
                );
                self.status = CtxStatus::Ready;
                Effects::msg(Msg::Event(Event::UserLoggedOut { uid }))
                    .unchanged()
                    .join(session_effects)
                    .join(profile_effects)
                    .join(search_history_effects)
                    .join(preferences_effects)
            }
            Msg::Internal(Internal::CtxAuthResult(auth_request, result)) => {
                let profile_effects = update_profile::<E>(&mut self.profile, &self.status, msg);
                let search_history_effects =
                    update_search_history::<E>(&mut self.search_history, &self.status, msg);
                let preferences_effects = update_preferences::<E>(
                    &mut self.notification_preferences,
                    &mut self.theme_preferences,
                    &self.profile,
                    &self.status,
                    msg,
                );
                let ctx_effects = match &self.status {
                    CtxStatus::Loading(loading_auth_request)
                        if loading_auth_request == auth_request =>
                    {
                        self.status = CtxStatus::Ready;
                        match result {
                            Ok(_) => Effects::msg(Msg::Event(Event::UserAuthenticated {
                                auth_request: auth_request.to_owned(),
                            }))
                            .unchanged(),
                            Err(error) => Effects::msg(Msg::Event(Event::Error {
                                error: error.to_owned(),
                                source: Box::new(Event::UserAuthenticated {
                                    auth_request: auth_request.to_owned(),
                                }),
                            }))
                            .unchanged(),
                        }
                    }
                    _ => Effects::none().unchanged(),
                };
                profile_effects
                    .join(search_history_effects)
                    .join(preferences_effects)
                    .join(ctx_effects)
            }
            _ => {
                let profile_effects = update_profile::<E>(&mut self.profile, &self.status, msg);
                let search_history_effects =
                    update_search_history::<E>(&mut self.search_history, &self.status, msg);
                let preferences_effects = update_preferences::<E>(
                    &mut self.notification_preferences,
                    &mut self.theme_preferences,
                    &self.profile,
                    &self.status,
                    msg,
                );
                profile_effects
                    .join(search_history_effects)
                    .join(preferences_effects)
            }
        }
    }
}

fn validate_auth_request(auth_request: &AuthRequest) -> Result<(), OtherError> {
    match auth_request {
        AuthRequest::Login { email, password }
        | AuthRequest::Register {
            email, password, ..
        } => {
            if !email.contains('@') || email.trim().len() < 3 {
                Err(OtherError::InvalidEmail)
            } else if password.is_empty() {
                Err(OtherError::PasswordMissing)
            } else {
                Ok(())
            }
        }
        AuthRequest::LoginWithToken { token } if token.is_empty() => {
            Err(OtherError::PasswordMissing)
        }
        AuthRequest::LoginWithToken { .. } => Ok(()),
    }
}

fn authenticate<E: Env + 'static>(auth_request: &AuthRequest) -> Effect {
    let request = APIRequest::Auth(auth_request.to_owned());
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, _>(&request)
            .map_err(CtxError::from)
            .and_then(|result| match result {
                APIResult::Ok { result } => future::ok(result),
                APIResult::Err { error } => future::err(CtxError::from(error)),
            })
            .map_ok(|AuthResponse { key, user }| Auth { key, user })
            .map(enclose!((auth_request) move |result| {
                Msg::Internal(Internal::CtxAuthResult(auth_request, result))
            }))
            .boxed_env(),
    )
    .into()
}

fn delete_session<E: Env + 'static>(auth_key: &AuthKey) -> Effect {
    let request = APIRequest::Logout {
        auth_key: auth_key.to_owned(),
    };
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, SuccessResponse>(&request)
            .map_err(CtxError::from)
            .and_then(|result| match result {
                APIResult::Ok { result } => future::ok(result),
                APIResult::Err { error } => future::err(CtxError::from(error)),
            })
            .map(enclose!((auth_key) move |result| match result {
                Ok(_) => Msg::Event(Event::SessionDeleted { auth_key }),
                Err(error) => Msg::Event(Event::Error {
                    error,
                    source: Box::new(Event::SessionDeleted { auth_key }),
                }),
            }))
            .boxed_env(),
    )
    .into()
}
