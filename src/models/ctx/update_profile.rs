use crate::constants::PROFILE_STORAGE_KEY;
use crate::models::ctx::{CtxError, CtxStatus, OtherError};
use crate::runtime::msg::{Action, ActionCtx, Event, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt};
use crate::types::api::{fetch_api, APIRequest, APIResult, SuccessResponse};
use crate::types::profile::{Auth, Profile};
use enclose::enclose;
use futures::{future, FutureExt, TryFutureExt};

pub fn update_profile<E: Env + 'static>(
    profile: &mut Profile,
    status: &CtxStatus,
    msg: &Msg,
) -> Effects {
    match msg {
        Msg::Action(Action::Ctx(ActionCtx::Logout)) => {
            let next_profile = Profile::default();
            if *profile != next_profile {
                *profile = next_profile;
                Effects::msg(Msg::Internal(Internal::ProfileChanged))
            } else {
                Effects::none().unchanged()
            }
        }
        Msg::Action(Action::Ctx(ActionCtx::UpdateMarketingConsent(marketing))) => {
            match &mut profile.auth {
                Some(auth) if auth.user.gdpr_consent.marketing != *marketing => {
                    auth.user.gdpr_consent.marketing = *marketing;
                    auth.user.gdpr_consent.time = E::now();
                    auth.user.last_modified = E::now();
                    let push_user_effects = Effects::one(push_user_to_api::<E>(auth)).unchanged();
                    Effects::msg(Msg::Event(Event::MarketingConsentUpdated {
                        marketing: *marketing,
                    }))
                    .join(push_user_effects)
                    .join(Effects::msg(Msg::Internal(Internal::ProfileChanged)))
                }
                Some(_) => Effects::msg(Msg::Event(Event::MarketingConsentUpdated {
                    marketing: *marketing,
                }))
                .unchanged(),
                None => Effects::msg(Msg::Event(Event::Error {
                    error: CtxError::from(OtherError::UserNotLoggedIn),
                    source: Box::new(Event::MarketingConsentUpdated {
                        marketing: *marketing,
                    }),
                }))
                .unchanged(),
            }
        }
        Msg::Internal(Internal::ProfileChanged) => {
            Effects::one(push_profile_to_storage::<E>(profile)).unchanged()
        }
        Msg::Internal(Internal::CtxAuthResult(auth_request, result)) => match (status, result) {
            (CtxStatus::Loading(loading_auth_request), Ok(auth))
                if loading_auth_request == auth_request =>
            {
                let next_profile = Profile {
                    auth: Some(auth.to_owned()),
                };
                if *profile != next_profile {
                    *profile = next_profile;
                    Effects::msg(Msg::Internal(Internal::ProfileChanged))
                } else {
                    Effects::none().unchanged()
                }
            }
            _ => Effects::none().unchanged(),
        },
        _ => Effects::none().unchanged(),
    }
}

fn push_user_to_api<E: Env + 'static>(auth: &Auth) -> Effect {
    let uid = Some(auth.user.id.to_owned());
    let request = APIRequest::SaveUser {
        auth_key: auth.key.to_owned(),
        user: auth.user.to_owned(),
    };
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, SuccessResponse>(&request)
            .map_err(CtxError::from)
            .and_then(|result| match result {
                APIResult::Ok { result } => future::ok(result),
                APIResult::Err { error } => future::err(CtxError::from(error)),
            })
            .map(move |result| match result {
                Ok(_) => Msg::Event(Event::UserPushedToAPI { uid }),
                Err(error) => Msg::Event(Event::Error {
                    error,
                    source: Box::new(Event::UserPushedToAPI { uid }),
                }),
            })
            .boxed_env(),
    )
    .into()
}

fn push_profile_to_storage<E: Env + 'static>(profile: &Profile) -> Effect {
    EffectFuture::Sequential(
        E::set_storage(PROFILE_STORAGE_KEY, Some(profile))
            .map(enclose!((profile.uid() => uid) move |result| match result {
                Ok(_) => Msg::Event(Event::ProfilePushedToStorage { uid }),
                Err(error) => Msg::Event(Event::Error {
                    error: CtxError::from(error),
                    source: Box::new(Event::ProfilePushedToStorage { uid }),
                })
            }))
            .boxed_env(),
    )
    .into()
}
