use futures::{future, FutureExt, TryFutureExt};
use tracing::warn;

use crate::models::common::eq_update;
use crate::models::ctx::{CtxError, CtxStatus, OtherError};
use crate::runtime::msg::{Action, ActionCtx, Event, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt};
use crate::types::api::{fetch_api, APIRequest, APIResult, SuccessResponse};
use crate::types::preferences::{
    NotificationPreferences, PreferencesSnapshot, ThemePreferences,
};
use crate::types::profile::Profile;

/// Both preference stores in one reducer: fetch-or-create on pull and
/// optimistic mutation with automatic rollback on a failed push, the same
/// way for notifications and theme.
pub fn update_preferences<E: Env + 'static>(
    notification_preferences: &mut Option<NotificationPreferences>,
    theme_preferences: &mut Option<ThemePreferences>,
    profile: &Profile,
    status: &CtxStatus,
    msg: &Msg,
) -> Effects {
    match msg {
        Msg::Action(Action::Ctx(ActionCtx::Logout)) => {
            let notification_effects = eq_update(notification_preferences, None);
            let theme_effects = eq_update(theme_preferences, None);
            notification_effects.join(theme_effects)
        }
        Msg::Action(Action::Ctx(ActionCtx::PullPreferencesFromAPI)) => {
            match profile.auth_key() {
                Some(auth_key) => Effects::many(vec![
                    pull_notification_preferences::<E>(auth_key),
                    pull_theme_preferences::<E>(auth_key),
                ])
                .unchanged(),
                _ => Effects::msg(Msg::Event(Event::Error {
                    error: CtxError::from(OtherError::UserNotLoggedIn),
                    source: Box::new(Event::NotificationPreferencesPulled {
                        uid: profile.uid(),
                    }),
                }))
                .unchanged(),
            }
        }
        Msg::Action(Action::Ctx(ActionCtx::UpdateNotificationPreferences(patch))) => {
            match (profile.auth_key(), notification_preferences.as_mut()) {
                (Some(auth_key), Some(preferences)) => {
                    let previous = preferences.to_owned();
                    let next_preferences = preferences.patched(patch);
                    if *preferences != next_preferences {
                        *preferences = next_preferences.to_owned();
                        Effects::one(push_preferences_to_api::<E>(
                            APIRequest::NotificationPreferencesSet {
                                auth_key: auth_key.to_owned(),
                                preferences: next_preferences,
                            },
                            PreferencesSnapshot::Notifications(previous),
                        ))
                    } else {
                        Effects::none().unchanged()
                    }
                }
                (auth_key, _) => preference_update_error(profile, auth_key.is_none()),
            }
        }
        Msg::Action(Action::Ctx(ActionCtx::UpdateThemePreferences(patch))) => {
            match (profile.auth_key(), theme_preferences.as_mut()) {
                (Some(auth_key), Some(preferences)) => {
                    let previous = preferences.to_owned();
                    let next_preferences = preferences.patched(patch);
                    if *preferences != next_preferences {
                        *preferences = next_preferences.to_owned();
                        Effects::one(push_preferences_to_api::<E>(
                            APIRequest::ThemePreferencesSet {
                                auth_key: auth_key.to_owned(),
                                preferences: next_preferences,
                            },
                            PreferencesSnapshot::Theme(previous),
                        ))
                    } else {
                        Effects::none().unchanged()
                    }
                }
                (auth_key, _) => preference_update_error(profile, auth_key.is_none()),
            }
        }
        Msg::Action(Action::Ctx(ActionCtx::UpdateMarketingConsent(_))) => {
            // projected read only, the consent itself is stored on the
            // profile which is updated before this reducer runs
            match notification_preferences.as_mut() {
                Some(preferences) => {
                    eq_update(&mut preferences.marketing, profile.marketing_consent())
                }
                _ => Effects::none().unchanged(),
            }
        }
        Msg::Internal(Internal::CtxAuthResult(auth_request, result)) => match (status, result) {
            (CtxStatus::Loading(loading_auth_request), Ok(_))
                if loading_auth_request == auth_request =>
            {
                let notification_effects = eq_update(notification_preferences, None);
                let theme_effects = eq_update(theme_preferences, None);
                notification_effects.join(theme_effects)
            }
            _ => Effects::none().unchanged(),
        },
        Msg::Internal(Internal::NotificationPreferencesAPIResult(result)) => match result {
            // a missing row synthesizes the provider default, seeded from
            // the profile consent, and persists it right away
            Ok(row) => {
                let next_preferences = row
                    .to_owned()
                    .map(|mut preferences| {
                        preferences.marketing = profile.marketing_consent();
                        preferences
                    })
                    .unwrap_or_else(|| {
                        NotificationPreferences::default_with_consent(
                            profile.marketing_consent(),
                        )
                    });
                let create_effects = match (row, profile.auth_key()) {
                    (None, Some(auth_key)) => Effects::one(push_preferences_to_api::<E>(
                        APIRequest::NotificationPreferencesSet {
                            auth_key: auth_key.to_owned(),
                            preferences: next_preferences.to_owned(),
                        },
                        PreferencesSnapshot::Notifications(next_preferences.to_owned()),
                    ))
                    .unchanged(),
                    _ => Effects::none().unchanged(),
                };
                Effects::msg(Msg::Event(Event::NotificationPreferencesPulled {
                    uid: profile.uid(),
                }))
                .unchanged()
                .join(eq_update(
                    notification_preferences,
                    Some(next_preferences),
                ))
                .join(create_effects)
            }
            Err(error) => Effects::msg(Msg::Event(Event::Error {
                error: error.to_owned(),
                source: Box::new(Event::NotificationPreferencesPulled {
                    uid: profile.uid(),
                }),
            }))
            .unchanged(),
        },
        Msg::Internal(Internal::ThemePreferencesAPIResult(result)) => match result {
            Ok(row) => {
                let next_preferences = row.to_owned().unwrap_or_default();
                let create_effects = match (row, profile.auth_key()) {
                    (None, Some(auth_key)) => Effects::one(push_preferences_to_api::<E>(
                        APIRequest::ThemePreferencesSet {
                            auth_key: auth_key.to_owned(),
                            preferences: next_preferences.to_owned(),
                        },
                        PreferencesSnapshot::Theme(next_preferences.to_owned()),
                    ))
                    .unchanged(),
                    _ => Effects::none().unchanged(),
                };
                Effects::msg(Msg::Event(Event::ThemePreferencesPulled {
                    uid: profile.uid(),
                }))
                .unchanged()
                .join(eq_update(theme_preferences, Some(next_preferences)))
                .join(create_effects)
            }
            Err(error) => Effects::msg(Msg::Event(Event::Error {
                error: error.to_owned(),
                source: Box::new(Event::ThemePreferencesPulled { uid: profile.uid() }),
            }))
            .unchanged(),
        },
        Msg::Internal(Internal::PreferencesPushResult(snapshot, result)) => match result {
            Ok(_) => Effects::msg(Msg::Event(Event::PreferencesPushedToAPI {
                uid: profile.uid(),
            }))
            .unchanged(),
            // the push failed, the previously displayed value is restored
            Err(error) => {
                warn!(?error, "Preferences push failed, rolling back");
                let rollback_effects = match snapshot {
                    PreferencesSnapshot::Notifications(previous) => {
                        eq_update(notification_preferences, Some(previous.to_owned()))
                    }
                    PreferencesSnapshot::Theme(previous) => {
                        eq_update(theme_preferences, Some(previous.to_owned()))
                    }
                };
                Effects::msg(Msg::Event(Event::Error {
                    error: error.to_owned(),
                    source: Box::new(Event::PreferencesPushedToAPI { uid: profile.uid() }),
                }))
                .unchanged()
                .join(rollback_effects)
            }
        },
        _ => Effects::none().unchanged(),
    }
}

fn preference_update_error(profile: &Profile, not_logged_in: bool) -> Effects {
    let error = if not_logged_in {
        OtherError::UserNotLoggedIn
    } else {
        OtherError::PreferencesNotLoaded
    };
    Effects::msg(Msg::Event(Event::Error {
        error: CtxError::from(error),
        source: Box::new(Event::PreferencesPushedToAPI { uid: profile.uid() }),
    }))
    .unchanged()
}

fn pull_notification_preferences<E: Env + 'static>(auth_key: &String) -> Effect {
    let request = APIRequest::NotificationPreferencesGet {
        auth_key: auth_key.to_owned(),
    };
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, Option<NotificationPreferences>>(&request)
            .map_err(CtxError::from)
            .and_then(|result| match result {
                APIResult::Ok { result } => future::ok(result),
                APIResult::Err { error } => future::err(CtxError::from(error)),
            })
            .map(|result| Msg::Internal(Internal::NotificationPreferencesAPIResult(result)))
            .boxed_env(),
    )
    .into()
}

fn pull_theme_preferences<E: Env + 'static>(auth_key: &String) -> Effect {
    let request = APIRequest::ThemePreferencesGet {
        auth_key: auth_key.to_owned(),
    };
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, Option<ThemePreferences>>(&request)
            .map_err(CtxError::from)
            .and_then(|result| match result {
                APIResult::Ok { result } => future::ok(result),
                APIResult::Err { error } => future::err(CtxError::from(error)),
            })
            .map(|result| Msg::Internal(Internal::ThemePreferencesAPIResult(result)))
            .boxed_env(),
    )
    .into()
}

fn push_preferences_to_api<E: Env + 'static>(
    request: APIRequest,
    snapshot: PreferencesSnapshot,
) -> Effect {
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, SuccessResponse>(&request)
            .map_err(CtxError::from)
            .and_then(|result| match result {
                APIResult::Ok { result } => future::ok(result),
                APIResult::Err { error } => future::err(CtxError::from(error)),
            })
            .map(move |result| {
                Msg::Internal(Internal::PreferencesPushResult(snapshot, result.map(|_| ())))
            })
            .boxed_env(),
    )
    .into()
}
