use enclose::enclose;
use futures::FutureExt;
use tracing::error;

use crate::models::ctx::{CtxError, CtxStatus, OtherError};
use crate::runtime::msg::{Action, ActionCtx, Event, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt};
use crate::types::profile::UID;
use crate::types::search_history::SearchHistoryBucket;

pub fn update_search_history<E: Env + 'static>(
    search_history: &mut SearchHistoryBucket,
    status: &CtxStatus,
    msg: &Msg,
) -> Effects {
    match msg {
        Msg::Action(Action::Ctx(ActionCtx::Logout)) => {
            let next_search_history = SearchHistoryBucket::default();
            if *search_history != next_search_history {
                *search_history = next_search_history;
                Effects::msg(Msg::Internal(Internal::SearchHistoryChanged))
            } else {
                Effects::none().unchanged()
            }
        }
        Msg::Action(Action::Ctx(ActionCtx::AddSearch(query))) => {
            search_history.add(query.to_owned(), E::now());
            Effects::msg(Msg::Internal(Internal::SearchHistoryChanged))
        }
        Msg::Action(Action::Ctx(ActionCtx::RemoveSearch(id))) => {
            if search_history.remove(id) {
                Effects::msg(Msg::Internal(Internal::SearchHistoryChanged))
            } else {
                Effects::msg(Msg::Event(Event::Error {
                    error: CtxError::from(OtherError::SearchItemNotFound),
                    source: Box::new(Event::SearchHistoryPushedToStorage {
                        uid: search_history.uid.to_owned(),
                    }),
                }))
                .unchanged()
            }
        }
        Msg::Action(Action::Ctx(ActionCtx::ClearSearchHistory)) => {
            search_history.items.clear();
            Effects::msg(Msg::Event(Event::SearchHistoryCleared {
                uid: search_history.uid.to_owned(),
            }))
            .join(Effects::one(delete_search_history_from_storage::<E>(
                search_history,
            )))
        }
        Msg::Internal(Internal::CtxAuthResult(auth_request, result)) => match (status, result) {
            (CtxStatus::Loading(loading_auth_request), Ok(auth))
                if loading_auth_request == auth_request =>
            {
                // The in-memory bucket is re-keyed to the authenticated
                // user and their persisted history is pulled afterwards.
                *search_history =
                    SearchHistoryBucket::new(Some(auth.user.id.to_owned()), vec![]);
                Effects::one(pull_search_history_from_storage::<E>(search_history))
            }
            _ => Effects::none().unchanged(),
        },
        Msg::Internal(Internal::SearchHistoryStorageResult(uid, result))
            if search_history.uid == *uid =>
        {
            match result {
                Ok(Some(stored_search_history)) => {
                    *search_history = stored_search_history.to_owned();
                    Effects::none()
                }
                // no history persisted for this user yet
                Ok(None) => Effects::none().unchanged(),
                // the in-memory bucket is left at its default, nothing
                // propagates to the caller
                Err(storage_error) => {
                    error!(?storage_error, "Failed to read search history from storage");
                    Effects::msg(Msg::Event(Event::Error {
                        error: CtxError::from(storage_error.to_owned()),
                        source: Box::new(Event::SearchHistoryPushedToStorage {
                            uid: uid.to_owned(),
                        }),
                    }))
                    .unchanged()
                }
            }
        }
        Msg::Internal(Internal::SearchHistoryChanged) => {
            Effects::one(push_search_history_to_storage::<E>(search_history)).unchanged()
        }
        _ => Effects::none().unchanged(),
    }
}

fn push_search_history_to_storage<E: Env + 'static>(
    search_history: &SearchHistoryBucket,
) -> Effect {
    EffectFuture::Sequential(
        E::set_storage(&search_history.storage_key(), Some(&search_history))
            .map(
                enclose!((search_history.uid => uid) move |result| match result {
                    Ok(_) => Msg::Event(Event::SearchHistoryPushedToStorage { uid }),
                    Err(error) => Msg::Event(Event::Error {
                        error: CtxError::from(error),
                        source: Box::new(Event::SearchHistoryPushedToStorage { uid }),
                    })
                }),
            )
            .boxed_env(),
    )
    .into()
}

fn delete_search_history_from_storage<E: Env + 'static>(
    search_history: &SearchHistoryBucket,
) -> Effect {
    EffectFuture::Sequential(
        E::set_storage::<SearchHistoryBucket>(&search_history.storage_key(), None)
            .map(
                enclose!((search_history.uid => uid) move |result| match result {
                    Ok(_) => Msg::Event(Event::SearchHistoryPushedToStorage { uid }),
                    Err(error) => Msg::Event(Event::Error {
                        error: CtxError::from(error),
                        source: Box::new(Event::SearchHistoryPushedToStorage { uid }),
                    })
                }),
            )
            .boxed_env(),
    )
    .into()
}

fn pull_search_history_from_storage<E: Env + 'static>(
    search_history: &SearchHistoryBucket,
) -> Effect {
    let uid: UID = search_history.uid.to_owned();
    EffectFuture::Sequential(
        E::get_storage::<SearchHistoryBucket>(&search_history.storage_key())
            .map(move |result| {
                Msg::Internal(Internal::SearchHistoryStorageResult(uid, result))
            })
            .boxed_env(),
    )
    .into()
}
