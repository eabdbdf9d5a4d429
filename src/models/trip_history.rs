//! Denormalized list of the user's past trips, produced by the
//! `tripHistory` server-side aggregation

use futures::{future, FutureExt, TryFutureExt};
use serde::Serialize;

use crate::models::common::{eq_update, Loadable};
use crate::models::ctx::{Ctx, CtxError, OtherError};
use crate::runtime::msg::{Action, ActionLoad, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx};
use crate::types::api::{fetch_api, APIRequest, APIResult};
use crate::types::trip::TripSummary;

#[derive(Default, Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TripHistory {
    pub trips: Option<Loadable<Vec<TripSummary>, CtxError>>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for TripHistory {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::TripHistory)) => match ctx.profile.uid() {
                Some(user_id) => {
                    let trips_effects = eq_update(&mut self.trips, Some(Loadable::Loading));
                    Effects::one(pull_trip_history::<E>(user_id))
                        .unchanged()
                        .join(trips_effects)
                }
                _ => eq_update(
                    &mut self.trips,
                    Some(Loadable::Err(CtxError::from(OtherError::UserNotLoggedIn))),
                ),
            },
            Msg::Action(Action::Unload) => eq_update(&mut self.trips, None),
            Msg::Internal(Internal::TripHistoryAPIResult(result)) => match result {
                Ok(trips) => {
                    eq_update(&mut self.trips, Some(Loadable::Ready(trips.to_owned())))
                }
                Err(error) => {
                    eq_update(&mut self.trips, Some(Loadable::Err(error.to_owned())))
                }
            },
            _ => Effects::none().unchanged(),
        }
    }
}

fn pull_trip_history<E: Env + 'static>(user_id: String) -> Effect {
    let request = APIRequest::TripHistory { user_id };
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, Vec<TripSummary>>(&request)
            .map_err(CtxError::from)
            .and_then(|result| match result {
                APIResult::Ok { result } => future::ok(result),
                APIResult::Err { error } => future::err(CtxError::from(error)),
            })
            .map(|result| Msg::Internal(Internal::TripHistoryAPIResult(result)))
            .boxed_env(),
    )
    .into()
}
