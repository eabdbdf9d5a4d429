//! The bookings of the current user, with validated status transitions

use futures::{future, FutureExt, TryFutureExt};
use serde::Serialize;

use crate::models::common::{eq_update, Loadable};
use crate::models::ctx::{Ctx, CtxError, OtherError};
use crate::runtime::msg::{Action, ActionBookings, ActionLoad, Event, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx};
use crate::types::api::{fetch_api, APIRequest, APIResult, SuccessResponse};
use crate::types::booking::{Booking, BookingStatus};
use crate::types::profile::AuthKey;

#[derive(Default, Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Bookings {
    pub bookings: Option<Loadable<Vec<Booking>, CtxError>>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for Bookings {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::Bookings)) => match ctx.profile.auth_key() {
                Some(auth_key) => {
                    let bookings_effects =
                        eq_update(&mut self.bookings, Some(Loadable::Loading));
                    Effects::one(pull_bookings::<E>(auth_key))
                        .unchanged()
                        .join(bookings_effects)
                }
                _ => eq_update(
                    &mut self.bookings,
                    Some(Loadable::Err(CtxError::from(OtherError::UserNotLoggedIn))),
                ),
            },
            Msg::Action(Action::Unload) => eq_update(&mut self.bookings, None),
            Msg::Action(Action::Bookings(ActionBookings::UpdateStatus { id, status })) => {
                let auth_key = match ctx.profile.auth_key() {
                    Some(auth_key) => auth_key.to_owned(),
                    _ => {
                        return status_error_effects(
                            OtherError::UserNotLoggedIn,
                            id.to_owned(),
                            *status,
                        )
                    }
                };
                let booking = match self
                    .bookings
                    .as_mut()
                    .and_then(|bookings| match bookings {
                        Loadable::Ready(bookings) => {
                            Some(bookings.iter_mut().find(|booking| booking.id == *id))
                        }
                        _ => None,
                    }) {
                    Some(Some(booking)) => booking,
                    Some(None) => {
                        return status_error_effects(
                            OtherError::BookingNotFound,
                            id.to_owned(),
                            *status,
                        )
                    }
                    None => {
                        return status_error_effects(
                            OtherError::BookingsNotLoaded,
                            id.to_owned(),
                            *status,
                        )
                    }
                };
                // invalid transitions fail synchronously, nothing is sent
                // to the API
                match booking.status.transition(*status) {
                    Ok(next_status) => {
                        let previous = booking.status;
                        booking.status = next_status;
                        Effects::one(push_booking_status::<E>(
                            &auth_key,
                            booking.id.to_owned(),
                            previous,
                            next_status,
                        ))
                    }
                    Err(transition_error) => status_error_effects(
                        OtherError::BookingTransitionNotAllowed(transition_error),
                        id.to_owned(),
                        *status,
                    ),
                }
            }
            Msg::Internal(Internal::BookingsAPIResult(result)) => match result {
                Ok(bookings) => eq_update(
                    &mut self.bookings,
                    Some(Loadable::Ready(bookings.to_owned())),
                ),
                Err(error) => eq_update(
                    &mut self.bookings,
                    Some(Loadable::Err(error.to_owned())),
                ),
            },
            Msg::Internal(Internal::BookingStatusPushResult {
                id,
                previous,
                result,
            }) => match result {
                Ok(_) => Effects::msg(Msg::Event(Event::BookingStatusChanged {
                    id: id.to_owned(),
                    status: self
                        .find_status(id)
                        .unwrap_or(*previous),
                }))
                .unchanged(),
                // restore the status the booking had before the optimistic
                // mutation
                Err(error) => {
                    let rollback_effects = match self.bookings.as_mut() {
                        Some(Loadable::Ready(bookings)) => {
                            match bookings.iter_mut().find(|booking| booking.id == *id) {
                                Some(booking) if booking.status != *previous => {
                                    booking.status = *previous;
                                    Effects::none()
                                }
                                _ => Effects::none().unchanged(),
                            }
                        }
                        _ => Effects::none().unchanged(),
                    };
                    Effects::msg(Msg::Event(Event::Error {
                        error: error.to_owned(),
                        source: Box::new(Event::BookingStatusChanged {
                            id: id.to_owned(),
                            status: *previous,
                        }),
                    }))
                    .unchanged()
                    .join(rollback_effects)
                }
            },
            _ => Effects::none().unchanged(),
        }
    }
}

impl Bookings {
    fn find_status(&self, id: &str) -> Option<BookingStatus> {
        self.bookings
            .as_ref()
            .and_then(|bookings| bookings.ready())
            .and_then(|bookings| bookings.iter().find(|booking| booking.id == id))
            .map(|booking| booking.status)
    }
}

fn status_error_effects(error: OtherError, id: String, status: BookingStatus) -> Effects {
    Effects::msg(Msg::Event(Event::Error {
        error: CtxError::from(error),
        source: Box::new(Event::BookingStatusChanged { id, status }),
    }))
    .unchanged()
}

fn pull_bookings<E: Env + 'static>(auth_key: &AuthKey) -> Effect {
    let request = APIRequest::BookingsGet {
        auth_key: auth_key.to_owned(),
    };
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, Vec<Booking>>(&request)
            .map_err(CtxError::from)
            .and_then(|result| match result {
                APIResult::Ok { result } => future::ok(result),
                APIResult::Err { error } => future::err(CtxError::from(error)),
            })
            .map(|result| Msg::Internal(Internal::BookingsAPIResult(result)))
            .boxed_env(),
    )
    .into()
}

fn push_booking_status<E: Env + 'static>(
    auth_key: &AuthKey,
    id: String,
    previous: BookingStatus,
    status: BookingStatus,
) -> Effect {
    let request = APIRequest::BookingStatusSet {
        auth_key: auth_key.to_owned(),
        id: id.to_owned(),
        status,
    };
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, SuccessResponse>(&request)
            .map_err(CtxError::from)
            .and_then(|result| match result {
                APIResult::Ok { result } => future::ok(result),
                APIResult::Err { error } => future::err(CtxError::from(error)),
            })
            .map(move |result| {
                Msg::Internal(Internal::BookingStatusPushResult {
                    id,
                    previous,
                    result: result.map(|_| ()),
                })
            })
            .boxed_env(),
    )
    .into()
}
