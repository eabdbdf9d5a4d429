//! Route overview between two picked points, plus resolving the device
//! position to a human-readable address

use serde::{Deserialize, Serialize};

use crate::geocoder::GeocoderProvider;
use crate::models::common::{eq_update, Loadable};
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionLoad, ActionRoutePlanner, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvError, EnvFutureExt, UpdateWithCtx};
use crate::types::geo::{Point, RouteInfo};
use futures::{FutureExt, TryFutureExt};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Selected {
    pub provider: GeocoderProvider,
    pub origin: Point,
    pub destination: Point,
}

#[derive(Default, Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanner {
    pub selected: Option<Selected>,
    /// `Ready(None)` means the provider could not produce a route
    pub route: Option<Loadable<Option<RouteInfo>, EnvError>>,
    pub current_location: Option<Point>,
    pub resolved_address: Option<String>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for RoutePlanner {
    fn update(&mut self, msg: &Msg, _ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::RoutePlanner(selected))) => {
                let selected_effects = eq_update(&mut self.selected, Some(selected.to_owned()));
                let route_effects = eq_update(&mut self.route, Some(Loadable::Loading));
                Effects::one(route::<E>(selected))
                    .unchanged()
                    .join(selected_effects)
                    .join(route_effects)
            }
            Msg::Action(Action::Unload) => {
                let selected_effects = eq_update(&mut self.selected, None);
                let route_effects = eq_update(&mut self.route, None);
                let location_effects = eq_update(&mut self.current_location, None);
                let address_effects = eq_update(&mut self.resolved_address, None);
                selected_effects
                    .join(route_effects)
                    .join(location_effects)
                    .join(address_effects)
            }
            Msg::Action(Action::RoutePlanner(ActionRoutePlanner::Locate { provider })) => {
                Effects::one(locate::<E>(*provider)).unchanged()
            }
            Msg::Internal(Internal::RouteResult {
                origin,
                destination,
                result,
            }) => match &self.selected {
                Some(selected)
                    if selected.origin == *origin && selected.destination == *destination =>
                {
                    match result {
                        Ok(route) => eq_update(
                            &mut self.route,
                            Some(Loadable::Ready(route.to_owned())),
                        ),
                        Err(error) => {
                            eq_update(&mut self.route, Some(Loadable::Err(error.to_owned())))
                        }
                    }
                }
                _ => Effects::none().unchanged(),
            },
            Msg::Internal(Internal::LocationResult(result)) => match result {
                Ok((point, address)) => {
                    let location_effects =
                        eq_update(&mut self.current_location, Some(point.to_owned()));
                    let address_effects =
                        eq_update(&mut self.resolved_address, Some(address.to_owned()));
                    location_effects.join(address_effects)
                }
                Err(_) => {
                    let location_effects = eq_update(&mut self.current_location, None);
                    let address_effects = eq_update(&mut self.resolved_address, None);
                    location_effects.join(address_effects)
                }
            },
            _ => Effects::none().unchanged(),
        }
    }
}

fn route<E: Env + 'static>(selected: &Selected) -> Effect {
    let Selected {
        provider,
        origin,
        destination,
    } = selected.to_owned();
    EffectFuture::Concurrent(
        E::geocoder(provider)
            .route(&origin, &destination)
            .map(move |result| {
                Msg::Internal(Internal::RouteResult {
                    origin,
                    destination,
                    result,
                })
            })
            .boxed_env(),
    )
    .into()
}

fn locate<E: Env + 'static>(provider: GeocoderProvider) -> Effect {
    EffectFuture::Concurrent(
        E::current_location()
            .and_then(move |point| {
                E::geocoder(provider)
                    .reverse(&point)
                    .map_ok(move |address| (point, address))
            })
            .map(|result| Msg::Internal(Internal::LocationResult(result)))
            .boxed_env(),
    )
    .into()
}
