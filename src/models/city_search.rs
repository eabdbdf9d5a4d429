//! City autocompletion over one of the geocoding providers

use serde::{Deserialize, Serialize};

use crate::geocoder::GeocoderProvider;
use crate::models::common::{eq_update, Loadable};
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionCitySearch, ActionLoad, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvError, EnvFutureExt, UpdateWithCtx};
use crate::types::geo::PlaceSuggestion;
use futures::FutureExt;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Selected {
    pub provider: GeocoderProvider,
}

#[derive(Default, Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CitySearch {
    pub selected: Option<Selected>,
    pub search_query: String,
    pub suggestions: Option<Loadable<Vec<PlaceSuggestion>, EnvError>>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for CitySearch {
    fn update(&mut self, msg: &Msg, _ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::CitySearch(selected))) => {
                let selected_effects = eq_update(&mut self.selected, Some(selected.to_owned()));
                let query_effects = eq_update(&mut self.search_query, String::default());
                let suggestions_effects = eq_update(&mut self.suggestions, None);
                selected_effects
                    .join(query_effects)
                    .join(suggestions_effects)
            }
            Msg::Action(Action::Unload) => {
                let selected_effects = eq_update(&mut self.selected, None);
                let query_effects = eq_update(&mut self.search_query, String::default());
                let suggestions_effects = eq_update(&mut self.suggestions, None);
                selected_effects
                    .join(query_effects)
                    .join(suggestions_effects)
            }
            Msg::Action(Action::CitySearch(ActionCitySearch::Search { search_query })) => {
                match &self.selected {
                    Some(selected) => {
                        let query_effects =
                            eq_update(&mut self.search_query, search_query.to_owned());
                        let suggestions_effects =
                            eq_update(&mut self.suggestions, Some(Loadable::Loading));
                        Effects::one(suggest::<E>(selected.provider, search_query))
                            .unchanged()
                            .join(query_effects)
                            .join(suggestions_effects)
                    }
                    _ => Effects::none().unchanged(),
                }
            }
            Msg::Internal(Internal::CitySuggestionsResult {
                provider,
                query,
                result,
            }) => match &self.selected {
                // a response for a stale query is dropped, only the last
                // submitted one wins
                Some(selected) if selected.provider == *provider && self.search_query == *query => {
                    match result {
                        Ok(suggestions) => eq_update(
                            &mut self.suggestions,
                            Some(Loadable::Ready(suggestions.to_owned())),
                        ),
                        Err(error) => eq_update(
                            &mut self.suggestions,
                            Some(Loadable::Err(error.to_owned())),
                        ),
                    }
                }
                _ => Effects::none().unchanged(),
            },
            _ => Effects::none().unchanged(),
        }
    }
}

fn suggest<E: Env + 'static>(provider: GeocoderProvider, query: &str) -> Effect {
    let query = query.to_owned();
    EffectFuture::Concurrent(
        E::geocoder(provider)
            .suggest(&query)
            .map(move |result| {
                Msg::Internal(Internal::CitySuggestionsResult {
                    provider,
                    query,
                    result,
                })
            })
            .boxed_env(),
    )
    .into()
}
