use serde::Deserialize;

use crate::{
    geocoder::GeocoderProvider,
    models::{
        city_search::Selected as CitySearchSelected,
        route_planner::Selected as RoutePlannerSelected,
    },
    types::{
        api::AuthRequest,
        booking::BookingStatus,
        preferences::{NotificationPreferencesPatch, ThemePreferencesPatch},
        search_history::SearchQuery,
    },
};

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionCtx {
    Authenticate(AuthRequest),
    Logout,
    /// Record a submitted trip search into the history. Repeated identical
    /// queries bump the usage counter instead of creating a new entry.
    AddSearch(SearchQuery),
    RemoveSearch(String),
    ClearSearchHistory,
    PullPreferencesFromAPI,
    UpdateNotificationPreferences(NotificationPreferencesPatch),
    UpdateThemePreferences(ThemePreferencesPatch),
    /// Marketing consent lives on the profile only, notification
    /// preferences expose a projected read of it.
    UpdateMarketingConsent(bool),
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionCitySearch {
    /// Request suggestions for the query typed so far
    #[serde(rename_all = "camelCase")]
    Search { search_query: String },
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionRoutePlanner {
    /// Acquire the device position and resolve it to an address
    Locate { provider: GeocoderProvider },
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionBookings {
    #[serde(rename_all = "camelCase")]
    UpdateStatus { id: String, status: BookingStatus },
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "model", content = "args")]
pub enum ActionLoad {
    CitySearch(CitySearchSelected),
    RoutePlanner(RoutePlannerSelected),
    Bookings,
    TripHistory,
}

/// Action messages
///
/// Those messages are meant to be dispatched only by the users of the
/// `hamroh-core` crate and handled by the `hamroh-core` crate.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum Action {
    Ctx(ActionCtx),
    CitySearch(ActionCitySearch),
    RoutePlanner(ActionRoutePlanner),
    Bookings(ActionBookings),
    Load(ActionLoad),
    Unload,
}
