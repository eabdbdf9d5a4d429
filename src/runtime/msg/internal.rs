use crate::geocoder::GeocoderProvider;
use crate::models::ctx::CtxError;
use crate::runtime::EnvError;
use crate::types::api::AuthRequest;
use crate::types::booking::{Booking, BookingStatus};
use crate::types::geo::{PlaceSuggestion, Point, RouteInfo};
use crate::types::preferences::{
    NotificationPreferences, PreferencesSnapshot, ThemePreferences,
};
use crate::types::profile::{Auth, UID};
use crate::types::search_history::SearchHistoryBucket;
use crate::types::trip::TripSummary;

//
// Those messages are meant to be dispatched and handled only inside the
// hamroh-core crate
//
#[derive(Debug)]
pub enum Internal {
    /// Result for authenticate to API.
    CtxAuthResult(AuthRequest, Result<Auth, CtxError>),
    /// Dispatched when the profile auth or consent changed.
    ProfileChanged,
    /// Dispatched when the search history changed and needs persisting.
    SearchHistoryChanged,
    /// Result for loading the search history of a freshly authenticated
    /// user from storage.
    SearchHistoryStorageResult(UID, Result<Option<SearchHistoryBucket>, EnvError>),
    /// Result for pulling the notification preferences row. `None` means
    /// the row does not exist yet.
    NotificationPreferencesAPIResult(Result<Option<NotificationPreferences>, CtxError>),
    /// Result for pulling the theme preferences row. `None` means the row
    /// does not exist yet.
    ThemePreferencesAPIResult(Result<Option<ThemePreferences>, CtxError>),
    /// Result for pushing a preference record, carrying the value to
    /// restore when the push failed.
    PreferencesPushResult(PreferencesSnapshot, Result<(), CtxError>),
    /// Result for a suggestion request of one geocoding provider.
    CitySuggestionsResult {
        provider: GeocoderProvider,
        query: String,
        result: Result<Vec<PlaceSuggestion>, EnvError>,
    },
    /// Result for acquiring the device position and reverse geocoding it.
    LocationResult(Result<(Point, String), EnvError>),
    /// Result for a route request. `Ok(None)` means the provider could not
    /// produce a route.
    RouteResult {
        origin: Point,
        destination: Point,
        result: Result<Option<RouteInfo>, EnvError>,
    },
    /// Result for pulling the bookings of the current user.
    BookingsAPIResult(Result<Vec<Booking>, CtxError>),
    /// Result for pushing a booking status change, carrying the status to
    /// restore when the push failed.
    BookingStatusPushResult {
        id: String,
        previous: BookingStatus,
        result: Result<(), CtxError>,
    },
    /// Result for the `tripHistory` server-side aggregation.
    TripHistoryAPIResult(Result<Vec<TripSummary>, CtxError>),
}
