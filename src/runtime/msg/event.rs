use serde::Serialize;

use crate::{
    models::ctx::CtxError,
    types::{
        api::AuthRequest,
        booking::BookingStatus,
        profile::{AuthKey, UID},
    },
};

///
/// Those messages are meant to be dispatched by the `hamroh-core` crate and
/// handled by the users of the `hamroh-core` crate and by the `hamroh-core`
/// crate itself.
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "event", content = "args")]
pub enum Event {
    ProfilePushedToStorage {
        uid: UID,
    },
    SearchHistoryPushedToStorage {
        uid: UID,
    },
    SearchHistoryCleared {
        uid: UID,
    },
    UserAuthenticated {
        auth_request: AuthRequest,
    },
    UserLoggedOut {
        uid: UID,
    },
    SessionDeleted {
        auth_key: AuthKey,
    },
    UserPushedToAPI {
        uid: UID,
    },
    NotificationPreferencesPulled {
        uid: UID,
    },
    ThemePreferencesPulled {
        uid: UID,
    },
    PreferencesPushedToAPI {
        uid: UID,
    },
    MarketingConsentUpdated {
        marketing: bool,
    },
    BookingStatusChanged {
        id: String,
        status: BookingStatus,
    },
    Error {
        error: CtxError,
        source: Box<Event>,
    },
}
