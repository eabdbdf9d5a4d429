use core::fmt;

use crate::constants::API_URL;
use crate::types::booking::BookingStatus;
use crate::types::preferences::{NotificationPreferences, ThemePreferences};
use crate::types::profile::{AuthKey, GdprConsent, User};
use http::Method;
use serde::{Deserialize, Serialize};
use url::Url;

pub trait FetchRequestParams<T> {
    fn endpoint(&self) -> Url;
    fn method(&self) -> Method;
    fn path(&self) -> String;
    fn body(self) -> T;
}

#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(tag = "type")]
pub enum APIRequest {
    Auth(AuthRequest),
    #[serde(rename_all = "camelCase")]
    Logout {
        auth_key: AuthKey,
    },
    #[serde(rename_all = "camelCase")]
    GetUser {
        auth_key: AuthKey,
    },
    #[serde(rename_all = "camelCase")]
    SaveUser {
        auth_key: AuthKey,
        #[serde(flatten)]
        user: User,
    },
    #[serde(rename_all = "camelCase")]
    NotificationPreferencesGet {
        auth_key: AuthKey,
    },
    #[serde(rename_all = "camelCase")]
    NotificationPreferencesSet {
        auth_key: AuthKey,
        #[serde(flatten)]
        preferences: NotificationPreferences,
    },
    #[serde(rename_all = "camelCase")]
    ThemePreferencesGet {
        auth_key: AuthKey,
    },
    #[serde(rename_all = "camelCase")]
    ThemePreferencesSet {
        auth_key: AuthKey,
        #[serde(flatten)]
        preferences: ThemePreferences,
    },
    #[serde(rename_all = "camelCase")]
    BookingsGet {
        auth_key: AuthKey,
    },
    #[serde(rename_all = "camelCase")]
    BookingStatusSet {
        auth_key: AuthKey,
        id: String,
        status: BookingStatus,
    },
    /// Server-side aggregation invoked by name with a single user-id
    /// parameter, returns the denormalized trip history list.
    #[serde(rename_all = "camelCase")]
    TripHistory {
        user_id: String,
    },
}

impl FetchRequestParams<APIRequest> for APIRequest {
    fn endpoint(&self) -> Url {
        API_URL.to_owned()
    }
    fn method(&self) -> Method {
        Method::POST
    }
    fn path(&self) -> String {
        match self {
            APIRequest::Auth(AuthRequest::Login { .. }) => "login".to_owned(),
            APIRequest::Auth(AuthRequest::LoginWithToken { .. }) => "loginWithToken".to_owned(),
            APIRequest::Auth(AuthRequest::Register { .. }) => "register".to_owned(),
            APIRequest::Logout { .. } => "logout".to_owned(),
            APIRequest::GetUser { .. } => "getUser".to_owned(),
            APIRequest::SaveUser { .. } => "saveUser".to_owned(),
            APIRequest::NotificationPreferencesGet { .. } => {
                "notificationPreferencesGet".to_owned()
            }
            APIRequest::NotificationPreferencesSet { .. } => {
                "notificationPreferencesSet".to_owned()
            }
            APIRequest::ThemePreferencesGet { .. } => "themePreferencesGet".to_owned(),
            APIRequest::ThemePreferencesSet { .. } => "themePreferencesSet".to_owned(),
            APIRequest::BookingsGet { .. } => "bookingsGet".to_owned(),
            APIRequest::BookingStatusSet { .. } => "bookingStatusSet".to_owned(),
            APIRequest::TripHistory { .. } => "tripHistory".to_owned(),
        }
    }
    fn body(self) -> APIRequest {
        self
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthRequest {
    Login {
        email: String,
        password: String,
    },
    Register {
        email: String,
        password: String,
        gdpr_consent: GdprConsent,
    },
    LoginWithToken {
        token: String,
    },
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login { email, password: _ } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &"<SENSITIVE>")
                .finish(),
            Self::Register {
                email,
                password: _,
                gdpr_consent,
            } => f
                .debug_struct("Register")
                .field("email", email)
                .field("password", &"<SENSITIVE>")
                .field("gdpr_consent", gdpr_consent)
                .finish(),
            Self::LoginWithToken { token: _ } => f
                .debug_struct("LoginWithToken")
                .field("token", &"<SENSITIVE>")
                .finish(),
        }
    }
}
