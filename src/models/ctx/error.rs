use crate::runtime::EnvError;
use crate::types::api::APIError;
use crate::types::booking::InvalidTransition;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(tag = "type")]
pub enum CtxError {
    API(APIError),
    Env(EnvError),
    Other(OtherError),
}

impl From<APIError> for CtxError {
    fn from(error: APIError) -> Self {
        CtxError::API(error)
    }
}

impl From<EnvError> for CtxError {
    fn from(error: EnvError) -> Self {
        CtxError::Env(error)
    }
}

impl From<OtherError> for CtxError {
    fn from(error: OtherError) -> Self {
        CtxError::Other(error)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OtherError {
    UserNotLoggedIn,
    InvalidEmail,
    PasswordMissing,
    PreferencesNotLoaded,
    BookingsNotLoaded,
    BookingNotFound,
    BookingTransitionNotAllowed(InvalidTransition),
    SearchItemNotFound,
}

impl OtherError {
    pub fn message(&self) -> String {
        match &self {
            OtherError::UserNotLoggedIn => "User is not logged in".to_owned(),
            OtherError::InvalidEmail => "Email is not valid".to_owned(),
            OtherError::PasswordMissing => "Password is required".to_owned(),
            OtherError::PreferencesNotLoaded => {
                "Preferences are not pulled from the API yet".to_owned()
            }
            OtherError::BookingsNotLoaded => "Bookings are not loaded yet".to_owned(),
            OtherError::BookingNotFound => "Booking is not found".to_owned(),
            OtherError::BookingTransitionNotAllowed(error) => error.to_string(),
            OtherError::SearchItemNotFound => "Search is not found in history".to_owned(),
        }
    }
    pub fn code(&self) -> u64 {
        match &self {
            OtherError::UserNotLoggedIn => 1,
            OtherError::InvalidEmail => 2,
            OtherError::PasswordMissing => 3,
            OtherError::PreferencesNotLoaded => 4,
            OtherError::BookingsNotLoaded => 5,
            OtherError::BookingNotFound => 6,
            OtherError::BookingTransitionNotAllowed(_) => 7,
            OtherError::SearchItemNotFound => 8,
        }
    }
}

impl Serialize for OtherError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("OtherError", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}
