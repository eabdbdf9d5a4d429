use crate::types::preferences::{NotificationPreferences, ThemePreferences};

/// The value captured before an optimistic preference mutation, restored
/// verbatim when the API push fails.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PreferencesSnapshot {
    Notifications(NotificationPreferences),
    Theme(ThemePreferences),
}
