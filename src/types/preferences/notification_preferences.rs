use serde::{Deserialize, Serialize};

/// Per-user notification settings row, fetched-or-created on first access.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub ride_updates: bool,
    pub chat_messages: bool,
    /// Projected read of the profile marketing consent. Never written from
    /// here, [`ActionCtx::UpdateMarketingConsent`] goes through the profile.
    ///
    /// [`ActionCtx::UpdateMarketingConsent`]: crate::runtime::msg::ActionCtx::UpdateMarketingConsent
    pub marketing: bool,
}

impl NotificationPreferences {
    /// The provider default for users without a stored row, the marketing
    /// flag is seeded from the profile consent.
    pub fn default_with_consent(marketing: bool) -> Self {
        NotificationPreferences {
            ride_updates: true,
            chat_messages: true,
            marketing,
        }
    }
    pub fn patched(&self, patch: &NotificationPreferencesPatch) -> Self {
        NotificationPreferences {
            ride_updates: patch.ride_updates.unwrap_or(self.ride_updates),
            chat_messages: patch.chat_messages.unwrap_or(self.chat_messages),
            marketing: self.marketing,
        }
    }
}

/// Partial update of [`NotificationPreferences`], absent fields stay
/// untouched.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferencesPatch {
    pub ride_updates: Option<bool>,
    pub chat_messages: Option<bool>,
}
