use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(
    Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Debug,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// Per-user theme settings row, fetched-or-created on first access.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ThemePreferences {
    pub mode: ThemeMode,
}

impl ThemePreferences {
    pub fn patched(&self, patch: &ThemePreferencesPatch) -> Self {
        ThemePreferences {
            mode: patch.mode.unwrap_or(self.mode),
        }
    }
}

/// Partial update of [`ThemePreferences`], absent fields stay untouched.
#[derive(Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ThemePreferencesPatch {
    pub mode: Option<ThemeMode>,
}
