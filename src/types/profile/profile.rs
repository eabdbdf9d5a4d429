use crate::types::profile::Auth;
use serde::{Deserialize, Serialize};

pub type UID = Option<String>;

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub auth: Option<Auth>,
}

impl Profile {
    pub fn uid(&self) -> UID {
        self.auth.as_ref().map(|auth| auth.user.id.to_owned())
    }
    pub fn auth_key(&self) -> Option<&String> {
        self.auth.as_ref().map(|auth| &auth.key)
    }
    /// The marketing consent of the current user, the single source the
    /// notification preferences project from.
    pub fn marketing_consent(&self) -> bool {
        self.auth
            .as_ref()
            .map(|auth| auth.user.gdpr_consent.marketing)
            .unwrap_or_default()
    }
}
