use crate::types::profile::{AuthKey, User};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum APIResult<T> {
    Err { error: APIError },
    Ok { result: T },
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct APIError {
    pub message: String,
    pub code: u64,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    #[serde(rename = "authKey")]
    pub key: AuthKey,
    pub user: User,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SuccessResponse {
    pub success: bool,
}
