use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub expires_in: u64,
}

impl LoginResponse {
    pub fn success(token: String, expires_in: u64) -> Self {
        Self {
            success: true,
            message: "Logged in successfully".to_string(),
            token,
            expires_in,
        }
    }
}
