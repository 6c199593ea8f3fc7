use serde::{Deserialize, Serialize};

/// User object posted to `/jwt`; unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub success: bool,
}

/// Public part of the session returned to the client.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub email: String,
    pub name: Option<String>,
}
