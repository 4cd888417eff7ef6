use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered account as held by the persistence layer.
///
/// `password_hash` is a bcrypt digest; the plaintext is never stored. The struct
/// is deliberately not `Serialize` so it cannot end up in a response body.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}

/// What a login needs from the store: the account id and its stored hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user_id: String,
    pub password_hash: String,
}

/// Payload of `POST /register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Payload of `POST /login`. Same shape as registration, but the email is
/// only required to be present: anything not on file is `NotRegistered`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email must not be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Response after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub response: String,
    /// Bearer token to present on every item request.
    pub token: String,
}

/// Plain confirmation body used by register and delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub response: String,
}

impl MessageResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
