//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the single error type that crosses the service
//! boundary. Every failure inside the credential store, token service, ownership
//! guard or item lifecycle is mapped onto exactly one of its variants before it
//! reaches a route handler.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return it
//! directly. Storage and infrastructure failures are reported to the client as a
//! generic internal error; their detail only goes to the operator log.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::{debug, error};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned to clients for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or out-of-range input: bad priority, short name, non-positive limit (HTTP 400).
    Validation(String),
    /// Missing, malformed, expired or badly signed bearer token (HTTP 401).
    Unauthenticated(String),
    /// Valid identity that does not own the referenced item (HTTP 403).
    Forbidden(String),
    /// The referenced resource does not exist (HTTP 404).
    NotFound(String),
    /// Registration against an email that is already on file (HTTP 403).
    AlreadyExists(String),
    /// Login against an email with no account (HTTP 403).
    NotRegistered(String),
    /// Login with a wrong password (HTTP 401).
    Unauthorized(String),
    /// Storage or infrastructure failure (HTTP 500).
    /// The message is operator detail and is never sent to the client.
    Internal(String),
}

impl AppError {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::AlreadyExists(_) | AppError::NotRegistered(_) => {
                StatusCode::FORBIDDEN
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message a client is allowed to see.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthenticated(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::AlreadyExists(msg)
            | AppError::NotRegistered(msg)
            | AppError::Unauthorized(msg) => msg,
            AppError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::AlreadyExists(msg) => write!(f, "Already Exists: {}", msg),
            AppError::NotRegistered(msg) => write!(f, "Not Registered: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into JSON `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            error!("internal error: {}", detail);
        }
        HttpResponse::build(self.status()).json(json!({
            "error": self.public_message()
        }))
    }
}

/// Every sqlx failure is an infrastructure failure. Absence of a row is modelled
/// with `Option` by the stores, so `RowNotFound` never reaches this point in practice.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::Internal(format!("database error: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Token decoding failures collapse into one generic message so a caller cannot
/// tell a bad signature from an expired or malformed token.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        debug!("token rejected: {:?}", error.kind());
        AppError::Unauthenticated("Invalid or expired token".into())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing error: {}", error))
    }
}
