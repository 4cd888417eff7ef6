use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// bcrypt work factor. Fixed for every call.
pub const PASSWORD_COST: u32 = DEFAULT_COST;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, PASSWORD_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt digest.
///
/// bcrypt re-derives the digest from the stored salt and compares the two in
/// constant time. A malformed stored hash is an internal error, not a mismatch.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
