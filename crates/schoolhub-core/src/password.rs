use std::sync::OnceLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Runs a full bcrypt verification against a fixed hash of the same cost, so a
/// login for an unknown email takes as long as one with a wrong password.
pub fn verify_dummy_password(password: &str) {
    let dummy = DUMMY_HASH.get_or_init(|| hash("schoolhub-dummy-password", DEFAULT_COST).ok());
    if let Some(dummy) = dummy {
        let _ = verify(password, dummy);
    }
}
