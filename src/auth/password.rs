//! Password hashing with bcrypt

use crate::error::Result;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Verify a password against a stored hash
///
/// An empty hash never matches.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    if hash.is_empty() {
        return Ok(false);
    }
    Ok(bcrypt::verify(password, hash)?)
}
