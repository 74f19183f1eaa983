//! bcrypt hashing for stored user passwords

use crate::domain::DomainError;

/// Work factor for new hashes
#[cfg(not(test))]
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
pub const HASH_COST: u32 = 4;

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    hash_with_cost(password, HASH_COST)
}

pub fn hash_with_cost(password: &str, cost: u32) -> Result<String, DomainError> {
    bcrypt::hash(password, cost)
        .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
}

/// `Ok(false)` on a mismatch. A stored hash bcrypt cannot parse is an
/// `Internal` error, never a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, DomainError> {
    bcrypt::verify(password, stored_hash)
        .map_err(|e| DomainError::Internal(format!("Stored password hash is unusable: {}", e)))
}
