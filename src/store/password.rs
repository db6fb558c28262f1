//! Password hashes stored in bcrypt's modular crypt format (`$2b$<cost>$...`)

use bcrypt::{BcryptResult, DEFAULT_COST};

pub fn hash_password(password: &str) -> BcryptResult<String> {
    bcrypt::hash(password, DEFAULT_COST)
}

/// Malformed stored hashes never verify
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}
