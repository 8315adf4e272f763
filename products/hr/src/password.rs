use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

use crate::error::{HrError, HrResult};

/// Hash `password` with argon2id and a fresh random salt, returning the PHC
/// string stored in `user.password_hash`.
pub fn hash_password(password: &str) -> HrResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| HrError::PasswordHash(err.to_string()))
}

/// Check `password` against a stored PHC string.
pub fn verify_password(password: &str, stored: &str) -> HrResult<bool> {
    let parsed = PasswordHash::new(stored).map_err(|err| HrError::PasswordHash(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
