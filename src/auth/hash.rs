use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use log::warn;

pub use argon2::password_hash::Error;

pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    // Argon2 with default params (Argon2id v19)
    let argon2 = Argon2::default();

    // Hash password to PHC string ($argon2id$v=19$...)
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?.to_string();

    Ok(password_hash)
}

/// Check a plaintext password against a stored PHC string.
///
/// A stored hash that can't be parsed never matches.
pub fn check_password(password: &str, password_hash: &str) -> bool {
    let parsed = match PasswordHash::new(password_hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Stored password hash is malformed: {}", err);
            return false;
        }
    };

    // Params come from the PHC string, not from the default
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// [`check_password`] on the blocking pool, so an Argon2 verify doesn't
/// hold up a runtime worker.
pub async fn check_password_blocking(
    password: String,
    password_hash: String,
) -> Result<bool, tokio::task::JoinError> {
    tokio::task::spawn_blocking(move || check_password(&password, &password_hash)).await
}
