// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng}, Scrypt};
use zeroize::Zeroize;

/// Hash a password using scrypt with a fresh random salt.
///
/// The output is a PHC string carrying algorithm parameters and salt, so
/// verification needs nothing beyond the stored hash.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored hash.
///
/// Comparison happens inside the scrypt verifier, which is constant-time
/// over the hash output. An unparseable stored hash verifies as false.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Hash a password and zeroize the plaintext buffer afterwards
pub fn hash_password_secure(plain: &mut String) -> anyhow::Result<String> {
    let hash = hash_password(plain)?;
    plain.zeroize();
    Ok(hash)
}
