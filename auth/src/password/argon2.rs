use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Credential hashing capability: `hash` at registration, `matches` at login.
///
/// Internally Argon2id with per-digest random salt; raw passwords are never
/// stored or returned.
pub struct CredentialHasher;

impl CredentialHasher {
    /// Create a new hasher with secure defaults.
    pub fn new() -> Self {
        Self
    }

    /// Hash a raw password for storage.
    ///
    /// # Returns
    /// PHC string format digest (algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, raw: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a raw password against a stored digest.
    ///
    /// # Returns
    /// True on match, false on mismatch
    ///
    /// # Errors
    /// * `VerificationFailed` - Digest is not a parseable PHC string
    pub fn matches(&self, raw: &str, digest: &str) -> Result<bool, PasswordError> {
        let parsed_digest = PasswordHash::new(digest).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password digest: {}", e))
        })?;

        let argon2 = Argon2::default();

        Ok(argon2
            .verify_password(raw.as_bytes(), &parsed_digest)
            .is_ok())
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}
