//! Stateless authentication primitives library
//!
//! Provides the two capability boundaries an account service composes:
//! - Signed-token codec (JWT, HS256) issuing paired access/refresh tokens
//! - Password hashing (Argon2id)
//!
//! Token validity is a pure function of the shared secret and the verifier's
//! clock; nothing here touches storage, so every operation is safe to call
//! concurrently once the codec is constructed.
//!
//! # Examples
//!
//! ## Issuing and verifying tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! );
//! let token = codec.issue_access_token("alice@x.com", "ROLE_CANDIDATE").unwrap();
//! assert!(codec.is_valid(&token));
//! assert_eq!(codec.extract_subject(&token).unwrap(), "alice@x.com");
//! ```
//!
//! ## Password hashing
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.matches("my_password", &digest).unwrap());
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::TokenClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenPair;
pub use password::CredentialHasher;
pub use password::PasswordError;
