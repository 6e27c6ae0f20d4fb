use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by every issued token.
///
/// Ephemeral value: exists only between issuance and verification, never
/// persisted. The signature covers all four fields, so no field is trusted
/// before the signature check passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (principal's email)
    pub sub: String,

    /// Role authority string (e.g. "ROLE_CANDIDATE")
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims expiring `ttl` after the current instant.
    pub fn new(subject: impl Into<String>, role_authority: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            role: role_authority.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Access/refresh tokens issued together at login or refresh time.
///
/// Both are independently self-verifying and carry identical subject/role;
/// they differ only in TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
