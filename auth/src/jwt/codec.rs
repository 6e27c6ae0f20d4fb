use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::claims::TokenPair;
use super::errors::TokenError;

/// Signed-token codec issuing and verifying paired access/refresh tokens.
///
/// Holds the shared signing secret and the two configured TTLs; all fields
/// are read-only after construction, so one instance can be shared across
/// tasks without locking. Uses HS256 (HMAC with SHA-256).
///
/// Expiry is compared against the verifier's wall clock with zero leeway, so
/// the access TTL must be chosen with operational clock drift in mind.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a new codec.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret (at least 32 bytes for HS256;
    ///   store in environment variables or a vault, never in code)
    /// * `access_ttl` - Lifetime of access tokens
    /// * `refresh_ttl` - Lifetime of refresh tokens
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue a short-lived access token for `subject` with `role_authority`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims serialization or signing failed
    pub fn issue_access_token(
        &self,
        subject: &str,
        role_authority: &str,
    ) -> Result<String, TokenError> {
        self.sign(TokenClaims::new(subject, role_authority, self.access_ttl))
    }

    /// Issue a long-lived refresh token for `subject` with `role_authority`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims serialization or signing failed
    pub fn issue_refresh_token(
        &self,
        subject: &str,
        role_authority: &str,
    ) -> Result<String, TokenError> {
        self.sign(TokenClaims::new(subject, role_authority, self.refresh_ttl))
    }

    /// Issue an access/refresh pair carrying identical subject and role.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims serialization or signing failed
    pub fn issue_pair(&self, subject: &str, role_authority: &str) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(subject, role_authority)?,
            refresh_token: self.issue_refresh_token(subject, role_authority)?,
        })
    }

    /// Verify a token and recover its claims.
    ///
    /// # Errors
    /// * `Malformed` - Structure cannot be parsed as a signed claim set
    /// * `SignatureInvalid` - Signature does not match the claims body
    /// * `Expired` - Current time is strictly past `exp`
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // No clock-skew compensation: expiry is the verifier's wall clock.
        validation.leeway = 0;

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verify a token and project its subject.
    ///
    /// Fails under the same conditions as [`decode`](Self::decode).
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Verify a token and project its role authority.
    ///
    /// Fails under the same conditions as [`decode`](Self::decode).
    pub fn extract_role(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.role)
    }

    /// Verify a token and project its expiry (Unix timestamp).
    ///
    /// Fails under the same conditions as [`decode`](Self::decode).
    pub fn extract_expiry(&self, token: &str) -> Result<i64, TokenError> {
        self.decode(token).map(|claims| claims.exp)
    }

    /// True iff the token verifies and has not expired.
    pub fn is_valid(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }

    /// True iff the token verifies and its subject equals `expected_subject`.
    ///
    /// Binds a token to a specific just-looked-up principal, guarding against
    /// subject/caller mismatch at login time.
    pub fn is_valid_for_subject(&self, token: &str, expected_subject: &str) -> bool {
        self.decode(token)
            .map(|claims| claims.sub == expected_subject)
            .unwrap_or(false)
    }

    fn sign(&self, claims: TokenClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}
