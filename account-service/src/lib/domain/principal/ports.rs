use async_trait::async_trait;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::RegisterPrincipalCommand;
use crate::principal::errors::AuthError;
use crate::principal::errors::DirectoryError;
use crate::principal::models::RegistrationReceipt;
use crate::principal::models::SessionTokens;

/// Contract exposed by the authentication core to transport layers.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new principal.
    ///
    /// # Arguments
    /// * `command` - Validated command with email, raw password, name, role
    ///
    /// # Returns
    /// Acknowledgment message
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `Password` - Hashing operation failed
    /// * `Directory` - Directory operation failed
    async fn register(
        &self,
        command: RegisterPrincipalCommand,
    ) -> Result<RegistrationReceipt, AuthError>;

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `PrincipalNotFound` - No principal with this email
    /// * `InvalidCredentials` - Password does not match the stored digest
    /// * `Token` - Token issuance failed
    /// * `Directory` - Directory operation failed
    ///
    /// Transports must collapse `PrincipalNotFound` and `InvalidCredentials`
    /// into one generic response (see `AuthError::is_authentication_failure`).
    async fn login(&self, email: &EmailAddress, password: &str)
        -> Result<SessionTokens, AuthError>;

    /// Re-issue an access token from a refresh token's claims.
    ///
    /// Purely a token-claims operation: the directory is never consulted, and
    /// the refresh token is returned unchanged (no rotation).
    ///
    /// # Errors
    /// * `RefreshTokenInvalid` - Token is malformed, tampered, or expired
    /// * `Token` - Re-issuance failed
    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, AuthError>;

    /// True iff no principal is registered under `email`.
    ///
    /// # Errors
    /// * `Directory` - Directory operation failed
    async fn email_available(&self, email: &EmailAddress) -> Result<bool, AuthError>;
}

/// External directory owning the principal aggregate.
///
/// Email uniqueness is enforced here, not in the core: two concurrent
/// registrations can both pass the availability check, so `save` must reject
/// the loser with `EmailAlreadyExists`.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync + 'static {
    /// Retrieve a principal by email address.
    ///
    /// # Returns
    /// Optional principal entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Directory operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Principal>, DirectoryError>;

    /// Check whether a principal exists for this email.
    ///
    /// # Errors
    /// * `DatabaseError` - Directory operation failed
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, DirectoryError>;

    /// Persist a new principal.
    ///
    /// # Returns
    /// Persisted principal entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Uniqueness constraint rejected the write
    /// * `DatabaseError` - Directory operation failed
    async fn save(&self, principal: Principal) -> Result<Principal, DirectoryError>;
}
