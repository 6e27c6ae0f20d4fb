use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for PrincipalId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrincipalIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role authority mapping failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role authority: {0}")]
    UnknownAuthority(String),
}

/// Error surfaced by the external principal directory
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Directory error: {0}")]
    DatabaseError(String),
}

impl From<anyhow::Error> for DirectoryError {
    fn from(err: anyhow::Error) -> Self {
        DirectoryError::DatabaseError(err.to_string())
    }
}

/// Top-level error for all authentication operations.
///
/// Every failure is a typed outcome; none is fatal to the process.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid principal ID: {0}")]
    InvalidPrincipalId(#[from] PrincipalIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    // Domain-level errors
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Principal not found: {0}")]
    PrincipalNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Refresh token is invalid")]
    RefreshTokenInvalid,

    // Infrastructure errors
    #[error("Directory error: {0}")]
    Directory(String),
}

impl AuthError {
    /// True for the two variants a transport must collapse into one generic
    /// "authentication failed" response to avoid account-enumeration leakage.
    /// The orchestrator still distinguishes them internally for logging.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AuthError::PrincipalNotFound(_) | AuthError::InvalidCredentials
        )
    }
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            // A late uniqueness violation is still a duplicate registration,
            // not a generic storage failure.
            DirectoryError::EmailAlreadyExists(email) => AuthError::DuplicateEmail(email),
            DirectoryError::DatabaseError(msg) => AuthError::Directory(msg),
        }
    }
}
