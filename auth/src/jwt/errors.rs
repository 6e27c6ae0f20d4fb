use thiserror::Error;

/// Error type for token operations.
///
/// `Expired` is kept distinct from `SignatureInvalid`/`Malformed` so a caller
/// can attempt a refresh on expiry but force re-authentication on tampering.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token structure cannot be parsed: {0}")]
    Malformed(String),

    #[error("Token signature does not match claims body")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,
}
