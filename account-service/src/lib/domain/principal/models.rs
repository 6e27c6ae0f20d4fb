use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::principal::errors::EmailError;
use crate::principal::errors::PrincipalIdError;
use crate::principal::errors::RoleError;

/// Principal aggregate entity.
///
/// Represents a registered account. Owned and mutated by the external
/// directory; this core only reads it and triggers creation at registration.
/// Email is the unique natural key, enforced by the directory.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: PrincipalId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Principal unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    /// Generate a new random principal ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a principal ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PrincipalIdError> {
        Uuid::parse_str(s)
            .map(PrincipalId)
            .map_err(|e| PrincipalIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed role enumeration.
///
/// Each variant maps to exactly one canonical authority string, the form
/// embedded in token claims. The mapping is exhaustive and immutable; open
/// string-typed roles are deliberately not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Candidate,
    Employer,
    Admin,
}

impl Role {
    /// Canonical authority string for this role.
    pub fn authority(&self) -> &'static str {
        match self {
            Role::Candidate => "ROLE_CANDIDATE",
            Role::Employer => "ROLE_EMPLOYER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    /// Inverse of [`authority`](Self::authority).
    ///
    /// # Errors
    /// * `UnknownAuthority` - String is not one of the canonical authorities
    pub fn from_authority(authority: &str) -> Result<Self, RoleError> {
        match authority {
            "ROLE_CANDIDATE" => Ok(Role::Candidate),
            "ROLE_EMPLOYER" => Ok(Role::Employer),
            "ROLE_ADMIN" => Ok(Role::Admin),
            other => Err(RoleError::UnknownAuthority(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.authority())
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new principal with domain types
#[derive(Debug)]
pub struct RegisterPrincipalCommand {
    pub email: EmailAddress,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl RegisterPrincipalCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (hashed by the service, never stored)
    /// * `name` - Display name
    /// * `role` - Role granted to the new principal
    pub fn new(email: EmailAddress, password: String, name: String, role: Role) -> Self {
        Self {
            email,
            password,
            name,
            role,
        }
    }
}

/// Acknowledgment returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationReceipt {
    pub message: String,
}

/// Tokens and identity handed back to the transport layer after a successful
/// login or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub subject: String,
    pub role_authority: String,
}
