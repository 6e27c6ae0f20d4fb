use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use account_service::principal::errors::DirectoryError;
use account_service::principal::models::EmailAddress;
use account_service::principal::models::Principal;
use account_service::principal::ports::PrincipalDirectory;
use account_service::principal::AuthService;
use async_trait::async_trait;
use auth::TokenCodec;
use chrono::Duration;

pub const SECRET: &[u8] = b"integration_secret_at_least_32_bytes!";

/// In-memory principal directory keyed by email.
///
/// Enforces the uniqueness constraint at the write, so a registration that
/// loses the check-then-act race is rejected with `EmailAlreadyExists`.
pub struct InMemoryDirectory {
    principals: RwLock<HashMap<String, Principal>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            principals: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PrincipalDirectory for InMemoryDirectory {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Principal>, DirectoryError> {
        let principals = self
            .principals
            .read()
            .map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;
        Ok(principals.get(email.as_str()).cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, DirectoryError> {
        let principals = self
            .principals
            .read()
            .map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;
        Ok(principals.contains_key(email.as_str()))
    }

    async fn save(&self, principal: Principal) -> Result<Principal, DirectoryError> {
        let mut principals = self
            .principals
            .write()
            .map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;
        if principals.contains_key(principal.email.as_str()) {
            return Err(DirectoryError::EmailAlreadyExists(
                principal.email.to_string(),
            ));
        }
        principals.insert(principal.email.as_str().to_string(), principal.clone());
        Ok(principal)
    }
}

/// Codec configured like the service under test, for verifying issued tokens.
pub fn verifier() -> TokenCodec {
    TokenCodec::new(SECRET, Duration::minutes(15), Duration::days(7))
}

pub fn test_service() -> AuthService<InMemoryDirectory> {
    AuthService::new(Arc::new(InMemoryDirectory::new()), verifier())
}

pub fn email(s: &str) -> EmailAddress {
    EmailAddress::new(s.to_string()).expect("valid test email")
}
