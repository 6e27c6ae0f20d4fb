use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialHasher;
use auth::TokenCodec;
use chrono::Utc;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::models::RegisterPrincipalCommand;
use crate::principal::errors::AuthError;
use crate::principal::models::RegistrationReceipt;
use crate::principal::models::SessionTokens;
use crate::principal::ports::AuthServicePort;
use crate::principal::ports::PrincipalDirectory;

/// Authentication orchestrator.
///
/// Composes the token codec, the credential hasher, and the external
/// principal directory. Holds no mutable state after construction; the
/// directory and hasher calls are the only potentially blocking operations,
/// and cancellation/deadlines are the caller's concern.
pub struct AuthService<D>
where
    D: PrincipalDirectory,
{
    directory: Arc<D>,
    credential_hasher: CredentialHasher,
    token_codec: TokenCodec,
}

impl<D> AuthService<D>
where
    D: PrincipalDirectory,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - External principal directory implementation
    /// * `token_codec` - Codec configured with the shared secret and TTLs
    pub fn new(directory: Arc<D>, token_codec: TokenCodec) -> Self {
        Self {
            directory,
            credential_hasher: CredentialHasher::new(),
            token_codec,
        }
    }
}

#[async_trait]
impl<D> AuthServicePort for AuthService<D>
where
    D: PrincipalDirectory,
{
    async fn register(
        &self,
        command: RegisterPrincipalCommand,
    ) -> Result<RegistrationReceipt, AuthError> {
        if self.directory.exists_by_email(&command.email).await? {
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }

        let password_hash = self.credential_hasher.hash(&command.password)?;

        let now = Utc::now();
        let principal = Principal {
            id: PrincipalId::new(),
            email: command.email,
            password_hash,
            name: command.name,
            role: command.role,
            active: true,
            created_at: now,
            updated_at: now,
        };

        // The availability check above is not atomic with this write; the
        // directory's uniqueness constraint decides the race, and its
        // EmailAlreadyExists maps back to DuplicateEmail.
        let saved = self.directory.save(principal).await?;

        tracing::info!(email = %saved.email, role = %saved.role, "principal registered");

        Ok(RegistrationReceipt {
            message: format!("Account registered for {}", saved.email),
        })
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<SessionTokens, AuthError> {
        let principal = self
            .directory
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email = %email, "login attempt for unknown principal");
                AuthError::PrincipalNotFound(email.to_string())
            })?;

        let matched = self
            .credential_hasher
            .matches(password, &principal.password_hash)?;
        if !matched {
            tracing::warn!(email = %email, "login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self
            .token_codec
            .issue_pair(principal.email.as_str(), principal.role.authority())?;

        // Bind the fresh pair to the principal we just looked up.
        if !self
            .token_codec
            .is_valid_for_subject(&pair.access_token, principal.email.as_str())
        {
            return Err(AuthError::Token(auth::TokenError::EncodingFailed(
                "issued token does not verify for login subject".to_string(),
            )));
        }

        tracing::info!(email = %principal.email, role = %principal.role, "login succeeded");

        Ok(SessionTokens {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            subject: principal.email.to_string(),
            role_authority: principal.role.authority().to_string(),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, AuthError> {
        let claims = self.token_codec.decode(refresh_token).map_err(|e| {
            tracing::warn!(error = %e, "refresh token rejected");
            AuthError::RefreshTokenInvalid
        })?;

        // No directory access on this path: the claims are the whole truth.
        // The refresh token is handed back unchanged (no rotation).
        let access_token = self
            .token_codec
            .issue_access_token(&claims.sub, &claims.role)?;

        Ok(SessionTokens {
            access_token,
            refresh_token: refresh_token.to_string(),
            subject: claims.sub,
            role_authority: claims.role,
        })
    }

    async fn email_available(&self, email: &EmailAddress) -> Result<bool, AuthError> {
        Ok(!self.directory.exists_by_email(email).await?)
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenError;
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::principal::errors::DirectoryError;
    use crate::principal::models::Role;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestDirectory {}

        #[async_trait]
        impl PrincipalDirectory for TestDirectory {
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Principal>, DirectoryError>;
            async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, DirectoryError>;
            async fn save(&self, principal: Principal) -> Result<Principal, DirectoryError>;
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Duration::minutes(15), Duration::days(7))
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s.to_string()).unwrap()
    }

    fn principal(email_str: &str, password: &str, role: Role) -> Principal {
        let now = Utc::now();
        Principal {
            id: PrincipalId::new(),
            email: email(email_str),
            password_hash: CredentialHasher::new().hash(password).unwrap(),
            name: "Alice".to_string(),
            role,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut directory = MockTestDirectory::new();

        directory
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));

        directory
            .expect_save()
            .withf(|p| {
                p.email.as_str() == "alice@x.com"
                    && p.role == Role::Candidate
                    && p.active
                    && p.password_hash.starts_with("$argon2")
                    && p.created_at == p.updated_at
            })
            .times(1)
            .returning(|principal| Ok(principal));

        let service = AuthService::new(Arc::new(directory), codec());

        let command = RegisterPrincipalCommand::new(
            email("alice@x.com"),
            "pw123".to_string(),
            "Alice".to_string(),
            Role::Candidate,
        );

        let receipt = service.register(command).await.unwrap();
        assert!(receipt.message.contains("alice@x.com"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_writes_nothing() {
        let mut directory = MockTestDirectory::new();

        directory
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(true));

        // The duplicate path must not reach the directory write.
        directory.expect_save().times(0);

        let service = AuthService::new(Arc::new(directory), codec());

        let command = RegisterPrincipalCommand::new(
            email("alice@x.com"),
            "pw123".to_string(),
            "Alice".to_string(),
            Role::Candidate,
        );

        let result = service.register(command).await;
        assert!(matches!(result.unwrap_err(), AuthError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_register_late_uniqueness_violation_is_duplicate_email() {
        let mut directory = MockTestDirectory::new();

        directory
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));

        // Concurrent registration won the race between check and write.
        directory
            .expect_save()
            .times(1)
            .returning(|p| Err(DirectoryError::EmailAlreadyExists(p.email.to_string())));

        let service = AuthService::new(Arc::new(directory), codec());

        let command = RegisterPrincipalCommand::new(
            email("alice@x.com"),
            "pw123".to_string(),
            "Alice".to_string(),
            Role::Candidate,
        );

        let result = service.register(command).await;
        assert!(matches!(result.unwrap_err(), AuthError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_login_success_issues_bound_pair() {
        let mut directory = MockTestDirectory::new();

        let stored = principal("alice@x.com", "pw123", Role::Candidate);
        directory
            .expect_find_by_email()
            .withf(|e| e.as_str() == "alice@x.com")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(Arc::new(directory), codec());

        let session = service.login(&email("alice@x.com"), "pw123").await.unwrap();

        assert_eq!(session.subject, "alice@x.com");
        assert_eq!(session.role_authority, "ROLE_CANDIDATE");

        // Both tokens verify under the shared secret and carry the subject.
        let verifier = codec();
        let access = verifier.decode(&session.access_token).unwrap();
        let refresh = verifier.decode(&session.refresh_token).unwrap();
        assert_eq!(access.sub, "alice@x.com");
        assert_eq!(access.role, "ROLE_CANDIDATE");
        assert_eq!(refresh.sub, access.sub);
        assert_eq!(refresh.role, access.role);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut directory = MockTestDirectory::new();

        let stored = principal("alice@x.com", "pw123", Role::Candidate);
        directory
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(Arc::new(directory), codec());

        let result = service.login(&email("alice@x.com"), "wrong").await;
        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(err.is_authentication_failure());
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut directory = MockTestDirectory::new();

        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(directory), codec());

        let result = service.login(&email("ghost@x.com"), "pw123").await;
        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::PrincipalNotFound(_)));
        // Distinct internally, collapsed at the transport boundary.
        assert!(err.is_authentication_failure());
    }

    #[tokio::test]
    async fn test_refresh_reissues_access_without_directory() {
        // No expectations set: any directory call would fail the test.
        let directory = MockTestDirectory::new();
        let service = AuthService::new(Arc::new(directory), codec());

        let refresh_token = codec()
            .issue_refresh_token("alice@x.com", "ROLE_EMPLOYER")
            .unwrap();

        let session = service.refresh(&refresh_token).await.unwrap();

        // Refresh token is handed back byte-identical; no rotation.
        assert_eq!(session.refresh_token, refresh_token);
        assert_eq!(session.subject, "alice@x.com");
        assert_eq!(session.role_authority, "ROLE_EMPLOYER");

        let access = codec().decode(&session.access_token).unwrap();
        assert_eq!(access.sub, "alice@x.com");
        assert_eq!(access.role, "ROLE_EMPLOYER");
    }

    #[tokio::test]
    async fn test_refresh_expired_token() {
        let directory = MockTestDirectory::new();
        let service = AuthService::new(Arc::new(directory), codec());

        // Refresh TTL in the past makes the token expired at issuance.
        let expired_codec = TokenCodec::new(SECRET, Duration::minutes(15), Duration::seconds(-60));
        let expired = expired_codec
            .issue_refresh_token("alice@x.com", "ROLE_CANDIDATE")
            .unwrap();
        assert_eq!(codec().decode(&expired).unwrap_err(), TokenError::Expired);

        let result = service.refresh(&expired).await;
        assert!(matches!(result.unwrap_err(), AuthError::RefreshTokenInvalid));
    }

    #[tokio::test]
    async fn test_refresh_garbage_token() {
        let directory = MockTestDirectory::new();
        let service = AuthService::new(Arc::new(directory), codec());

        let result = service.refresh("not.a.token").await;
        assert!(matches!(result.unwrap_err(), AuthError::RefreshTokenInvalid));
    }

    #[tokio::test]
    async fn test_refresh_foreign_secret_token() {
        let directory = MockTestDirectory::new();
        let service = AuthService::new(Arc::new(directory), codec());

        let foreign = TokenCodec::new(
            b"another_secret_at_least_32_bytes!!",
            Duration::minutes(15),
            Duration::days(7),
        );
        let token = foreign
            .issue_refresh_token("alice@x.com", "ROLE_CANDIDATE")
            .unwrap();

        let result = service.refresh(&token).await;
        assert!(matches!(result.unwrap_err(), AuthError::RefreshTokenInvalid));
    }

    #[tokio::test]
    async fn test_email_available() {
        let mut directory = MockTestDirectory::new();

        directory
            .expect_exists_by_email()
            .withf(|e| e.as_str() == "taken@x.com")
            .times(1)
            .returning(|_| Ok(true));
        directory
            .expect_exists_by_email()
            .withf(|e| e.as_str() == "free@x.com")
            .times(1)
            .returning(|_| Ok(false));

        let service = AuthService::new(Arc::new(directory), codec());

        assert!(!service.email_available(&email("taken@x.com")).await.unwrap());
        assert!(service.email_available(&email("free@x.com")).await.unwrap());
    }
}
