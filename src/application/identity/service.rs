//! Authentication service: login, registration and admin seeding
//!
//! Identity lookups for the `whoami` endpoint live here too.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult, NewUser, RepositoryProvider, Role, User};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Credentials of the bootstrap administrator
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials and return a signed access token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<String> {
        let email = email.to_lowercase();
        let Some(user) = self.repos.users().find_by_email(&email).await? else {
            return Err(DomainError::EmailNotRegistered(email));
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(DomainError::WrongPassword);
        }

        info!(user_id = user.id, role = %user.role, "User logged in");
        self.issue_token(&user)
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a customer account and return its access token.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> DomainResult<String> {
        let email = email.to_lowercase();
        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyTaken(email));
        }

        let user = self
            .create_user(name, &email, password, Role::Customer)
            .await
            .map_err(|e| match e {
                // Lost a race against a concurrent registration
                DomainError::Validation(_) => DomainError::EmailAlreadyTaken(email.clone()),
                other => other,
            })?;

        info!(user_id = user.id, email = %user.email, "New user registered");
        self.issue_token(&user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn whoami(&self, user_id: i32) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Create the administrator unless an ADMIN user already exists.
    /// Returns whether a user was created.
    pub async fn ensure_default_admin(&self, seed: &AdminSeed) -> DomainResult<bool> {
        if self.repos.users().count_with_role(Role::Admin).await? > 0 {
            return Ok(false);
        }

        info!("Creating default admin user...");
        let email = seed.email.to_lowercase();
        if self.repos.users().find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Default admin email is taken by a non-admin user, skipping");
            return Ok(false);
        }

        self.create_user(&seed.name, &email, &seed.password, Role::Admin)
            .await?;
        info!("Default admin created: {}", email);
        warn!("Please change the admin password immediately!");
        Ok(true)
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> DomainResult<User> {
        let password_hash = hash_password(password)?;

        self.repos
            .users()
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                image: None,
                role,
            })
            .await
    }

    fn issue_token(&self, user: &User) -> DomainResult<String> {
        create_token(user, &self.jwt_config)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            JwtConfig {
                secret: "test-secret".into(),
                expiration_hours: 1,
                issuer: "bcr-api".into(),
            },
        )
    }

    #[tokio::test]
    async fn register_then_login_issues_customer_tokens() {
        let svc = service();
        let token = svc
            .register("Sabrina", "Sabrina@Mail.com", "123456")
            .await
            .unwrap();
        let claims = verify_token(&token, svc.jwt_config()).unwrap();
        assert_eq!(claims.role(), Some(Role::Customer));
        assert_eq!(claims.email, "sabrina@mail.com");

        let token = svc.login("sabrina@mail.com", "123456").await.unwrap();
        let claims = verify_token(&token, svc.jwt_config()).unwrap();
        let me = svc.whoami(claims.user_id().unwrap()).await.unwrap();
        assert_eq!(me.name, "Sabrina");
    }

    #[tokio::test]
    async fn login_failures_are_distinguished() {
        let svc = service();
        svc.register("Budi", "budi@mail.com", "secret").await.unwrap();

        let err = svc.login("ghost@mail.com", "secret").await.unwrap_err();
        assert_eq!(err.to_string(), "ghost@mail.com is not registered!");

        let err = svc.login("budi@mail.com", "nope").await.unwrap_err();
        assert!(matches!(err, DomainError::WrongPassword));
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_internal_not_wrong_password() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos
            .users()
            .create(NewUser {
                name: "Rusak".into(),
                email: "rusak@mail.com".into(),
                password_hash: "not-a-bcrypt-hash".into(),
                image: None,
                role: Role::Customer,
            })
            .await
            .unwrap();
        let svc = AuthService::new(
            repos,
            JwtConfig {
                secret: "test-secret".into(),
                expiration_hours: 1,
                issuer: "bcr-api".into(),
            },
        );

        let err = svc.login("rusak@mail.com", "123456").await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let svc = service();
        svc.register("Budi", "budi@mail.com", "secret").await.unwrap();
        let err = svc.register("Budi", "budi@mail.com", "secret").await.unwrap_err();
        assert_eq!(err.to_string(), "budi@mail.com is already taken!!");
    }

    #[tokio::test]
    async fn default_admin_is_created_once() {
        let svc = service();
        let seed = AdminSeed {
            name: "Admin".into(),
            email: "admin@bcr.io".into(),
            password: "admin123".into(),
        };
        assert!(svc.ensure_default_admin(&seed).await.unwrap());
        assert!(!svc.ensure_default_admin(&seed).await.unwrap());

        let token = svc.login("admin@bcr.io", "admin123").await.unwrap();
        let claims = verify_token(&token, svc.jwt_config()).unwrap();
        assert_eq!(claims.role(), Some(Role::Admin));
    }
}
