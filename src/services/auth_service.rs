use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::repositories::BenutzerRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, verify_token, JwtClaims, JwtConfig};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Authentication service
pub struct AuthService {
    benutzer: Arc<dyn BenutzerRepository>,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(benutzer: Arc<dyn BenutzerRepository>, jwt: JwtConfig) -> Self {
        Self {
            benutzer,
            jwt,
            bcrypt_cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Check the credentials and issue a token. Unknown users and wrong
    /// passwords are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request
            .validate()
            .map_err(|_| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let benutzer = self
            .benutzer
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %request.username, "🔒 Login für unbekannten Benutzer");
                AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
            })?;

        if !verify(&request.password, &benutzer.password_hash)? {
            tracing::warn!(username = %benutzer.username, "🔒 Falsches Passwort");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = generate_token(&benutzer.username, &self.jwt)?;
        tracing::info!(username = %benutzer.username, "🔑 Login erfolgreich");

        Ok(LoginResponse::success(token, self.jwt.expiration))
    }

    pub fn verify(&self, token: &str) -> AppResult<JwtClaims> {
        verify_token(token, &self.jwt)
    }

    /// Create the user unless the username is taken. Returns whether a user
    /// was created.
    pub async fn ensure_user(&self, username: &str, password: &str) -> AppResult<bool> {
        if self.benutzer.find_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash(password, self.bcrypt_cost)?;
        self.benutzer.create(username, &password_hash).await?;
        tracing::info!(username = %username, "👤 Benutzer angelegt");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Benutzer;
    use crate::repositories::InMemoryStore;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(InMemoryStore::<Benutzer>::new()),
            JwtConfig {
                secret: "test-secret".to_string(),
                expiration: 900,
            },
        )
        .with_bcrypt_cost(4)
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_unknown_user_is_unauthorized() {
        let result = service().login(login("niemand", "secret")).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let service = service();
        assert!(service.ensure_user("admin", "geheim123").await.unwrap());
        assert!(!service.ensure_user("admin", "anders").await.unwrap());

        let response = service.login(login("admin", "geheim123")).await.unwrap();
        assert!(response.success);
        assert_eq!(response.expires_in, 900);
        assert_eq!(service.verify(&response.token).unwrap().sub, "admin");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let service = service();
        service.ensure_user("admin", "geheim123").await.unwrap();
        let result = service.login(login("admin", "falsch")).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
