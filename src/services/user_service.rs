use std::sync::Arc;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use password_hash::{PasswordHash, SaltString};

use crate::auth;
use crate::dto::{AuthData, AuthStatus, LoginRequest, RegisterRequest, UserResponse, UserUpsert};
use crate::models::User;
use crate::store::{Store, UserUpdateConflict};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("{0}")]
    Validation(String),
    #[error("username '{0}' is already taken")]
    AlreadyExists(String),
    /// One variant covers both unknown-username and wrong-password so the
    /// client-visible failure is identical in either case.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Token(#[from] auth::AuthError),
    #[error("{0}")]
    PasswordHash(String),
}

/// Registration, login, and identity lookups, plus plain user CRUD.
///
/// Tokens carry the username as subject; passwords are stored as argon2 PHC
/// strings and verified by re-hash, never by raw comparison.
#[derive(Clone)]
pub struct UserService {
    store: Arc<Store>,
}

impl UserService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<AuthData, UserError> {
        let username = req.username.trim().to_string();
        let len = username.chars().count();
        if len < 3 {
            return Err(UserError::Validation("username must be at least 3 characters".into()));
        }
        if len > 20 {
            return Err(UserError::Validation("username must be at most 20 characters".into()));
        }
        if req.password.chars().count() < 6 {
            return Err(UserError::Validation("password must be at least 6 characters".into()));
        }

        let hash = hash_password(&req.password)?;
        let user = self
            .store
            .insert_user(username.clone(), hash)
            .await
            .ok_or(UserError::AlreadyExists(username))?;

        tracing::info!(user = %user.username, id = user.id, "registered new user");
        self.auth_data(user)
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthData, UserError> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(UserError::Validation("username must not be blank".into()));
        }
        if req.password.trim().is_empty() {
            return Err(UserError::Validation("password must not be blank".into()));
        }

        let user = self
            .store
            .user_by_username(username)
            .await
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&user.password_hash, &req.password) {
            return Err(UserError::InvalidCredentials);
        }

        tracing::info!(user = %user.username, "login succeeded");
        self.auth_data(user)
    }

    /// Resolve the bound principal back to its user record. Fails only when
    /// the subject was deleted after the token was issued; missing or invalid
    /// tokens never reach this point.
    pub async fn current_user(&self, username: &str) -> Result<UserResponse, UserError> {
        self.store
            .user_by_username(username)
            .await
            .map(UserResponse::from)
            .ok_or_else(|| UserError::NotFound(format!("user '{}' no longer exists", username)))
    }

    /// Never fails: every problem degrades to `authenticated: false` plus a
    /// human-readable reason.
    pub async fn check_auth(&self, principal: Option<&str>) -> (AuthStatus, String) {
        match principal {
            None => (
                AuthStatus { authenticated: false, user: None },
                "not authenticated: missing, invalid or expired token".to_string(),
            ),
            Some(username) => match self.store.user_by_username(username).await {
                Some(user) => (
                    AuthStatus { authenticated: true, user: Some(user.into()) },
                    format!("authenticated as '{}'", username),
                ),
                None => (
                    AuthStatus { authenticated: false, user: None },
                    format!("not authenticated: user '{}' no longer exists", username),
                ),
            },
        }
    }

    /// Tokens are stateless, so there is nothing to revoke server-side;
    /// clients discard the token. Always succeeds.
    pub fn logout(&self, principal: Option<&str>) {
        match principal {
            Some(username) => tracing::info!(user = username, "logout"),
            None => tracing::debug!("logout without a bound principal"),
        }
    }

    // ---- plain user CRUD ----

    pub async fn list(&self) -> Vec<UserResponse> {
        self.store.list_users().await.into_iter().map(Into::into).collect()
    }

    pub async fn get(&self, id: i64) -> Result<UserResponse, UserError> {
        self.store
            .user_by_id(id)
            .await
            .map(UserResponse::from)
            .ok_or_else(|| UserError::NotFound(format!("user not found: {}", id)))
    }

    pub async fn create(&self, req: UserUpsert) -> Result<UserResponse, UserError> {
        let data = self
            .register(RegisterRequest { username: req.username, password: req.password })
            .await?;
        Ok(data.user)
    }

    pub async fn update(&self, id: i64, req: UserUpsert) -> Result<UserResponse, UserError> {
        let username = req.username.trim().to_string();
        if username.is_empty() {
            return Err(UserError::Validation("username must not be blank".into()));
        }
        if req.password.chars().count() < 6 {
            return Err(UserError::Validation("password must be at least 6 characters".into()));
        }

        let hash = hash_password(&req.password)?;
        self.store
            .update_user(id, username.clone(), hash)
            .await
            .map(UserResponse::from)
            .map_err(|conflict| match conflict {
                UserUpdateConflict::NotFound => UserError::NotFound(format!("user not found: {}", id)),
                UserUpdateConflict::DuplicateUsername => UserError::AlreadyExists(username),
            })
    }

    /// Cascades through the user's topics, tasks, and todos.
    pub async fn delete(&self, id: i64) -> bool {
        self.store.delete_user(id).await
    }

    fn auth_data(&self, user: User) -> Result<AuthData, UserError> {
        let token = auth::issue_token(&user.username, Utc::now())?;
        Ok(AuthData {
            user: user.into(),
            token,
            expires_in: auth::token_ttl_seconds(),
        })
    }
}

fn hash_password(password: &str) -> Result<String, UserError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| UserError::PasswordHash(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| UserError::PasswordHash(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}
