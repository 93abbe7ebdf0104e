//! Authentication Service
//!
//! Orchestrates the credential store, password hashing and session
//! token issuance. The store is injected so tests can run against an
//! in-memory double.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::password::{self, HashParams};
use crate::store::{User, UserStore};
use crate::token::{Claims, TokenKeys};

use std::sync::Arc;
use uuid::Uuid;

/// Authentication service
pub struct AuthService {
    store: Arc<dyn UserStore>,
    keys: TokenKeys,
    hash_params: HashParams,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            keys: TokenKeys::new(&config.jwt_secret, config.token_ttl_secs),
            hash_params: HashParams {
                memory_cost: config.argon2_memory_cost,
                time_cost: config.argon2_time_cost,
                parallelism: config.argon2_parallelism,
            },
        }
    }

    /// Register a new user.
    ///
    /// All-or-nothing: either the record is created or nothing is.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AuthError> {
        if self.store.find_by_email(&req.email).await?.is_some() {
            return Err(AuthError::EmailExists);
        }

        // Hashing is CPU-bound; keep it off the async workers.
        let params = self.hash_params;
        let password = req.password;
        let password_hash = tokio::task::spawn_blocking(move || password::hash(&password, params))
            .await
            .map_err(|_| AuthError::Internal)??;

        let user = self.store.create(&req.email, &password_hash).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Authenticate a user and issue a session token.
    ///
    /// No server-side session record is created; the token alone is the
    /// session.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self
            .store
            .find_by_email(&req.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password = req.password;
        let stored_hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || password::verify(&password, &stored_hash))
            .await
            .map_err(|_| AuthError::Internal)??;

        if !valid {
            tracing::debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.keys.issue(user.id)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(LoginResponse { token })
    }

    /// Verify a bearer token, returning its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.keys.verify(token)?)
    }

    /// Look up the user behind a verified token subject.
    pub async fn current_user(&self, id: Uuid) -> Result<User, AuthError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
