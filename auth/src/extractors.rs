//! Authentication Extractors
//!
//! Handler-side access to the identity resolved by the guard.

use crate::error::AuthError;
use crate::token::Claims;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Authenticated user identity extracted from verified token claims.
///
/// Only available on routes behind [`crate::middleware::require_auth`];
/// elsewhere extraction rejects with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .ok_or(AuthError::MissingCredentials)?;

        Ok(AuthUser { id: claims.sub })
    }
}
