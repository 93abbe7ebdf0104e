//! Authentication Middleware
//!
//! The request guard for protected routes. The verifier is carried in
//! router state, so the signing secret is read exactly once at startup
//! and never at request time.

use crate::error::AuthError;
use crate::handlers::AuthState;
use crate::service::AuthService;
use crate::token::Claims;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

fn authenticate(auth: &AuthService, header: Option<&str>) -> Result<Claims, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredentials)?;

    auth.verify_token(token)
}

/// Require an authenticated caller.
///
/// Rejects before the protected handler runs when the Authorization
/// header is absent, malformed, or carries a token that fails
/// verification. On success the claims are stored in request
/// extensions for the [`crate::extractors::AuthUser`] extractor.
///
/// The guard trusts the token's embedded subject entirely and never
/// touches the credential store.
pub async fn require_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let claims = authenticate(&auth, header)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
