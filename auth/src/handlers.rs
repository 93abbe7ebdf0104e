//! Authentication HTTP Handlers
//!
//! REST endpoints for registration, login and the current-user lookup.

use crate::error::AuthError;
use crate::extractors::AuthUser;
use crate::middleware;
use crate::models::{LoginRequest, MessageResponse, RegisterRequest, UserResponse};
use crate::service::AuthService;

use axum::{
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

/// Shared auth service state
pub type AuthState = Arc<AuthService>;

/// Create authentication routes.
pub fn routes(auth: AuthState) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(current_user))
        .route_layer(axum_middleware::from_fn_with_state(
            auth.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected)
        .with_state(auth)
}

/// POST /auth/register
///
/// Register a new user account. The password hash never leaves the
/// server.
pub async fn register(
    State(auth): State<AuthState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    auth.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// POST /auth/login
///
/// Authenticate and return a session token. An unknown email is a 404
/// and a wrong password a 401; the enumeration tradeoff of the split
/// responses is documented in DESIGN.md.
pub async fn login(
    State(auth): State<AuthState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let response = auth.login(req).await?;

    Ok(Json(response))
}

/// GET /auth/me
///
/// Current user profile, resolved from the verified token subject.
pub async fn current_user(
    State(auth): State<AuthState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AuthError> {
    let user = auth.current_user(user.id).await?;

    Ok(Json(serde_json::json!({
        "user": UserResponse::from(user)
    })))
}
