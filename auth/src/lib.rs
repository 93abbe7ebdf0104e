//! Frota Authentication Core
//!
//! The authentication and session-trust boundary for the Frota fleet
//! API:
//! - User registration and login over a narrow, injected credential
//!   store
//! - Argon2id password hashing with a random salt per call
//! - Stateless HS256 session tokens (signature + expiry are the only
//!   validity criteria; there is no server-side revocation)
//! - A route guard that verifies the bearer token before any protected
//!   handler runs
//!
//! # Configuration
//!
//! All configuration is loaded from environment variables:
//! - `JWT_SECRET` - Secret key for signing session tokens (required, min 32 chars)
//! - `TOKEN_TTL_SECS` - Session token lifetime in seconds (default: 86400)
//! - `ARGON2_MEMORY_COST` - Argon2 memory cost in KiB (default: 65536)
//! - `ARGON2_TIME_COST` - Argon2 iterations (default: 3)
//! - `ARGON2_PARALLELISM` - Argon2 lanes (default: 4)
//!
//! # Usage
//!
//! ```rust,ignore
//! use frota_auth::{handlers, AuthConfig, AuthService, PgUserStore};
//! use std::sync::Arc;
//!
//! let config = AuthConfig::from_env()?;
//! let store = Arc::new(PgUserStore::new(pool));
//! let auth = Arc::new(AuthService::new(store, &config));
//! let router = handlers::routes(auth);
//! ```
//!
//! Client contract: persist the token returned by `POST /auth/login`
//! and send it back as `Authorization: Bearer <token>`. "Logout" is
//! purely client-side (drop the token); an issued token stays valid
//! until it expires.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod store;
pub mod token;

// Re-export commonly used types
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use handlers::AuthState;
pub use models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserResponse};
pub use service::AuthService;
pub use store::{PgUserStore, User, UserStore};
pub use token::{Claims, TokenError, TokenKeys};
