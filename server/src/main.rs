//! Frota fleet-management API server.
//!
//! Wires the auth routes, the protected vehicle routes, the database
//! pool and schema setup, then serves over HTTP.

use axum::{routing::get, Router};
use frota_api::vehicles;
use frota_auth::{handlers, AuthConfig, AuthService, PgUserStore};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

async fn root() -> &'static str {
    "Frota API running. See /vehicles for the fleet."
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Missing or invalid configuration is fatal here, never per-request.
    let config = AuthConfig::from_env().expect("invalid configuration");

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL environment variable must be set");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("failed to connect to database");

    let store = PgUserStore::new(pool.clone());
    store.migrate().await.expect("user migrations failed");
    vehicles::migrate(&pool)
        .await
        .expect("vehicle migrations failed");

    let auth = Arc::new(AuthService::new(Arc::new(store), &config));

    let app = Router::new()
        .route("/", get(root))
        .merge(handlers::routes(auth.clone()))
        .merge(vehicles::routes(pool, auth))
        .layer(CorsLayer::permissive());

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app).await.expect("server error");
}
