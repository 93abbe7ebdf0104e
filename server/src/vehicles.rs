//! Vehicle CRUD Routes
//!
//! Fleet inventory endpoints. Every route sits behind the auth guard;
//! an unauthenticated request is rejected before any handler here
//! runs.

use crate::error::ApiError;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, patch, put},
    Json, Router,
};
use frota_auth::{middleware::require_auth, AuthState};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

/// Vehicle status enum matching database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Inactive,
}

/// Vehicle entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub plate: String,
    pub status: VehicleStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicle {
    #[validate(length(min = 3, max = 100, message = "Name must be 3-100 characters"))]
    pub name: String,

    #[validate(length(min = 7, max = 8, message = "Plate must be 7-8 characters"))]
    pub plate: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicle {
    #[validate(length(min = 3, max = 100, message = "Name must be 3-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 7, max = 8, message = "Plate must be 7-8 characters"))]
    pub plate: Option<String>,
}

pub fn routes(db: PgPool, auth: AuthState) -> Router {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/vehicles/:id", put(update_vehicle).delete(delete_vehicle))
        .route("/vehicles/:id/archive", patch(archive_vehicle))
        .route("/vehicles/:id/restore", patch(restore_vehicle))
        .route_layer(axum_middleware::from_fn_with_state(auth, require_auth))
        .with_state(db)
}

/// Create the vehicles table and its status type if missing.
pub async fn migrate(db: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running vehicle migrations");

    sqlx::query(
        r#"
        DO $$ BEGIN
            CREATE TYPE vehicle_status AS ENUM ('active', 'inactive');
        EXCEPTION
            WHEN duplicate_object THEN null;
        END $$;
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            plate VARCHAR(8) NOT NULL,
            status vehicle_status NOT NULL DEFAULT 'active'
        );
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}

/// GET /vehicles - List all vehicles
pub async fn list_vehicles(State(db): State<PgPool>) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id")
        .fetch_all(&db)
        .await?;

    Ok(Json(vehicles))
}

/// POST /vehicles - Register a new vehicle
pub async fn create_vehicle(
    State(db): State<PgPool>,
    Json(input): Json<CreateVehicle>,
) -> Result<(StatusCode, Json<Vehicle>), ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let vehicle = sqlx::query_as::<_, Vehicle>(
        "INSERT INTO vehicles (name, plate) VALUES ($1, $2) RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.plate)
    .fetch_one(&db)
    .await?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// PUT /vehicles/:id - Update name/plate
pub async fn update_vehicle(
    State(db): State<PgPool>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateVehicle>,
) -> Result<Json<Vehicle>, ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let vehicle = sqlx::query_as::<_, Vehicle>(
        r#"
        UPDATE vehicles SET
            name = COALESCE($1, name),
            plate = COALESCE($2, plate)
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(&input.plate)
    .bind(id)
    .fetch_optional(&db)
    .await?
    .ok_or(ApiError::NotFound)?;

    Ok(Json(vehicle))
}

/// PATCH /vehicles/:id/archive - Mark a vehicle inactive
pub async fn archive_vehicle(
    State(db): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<Vehicle>, ApiError> {
    set_status(&db, id, VehicleStatus::Inactive).await
}

/// PATCH /vehicles/:id/restore - Mark a vehicle active again
pub async fn restore_vehicle(
    State(db): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<Vehicle>, ApiError> {
    set_status(&db, id, VehicleStatus::Active).await
}

async fn set_status(
    db: &PgPool,
    id: i64,
    status: VehicleStatus,
) -> Result<Json<Vehicle>, ApiError> {
    let vehicle = sqlx::query_as::<_, Vehicle>(
        "UPDATE vehicles SET status = $1 WHERE id = $2 RETURNING *",
    )
    .bind(status)
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(ApiError::NotFound)?;

    Ok(Json(vehicle))
}

/// DELETE /vehicles/:id - Remove a vehicle
pub async fn delete_vehicle(
    State(db): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
        .bind(id)
        .execute(&db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
