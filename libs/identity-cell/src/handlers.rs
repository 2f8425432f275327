// libs/identity-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::user::VerificationStatus;

use crate::models::{
    IdentityError, LoginRequest, RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
};
use crate::services::IdentityService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub status: String,
}

fn map_identity_error(e: IdentityError) -> AppError {
    match e {
        IdentityError::DuplicateEmail => AppError::Conflict("Email already registered".to_string()),
        IdentityError::InvalidCredentials => AppError::Auth("Invalid credentials".to_string()),
        IdentityError::NotFound => AppError::NotFound("User not found".to_string()),
        IdentityError::ValidationError(msg) => AppError::ValidationError(msg),
        IdentityError::DatabaseError(msg) => AppError::Database(msg),
    }
}

// ==============================================================================
// AUTH HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state);

    let user = service.register(request).await.map_err(map_identity_error)?;

    Ok(Json(json!({
        "message": "User registered successfully",
        "user": user
    })))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Login attempt for: {}", request.email);
    let service = IdentityService::new(&state);

    let user = service
        .authenticate(&request.email, &request.password)
        .await
        .map_err(map_identity_error)?;

    Ok(Json(json!({
        "message": "Login successful",
        "user": user
    })))
}

#[axum::debug_handler]
pub async fn reset_password(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    // Reject malformed payloads before they reach the manager.
    if request.email.is_empty() || request.new_password.is_empty() {
        return Err(AppError::ValidationError(
            "Email and new password are required".to_string(),
        ));
    }

    let service = IdentityService::new(&state);
    let updated = service
        .reset_password(&request.email, &request.new_password)
        .await
        .map_err(map_identity_error)?;

    Ok(Json(json!({ "success": updated })))
}

// ==============================================================================
// PROFILE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state);

    let user = service
        .get_by_email(&query.email)
        .await
        .map_err(map_identity_error)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!(user)))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<ProfileQuery>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state);

    let user = service
        .update_profile(&query.email, request)
        .await
        .map_err(map_identity_error)?;

    Ok(Json(json!(user)))
}

#[axum::debug_handler]
pub async fn list_users(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state);
    let users = service.list_users().await.map_err(map_identity_error)?;
    Ok(Json(json!(users)))
}

#[axum::debug_handler]
pub async fn list_lawyers(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state);
    let lawyers = service.list_lawyers().await.map_err(map_identity_error)?;
    Ok(Json(json!(lawyers)))
}

#[axum::debug_handler]
pub async fn verify_lawyer(
    State(state): State<Arc<AppConfig>>,
    Path(user_id): Path<i64>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<Value>, AppError> {
    // Status arrives as free text from admin tooling; parse it into the
    // closed set before it reaches the manager.
    let status: VerificationStatus = query
        .status
        .parse()
        .map_err(AppError::ValidationError)?;

    let service = IdentityService::new(&state);
    let user = service
        .set_verification_status(user_id, status)
        .await
        .map_err(map_identity_error)?;

    Ok(Json(json!(user)))
}

// ==============================================================================
// ADMIN HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_pending_lawyers(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state);
    let lawyers = service
        .list_pending_lawyers()
        .await
        .map_err(map_identity_error)?;
    Ok(Json(json!(lawyers)))
}

#[axum::debug_handler]
pub async fn dashboard_stats(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state);
    let stats = service.dashboard_stats().await.map_err(map_identity_error)?;
    Ok(Json(json!(stats)))
}
