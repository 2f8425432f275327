// libs/review-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateReviewRequest, RespondToReviewRequest, ReviewError};
use crate::services::ReviewService;

fn map_review_error(e: ReviewError) -> AppError {
    match e {
        ReviewError::NotFound => AppError::NotFound("Review not found".to_string()),
        ReviewError::DatabaseError(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn create_review(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ReviewService::new(&state);

    let review = service.create_review(request).await.map_err(map_review_error)?;

    Ok(Json(json!(review)))
}

#[axum::debug_handler]
pub async fn respond_to_review(
    State(state): State<Arc<AppConfig>>,
    Path(review_id): Path<i64>,
    Json(request): Json<RespondToReviewRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ReviewService::new(&state);

    let review = service
        .respond_to_review(review_id, &request.response)
        .await
        .map_err(map_review_error)?;

    Ok(Json(json!(review)))
}

#[axum::debug_handler]
pub async fn get_lawyer_reviews(
    State(state): State<Arc<AppConfig>>,
    Path(lawyer_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ReviewService::new(&state);

    let reviews = service
        .get_reviews_for_lawyer(lawyer_id)
        .await
        .map_err(map_review_error)?;

    Ok(Json(json!(reviews)))
}

#[axum::debug_handler]
pub async fn get_client_reviews(
    State(state): State<Arc<AppConfig>>,
    Path(client_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = ReviewService::new(&state);

    let reviews = service
        .get_reviews_for_client(client_id)
        .await
        .map_err(map_review_error)?;

    Ok(Json(json!(reviews)))
}
