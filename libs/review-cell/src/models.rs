// libs/review-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub appointment_id: i64,
    pub client_id: i64,
    pub lawyer_id: i64,
    pub rating: i32,
    pub comment: String,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    pub appointment_id: i64,
    pub client_id: i64,
    pub lawyer_id: i64,
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondToReviewRequest {
    pub response: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReviewError {
    #[error("Review not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
