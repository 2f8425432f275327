// libs/review-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn review_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/add", post(handlers::create_review))
        .route("/{review_id}/respond", patch(handlers::respond_to_review))
        .route("/lawyer/{lawyer_id}", get(handlers::get_lawyer_reviews))
        .route("/client/{client_id}", get(handlers::get_client_reviews))
        .with_state(state)
}
