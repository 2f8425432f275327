// libs/identity-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn identity_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/reset-password", post(handlers::reset_password))
        .route("/profile", get(handlers::get_profile))
        .route("/profile", put(handlers::update_profile))
        .route("/profile/all", get(handlers::list_users))
        .route("/profile/lawyers", get(handlers::list_lawyers))
        .route("/profile/verify/{user_id}", patch(handlers::verify_lawyer))
        .route("/lawyers", get(handlers::list_lawyers))
        .route("/admin/pending-lawyers", get(handlers::list_pending_lawyers))
        .route("/admin/dashboard-stats", get(handlers::dashboard_stats))
        .with_state(state)
}
