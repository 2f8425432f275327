// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/book", post(handlers::book_appointment))
        .route("/lawyer/{lawyer_id}", get(handlers::get_lawyer_appointments))
        .route("/client/{client_id}", get(handlers::get_client_appointments))
        .route("/{appointment_id}/confirm", put(handlers::confirm_appointment))
        .route("/{appointment_id}/status", put(handlers::update_appointment_status))
        .route("/{appointment_id}/cancel", put(handlers::cancel_appointment))
        .route("/{appointment_id}/add-note", put(handlers::add_note_to_appointment))
        .with_state(state)
}
