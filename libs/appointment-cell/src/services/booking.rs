// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, BookAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycleService;

pub struct AppointmentBookingService {
    supabase: Arc<SupabaseClient>,
    lifecycle_service: AppointmentLifecycleService,
    max_retry_attempts: u32,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: Arc::new(SupabaseClient::new(config)),
            lifecycle_service: AppointmentLifecycleService::new(),
            max_retry_attempts: 3,
        }
    }

    /// Book a new appointment. No availability or overlap check is made;
    /// a well-formed request always books.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "Booking appointment for client {} with lawyer {}",
            request.client_id, request.lawyer_id
        );

        if request.fee < 0 {
            return Err(AppointmentError::ValidationError(
                "Fee must not be negative".to_string(),
            ));
        }

        let row = json!({
            "client_id": request.client_id,
            "lawyer_id": request.lawyer_id,
            "appointment_type": request.appointment_type,
            "status": AppointmentStatus::Pending,
            "notes": request.notes.unwrap_or_default(),
            "date": request.date,
            "start_time": request.start_time,
            "end_time": request.end_time,
            "fee": request.fee,
            "cancel_reason": Value::Null,
            "revision": 0,
        });

        let appointment: Appointment = self
            .supabase
            .insert_returning("appointments", row)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        info!("Appointment {} booked in pending status", appointment.id);
        Ok(appointment)
    }

    /// Get appointment by ID.
    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment: {}", appointment_id);

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let mut result: Vec<Appointment> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(AppointmentError::NotFound);
        }

        Ok(result.remove(0))
    }

    /// Confirm a pending appointment.
    pub async fn confirm_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        self.update_status(appointment_id, AppointmentStatus::Confirmed).await
    }

    /// Generic status setter. This is also how appointments reach
    /// `completed`.
    pub async fn update_status(
        &self,
        appointment_id: i64,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment {} status to {}", appointment_id, new_status);

        self.update_guarded(appointment_id, |current| {
            self.lifecycle_service
                .validate_status_transition(current.status, new_status)?;
            Ok(json!({ "status": new_status }))
        })
        .await
    }

    /// Cancel an appointment. Works from any state; re-cancelling simply
    /// overwrites the reason.
    pub async fn cancel_appointment(
        &self,
        appointment_id: i64,
        reason: &str,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Cancelling appointment: {}", appointment_id);

        let cancelled = self
            .update_guarded(appointment_id, |current| {
                let mut notes = current.notes.clone();
                notes.push(AppointmentLifecycleService::cancellation_note(reason));
                Ok(json!({
                    "status": AppointmentStatus::Cancelled,
                    "cancel_reason": reason,
                    "notes": notes,
                }))
            })
            .await?;

        info!("Appointment {} cancelled", appointment_id);
        Ok(cancelled)
    }

    /// Append a note. The notes sequence only ever grows.
    pub async fn add_note(
        &self,
        appointment_id: i64,
        note: &str,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Adding note to appointment: {}", appointment_id);

        self.update_guarded(appointment_id, |current| {
            let mut notes = current.notes.clone();
            notes.push(note.to_string());
            Ok(json!({ "notes": notes }))
        })
        .await
    }

    pub async fn get_appointments_for_lawyer(
        &self,
        lawyer_id: i64,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!("/rest/v1/appointments?lawyer_id=eq.{}", lawyer_id);
        self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    pub async fn get_appointments_for_client(
        &self,
        client_id: i64,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!("/rest/v1/appointments?client_id=eq.{}", client_id);
        self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    // ==============================================================================
    // PRIVATE HELPERS
    // ==============================================================================

    /// Read-modify-write with a revision guard. The patch is applied only if
    /// the row still carries the revision we read; a concurrent writer bumps
    /// the revision and forces a retry, so note appends and cancellations
    /// never lose updates.
    async fn update_guarded<F>(
        &self,
        appointment_id: i64,
        build_patch: F,
    ) -> Result<Appointment, AppointmentError>
    where
        F: Fn(&Appointment) -> Result<Value, AppointmentError>,
    {
        for attempt in 1..=self.max_retry_attempts {
            let current = self.get_appointment(appointment_id).await?;

            let mut patch = match build_patch(&current)? {
                Value::Object(map) => map,
                other => {
                    return Err(AppointmentError::DatabaseError(format!(
                        "Unexpected patch payload: {}",
                        other
                    )))
                }
            };
            patch.insert("revision".to_string(), json!(current.revision + 1));

            let path = format!(
                "/rest/v1/appointments?id=eq.{}&revision=eq.{}",
                appointment_id, current.revision
            );

            let mut updated: Vec<Appointment> = self
                .supabase
                .patch_returning(&path, Value::Object(patch))
                .await
                .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

            if !updated.is_empty() {
                return Ok(updated.remove(0));
            }

            warn!(
                "Concurrent update detected for appointment {}, retrying attempt {}/{}",
                appointment_id, attempt, self.max_retry_attempts
            );
            tokio::time::sleep(tokio::time::Duration::from_millis(50 * attempt as u64)).await;
        }

        Err(AppointmentError::DatabaseError(
            "Failed to update appointment after repeated conflicts".to_string(),
        ))
    }
}
