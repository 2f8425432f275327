use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{CreateReviewRequest, Review, ReviewError};

pub struct ReviewService {
    supabase: SupabaseClient,
}

impl ReviewService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Record a client review. The referenced appointment is not checked;
    /// review bookkeeping is decoupled from the appointment lifecycle.
    pub async fn create_review(&self, request: CreateReviewRequest) -> Result<Review, ReviewError> {
        debug!(
            "Creating review for appointment {} by client {}",
            request.appointment_id, request.client_id
        );

        let row = Self::new_review_row(&request, Utc::now());

        let review: Review = self
            .supabase
            .insert_returning("reviews", row)
            .await
            .map_err(|e| ReviewError::DatabaseError(e.to_string()))?;

        info!("Review {} created for lawyer {}", review.id, review.lawyer_id);
        Ok(review)
    }

    /// Attach the lawyer's response and refresh the update timestamp.
    pub async fn respond_to_review(
        &self,
        review_id: i64,
        response: &str,
    ) -> Result<Review, ReviewError> {
        debug!("Responding to review: {}", review_id);

        let path = format!("/rest/v1/reviews?id=eq.{}", review_id);
        let mut updated: Vec<Review> = self
            .supabase
            .patch_returning(&path, Self::response_patch(response, Utc::now()))
            .await
            .map_err(|e| ReviewError::DatabaseError(e.to_string()))?;

        if updated.is_empty() {
            return Err(ReviewError::NotFound);
        }

        Ok(updated.remove(0))
    }

    pub async fn get_reviews_for_lawyer(&self, lawyer_id: i64) -> Result<Vec<Review>, ReviewError> {
        let path = format!("/rest/v1/reviews?lawyer_id=eq.{}", lawyer_id);
        self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ReviewError::DatabaseError(e.to_string()))
    }

    pub async fn get_reviews_for_client(&self, client_id: i64) -> Result<Vec<Review>, ReviewError> {
        let path = format!("/rest/v1/reviews?client_id=eq.{}", client_id);
        self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ReviewError::DatabaseError(e.to_string()))
    }

    /// New reviews carry no response and identical creation/update stamps.
    fn new_review_row(request: &CreateReviewRequest, now: DateTime<Utc>) -> Value {
        json!({
            "appointment_id": request.appointment_id,
            "client_id": request.client_id,
            "lawyer_id": request.lawyer_id,
            "rating": request.rating,
            "comment": request.comment,
            "response": Value::Null,
            "created_at": now,
            "updated_at": now,
        })
    }

    fn response_patch(response: &str, now: DateTime<Utc>) -> Value {
        json!({
            "response": response,
            "updated_at": now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateReviewRequest {
        CreateReviewRequest {
            appointment_id: 10,
            client_id: 1,
            lawyer_id: 2,
            rating: 4,
            comment: "Helpful".to_string(),
        }
    }

    #[test]
    fn new_reviews_start_with_matching_timestamps_and_no_response() {
        let now = Utc::now();
        let row = ReviewService::new_review_row(&request(), now);

        assert_eq!(row["created_at"], row["updated_at"]);
        assert!(row["response"].is_null());
        assert_eq!(row["rating"], 4);
        assert_eq!(row["comment"], "Helpful");
    }

    #[test]
    fn responding_refreshes_the_update_timestamp() {
        let created = Utc::now();
        let row = ReviewService::new_review_row(&request(), created);

        let later = created + chrono::Duration::seconds(5);
        let patch = ReviewService::response_patch("Thank you", later);

        assert_eq!(patch["response"], "Thank you");
        let updated: DateTime<Utc> =
            serde_json::from_value(patch["updated_at"].clone()).unwrap();
        let original: DateTime<Utc> =
            serde_json::from_value(row["created_at"].clone()).unwrap();
        assert!(updated > original);
    }
}
