use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_store_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned store rows in the shape the PostgREST gateway returns them.
pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn client_row(id: i64, email: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "phone": "9999999999",
            "password": "secret",
            "role": "client",
            "bio": null,
            "location": null,
            "consultation_fee": null,
            "bar_council_number": null,
            "years_of_experience": null,
            "specializations": [],
            "languages": [],
            "education": [],
            "aadhaar_pan": null,
            "drive_link": null,
            "is_verified": false,
            "verification_status": "pending"
        })
    }

    pub fn lawyer_row(id: i64, email: &str, name: &str, verification_status: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "phone": "8888888888",
            "password": "secret",
            "role": "lawyer",
            "bio": "Civil litigation practice",
            "location": "Mumbai",
            "consultation_fee": 500,
            "bar_council_number": "MH/1234/2015",
            "years_of_experience": 9,
            "specializations": ["civil", "property"],
            "languages": ["english", "hindi"],
            "education": ["LLB, Government Law College"],
            "aadhaar_pan": null,
            "drive_link": null,
            "is_verified": verification_status == "verified",
            "verification_status": verification_status
        })
    }

    pub fn appointment_row(id: i64, client_id: i64, lawyer_id: i64, status: &str) -> Value {
        json!({
            "id": id,
            "client_id": client_id,
            "lawyer_id": lawyer_id,
            "appointment_type": "video",
            "status": status,
            "notes": [],
            "date": "2024-05-01",
            "start_time": "10:00:00",
            "end_time": "10:30:00",
            "fee": 500,
            "cancel_reason": null,
            "revision": 0
        })
    }

    pub fn review_row(id: i64, appointment_id: i64, client_id: i64, lawyer_id: i64) -> Value {
        let now = Utc::now().to_rfc3339();
        json!({
            "id": id,
            "appointment_id": appointment_id,
            "client_id": client_id,
            "lawyer_id": lawyer_id,
            "rating": 4,
            "comment": "Helpful",
            "response": null,
            "created_at": now,
            "updated_at": now
        })
    }
}
