// libs/identity-cell/src/models.rs
use serde::{Deserialize, Serialize};

use shared_models::user::UserRole;

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Candidate user submitted at registration. Lawyer profile fields are
/// accepted here because lawyer onboarding sends them in the same payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: UserRole,

    pub bio: Option<String>,
    pub location: Option<String>,
    pub consultation_fee: Option<i32>,
    pub bar_council_number: Option<String>,
    pub years_of_experience: Option<i32>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    pub aadhaar_pan: Option<String>,
    pub drive_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// Whitelisted profile mutations. Identity fields (id, email, role,
/// password) and verification state are never writable through this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub consultation_fee: Option<i32>,
    pub bar_council_number: Option<String>,
    pub years_of_experience: Option<i32>,
    pub specializations: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub education: Option<Vec<String>>,
    pub aadhaar_pan: Option<String>,
    pub drive_link: Option<String>,
}

impl UpdateProfileRequest {
    /// Build the store patch from the provided fields only.
    pub fn into_patch(self) -> serde_json::Map<String, serde_json::Value> {
        let mut patch = serde_json::Map::new();

        if let Some(name) = self.name {
            patch.insert("name".to_string(), serde_json::json!(name));
        }
        if let Some(phone) = self.phone {
            patch.insert("phone".to_string(), serde_json::json!(phone));
        }
        if let Some(bio) = self.bio {
            patch.insert("bio".to_string(), serde_json::json!(bio));
        }
        if let Some(location) = self.location {
            patch.insert("location".to_string(), serde_json::json!(location));
        }
        if let Some(fee) = self.consultation_fee {
            patch.insert("consultation_fee".to_string(), serde_json::json!(fee));
        }
        if let Some(number) = self.bar_council_number {
            patch.insert("bar_council_number".to_string(), serde_json::json!(number));
        }
        if let Some(years) = self.years_of_experience {
            patch.insert("years_of_experience".to_string(), serde_json::json!(years));
        }
        if let Some(specializations) = self.specializations {
            patch.insert("specializations".to_string(), serde_json::json!(specializations));
        }
        if let Some(languages) = self.languages {
            patch.insert("languages".to_string(), serde_json::json!(languages));
        }
        if let Some(education) = self.education {
            patch.insert("education".to_string(), serde_json::json!(education));
        }
        if let Some(aadhaar_pan) = self.aadhaar_pan {
            patch.insert("aadhaar_pan".to_string(), serde_json::json!(aadhaar_pan));
        }
        if let Some(drive_link) = self.drive_link {
            patch.insert("drive_link".to_string(), serde_json::json!(drive_link));
        }

        patch
    }
}

// ==============================================================================
// DASHBOARD MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_clients: usize,
    pub total_lawyers: usize,
    pub pending_lawyers: usize,
    pub verified_lawyers: usize,
}

impl DashboardStats {
    /// Aggregate over the current user snapshot. Always recomputed, never
    /// cached.
    pub fn from_users(users: &[shared_models::user::User]) -> Self {
        use shared_models::user::VerificationStatus;

        let total_users = users.len();
        let total_clients = users.iter().filter(|u| u.role == UserRole::Client).count();
        let total_lawyers = users.iter().filter(|u| u.is_lawyer()).count();
        let pending_lawyers = users.iter().filter(|u| u.is_pending_lawyer()).count();
        let verified_lawyers = users
            .iter()
            .filter(|u| u.is_lawyer() && u.verification_status == VerificationStatus::Verified)
            .count();

        Self {
            total_users,
            total_clients,
            total_lawyers,
            pending_lawyers,
            verified_lawyers,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum IdentityError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_models::user::{User, VerificationStatus};

    fn user(role: UserRole, status: VerificationStatus) -> User {
        User {
            id: 1,
            name: Some("Test".to_string()),
            email: "t@example.com".to_string(),
            phone: None,
            password: "pw".to_string(),
            role,
            bio: None,
            location: None,
            consultation_fee: None,
            bar_council_number: None,
            years_of_experience: None,
            specializations: vec![],
            languages: vec![],
            education: vec![],
            aadhaar_pan: None,
            drive_link: None,
            is_verified: status == VerificationStatus::Verified,
            verification_status: status,
        }
    }

    #[test]
    fn dashboard_stats_counts_roles_and_verification() {
        let users = vec![
            user(UserRole::Client, VerificationStatus::Pending),
            user(UserRole::Client, VerificationStatus::Pending),
            user(UserRole::Lawyer, VerificationStatus::Pending),
            user(UserRole::Lawyer, VerificationStatus::Verified),
            user(UserRole::Lawyer, VerificationStatus::Rejected),
            user(UserRole::Admin, VerificationStatus::Pending),
        ];

        let stats = DashboardStats::from_users(&users);
        assert_eq!(
            stats,
            DashboardStats {
                total_users: 6,
                total_clients: 2,
                total_lawyers: 3,
                pending_lawyers: 1,
                verified_lawyers: 1,
            }
        );
    }

    #[test]
    fn profile_patch_only_contains_whitelisted_fields() {
        let request = UpdateProfileRequest {
            name: Some("New Name".to_string()),
            consultation_fee: Some(800),
            languages: Some(vec!["english".to_string()]),
            ..Default::default()
        };

        let patch = request.into_patch();
        assert_eq!(patch.get("name"), Some(&json!("New Name")));
        assert_eq!(patch.get("consultation_fee"), Some(&json!(800)));
        assert_eq!(patch.get("languages"), Some(&json!(["english"])));
        assert_eq!(patch.len(), 3);

        for forbidden in ["id", "email", "role", "password", "is_verified", "verification_status"] {
            assert!(!patch.contains_key(forbidden));
        }
    }

    #[test]
    fn absent_fields_are_left_out_of_the_patch() {
        let patch = UpdateProfileRequest::default().into_patch();
        assert!(patch.is_empty());
    }
}
