use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::user::{User, VerificationStatus};

use crate::models::{DashboardStats, IdentityError, RegisterRequest, UpdateProfileRequest};

pub struct IdentityService {
    supabase: SupabaseClient,
}

impl IdentityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Register a new user. Email uniqueness is enforced here, not by the
    /// store.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, IdentityError> {
        debug!("Registering user: {}", request.email);

        if self.get_by_email(&request.email).await?.is_some() {
            warn!("Registration rejected, email already present: {}", request.email);
            return Err(IdentityError::DuplicateEmail);
        }

        // Every account starts unverified; only an admin decision moves the
        // status, and the flag always mirrors it.
        let status = VerificationStatus::Pending;
        let row = json!({
            "name": request.name,
            "email": request.email,
            "phone": request.phone,
            "password": request.password,
            "role": request.role,
            "bio": request.bio,
            "location": request.location,
            "consultation_fee": request.consultation_fee,
            "bar_council_number": request.bar_council_number,
            "years_of_experience": request.years_of_experience,
            "specializations": request.specializations,
            "languages": request.languages,
            "education": request.education,
            "aadhaar_pan": request.aadhaar_pan,
            "drive_link": request.drive_link,
            "is_verified": status.verified_flag(),
            "verification_status": status,
        });

        let user: User = self
            .supabase
            .insert_returning("users", row)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        info!("User {} registered with id {}", user.email, user.id);
        Ok(user)
    }

    /// Exact, case-sensitive credential check. Unknown email and wrong
    /// password are deliberately indistinguishable.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        debug!("Authenticating user: {}", email);

        let user = self
            .get_by_email(email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        if user.password != password {
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Overwrite the stored credential. Returns false when no user has the
    /// email.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<bool, IdentityError> {
        debug!("Resetting password for: {}", email);

        let path = format!("/rest/v1/users?email=eq.{}", urlencoding::encode(email));
        let updated: Vec<User> = self
            .supabase
            .patch_returning(&path, json!({ "password": new_password }))
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        Ok(!updated.is_empty())
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, IdentityError> {
        let path = format!("/rest/v1/users?email=eq.{}", urlencoding::encode(email));
        let mut result: Vec<User> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            Ok(None)
        } else {
            Ok(Some(result.remove(0)))
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, IdentityError> {
        self.supabase
            .request(Method::GET, "/rest/v1/users", None)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))
    }

    pub async fn list_lawyers(&self) -> Result<Vec<User>, IdentityError> {
        self.supabase
            .request(Method::GET, "/rest/v1/users?role=eq.lawyer", None)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))
    }

    pub async fn list_pending_lawyers(&self) -> Result<Vec<User>, IdentityError> {
        self.supabase
            .request(
                Method::GET,
                "/rest/v1/users?role=eq.lawyer&verification_status=eq.pending",
                None,
            )
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))
    }

    /// Aggregate counts over the full user snapshot.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, IdentityError> {
        let users = self.list_users().await?;
        Ok(DashboardStats::from_users(&users))
    }

    /// Admin verification decision. Keeps the flag in sync with the status.
    pub async fn set_verification_status(
        &self,
        id: i64,
        status: VerificationStatus,
    ) -> Result<User, IdentityError> {
        debug!("Setting verification status for user {}: {}", id, status);

        let path = format!("/rest/v1/users?id=eq.{}", id);
        let patch = json!({
            "verification_status": status,
            "is_verified": status.verified_flag(),
        });

        let mut updated: Vec<User> = self
            .supabase
            .patch_returning(&path, patch)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        if updated.is_empty() {
            return Err(IdentityError::NotFound);
        }

        info!("User {} verification status set to {}", id, status);
        Ok(updated.remove(0))
    }

    /// Apply the whitelisted profile patch. Identity and verification fields
    /// are untouchable through this path.
    pub async fn update_profile(
        &self,
        email: &str,
        request: UpdateProfileRequest,
    ) -> Result<User, IdentityError> {
        debug!("Updating profile for: {}", email);

        let patch = request.into_patch();
        if patch.is_empty() {
            return self.get_by_email(email).await?.ok_or(IdentityError::NotFound);
        }

        let path = format!("/rest/v1/users?email=eq.{}", urlencoding::encode(email));
        let mut updated: Vec<User> = self
            .supabase
            .patch_returning(&path, Value::Object(patch))
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        if updated.is_empty() {
            return Err(IdentityError::NotFound);
        }

        Ok(updated.remove(0))
    }
}
