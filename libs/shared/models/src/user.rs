use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Client,
    Lawyer,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Client => write!(f, "client"),
            UserRole::Lawyer => write!(f, "lawyer"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    /// Whether the `is_verified` flag must be set for this status.
    pub fn verified_flag(&self) -> bool {
        matches!(self, VerificationStatus::Verified)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Verified => write!(f, "verified"),
            VerificationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    // Admin tooling sends the status in mixed case; comparison is
    // case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(format!("Unknown verification status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: UserRole,

    // Lawyer profile fields
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

    pub is_verified: bool,
    pub verification_status: VerificationStatus,
}

impl User {
    pub fn is_lawyer(&self) -> bool {
        self.role == UserRole::Lawyer
    }

    pub fn is_pending_lawyer(&self) -> bool {
        self.is_lawyer() && self.verification_status == VerificationStatus::Pending
    }
}
