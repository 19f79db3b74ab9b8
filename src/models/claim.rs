//! Submitted claim records and their lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::models::DamageAssessment;

const VEHICLE_YEAR_MIN: i32 = 1900;
const VEHICLE_YEAR_MAX: i32 = 2100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ClaimStatus {
    Pending,
    Processing,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Processing => "processing",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }

    /// Legal moves: `Pending -> Processing -> {Approved, Rejected}`, with
    /// `Processing` optional. Re-asserting the current status is allowed;
    /// nothing leaves a terminal status.
    pub fn can_transition_to(self, next: ClaimStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            ClaimStatus::Pending => true,
            ClaimStatus::Processing => next.is_terminal(),
            ClaimStatus::Approved | ClaimStatus::Rejected => false,
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted insurance claim. Created once via the store's add operation,
/// mutated only through typed patches, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    pub policy_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub accident_date: NaiveDate,
    pub description: String,
    /// Self-describing `data:` encoded blobs, in upload order.
    pub photos: Vec<String>,
    pub videos: Vec<String>,
    pub status: ClaimStatus,
    pub damage_assessments: Vec<DamageAssessment>,
    /// Always the sum of `estimated_cost` over `damage_assessments`;
    /// recomputed by the store whenever the assessments change.
    pub total_estimated_cost: f64,
    pub assigned_repair_shop: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub analysis_complete: bool,
    pub analysis_duration_ms: Option<u64>,
}

/// Every claim field the caller supplies at submission. The store generates
/// the id and timestamps, forces the status to `Pending`, and recomputes the
/// total from the assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    pub policy_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub accident_date: NaiveDate,
    pub description: String,
    pub photos: Vec<String>,
    pub videos: Vec<String>,
    pub damage_assessments: Vec<DamageAssessment>,
    pub assigned_repair_shop: Option<String>,
    pub analysis_complete: bool,
    pub analysis_duration_ms: Option<u64>,
}

impl NewClaim {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        require(&mut errors, "policyNumber", &self.policy_number);
        require(&mut errors, "customerName", &self.customer_name);
        require(&mut errors, "customerPhone", &self.customer_phone);
        require(&mut errors, "vehicleMake", &self.vehicle_make);
        require(&mut errors, "vehicleModel", &self.vehicle_model);
        require(&mut errors, "description", &self.description);

        if self.customer_email.trim().is_empty() {
            errors.push(FieldError::new("customerEmail", "is required"));
        } else if !self.customer_email.contains('@') {
            errors.push(FieldError::new("customerEmail", "is not a valid email address"));
        }

        if !(VEHICLE_YEAR_MIN..=VEHICLE_YEAR_MAX).contains(&self.vehicle_year) {
            errors.push(FieldError::new(
                "vehicleYear",
                format!("must be between {VEHICLE_YEAR_MIN} and {VEHICLE_YEAR_MAX}"),
            ));
        }

        for assessment in &self.damage_assessments {
            if !assessment.estimated_cost.is_finite() || assessment.estimated_cost < 0.0 {
                errors.push(FieldError::new(
                    "damageAssessments",
                    format!("assessment {} has a negative cost", assessment.id),
                ));
            }
            if !(0.0..=1.0).contains(&assessment.confidence) {
                errors.push(FieldError::new(
                    "damageAssessments",
                    format!("assessment {} confidence is outside [0, 1]", assessment.id),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn total_estimated_cost(&self) -> f64 {
        self.damage_assessments
            .iter()
            .map(|assessment| assessment.estimated_cost)
            .sum()
    }
}

fn require(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
}

/// The fields that remain legally mutable after a claim has been created.
/// Everything else is fixed at submission; there is deliberately no way to
/// patch the id, the timestamps, or the customer identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPatch {
    pub status: Option<ClaimStatus>,
    pub description: Option<String>,
    pub assigned_repair_shop: Option<String>,
    pub damage_assessments: Option<Vec<DamageAssessment>>,
    pub analysis_complete: Option<bool>,
    pub analysis_duration_ms: Option<u64>,
}
