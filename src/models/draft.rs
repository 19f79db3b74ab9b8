//! In-progress (draft) claims.
//!
//! A draft is the working state of the "new claim" workflow: any subset of
//! the claim fields may still be absent, and the reviewer's approvals are a
//! true set so membership checks stay O(1) and duplicates are impossible.
//! The persistence layer converts that set to an ordered id sequence at the
//! serialization boundary; see `storage::bridge`.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::FieldError;
use crate::models::{DamageAssessment, NewClaim};

/// The one workflow slot for a new claim. A second concurrent draft saved
/// under this id silently overwrites the first.
pub const NEW_CLAIM_SESSION_ID: &str = "new-claim";

#[derive(Debug, Clone, PartialEq)]
pub struct InProgressClaim {
    pub id: String,
    pub policy_number: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<i32>,
    pub accident_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub photos: Vec<String>,
    pub videos: Vec<String>,
    pub damage_assessments: Vec<DamageAssessment>,
    pub analysis_complete: bool,
    /// Ids of the assessments the reviewer has approved. Membership only;
    /// not automatically kept in sync with `damage_assessments` except by
    /// `replace_assessments`.
    pub approved_assessments: HashSet<String>,
    pub last_saved: DateTime<Utc>,
}

impl InProgressClaim {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            policy_number: None,
            customer_name: None,
            customer_email: None,
            customer_phone: None,
            vehicle_make: None,
            vehicle_model: None,
            vehicle_year: None,
            accident_date: None,
            description: None,
            photos: Vec::new(),
            videos: Vec::new(),
            damage_assessments: Vec::new(),
            analysis_complete: false,
            approved_assessments: HashSet::new(),
            last_saved: Utc::now(),
        }
    }

    /// Installs a fresh analysis batch. Approvals referring to ids that no
    /// longer exist are pruned here, so a rerun of the analysis never leaves
    /// stale approvals behind. Drafts loaded from storage are taken as-is.
    pub fn replace_assessments(&mut self, batch: Vec<DamageAssessment>) {
        let known: HashSet<&str> = batch.iter().map(|a| a.id.as_str()).collect();
        self.approved_assessments.retain(|id| known.contains(id.as_str()));
        self.damage_assessments = batch;
        self.analysis_complete = true;
    }

    pub fn approve(&mut self, assessment_id: impl Into<String>) {
        self.approved_assessments.insert(assessment_id.into());
    }

    pub fn revoke_approval(&mut self, assessment_id: &str) {
        self.approved_assessments.remove(assessment_id);
    }

    /// The assessments the reviewer approved, in their original order.
    pub fn approved_batch(&self) -> Vec<DamageAssessment> {
        self.damage_assessments
            .iter()
            .filter(|a| self.approved_assessments.contains(&a.id))
            .cloned()
            .collect()
    }

    /// Builds the submission payload. Rejected assessments are dropped here,
    /// before the claim ever exists; they are not carried with a flag.
    /// Missing required fields come back as field-level errors.
    pub fn to_new_claim(&self) -> Result<NewClaim, Vec<FieldError>> {
        let mut errors = Vec::new();

        let policy_number = take(&mut errors, "policyNumber", &self.policy_number);
        let customer_name = take(&mut errors, "customerName", &self.customer_name);
        let customer_email = take(&mut errors, "customerEmail", &self.customer_email);
        let customer_phone = take(&mut errors, "customerPhone", &self.customer_phone);
        let vehicle_make = take(&mut errors, "vehicleMake", &self.vehicle_make);
        let vehicle_model = take(&mut errors, "vehicleModel", &self.vehicle_model);
        let description = take(&mut errors, "description", &self.description);

        if self.vehicle_year.is_none() {
            errors.push(FieldError::new("vehicleYear", "is required"));
        }
        if self.accident_date.is_none() {
            errors.push(FieldError::new("accidentDate", "is required"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewClaim {
            policy_number,
            customer_name,
            customer_email,
            customer_phone,
            vehicle_make,
            vehicle_model,
            vehicle_year: self.vehicle_year.unwrap(),
            accident_date: self.accident_date.unwrap(),
            description,
            photos: self.photos.clone(),
            videos: self.videos.clone(),
            damage_assessments: self.approved_batch(),
            assigned_repair_shop: None,
            analysis_complete: self.analysis_complete,
            analysis_duration_ms: None,
        })
    }
}

fn take(errors: &mut Vec<FieldError>, field: &'static str, value: &Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => {
            errors.push(FieldError::new(field, "is required"));
            String::new()
        }
    }
}
