//! Mirrors the store's tables into the storage medium and rehydrates them
//! at startup.
//!
//! The medium is a text store, so the draft table's approvals set cannot be
//! written natively: it is encoded as a sorted id sequence on the way out
//! and rebuilt into a `HashSet` on the way in. That conversion is the one
//! special case at this boundary; every other field is encode-transparent.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use log::error;
use serde::{Deserialize, Serialize};

use crate::models::{Claim, DamageAssessment, InProgressClaim};

use super::{StorageMedium, CLAIMS_KEY, DRAFTS_KEY};

/// Persisted form of a draft. Identical to `InProgressClaim` except that
/// `approved_assessments` is an ordered sequence.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDraft {
    id: String,
    policy_number: Option<String>,
    customer_name: Option<String>,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    vehicle_make: Option<String>,
    vehicle_model: Option<String>,
    vehicle_year: Option<i32>,
    accident_date: Option<NaiveDate>,
    description: Option<String>,
    photos: Vec<String>,
    videos: Vec<String>,
    damage_assessments: Vec<DamageAssessment>,
    analysis_complete: bool,
    approved_assessments: Vec<String>,
    last_saved: DateTime<Utc>,
}

impl From<&InProgressClaim> for StoredDraft {
    fn from(draft: &InProgressClaim) -> Self {
        // Sorted for deterministic output; the set has no order of its own.
        let mut approved: Vec<String> = draft.approved_assessments.iter().cloned().collect();
        approved.sort();
        Self {
            id: draft.id.clone(),
            policy_number: draft.policy_number.clone(),
            customer_name: draft.customer_name.clone(),
            customer_email: draft.customer_email.clone(),
            customer_phone: draft.customer_phone.clone(),
            vehicle_make: draft.vehicle_make.clone(),
            vehicle_model: draft.vehicle_model.clone(),
            vehicle_year: draft.vehicle_year,
            accident_date: draft.accident_date,
            description: draft.description.clone(),
            photos: draft.photos.clone(),
            videos: draft.videos.clone(),
            damage_assessments: draft.damage_assessments.clone(),
            analysis_complete: draft.analysis_complete,
            approved_assessments: approved,
            last_saved: draft.last_saved,
        }
    }
}

impl From<StoredDraft> for InProgressClaim {
    fn from(stored: StoredDraft) -> Self {
        Self {
            id: stored.id,
            policy_number: stored.policy_number,
            customer_name: stored.customer_name,
            customer_email: stored.customer_email,
            customer_phone: stored.customer_phone,
            vehicle_make: stored.vehicle_make,
            vehicle_model: stored.vehicle_model,
            vehicle_year: stored.vehicle_year,
            accident_date: stored.accident_date,
            description: stored.description,
            photos: stored.photos,
            videos: stored.videos,
            damage_assessments: stored.damage_assessments,
            analysis_complete: stored.analysis_complete,
            approved_assessments: stored.approved_assessments.into_iter().collect::<HashSet<_>>(),
            last_saved: stored.last_saved,
        }
    }
}

pub struct PersistenceBridge {
    medium: Arc<dyn StorageMedium>,
}

impl PersistenceBridge {
    pub fn new(medium: Arc<dyn StorageMedium>) -> Self {
        Self { medium }
    }

    /// Rehydrates both tables. An absent key is an empty table; a read or
    /// parse failure is logged and falls back to an empty table rather than
    /// failing startup.
    pub fn load(&self) -> (Vec<Claim>, HashMap<String, InProgressClaim>) {
        let claims: Vec<Claim> = self.read_table(CLAIMS_KEY);
        let stored: HashMap<String, StoredDraft> = self.read_table(DRAFTS_KEY);
        let drafts = stored
            .into_iter()
            .map(|(id, draft)| (id, InProgressClaim::from(draft)))
            .collect();
        (claims, drafts)
    }

    /// Writes both tables. Failures are logged and swallowed; the in-memory
    /// state stays the source of truth for the rest of the session.
    pub fn save(&self, claims: &[Claim], drafts: &HashMap<String, InProgressClaim>) {
        self.write_table(CLAIMS_KEY, claims);

        let stored: HashMap<&str, StoredDraft> = drafts
            .iter()
            .map(|(id, draft)| (id.as_str(), StoredDraft::from(draft)))
            .collect();
        self.write_table(DRAFTS_KEY, &stored);
    }

    fn read_table<T: Default + for<'de> Deserialize<'de>>(&self, key: &str) -> T {
        let raw = match self.medium.read_key(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                error!("Failed to read '{key}' from storage, starting empty: {err:#}");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(table) => table,
            Err(err) => {
                error!("Corrupt '{key}' record in storage, starting empty: {err}");
                T::default()
            }
        }
    }

    fn write_table<T: Serialize + ?Sized>(&self, key: &str, table: &T) {
        let serialized = match serde_json::to_string(table) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!("Failed to serialize '{key}' table: {err}");
                return;
            }
        };
        if let Err(err) = self.medium.write_key(key, &serialized) {
            error!("Failed to persist '{key}', keeping in-memory state: {err:#}");
        }
    }
}
