//! The claim store: the single authoritative holder of the submitted-claims
//! table and the in-progress (draft) table.
//!
//! The store is an explicitly constructed value; consumers receive it by
//! injection rather than through any ambient global. All operations run to
//! completion under one lock, and every mutation is mirrored to storage
//! before the lock is released. Persistence failures never surface to the
//! caller; the in-memory tables remain the source of truth for the session.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Claim, ClaimPatch, ClaimStatus, InProgressClaim, NewClaim};
use crate::storage::{FileStorage, PersistenceBridge, StorageMedium};

struct Tables {
    claims: Vec<Claim>,
    drafts: HashMap<String, InProgressClaim>,
}

pub struct ClaimStore {
    tables: RwLock<Tables>,
    bridge: PersistenceBridge,
}

impl ClaimStore {
    /// Opens the store over the given medium, rehydrating both tables.
    /// Unreadable or corrupt tables come back empty; opening never fails.
    pub fn open(medium: Arc<dyn StorageMedium>) -> Self {
        let bridge = PersistenceBridge::new(medium);
        let (claims, drafts) = bridge.load();
        info!(
            "Claim store opened with {} claim(s) and {} draft(s)",
            claims.len(),
            drafts.len()
        );
        Self {
            tables: RwLock::new(Tables { claims, drafts }),
            bridge,
        }
    }

    /// Convenience constructor over a file-backed medium rooted at `dir`.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage = FileStorage::new(dir.as_ref())
            .map_err(|err| StoreError::Persistence(format!("{err:#}")))?;
        Ok(Self::open(Arc::new(storage)))
    }

    /// Creates a submitted claim. Validates the payload, generates a fresh
    /// id, stamps both timestamps with the same instant, forces the status
    /// to `Pending`, and recomputes the total from the assessments. The new
    /// claim is prepended so iteration order is most-recent-first.
    pub fn add_claim(&self, new_claim: NewClaim) -> Result<Claim, StoreError> {
        new_claim.validate().map_err(StoreError::Validation)?;

        let now = Utc::now();
        let claim = Claim {
            id: Uuid::new_v4().to_string(),
            total_estimated_cost: new_claim.total_estimated_cost(),
            policy_number: new_claim.policy_number,
            customer_name: new_claim.customer_name,
            customer_email: new_claim.customer_email,
            customer_phone: new_claim.customer_phone,
            vehicle_make: new_claim.vehicle_make,
            vehicle_model: new_claim.vehicle_model,
            vehicle_year: new_claim.vehicle_year,
            accident_date: new_claim.accident_date,
            description: new_claim.description,
            photos: new_claim.photos,
            videos: new_claim.videos,
            status: ClaimStatus::Pending,
            damage_assessments: new_claim.damage_assessments,
            assigned_repair_shop: new_claim.assigned_repair_shop,
            created_at: now,
            updated_at: now,
            analysis_complete: new_claim.analysis_complete,
            analysis_duration_ms: new_claim.analysis_duration_ms,
        };

        let mut tables = self.tables.write().unwrap();
        tables.claims.insert(0, claim.clone());
        self.persist(&tables);
        info!("Created claim {} for policy {}", claim.id, claim.policy_number);
        Ok(claim)
    }

    /// Shallow-merges the patch into the claim with the given id, refreshing
    /// `updated_at` regardless of which fields changed. A missing id comes
    /// back as `NotFound` with the table untouched; an illegal status move
    /// comes back as `InvalidTransition`.
    pub fn update_claim(&self, id: &str, patch: ClaimPatch) -> Result<Claim, StoreError> {
        let mut tables = self.tables.write().unwrap();
        let claim = tables
            .claims
            .iter_mut()
            .find(|claim| claim.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        if let Some(next) = patch.status {
            if !claim.status.can_transition_to(next) {
                return Err(StoreError::InvalidTransition {
                    from: claim.status,
                    to: next,
                });
            }
            claim.status = next;
        }
        if let Some(description) = patch.description {
            claim.description = description;
        }
        if let Some(shop) = patch.assigned_repair_shop {
            claim.assigned_repair_shop = Some(shop);
        }
        if let Some(assessments) = patch.damage_assessments {
            claim.total_estimated_cost =
                assessments.iter().map(|a| a.estimated_cost).sum();
            claim.damage_assessments = assessments;
        }
        if let Some(complete) = patch.analysis_complete {
            claim.analysis_complete = complete;
        }
        if let Some(duration) = patch.analysis_duration_ms {
            claim.analysis_duration_ms = Some(duration);
        }
        claim.updated_at = Utc::now();

        let updated = claim.clone();
        self.persist(&tables);
        Ok(updated)
    }

    /// Pure read; no side effects.
    pub fn claim(&self, id: &str) -> Option<Claim> {
        let tables = self.tables.read().unwrap();
        tables.claims.iter().find(|claim| claim.id == id).cloned()
    }

    /// Snapshot of the claims table, most-recent-first.
    pub fn claims(&self) -> Vec<Claim> {
        self.tables.read().unwrap().claims.clone()
    }

    /// Upserts a draft by id. Any existing draft under the same id is fully
    /// replaced, not merged. Stamps `last_saved`.
    pub fn save_draft(&self, mut draft: InProgressClaim) {
        draft.last_saved = Utc::now();
        let mut tables = self.tables.write().unwrap();
        if tables.drafts.insert(draft.id.clone(), draft).is_some() {
            warn!("Overwrote existing draft in the same workflow slot");
        }
        self.persist(&tables);
    }

    /// Pure read; no side effects.
    pub fn draft(&self, id: &str) -> Option<InProgressClaim> {
        self.tables.read().unwrap().drafts.get(id).cloned()
    }

    /// Removes the draft if present; a documented no-op otherwise. Called on
    /// successful submission or explicit discard.
    pub fn delete_draft(&self, id: &str) {
        let mut tables = self.tables.write().unwrap();
        if tables.drafts.remove(id).is_some() {
            self.persist(&tables);
        }
    }

    fn persist(&self, tables: &Tables) {
        self.bridge.save(&tables.claims, &tables.drafts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DamageAssessment, DamageType, Severity, NEW_CLAIM_SESSION_ID};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn memory_store() -> (Arc<MemoryStorage>, ClaimStore) {
        let medium = Arc::new(MemoryStorage::new());
        let store = ClaimStore::open(medium.clone());
        (medium, store)
    }

    fn new_claim(policy: &str) -> NewClaim {
        NewClaim {
            policy_number: policy.into(),
            customer_name: "Ada Li".into(),
            customer_email: "ada@example.com".into(),
            customer_phone: "555-0100".into(),
            vehicle_make: "Toyota".into(),
            vehicle_model: "Corolla".into(),
            vehicle_year: 2021,
            accident_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            description: "Rear-ended at a stop light".into(),
            photos: vec![],
            videos: vec![],
            damage_assessments: vec![],
            assigned_repair_shop: None,
            analysis_complete: false,
            analysis_duration_ms: None,
        }
    }

    fn assessment(id: &str, cost: f64) -> DamageAssessment {
        DamageAssessment::new(id, DamageType::Scratch, Severity::Minor, "hood", cost, 0.9)
    }

    #[test]
    fn add_claim_sets_id_timestamps_and_pending_status() {
        let (_, store) = memory_store();
        let claim = store.add_claim(new_claim("POL-1")).unwrap();

        assert!(!claim.id.is_empty());
        assert_eq!(claim.created_at, claim.updated_at);
        assert_eq!(claim.status, ClaimStatus::Pending);

        let table = store.claims();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].policy_number, "POL-1");
    }

    #[test]
    fn claims_iterate_most_recent_first() {
        let (_, store) = memory_store();
        store.add_claim(new_claim("POL-1")).unwrap();
        store.add_claim(new_claim("POL-2")).unwrap();

        let table = store.claims();
        assert_eq!(table[0].policy_number, "POL-2");
        assert_eq!(table[1].policy_number, "POL-1");
    }

    #[test]
    fn add_claim_generates_distinct_ids() {
        let (_, store) = memory_store();
        let a = store.add_claim(new_claim("POL-1")).unwrap();
        let b = store.add_claim(new_claim("POL-2")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn add_claim_rejects_invalid_payload() {
        let (_, store) = memory_store();
        let mut invalid = new_claim("POL-1");
        invalid.customer_email = "nope".into();

        match store.add_claim(invalid) {
            Err(StoreError::Validation(errors)) => {
                assert_eq!(errors[0].field, "customerEmail")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.claims().is_empty());
    }

    #[test]
    fn add_claim_recomputes_total_from_assessments() {
        let (_, store) = memory_store();
        let mut payload = new_claim("POL-1");
        payload.damage_assessments = vec![assessment("a", 100.0), assessment("c", 300.0)];

        let claim = store.add_claim(payload).unwrap();
        assert_eq!(claim.total_estimated_cost, 400.0);
    }

    #[test]
    fn submission_total_covers_only_approved_assessments() {
        let (_, store) = memory_store();

        let mut draft = InProgressClaim::new(NEW_CLAIM_SESSION_ID);
        draft.policy_number = Some("POL-7".into());
        draft.customer_name = Some("Ada Li".into());
        draft.customer_email = Some("ada@example.com".into());
        draft.customer_phone = Some("555-0100".into());
        draft.vehicle_make = Some("Toyota".into());
        draft.vehicle_model = Some("Corolla".into());
        draft.vehicle_year = Some(2021);
        draft.accident_date = NaiveDate::from_ymd_opt(2026, 3, 14);
        draft.description = Some("Parking lot scrape".into());
        draft.replace_assessments(vec![
            assessment("a", 100.0),
            assessment("b", 200.0),
            assessment("c", 300.0),
        ]);
        draft.approve("a");
        draft.approve("c");

        let claim = store.add_claim(draft.to_new_claim().unwrap()).unwrap();
        assert_eq!(claim.total_estimated_cost, 400.0);
        assert_eq!(claim.damage_assessments.len(), 2);
    }

    #[test]
    fn update_patch_overwrites_only_given_fields() {
        let (_, store) = memory_store();
        let claim = store.add_claim(new_claim("POL-1")).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2));
        let patch = ClaimPatch {
            status: Some(ClaimStatus::Processing),
            assigned_repair_shop: Some("shop-1".into()),
            ..ClaimPatch::default()
        };
        let updated = store.update_claim(&claim.id, patch).unwrap();

        assert_eq!(updated.status, ClaimStatus::Processing);
        assert_eq!(updated.assigned_repair_shop.as_deref(), Some("shop-1"));
        assert_eq!(updated.description, claim.description);
        assert!(updated.updated_at > claim.updated_at);
        assert_eq!(updated.created_at, claim.created_at);
    }

    #[test]
    fn update_refreshes_updated_at_even_for_empty_patch() {
        let (_, store) = memory_store();
        let claim = store.add_claim(new_claim("POL-1")).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2));
        let updated = store.update_claim(&claim.id, ClaimPatch::default()).unwrap();
        assert!(updated.updated_at > claim.updated_at);
    }

    #[test]
    fn update_missing_id_is_not_found_and_leaves_table_alone() {
        let (_, store) = memory_store();
        let result = store.update_claim("missing-id", ClaimPatch::default());
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert!(store.claims().is_empty());
    }

    #[test]
    fn update_rejects_illegal_transition() {
        let (_, store) = memory_store();
        let claim = store.add_claim(new_claim("POL-1")).unwrap();
        store
            .update_claim(
                &claim.id,
                ClaimPatch {
                    status: Some(ClaimStatus::Approved),
                    ..ClaimPatch::default()
                },
            )
            .unwrap();

        let result = store.update_claim(
            &claim.id,
            ClaimPatch {
                status: Some(ClaimStatus::Pending),
                ..ClaimPatch::default()
            },
        );
        assert!(matches!(result, Err(StoreError::InvalidTransition { .. })));
        assert_eq!(store.claim(&claim.id).unwrap().status, ClaimStatus::Approved);
    }

    #[test]
    fn patching_assessments_recomputes_total() {
        let (_, store) = memory_store();
        let claim = store.add_claim(new_claim("POL-1")).unwrap();

        let updated = store
            .update_claim(
                &claim.id,
                ClaimPatch {
                    damage_assessments: Some(vec![
                        assessment("a", 120.0),
                        assessment("b", 80.0),
                    ]),
                    ..ClaimPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.total_estimated_cost, 200.0);
    }

    #[test]
    fn get_claim_is_idempotent() {
        let (_, store) = memory_store();
        let claim = store.add_claim(new_claim("POL-1")).unwrap();
        assert_eq!(store.claim(&claim.id), store.claim(&claim.id));
        assert!(store.claim("nope").is_none());
    }

    #[test]
    fn save_draft_upserts_by_full_replacement() {
        let (_, store) = memory_store();

        let mut first = InProgressClaim::new(NEW_CLAIM_SESSION_ID);
        first.policy_number = Some("POL-1".into());
        first.approve("a");
        store.save_draft(first);

        let mut second = InProgressClaim::new(NEW_CLAIM_SESSION_ID);
        second.customer_name = Some("Ada Li".into());
        store.save_draft(second);

        let loaded = store.draft(NEW_CLAIM_SESSION_ID).unwrap();
        assert_eq!(loaded.customer_name.as_deref(), Some("Ada Li"));
        assert!(loaded.policy_number.is_none());
        assert!(loaded.approved_assessments.is_empty());
    }

    #[test]
    fn delete_draft_removes_and_tolerates_missing() {
        let (_, store) = memory_store();
        store.save_draft(InProgressClaim::new("s1"));
        store.delete_draft("s1");
        assert!(store.draft("s1").is_none());
        store.delete_draft("s1");
    }

    #[test]
    fn mutations_survive_a_failing_medium() {
        let (medium, store) = memory_store();
        medium.set_fail_writes(true);

        let claim = store.add_claim(new_claim("POL-1")).unwrap();
        assert!(store.claim(&claim.id).is_some());
        store.save_draft(InProgressClaim::new("s1"));
        assert!(store.draft("s1").is_some());
    }

    #[test]
    fn reopening_over_same_medium_restores_tables() {
        let (medium, store) = memory_store();
        store.add_claim(new_claim("POL-1")).unwrap();
        let mut draft = InProgressClaim::new("s1");
        draft.approve("a");
        draft.approve("b");
        store.save_draft(draft);
        drop(store);

        let reopened = ClaimStore::open(medium);
        assert_eq!(reopened.claims().len(), 1);
        let loaded = reopened.draft("s1").unwrap();
        assert_eq!(loaded.approved_assessments.len(), 2);
        assert!(loaded.approved_assessments.contains("a"));
        assert!(loaded.approved_assessments.contains("b"));
    }
}
