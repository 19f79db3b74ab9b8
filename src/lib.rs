//! claimdesk: local-first core for an auto insurance claims tool.
//!
//! The store holds the submitted-claims and draft tables, mirrors them to a
//! durable local text medium after every mutation, and rehydrates them at
//! startup. Everything else here supports that contract: typed record
//! schemas, the mock damage-analysis service, media ingestion, and the
//! static repair-shop / cost reference directory.

pub mod analysis;
pub mod error;
pub mod media;
pub mod models;
pub mod reference;
pub mod storage;
pub mod store;

pub use analysis::{
    AnalysisError, AnalysisOutcome, AnalysisService, MockAnalysisService, ANALYSIS_DELAY,
};
pub use error::{FieldError, StoreError};
pub use models::{
    Claim, ClaimPatch, ClaimStatus, DamageAssessment, DamageType, InProgressClaim, NewClaim,
    RepairShop, Severity, Weekday, NEW_CLAIM_SESSION_ID,
};
pub use storage::{
    FileStorage, MemoryStorage, PersistenceBridge, StorageMedium, CLAIMS_KEY, DRAFTS_KEY,
};
pub use store::ClaimStore;
