pub mod assessment;
pub mod claim;
pub mod draft;
pub mod repair_shop;

pub use assessment::{DamageAssessment, DamageType, Severity};
pub use claim::{Claim, ClaimPatch, ClaimStatus, NewClaim};
pub use draft::{InProgressClaim, NEW_CLAIM_SESSION_ID};
pub use repair_shop::{RepairShop, Weekday};
