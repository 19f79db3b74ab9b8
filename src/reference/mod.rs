//! Static, read-only reference data: the repair shop directory and the
//! standardized repair cost table. The store never mutates any of this; a
//! claim keeps only a shop's id as a foreign key.

mod costs;
mod shops;

pub use costs::{
    cost_entries, cost_entry, ConfidenceTier, RepairCostEntry, VehicleCategory,
};
pub use shops::{repair_shop, repair_shops};
