//! Repair shop directory entries.
//!
//! Read-only reference data. Claims retain only a shop's id; the shop
//! records themselves are never mutated by the store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepairShop {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Average customer rating on a 0-5 scale.
    pub rating: f64,
    pub specialties: Vec<String>,
    pub certifications: Vec<String>,
    /// Opening hours per weekday, e.g. "8:00 AM - 6:00 PM" or "Closed".
    pub hours: BTreeMap<Weekday, String>,
}
