//! Standardized repair cost line items.
//!
//! One entry per damage type x severity x vehicle category, derived from a
//! per-damage base rate with severity and category multipliers and a flat
//! shop labor rate. Structural work and severe damage carry lower
//! confidence tiers because real-world spread is much wider there.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::models::{DamageType, Severity};

const LABOR_RATE_PER_HOUR: f64 = 95.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum VehicleCategory {
    Economy,
    Standard,
    Luxury,
    Suv,
    Truck,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 5] = [
        VehicleCategory::Economy,
        VehicleCategory::Standard,
        VehicleCategory::Luxury,
        VehicleCategory::Suv,
        VehicleCategory::Truck,
    ];

    fn multiplier(self) -> f64 {
        match self {
            VehicleCategory::Economy => 0.8,
            VehicleCategory::Standard => 1.0,
            VehicleCategory::Luxury => 1.8,
            VehicleCategory::Suv => 1.2,
            VehicleCategory::Truck => 1.3,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairCostEntry {
    pub damage_type: DamageType,
    pub severity: Severity,
    pub vehicle_category: VehicleCategory,
    pub base_cost: f64,
    pub labor_hours: f64,
    pub parts_cost: f64,
    pub total_cost: f64,
    pub confidence_tier: ConfidenceTier,
}

const DAMAGE_TYPES: [DamageType; 5] = [
    DamageType::Scratch,
    DamageType::Dent,
    DamageType::Structural,
    DamageType::Glass,
    DamageType::Paint,
];

const SEVERITIES: [Severity; 3] = [Severity::Minor, Severity::Moderate, Severity::Severe];

fn base_cost(damage_type: DamageType) -> f64 {
    match damage_type {
        DamageType::Scratch => 150.0,
        DamageType::Dent => 300.0,
        DamageType::Structural => 1200.0,
        DamageType::Glass => 250.0,
        DamageType::Paint => 400.0,
    }
}

fn base_labor_hours(damage_type: DamageType) -> f64 {
    match damage_type {
        DamageType::Scratch => 1.0,
        DamageType::Dent => 2.0,
        DamageType::Structural => 8.0,
        DamageType::Glass => 1.5,
        DamageType::Paint => 3.0,
    }
}

fn severity_multiplier(severity: Severity) -> f64 {
    match severity {
        Severity::Minor => 1.0,
        Severity::Moderate => 2.2,
        Severity::Severe => 4.5,
    }
}

fn tier(damage_type: DamageType, severity: Severity) -> ConfidenceTier {
    match (damage_type, severity) {
        (DamageType::Structural, Severity::Severe) => ConfidenceTier::Low,
        (DamageType::Structural, _) | (_, Severity::Severe) => ConfidenceTier::Medium,
        _ => ConfidenceTier::High,
    }
}

fn build_table() -> Vec<RepairCostEntry> {
    let mut entries = Vec::new();
    for damage_type in DAMAGE_TYPES {
        for severity in SEVERITIES {
            for vehicle_category in VehicleCategory::ALL {
                let scale = severity_multiplier(severity) * vehicle_category.multiplier();
                let base = base_cost(damage_type) * scale;
                let labor_hours = base_labor_hours(damage_type) * severity_multiplier(severity);
                let parts = base * 0.4;
                entries.push(RepairCostEntry {
                    damage_type,
                    severity,
                    vehicle_category,
                    base_cost: round_cents(base),
                    labor_hours: (labor_hours * 10.0).round() / 10.0,
                    parts_cost: round_cents(parts),
                    total_cost: round_cents(base + parts + labor_hours * LABOR_RATE_PER_HOUR),
                    confidence_tier: tier(damage_type, severity),
                });
            }
        }
    }
    entries
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

static TABLE: OnceLock<Vec<RepairCostEntry>> = OnceLock::new();

pub fn cost_entries() -> &'static [RepairCostEntry] {
    TABLE.get_or_init(build_table)
}

pub fn cost_entry(
    damage_type: DamageType,
    severity: Severity,
    vehicle_category: VehicleCategory,
) -> Option<&'static RepairCostEntry> {
    cost_entries().iter().find(|entry| {
        entry.damage_type == damage_type
            && entry.severity == severity
            && entry.vehicle_category == vehicle_category
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_the_full_grid() {
        assert_eq!(cost_entries().len(), 5 * 3 * 5);
    }

    #[test]
    fn lookup_finds_every_combination() {
        for damage_type in DAMAGE_TYPES {
            for severity in SEVERITIES {
                for category in VehicleCategory::ALL {
                    let entry = cost_entry(damage_type, severity, category).unwrap();
                    assert!(entry.total_cost > entry.base_cost);
                    assert!(entry.parts_cost > 0.0);
                    assert!(entry.labor_hours > 0.0);
                }
            }
        }
    }

    #[test]
    fn structural_severe_is_low_confidence() {
        let entry = cost_entry(
            DamageType::Structural,
            Severity::Severe,
            VehicleCategory::Standard,
        )
        .unwrap();
        assert_eq!(entry.confidence_tier, ConfidenceTier::Low);
    }

    #[test]
    fn luxury_costs_more_than_economy() {
        let luxury = cost_entry(DamageType::Dent, Severity::Moderate, VehicleCategory::Luxury)
            .unwrap();
        let economy = cost_entry(DamageType::Dent, Severity::Moderate, VehicleCategory::Economy)
            .unwrap();
        assert!(luxury.total_cost > economy.total_cost);
    }
}
