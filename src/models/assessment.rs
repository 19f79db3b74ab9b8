//! Damage assessment records produced by the analysis step.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DamageType {
    Scratch,
    Dent,
    Structural,
    Glass,
    Paint,
}

impl DamageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Scratch => "scratch",
            DamageType::Dent => "dent",
            DamageType::Structural => "structural",
            DamageType::Glass => "glass",
            DamageType::Paint => "paint",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

/// One detected damage item. Always owned by exactly one claim or draft;
/// never referenced independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DamageAssessment {
    pub id: String,
    pub damage_type: DamageType,
    pub severity: Severity,
    pub location: String,
    /// Estimated repair cost, non-negative.
    pub estimated_cost: f64,
    /// Confidence on the canonical fractional scale, always in [0, 1].
    pub confidence: f64,
}

impl DamageAssessment {
    pub fn new(
        id: impl Into<String>,
        damage_type: DamageType,
        severity: Severity,
        location: impl Into<String>,
        estimated_cost: f64,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            damage_type,
            severity,
            location: location.into(),
            estimated_cost,
            confidence: Self::normalize_confidence(confidence),
        }
    }

    /// Canonical confidence scale is fractional [0, 1]. Upstream sources are
    /// inconsistent and sometimes report whole-number percents, so anything
    /// above 1 is treated as a percent before clamping.
    pub fn normalize_confidence(raw: f64) -> f64 {
        let fractional = if raw > 1.0 { raw / 100.0 } else { raw };
        fractional.clamp(0.0, 1.0)
    }
}
