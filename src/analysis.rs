//! Damage analysis.
//!
//! The mock implementation stands in for an external inference service: it
//! ignores the uploaded media, waits a fixed delay, and resolves with a
//! canned batch. The contract a real backend must honor is the same —
//! "produces zero or more assessments, eventually" — which is why the error
//! kinds exist even though the mock cannot fail.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::info;
use thiserror::Error;
use tokio::time;
use uuid::Uuid;

use crate::models::{DamageAssessment, DamageType, Severity};

/// Fixed delay before the mock resolves.
pub const ANALYSIS_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis timed out after {0:?}")]
    Timeout(Duration),
    #[error("analysis service unavailable: {0}")]
    Unavailable(String),
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub assessments: Vec<DamageAssessment>,
    pub duration_ms: u64,
}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(
        &self,
        photos: &[String],
        videos: &[String],
    ) -> Result<AnalysisOutcome, AnalysisError>;
}

pub struct MockAnalysisService {
    delay: Duration,
}

impl MockAnalysisService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockAnalysisService {
    fn default() -> Self {
        Self::new(ANALYSIS_DELAY)
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(
        &self,
        photos: &[String],
        videos: &[String],
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let started = Instant::now();
        info!(
            "Mock analysis started over {} photo(s), {} video(s)",
            photos.len(),
            videos.len()
        );
        time::sleep(self.delay).await;

        let assessments = vec![
            DamageAssessment::new(
                Uuid::new_v4().to_string(),
                DamageType::Scratch,
                Severity::Minor,
                "front bumper",
                350.0,
                0.92,
            ),
            DamageAssessment::new(
                Uuid::new_v4().to_string(),
                DamageType::Dent,
                Severity::Moderate,
                "driver side door",
                850.0,
                0.85,
            ),
            DamageAssessment::new(
                Uuid::new_v4().to_string(),
                DamageType::Paint,
                Severity::Minor,
                "rear quarter panel",
                420.0,
                0.78,
            ),
        ];

        Ok(AnalysisOutcome {
            assessments,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}
