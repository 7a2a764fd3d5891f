//! History of skin analysis reports stored under `userReports`.
//!
//! Reports are produced elsewhere; this module only keeps them. The list is
//! stored newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::routine::{Clock, SystemClock};
use crate::storage::{KeyValueStore, StorageKeys};

/// Highest value any report metric may take.
pub const MAX_SCORE: u32 = 100;

/// Analysis result for one photo. Metrics are integers from 1 to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinReport {
    pub face_detected: bool,
    pub overall_skin_health_score: u32,
    pub hydration: u32,
    pub oil_balance: u32,
    pub smoothness: u32,
    pub pore_clarity: u32,
    pub acne_severity: u32,
    pub elasticity: u32,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl SkinReport {
    fn metrics(&self) -> [(&'static str, u32); 7] {
        [
            ("overall_skin_health_score", self.overall_skin_health_score),
            ("hydration", self.hydration),
            ("oil_balance", self.oil_balance),
            ("smoothness", self.smoothness),
            ("pore_clarity", self.pore_clarity),
            ("acne_severity", self.acne_severity),
            ("elasticity", self.elasticity),
        ]
    }

    /// # Errors
    /// [`ValidationError::NoFaceDetected`] when the photo had no face, or
    /// `InvalidValue` for a metric outside 1..=100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.face_detected {
            return Err(ValidationError::NoFaceDetected);
        }
        for (field, value) in self.metrics() {
            if !(1..=MAX_SCORE).contains(&value) {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: format!("{value} is outside 1..={MAX_SCORE}"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub report_data: SkinReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Reads and appends to the `userReports` list.
pub struct ReportHistory<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> ReportHistory<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ReportHistory<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// All stored reports, newest first. Unreadable data reads as empty.
    pub async fn list(&self) -> Vec<StoredReport> {
        let mut reports = self.read().await;
        reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        reports
    }

    pub async fn latest(&self) -> Option<StoredReport> {
        self.list().await.into_iter().next()
    }

    /// Validate `report` and put it at the front of the history.
    ///
    /// The stored list must be readable; a failed read or a malformed list
    /// aborts the write and leaves the history untouched.
    ///
    /// # Errors
    /// Returns a validation error for a report without a face or with an
    /// out-of-range metric, or a storage or JSON error if the existing history
    /// cannot be read or the write fails.
    pub async fn record(
        &self,
        report: SkinReport,
        photo_uri: Option<String>,
        name: Option<String>,
    ) -> Result<StoredReport> {
        report.validate()?;

        let now = self.clock.now();
        let stored = StoredReport {
            id: now.timestamp_millis().to_string(),
            timestamp: now,
            report_data: report,
            photo_uri,
            name,
        };

        let mut reports = self.read_for_update().await?;
        reports.insert(0, stored.clone());
        let json = serde_json::to_string(&reports)?;
        self.store.set(StorageKeys::USER_REPORTS, &json).await?;
        tracing::info!(id = %stored.id, total = reports.len(), "recorded skin report");
        Ok(stored)
    }

    async fn read(&self) -> Vec<StoredReport> {
        self.read_for_update().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read reports");
            Vec::new()
        })
    }

    async fn read_for_update(&self) -> Result<Vec<StoredReport>> {
        match self.store.get(StorageKeys::USER_REPORTS).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}
