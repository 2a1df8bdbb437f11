//! Run summary: status counts over a finished run.

use super::LanguageResult;
use crate::capability::AvailabilityStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counts of each status across every pair check of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub languages: usize,
    pub checks: usize,
    pub available: usize,
    pub downloadable: usize,
    pub downloading: usize,
    pub unavailable: usize,
    pub errors: usize,
    /// Share of checks that came back available, as a percentage
    pub available_rate: f64,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn from_results(results: &[LanguageResult]) -> Self {
        let mut summary = RunSummary {
            languages: results.len(),
            checks: 0,
            available: 0,
            downloadable: 0,
            downloading: 0,
            unavailable: 0,
            errors: 0,
            available_rate: 0.0,
            finished_at: Utc::now(),
        };

        for pair in results.iter().flat_map(|r| r.pair_statuses.iter()) {
            summary.checks += 1;
            match pair.status {
                AvailabilityStatus::Available => summary.available += 1,
                AvailabilityStatus::Downloadable => summary.downloadable += 1,
                AvailabilityStatus::Downloading => summary.downloading += 1,
                AvailabilityStatus::Unavailable => summary.unavailable += 1,
                AvailabilityStatus::Error => summary.errors += 1,
            }
        }

        if summary.checks > 0 {
            summary.available_rate = (summary.available as f64 / summary.checks as f64) * 100.0;
        }

        summary
    }
}
