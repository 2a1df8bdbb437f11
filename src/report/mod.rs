//! Run events and the sinks that present them.
//!
//! - `console`: human-readable text output
//! - `json`: one JSON object per event, for piping into other tools
//! - `summary`: per-status counts over a finished run

mod console;
mod json;
mod summary;

pub use console::{ConsoleSink, STATUS_LEGEND};
pub use json::JsonLinesSink;
pub use summary::RunSummary;

use crate::capability::{AvailabilityStatus, CheckOptions};
use crate::i18n::BASE_LANGUAGE;
use serde::Serialize;

/// Lifecycle of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Initial,
    Progress,
    Success,
    Error,
}

/// How far a run has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    pub completed_checks: usize,
    pub total_checks: usize,
}

/// Emitted right before a pair check starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub progress: ProgressState,
    /// Display name of the language being checked
    pub language: String,
    pub pair: CheckOptions,
}

/// Outcome of one directional check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairStatus {
    pub source: String,
    pub target: String,
    pub status: AvailabilityStatus,
}

impl PairStatus {
    pub fn new(options: &CheckOptions, status: AvailabilityStatus) -> Self {
        Self {
            source: options.source_language.clone(),
            target: options.target_language.clone(),
            status,
        }
    }

    pub fn options(&self) -> CheckOptions {
        CheckOptions::new(self.source.as_str(), self.target.as_str())
    }
}

/// The three checks of one language: L→EN, EN→L, L→L, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageResult {
    pub code: String,
    pub name: String,
    pub pair_statuses: [PairStatus; 3],
}

impl LanguageResult {
    /// Worst status across the three checks.
    pub fn headline_status(&self) -> AvailabilityStatus {
        self.pair_statuses
            .iter()
            .map(|pair| pair.status)
            .max_by_key(|status| status.severity())
            .unwrap_or(AvailabilityStatus::Available)
    }

    pub fn is_base_language(&self) -> bool {
        self.code == BASE_LANGUAGE
    }
}

/// Everything a sink is told during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    Status {
        status: OverallStatus,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        progress: Option<ProgressState>,
    },
    Progress(ProgressEvent),
    Result(LanguageResult),
}

/// Consumer of run events.
pub trait ReportSink {
    fn handle(&mut self, event: &RunEvent);
}

impl ReportSink for Vec<RunEvent> {
    fn handle(&mut self, event: &RunEvent) {
        self.push(event.clone());
    }
}

#[cfg(test)]
pub(crate) fn sample_result(
    code: &str,
    name: &str,
    statuses: [AvailabilityStatus; 3],
) -> LanguageResult {
    let [a, b, c] = statuses;
    LanguageResult {
        code: code.to_string(),
        name: name.to_string(),
        pair_statuses: [
            PairStatus::new(&CheckOptions::new(code, BASE_LANGUAGE), a),
            PairStatus::new(&CheckOptions::new(BASE_LANGUAGE, code), b),
            PairStatus::new(&CheckOptions::new(code, code), c),
        ],
    }
}
