//! Capability surface: what a translation host must answer.
//!
//! A host is anything that can say whether it translates from one language
//! to another. The sequencer only talks to hosts through [`TranslatorCapability`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Availability of one directional language pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Downloadable,
    Downloading,
    Unavailable,
    /// Produced locally when every attempt of a check failed.
    Error,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Downloadable => "downloadable",
            AvailabilityStatus::Downloading => "downloading",
            AvailabilityStatus::Unavailable => "unavailable",
            AvailabilityStatus::Error => "error",
        }
    }

    /// Rank used to pick the headline status of a language (higher is worse).
    pub fn severity(&self) -> u8 {
        match self {
            AvailabilityStatus::Available => 0,
            AvailabilityStatus::Downloading => 1,
            AvailabilityStatus::Downloadable => 2,
            AvailabilityStatus::Error => 3,
            AvailabilityStatus::Unavailable => 4,
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One directional pair to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    pub source_language: String,
    pub target_language: String,
}

impl CheckOptions {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_language: source.into(),
            target_language: target.into(),
        }
    }
}

impl fmt::Display for CheckOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \u{2192} {}",
            self.source_language.to_uppercase(),
            self.target_language.to_uppercase()
        )
    }
}

/// A single capability query failed. Always worth retrying.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("request to translation host failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation host returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response from translation host: {0}")]
    Malformed(String),
}

/// A host that can report per-pair translation availability.
#[async_trait]
pub trait TranslatorCapability: Send + Sync {
    /// Whether the host exists at all. Checked once before a run starts.
    fn is_present(&self) -> bool;

    /// Ask the host about one pair. `Err` means the query itself failed.
    async fn availability(
        &self,
        options: &CheckOptions,
    ) -> Result<AvailabilityStatus, CapabilityError>;
}

/// Capability that replays a script of outcomes, then repeats a fallback.
#[cfg(test)]
pub(crate) struct ScriptedCapability {
    present: bool,
    script: std::sync::Mutex<std::collections::VecDeque<Option<AvailabilityStatus>>>,
    fallback: Option<AvailabilityStatus>,
    calls: std::sync::Mutex<Vec<CheckOptions>>,
}

#[cfg(test)]
impl ScriptedCapability {
    /// Always answers `status`.
    pub(crate) fn always(status: AvailabilityStatus) -> Self {
        Self::scripted(Vec::new(), Some(status))
    }

    /// Every query fails.
    pub(crate) fn failing() -> Self {
        Self::scripted(Vec::new(), None)
    }

    /// `None` entries in `script` are failed queries.
    pub(crate) fn scripted(
        script: Vec<Option<AvailabilityStatus>>,
        fallback: Option<AvailabilityStatus>,
    ) -> Self {
        Self {
            present: true,
            script: std::sync::Mutex::new(script.into()),
            fallback,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn absent() -> Self {
        Self {
            present: false,
            ..Self::failing()
        }
    }

    pub(crate) fn calls(&self) -> Vec<CheckOptions> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl TranslatorCapability for ScriptedCapability {
    fn is_present(&self) -> bool {
        self.present
    }

    async fn availability(
        &self,
        options: &CheckOptions,
    ) -> Result<AvailabilityStatus, CapabilityError> {
        self.calls.lock().unwrap().push(options.clone());
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback);
        next.ok_or_else(|| CapabilityError::Malformed("scripted failure".to_string()))
    }
}
