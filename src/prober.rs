use crate::capability::{AvailabilityStatus, CheckOptions, TranslatorCapability};
use crate::retry::{with_retry, Delay, RetryConfig, TokioDelay};
use tracing::warn;

/// Runs single availability checks with bounded retry.
///
/// Only failed queries are retried. A host answering `unavailable` has
/// answered; that result is returned as-is.
pub struct AvailabilityProber {
    retry: RetryConfig,
    delay: Box<dyn Delay>,
}

impl AvailabilityProber {
    pub fn new(retry: RetryConfig) -> Self {
        Self::with_delay(retry, Box::new(TokioDelay))
    }

    pub fn with_delay(retry: RetryConfig, delay: Box<dyn Delay>) -> Self {
        Self { retry, delay }
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Check one pair.
    ///
    /// Never fails: when every attempt errors the check is reported as
    /// [`AvailabilityStatus::Error`]. A zero-attempt config queries nothing
    /// and reports `Error` straight away.
    pub async fn probe(
        &self,
        capability: &dyn TranslatorCapability,
        options: &CheckOptions,
    ) -> AvailabilityStatus {
        if self.retry.max_attempts == 0 {
            warn!("Availability {}: no attempts allowed, reporting error", options);
            return AvailabilityStatus::Error;
        }

        let operation_name = format!("Availability {}", options);
        with_retry(&self.retry, self.delay.as_ref(), &operation_name, || {
            capability.availability(options)
        })
        .await
        .unwrap_or(AvailabilityStatus::Error)
    }
}

impl Default for AvailabilityProber {
    fn default() -> Self {
        Self::new(RetryConfig::availability_probe())
    }
}
