use crate::retry::RetryConfig;
use anyhow::{bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;

/// How run events are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => bail!("Unknown REPORT_FORMAT '{}'. Expected 'text' or 'json'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Translation host
    pub translator_api_url: Option<String>,
    pub request_timeout_secs: u64,

    // Retry
    pub probe_max_attempts: u32,
    pub probe_base_delay_ms: u64,

    // Output
    pub report_format: ReportFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let probe_max_attempts = std::env::var("PROBE_MAX_ATTEMPTS")
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("PROBE_MAX_ATTEMPTS must be a positive integer")?
            .unwrap_or(3);
        if probe_max_attempts == 0 {
            bail!("PROBE_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Self {
            // Unset means the host has no translation capability
            translator_api_url: std::env::var("TRANSLATOR_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            probe_max_attempts,
            probe_base_delay_ms: std::env::var("PROBE_BASE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),

            report_format: std::env::var("REPORT_FORMAT")
                .ok()
                .map(|v| v.parse::<ReportFormat>())
                .transpose()?
                .unwrap_or(ReportFormat::Text),
        })
    }

    /// Retry settings for availability checks.
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.probe_max_attempts,
            Duration::from_millis(self.probe_base_delay_ms),
        )
        .with_backoff_multiplier(2.0)
    }
}
