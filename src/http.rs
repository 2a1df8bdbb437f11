//! Translation host reached over HTTP.
//!
//! Speaks the LibreTranslate `/languages` shape: a JSON array of languages,
//! each listing the codes it can translate into.

use crate::capability::{AvailabilityStatus, CapabilityError, CheckOptions, TranslatorCapability};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct HostLanguage {
    code: String,
    #[serde(default)]
    targets: Vec<String>,
}

pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl HttpTranslator {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.translator_api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    async fn fetch_languages(&self, base_url: &str) -> Result<Vec<HostLanguage>, CapabilityError> {
        let response = self
            .client
            .get(format!("{}/languages", base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(CapabilityError::Status { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CapabilityError::Malformed(e.to_string()))
    }
}

/// Decide one pair from the host's language list.
fn classify(languages: &[HostLanguage], options: &CheckOptions) -> AvailabilityStatus {
    let Some(source) = languages
        .iter()
        .find(|lang| lang.code == options.source_language)
    else {
        return AvailabilityStatus::Unavailable;
    };

    if options.source_language == options.target_language
        || source.targets.iter().any(|t| *t == options.target_language)
    {
        AvailabilityStatus::Available
    } else {
        AvailabilityStatus::Unavailable
    }
}

#[async_trait]
impl TranslatorCapability for HttpTranslator {
    fn is_present(&self) -> bool {
        self.base_url.is_some()
    }

    async fn availability(
        &self,
        options: &CheckOptions,
    ) -> Result<AvailabilityStatus, CapabilityError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| CapabilityError::Malformed("no translation host configured".to_string()))?;

        let languages = self.fetch_languages(base_url).await?;
        Ok(classify(&languages, options))
    }
}
