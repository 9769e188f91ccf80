//! HTTP client for the voice-assistant dataset backend
//!
//! Wraps the five `/api/finetune/*` endpoints. Transport failures and
//! application-level `success:false` responses both surface as errors;
//! callers treat them identically (entries stay pending, a notification
//! is emitted, nothing is fatal).

use serde::Serialize;
use std::time::Duration;
use vdash_common::types::{
    BatchChangeSplitRequest, BatchDeleteRequest, BatchResponse, BatchUpdateRequest, SampleFiles,
    SamplesResponse, SplitUpdate, TranscriptionUpdate,
};
use vdash_common::{Error, Result, Sample};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the dataset backend API
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /api/finetune/samples
    pub async fn fetch_samples(&self) -> Result<Vec<Sample>> {
        let url = format!("{}/api/finetune/samples", self.base_url);
        tracing::debug!(url = %url, "Fetching sample list");

        let response: SamplesResponse = self.http_client.get(&url).send().await?.json().await?;

        if !response.success {
            return Err(Error::Backend(
                response.error.unwrap_or_else(|| "sample list unavailable".to_string()),
            ));
        }

        tracing::info!(count = response.samples.len(), "Fetched samples from backend");
        Ok(response.samples)
    }

    /// POST /api/finetune/batch_update
    pub async fn batch_update(&self, updates: Vec<TranscriptionUpdate>) -> Result<()> {
        self.post_batch("batch_update", &BatchUpdateRequest { updates })
            .await
    }

    /// POST /api/finetune/batch_change_split
    pub async fn batch_change_split(&self, updates: Vec<SplitUpdate>) -> Result<()> {
        self.post_batch("batch_change_split", &BatchChangeSplitRequest { updates })
            .await
    }

    /// POST /api/finetune/batch_delete
    pub async fn batch_delete(&self, samples: Vec<SampleFiles>) -> Result<()> {
        self.post_batch("batch_delete", &BatchDeleteRequest { samples })
            .await
    }

    /// POST /api/finetune/regenerate_dataset
    pub async fn regenerate_dataset(&self) -> Result<()> {
        let url = format!("{}/api/finetune/regenerate_dataset", self.base_url);
        tracing::debug!(url = %url, "Regenerating dataset metadata");

        let response: BatchResponse = self.http_client.post(&url).send().await?.json().await?;
        check_batch_response(response)
    }

    async fn post_batch<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<()> {
        let url = format!("{}/api/finetune/{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "Posting batch request");

        let response: BatchResponse = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await?
            .json()
            .await?;

        check_batch_response(response)
    }
}

fn check_batch_response(response: BatchResponse) -> Result<()> {
    if response.success {
        Ok(())
    } else {
        Err(Error::Backend(
            response.error.unwrap_or_else(|| "unspecified backend error".to_string()),
        ))
    }
}
