use crate::errors::ServiceError;
use crate::models::{Document, SubmissionRecord, SubmissionResponse, ToJson};
use crate::rate_limiter::RateLimiter;
use chrono::Utc;
use dashmap::DashMap;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

const DEFAULT_API_URL: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";
const MAX_ATTEMPTS: usize = 3;
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

pub struct DocumentService {
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
    api_url: String,
    max_attempts: usize,
    retry_backoff: Duration,
    submissions: DashMap<String, SubmissionRecord>,
}

impl DocumentService {
    pub fn new(rate_limiter: Arc<RateLimiter>) -> Result<Self, ServiceError> {
        // You can point this at a staging registry here
        let api_url =
            std::env::var("REGISTRY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            rate_limiter,
            api_url,
            max_attempts: MAX_ATTEMPTS,
            retry_backoff: RETRY_BACKOFF,
            submissions: DashMap::new(),
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_retry_policy(mut self, max_attempts: usize, retry_backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_backoff = retry_backoff;
        self
    }

    /// Submits a product introduction document under the configured rate
    /// limit. One admission slot is consumed per logical submission, not
    /// per retry attempt, so retries cannot eat into other callers' quota.
    pub async fn submit_document(
        &self,
        document: &Document,
        signature: &str,
    ) -> Result<SubmissionResponse, ServiceError> {
        let submission_id = Uuid::new_v4().to_string();

        info!("Submitting document: {}", submission_id);

        self.rate_limiter.acquire().await?;

        // Serialized once; every attempt re-sends the same full payload.
        let body = document.to_json();
        let mut causes: Vec<ServiceError> = Vec::new();

        for attempt in 1..=self.max_attempts {
            match self.send_request(&body, signature).await {
                Ok(()) => {
                    info!(
                        "Document submitted successfully: {} (attempt {})",
                        submission_id, attempt
                    );
                    self.record(&submission_id, document, "accepted", attempt, None);
                    return Ok(SubmissionResponse {
                        submission_id,
                        attempts: attempt,
                        timestamp: Utc::now(),
                    });
                }
                Err(e) => {
                    warn!(
                        "Submission {} attempt {}/{} failed: {}",
                        submission_id, attempt, self.max_attempts, e
                    );
                    causes.push(e);
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.retry_backoff).await;
            }
        }

        let error = ServiceError::SubmissionFailed {
            attempts: self.max_attempts,
            causes,
        };
        self.record(
            &submission_id,
            document,
            "failed",
            self.max_attempts,
            Some(error.to_string()),
        );
        Err(error)
    }

    async fn send_request(&self, body: &str, signature: &str) -> Result<(), ServiceError> {
        let response = self
            .http_client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Signature", signature)
            .body(body.to_string())
            .send()
            .await?;

        if response.status() == StatusCode::OK {
            return Ok(());
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::HttpStatus { status, body })
    }

    fn record(
        &self,
        submission_id: &str,
        document: &Document,
        status: &str,
        attempts: usize,
        error: Option<String>,
    ) {
        let record = SubmissionRecord {
            submission_id: submission_id.to_string(),
            doc_id: document.doc_id.clone(),
            status: status.to_string(),
            attempts,
            error,
            timestamp: Utc::now(),
        };
        self.submissions.insert(record.submission_id.clone(), record);
    }

    pub fn recent_submissions(&self) -> Vec<SubmissionRecord> {
        let mut records: Vec<SubmissionRecord> = self
            .submissions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    pub fn submission_by_id(&self, id: &str) -> Result<SubmissionRecord, ServiceError> {
        self.submissions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ServiceError::SubmissionNotFound(id.to_string()))
    }
}
