// src/core/service_client.rs
//! HTTP client for the resume parsing service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::{ServiceError, GENERIC_SERVICE_ERROR};
use crate::types::{ParseResult, ServiceErrorBody, Submission};
use crate::utils::normalize_base_url;

const PARSE_ENDPOINT: &str = "/parse";

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Anything that can turn a submission into a parse result
#[async_trait]
pub trait ParseService: Send + Sync {
    async fn parse(&self, submission: Submission) -> Result<ParseResult, ServiceError>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client; `timeout_seconds` of `None` waits indefinitely
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn parse_url(&self) -> String {
        format!("{}{}", self.base_url, PARSE_ENDPOINT)
    }

    fn build_form(submission: Submission) -> Result<Form, ServiceError> {
        let Submission {
            file,
            job_description,
        } = submission;

        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(file.content_type)?;

        Ok(Form::new()
            .part("file", part)
            .text("job_description", job_description))
    }

    /// Upload a resume and job description, receive the parsed result
    pub async fn parse_resume(&self, submission: Submission) -> Result<ParseResult, ServiceError> {
        let url = self.parse_url();
        info!(
            file = %submission.file.name,
            size = submission.file.size(),
            job_description_len = submission.job_description.len(),
            "Calling resume parsing service: {}",
            url
        );

        let form = Self::build_form(submission)?;

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                ServiceError::from(e)
            })?;

        let status = response.status();
        debug!("Response status: {}", status);

        let response_text = response.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            ServiceError::from(e)
        })?;
        debug!("Raw parsing service response: {}", response_text);

        if status.is_success() {
            let value: serde_json::Value = serde_json::from_str(&response_text).map_err(|e| {
                error!("Parsing service returned non-JSON body: {}", e);
                ServiceError::from(e)
            })?;
            Ok(ParseResult::from_value(value))
        } else {
            let value: serde_json::Value = serde_json::from_str(&response_text).map_err(|e| {
                error!("Parsing service returned {} with non-JSON body: {}", status, e);
                ServiceError::from(e)
            })?;
            let message = serde_json::from_value::<ServiceErrorBody>(value)
                .ok()
                .and_then(ServiceErrorBody::message)
                .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());

            warn!("Parsing service error {}: {}", status, message);
            Err(ServiceError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ParseService for ServiceClient {
    async fn parse(&self, submission: Submission) -> Result<ParseResult, ServiceError> {
        self.parse_resume(submission).await
    }
}
