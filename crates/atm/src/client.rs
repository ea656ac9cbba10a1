//! REST client for the ATM service endpoints.
//!
//! Wraps the three HTTP calls behind [`AtmApi`] using [`reqwest`]. The
//! bearer credential is supplied per orchestrator run, so each run gets
//! its own [`AtmClient`].

use std::time::Duration;

use async_trait::async_trait;
use codegen_core::types::TestType;

use crate::types::{CodeListResponse, CodegenParams, TestDetails};

/// HTTP request timeout for a single ATM call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the ATM REST layer.
#[derive(Debug, thiserror::Error)]
pub enum AtmError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout) or
    /// the body could not be decoded.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The ATM service returned a non-2xx status code.
    #[error("ATM API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Remote operations the orchestrator drives each job through.
#[async_trait]
pub trait AtmApi: Send + Sync {
    /// Look up the details of a test, primarily its `test_type`.
    async fn test_details(&self, test_id: &str) -> Result<TestDetails, AtmError>;

    /// Ask the ATM service to start generating code for a test.
    async fn request_code_generation(
        &self,
        test_id: &str,
        test_type: TestType,
    ) -> Result<(), AtmError>;

    /// Status of the most recent generation attempt for a test, or
    /// `None` when no attempt has reported a status yet.
    async fn latest_code_status(&self, test_id: &str) -> Result<Option<String>, AtmError>;
}

/// Client for a single ATM service, authenticated with one bearer token.
pub struct AtmClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: String,
}

impl AtmClient {
    /// Create a new client.
    ///
    /// * `base_url`   - e.g. `https://test-manager-api.example.com/api/atm/v1`.
    /// * `auth_token` - pre-obtained bearer credential.
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Result<Self, AtmError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            auth_token: auth_token.into(),
        })
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`AtmError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AtmError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AtmError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AtmError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AtmApi for AtmClient {
    async fn test_details(&self, test_id: &str) -> Result<TestDetails, AtmError> {
        let response = self
            .client
            .get(format!("{}/test-details/{}", self.base_url, test_id))
            .bearer_auth(&self.auth_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn request_code_generation(
        &self,
        test_id: &str,
        test_type: TestType,
    ) -> Result<(), AtmError> {
        let params = CodegenParams::for_type(test_type);

        let response = self
            .client
            .post(format!("{}/test/{}/code", self.base_url, test_id))
            .bearer_auth(&self.auth_token)
            .json(&params)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn latest_code_status(&self, test_id: &str) -> Result<Option<String>, AtmError> {
        let response = self
            .client
            .get(format!("{}/test/{}/codes", self.base_url, test_id))
            .bearer_auth(&self.auth_token)
            .query(&[
                ("page", "1"),
                ("per_page", "10"),
                ("filter[code_name]", ""),
                ("sort_by", "committed_at"),
            ])
            .send()
            .await?;

        let body: CodeListResponse = Self::parse_response(response).await?;
        Ok(body.latest_status().map(str::to_string))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
