use std::future::Future;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::draft::SubmissionDraft;
use crate::config::RemoteApiConfig;

pub const LEVELS_PATH: &str = "api/tools/candidates/levels";
pub const ASSIGNMENTS_PATH: &str = "api/tools/candidates/assignments";

/// Banner text used when a failed submission carries no usable message.
pub const FALLBACK_SUBMISSION_ERROR: &str = "Unexpected error occurred.";

/// Outbound boundary to the remote candidates service.
///
/// The form only ever needs two calls: one read for the level options and one
/// write per submission. Implementations must not retry.
pub trait CandidatesApi: Send + Sync {
    fn fetch_levels(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;

    fn submit_assignment(
        &self,
        draft: &SubmissionDraft,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("candidates API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("candidates API responded with status {status}")]
    Status {
        status: StatusCode,
        body: Option<Value>,
    },
    #[error("unexpected candidates API payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid candidates API endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("candidates API unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Message shown in the form banner after a rejected submission.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Status {
                body: Some(body), ..
            } => failure_message(body),
            _ => FALLBACK_SUBMISSION_ERROR.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

/// Picks the first entry of `errors`, then `message`, then the fallback.
/// Empty strings are skipped.
pub fn failure_message(body: &Value) -> String {
    let first_error = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty());

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty());

    first_error
        .or(message)
        .unwrap_or(FALLBACK_SUBMISSION_ERROR)
        .to_string()
}

#[derive(Debug, Deserialize)]
struct LevelsResponse {
    levels: Vec<String>,
}

/// `reqwest`-backed client for the candidates API.
#[derive(Debug, Clone)]
pub struct HttpCandidatesApi {
    client: reqwest::Client,
    levels_url: Url,
    assignments_url: Url,
}

impl HttpCandidatesApi {
    pub fn new(config: &RemoteApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("assignment-portal/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, config)
    }

    pub fn with_client(
        client: reqwest::Client,
        config: &RemoteApiConfig,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            client,
            levels_url: endpoint(&config.base_url, LEVELS_PATH)?,
            assignments_url: endpoint(&config.base_url, ASSIGNMENTS_PATH)?,
        })
    }

    pub fn levels_url(&self) -> &Url {
        &self.levels_url
    }

    pub fn assignments_url(&self) -> &Url {
        &self.assignments_url
    }
}

impl CandidatesApi for HttpCandidatesApi {
    async fn fetch_levels(&self) -> Result<Vec<String>, ApiError> {
        let response = self.client.get(self.levels_url.clone()).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: serde_json::from_slice(&bytes).ok(),
            });
        }

        let payload: LevelsResponse = serde_json::from_slice(&bytes)?;
        debug!(count = payload.levels.len(), "candidate levels fetched");
        Ok(payload.levels)
    }

    async fn submit_assignment(&self, draft: &SubmissionDraft) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.assignments_url.clone())
            .json(draft)
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let bytes = response.bytes().await?;
        Err(ApiError::Status {
            status,
            body: serde_json::from_slice(&bytes).ok(),
        })
    }
}

/// Joins `path` below the base URL, keeping any path prefix the base carries.
fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    base.join(path)
}
