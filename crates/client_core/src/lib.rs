use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::{
    domain::{DisplayState, SelectedFile, SubmissionInput},
    error::ServerRejection,
    protocol::{HealthResponse, ProcessResponse, FILE_FIELD, TEXT_FIELD},
};
use tracing::{debug, info, warn};
use url::Url;

pub mod controller;
pub mod error;
pub mod form;
pub mod render;
pub mod settings;

pub use controller::SubmissionController;
pub use error::SubmitError;
pub use form::FormState;
pub use render::{HtmlView, ResponseView};
pub use settings::{load_settings, Settings};

const HEALTH_ROUTE: &str = "health";
const FALLBACK_MIME: &str = "application/octet-stream";

/// Status and raw body of an answered `POST /api/process`.
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: StatusCode,
    pub body: String,
}

impl RawReply {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Transport seam for the classification endpoint.
#[async_trait]
pub trait ProcessApi: Send + Sync {
    /// Sends exactly one request carrying `submission`.
    async fn post_submission(&self, submission: &SubmissionInput) -> Result<RawReply, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct HttpProcessApi {
    http: Client,
    endpoint: Url,
}

impl HttpProcessApi {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("invalid classification API endpoint '{endpoint}'"))?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.api_url)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `health` sibling of the process route, e.g. `/api/process` -> `/api/health`.
    pub fn health_url(&self) -> Result<Url> {
        self.endpoint
            .join(HEALTH_ROUTE)
            .with_context(|| format!("cannot derive health route from '{}'", self.endpoint))
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.health_url()?;
        debug!(%url, "triage: checking API health");
        let body: HealthResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(status = %body.status, "triage: API health answered");
        Ok(body)
    }

    async fn build_form(submission: &SubmissionInput) -> Result<Form, SubmitError> {
        match submission {
            SubmissionInput::Text(text) => Ok(Form::new().text(TEXT_FIELD, text.clone())),
            SubmissionInput::File(file) => {
                let part = Self::file_part(file).await?;
                Ok(Form::new().part(FILE_FIELD, part))
            }
        }
    }

    async fn file_part(file: &SelectedFile) -> Result<Part, SubmitError> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .with_context(|| format!("failed to read '{}'", file.path.display()))
            .map_err(SubmitError::Transport)?;
        let mime = mime_guess::from_path(&file.path)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| FALLBACK_MIME.to_string());
        Ok(Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&mime)?)
    }
}

#[async_trait]
impl ProcessApi for HttpProcessApi {
    async fn post_submission(&self, submission: &SubmissionInput) -> Result<RawReply, SubmitError> {
        let form = Self::build_form(submission).await?;
        debug!(
            endpoint = %self.endpoint,
            kind = submission.kind(),
            "triage: posting submission"
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        info!(status = status.as_u16(), "triage: submission answered");
        Ok(RawReply { status, body })
    }
}

/// Maps an answered request to the parsed response or the server's message.
pub fn interpret_reply(reply: RawReply) -> Result<ProcessResponse, SubmitError> {
    if !reply.status.is_success() {
        return Err(ServerRejection::from_body(reply.status.as_u16(), &reply.body).into());
    }
    Ok(serde_json::from_str(&reply.body)?)
}

/// Runs one submission to its terminal display state. Never retries.
pub async fn resolve_submission<A: ProcessApi + ?Sized>(
    api: &A,
    submission: &SubmissionInput,
) -> DisplayState {
    let outcome = match api.post_submission(submission).await {
        Ok(reply) => interpret_reply(reply),
        Err(err) => Err(err),
    };
    match outcome {
        Ok(response) => DisplayState::Result(response.into()),
        Err(err) => {
            warn!(kind = submission.kind(), "triage: submission failed: {err}");
            DisplayState::Error(err.display_message())
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
