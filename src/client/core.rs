use crate::client::builder::PromptClientBuilder;
use crate::client::classification::{classify_body_error, classify_send_error};
use crate::types::{CsvAttachment, PromptRequest, PromptResponse};
use crate::{Error, ErrorContext, ErrorKind, Result};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Client for the agent builder's prompt endpoints.
///
/// Holds no per-call state: concurrent calls proceed independently and in no
/// particular order. Callers that need one-at-a-time sends should gate calls
/// with a [`crate::session::SendGuard`].
#[derive(Debug, Clone)]
pub struct PromptClient {
    http: reqwest::Client,
    prompt_url: Url,
    csv_url: Url,
}

impl PromptClient {
    pub fn builder() -> PromptClientBuilder {
        PromptClientBuilder::new()
    }

    /// Client with default endpoint paths under `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        PromptClientBuilder::new().base_url(base_url).build()
    }

    pub(crate) fn from_parts(http: reqwest::Client, prompt_url: Url, csv_url: Url) -> Self {
        Self {
            http,
            prompt_url,
            csv_url,
        }
    }

    pub fn prompt_url(&self) -> &Url {
        &self.prompt_url
    }

    pub fn csv_url(&self) -> &Url {
        &self.csv_url
    }

    /// Submit a prompt and return the backend's reply.
    ///
    /// `content` and `email` are sent verbatim: no trimming and no validation.
    /// Check them with [`crate::validation`] first.
    pub async fn send_prompt(&self, content: &str, email: &str) -> Result<PromptResponse> {
        let payload = PromptRequest::new(content, email);
        let request = self.http.post(self.prompt_url.clone()).json(&payload);
        self.execute(request, &self.prompt_url, "send_prompt").await
    }

    /// Submit a prompt with a CSV file as extra context, as `multipart/form-data`
    /// with fields `prompt`, `email` and `csvFile`.
    pub async fn send_prompt_with_csv(
        &self,
        prompt: &str,
        email: &str,
        csv: CsvAttachment,
    ) -> Result<PromptResponse> {
        let part = Part::bytes(csv.bytes)
            .file_name(csv.file_name)
            .mime_str("text/csv")
            .map_err(|e| {
                Error::unknown_with_context(
                    ErrorContext::new()
                        .with_source("send_prompt_with_csv")
                        .with_details(e.to_string()),
                )
            })?;
        let form = Form::new()
            .text("prompt", prompt.to_string())
            .text("email", email.to_string())
            .part("csvFile", part);
        let request = self.http.post(self.csv_url.clone()).multipart(form);
        self.execute(request, &self.csv_url, "send_prompt_with_csv")
            .await
    }

    /// One request, one classified outcome. Failure bodies are never read.
    async fn execute(
        &self,
        request: RequestBuilder,
        endpoint: &Url,
        source: &str,
    ) -> Result<PromptResponse> {
        let start = Instant::now();
        debug!(endpoint = endpoint.path(), "dispatching prompt");

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                let err = classify_send_error(&e, source);
                warn!(
                    endpoint = endpoint.path(),
                    error_kind = err.kind().name(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    cause = %e,
                    "prompt request failed before a response was received"
                );
                return Err(err);
            }
        };

        let status = response.status().as_u16();
        if ErrorKind::from_http_status(status).is_some() {
            let err = Error::from_status(status);
            warn!(
                endpoint = endpoint.path(),
                http_status = status,
                error_kind = err.kind().name(),
                duration_ms = start.elapsed().as_millis() as u64,
                "prompt request rejected"
            );
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_body_error(&e, source, status))?;
        let parsed: PromptResponse = serde_json::from_str(&body).map_err(|e| {
            let err = Error::from(e);
            warn!(
                endpoint = endpoint.path(),
                http_status = status,
                error_kind = err.kind().name(),
                "prompt response is not a JSON object"
            );
            err
        })?;

        info!(
            endpoint = endpoint.path(),
            http_status = status,
            response_id = parsed.id.as_deref().unwrap_or(""),
            model_id = parsed.model_id.as_deref().unwrap_or(""),
            duration_ms = start.elapsed().as_millis() as u64,
            "prompt processed"
        );
        Ok(parsed)
    }
}
