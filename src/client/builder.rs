use crate::client::core::PromptClient;
use crate::client::{DEFAULT_BASE_URL, DEFAULT_CSV_PATH, DEFAULT_PROMPT_PATH};
use crate::{Error, ErrorContext, Result};
use reqwest::Proxy;
use std::env;
use std::time::Duration;
use url::Url;

/// Builder for [`PromptClient`].
///
/// Keep this surface area small and predictable. Nothing here adds retries;
/// the only knob that changes request behavior is the optional timeout.
#[derive(Debug, Default)]
pub struct PromptClientBuilder {
    base_url: Option<String>,
    prompt_path: Option<String>,
    csv_path: Option<String>,
    timeout: Option<Duration>,
    proxy_url: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl PromptClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the builder from the environment:
    /// - `AGENT_PREVIEW_BASE_URL` (default `http://localhost:8080`)
    /// - `AGENT_PREVIEW_HTTP_TIMEOUT_SECS` (unset means no timeout)
    /// - `AGENT_PREVIEW_PROXY_URL`
    ///
    /// Explicit setters called afterwards take precedence.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Ok(url) = env::var("AGENT_PREVIEW_BASE_URL") {
            if !url.trim().is_empty() {
                builder.base_url = Some(url);
            }
        }
        builder.timeout = env::var("AGENT_PREVIEW_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        builder.proxy_url = env::var("AGENT_PREVIEW_PROXY_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        builder
    }

    /// Backend origin, e.g. `http://localhost:8080`. A path prefix is kept.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the JSON prompt endpoint path (default `/api/send-prompt`).
    pub fn prompt_path(mut self, path: impl Into<String>) -> Self {
        self.prompt_path = Some(path.into());
        self
    }

    /// Override the CSV endpoint path (default `/api/send-prompt-with-csv`).
    pub fn csv_path(mut self, path: impl Into<String>) -> Self {
        self.csv_path = Some(path.into());
        self
    }

    /// Opt-in whole-request timeout. An elapsed timeout is reported as a
    /// connectivity failure.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    /// Use a preconfigured `reqwest::Client`. Timeout and proxy settings are
    /// then ignored.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<PromptClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let prompt_url = endpoint_url(
            &base_url,
            self.prompt_path.as_deref().unwrap_or(DEFAULT_PROMPT_PATH),
        )?;
        let csv_url = endpoint_url(
            &base_url,
            self.csv_path.as_deref().unwrap_or(DEFAULT_CSV_PATH),
        )?;

        let http = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(proxy_url) = &self.proxy_url {
                    let proxy = Proxy::all(proxy_url.as_str()).map_err(|e| {
                        Error::configuration_with_context(
                            format!("Invalid proxy URL: {}", proxy_url),
                            ErrorContext::new()
                                .with_source("client_builder")
                                .with_details(e.to_string()),
                        )
                    })?;
                    builder = builder.proxy(proxy);
                }
                builder.build().map_err(|e| {
                    Error::configuration_with_context(
                        "Failed to create HTTP client",
                        ErrorContext::new()
                            .with_source("client_builder")
                            .with_details(e.to_string()),
                    )
                })?
            }
        };

        Ok(PromptClient::from_parts(http, prompt_url, csv_url))
    }
}

fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    let raw = format!("{}{}", base_url.trim().trim_end_matches('/'), path);
    let url = Url::parse(&raw).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid backend URL: {}", raw),
            ErrorContext::new()
                .with_source("client_builder")
                .with_details(e.to_string()),
        )
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::configuration_with_context(
            format!("Unsupported URL scheme: {}", other),
            ErrorContext::new().with_source("client_builder"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn defaults_point_at_local_backend() {
        let client = PromptClientBuilder::new().build().unwrap();
        assert_eq!(
            client.prompt_url().as_str(),
            "http://localhost:8080/api/send-prompt"
        );
        assert_eq!(
            client.csv_url().as_str(),
            "http://localhost:8080/api/send-prompt-with-csv"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let client = PromptClientBuilder::new()
            .base_url("https://preview.example.com/backend/")
            .prompt_path("custom")
            .build()
            .unwrap();
        assert_eq!(
            client.prompt_url().as_str(),
            "https://preview.example.com/backend/custom"
        );
    }

    #[test]
    fn invalid_base_url_is_configuration_error() {
        let err = PromptClientBuilder::new()
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = PromptClientBuilder::new()
            .base_url("ftp://example.com")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn from_env_reads_and_filters_settings() {
        // Single test so the process-wide variables are not raced.
        const VARS: [&str; 3] = [
            "AGENT_PREVIEW_BASE_URL",
            "AGENT_PREVIEW_HTTP_TIMEOUT_SECS",
            "AGENT_PREVIEW_PROXY_URL",
        ];

        env::set_var("AGENT_PREVIEW_BASE_URL", "http://backend.internal:9000");
        env::set_var("AGENT_PREVIEW_HTTP_TIMEOUT_SECS", " 15 ");
        env::set_var("AGENT_PREVIEW_PROXY_URL", "http://proxy.internal:3128");
        let builder = PromptClientBuilder::from_env();
        assert_eq!(
            builder.base_url.as_deref(),
            Some("http://backend.internal:9000")
        );
        assert_eq!(builder.timeout, Some(Duration::from_secs(15)));
        assert_eq!(
            builder.proxy_url.as_deref(),
            Some("http://proxy.internal:3128")
        );
        let client = builder.build().unwrap();
        assert_eq!(
            client.prompt_url().as_str(),
            "http://backend.internal:9000/api/send-prompt"
        );

        env::set_var("AGENT_PREVIEW_BASE_URL", "   ");
        env::set_var("AGENT_PREVIEW_HTTP_TIMEOUT_SECS", "soon");
        env::set_var("AGENT_PREVIEW_PROXY_URL", "");
        let builder = PromptClientBuilder::from_env();
        assert_eq!(builder.base_url, None);
        assert_eq!(builder.timeout, None);
        assert_eq!(builder.proxy_url, None);

        env::set_var("AGENT_PREVIEW_HTTP_TIMEOUT_SECS", "0");
        assert_eq!(PromptClientBuilder::from_env().timeout, None);

        for var in VARS {
            env::remove_var(var);
        }
        let builder = PromptClientBuilder::from_env();
        assert_eq!(builder.base_url, None);
        assert_eq!(builder.timeout, None);
        assert_eq!(builder.proxy_url, None);

        let client = PromptClientBuilder::from_env()
            .base_url("http://explicit:1")
            .build()
            .unwrap();
        assert_eq!(client.prompt_url().as_str(), "http://explicit:1/api/send-prompt");
    }

    #[test]
    fn invalid_proxy_is_configuration_error() {
        let err = PromptClientBuilder::new()
            .proxy("http://[bad")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
