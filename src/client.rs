//! Prompt submission client.
//!
//! Stateless wrapper over one `reqwest::Client`: each call performs exactly one
//! HTTP request, with no retries and no caching. Implementation details are
//! split into submodules under `src/client/`.

pub mod builder;
mod classification;
pub mod core;

pub use builder::PromptClientBuilder;
pub use core::PromptClient;

/// Default path of the JSON prompt endpoint.
pub const DEFAULT_PROMPT_PATH: &str = "/api/send-prompt";

/// Default path of the multipart prompt-with-CSV endpoint.
pub const DEFAULT_CSV_PATH: &str = "/api/send-prompt-with-csv";

/// Default backend location when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Sends one prompt to `base_url` with a throwaway client.
///
/// Convenient for one-off calls; build a [`PromptClient`] to reuse connections.
pub async fn send_prompt(
    base_url: &str,
    content: &str,
    email: &str,
) -> crate::Result<crate::types::PromptResponse> {
    PromptClient::new(base_url)?.send_prompt(content, email).await
}
