//! Mock HTTP backend for integration tests

#![allow(dead_code)]

use agent_preview_client::PromptClient;
use mockito::{Matcher, Mock, Server, ServerGuard};

pub const PROMPT_PATH: &str = "/api/send-prompt";
pub const CSV_PATH: &str = "/api/send-prompt-with-csv";

pub const REPLY_BODY: &str =
    r#"{"id":"42","content":"hi","modelId":"m1","createdAt":1700000000}"#;

/// Test fixture that manages a mock backend
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client pointed at the mock server
    pub fn client(&self) -> PromptClient {
        PromptClient::new(&self.base_url).expect("mock server URL is valid")
    }

    /// Mock the prompt endpoint with a JSON reply
    pub async fn mock_prompt(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", PROMPT_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock the prompt endpoint, requiring an exact JSON request body
    pub async fn mock_prompt_expecting(
        &mut self,
        request: serde_json::Value,
        status: usize,
        body: &str,
    ) -> Mock {
        self.server
            .mock("POST", PROMPT_PATH)
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(request))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

/// Address of a local port with nothing listening on it
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

/// A listener that accepts connections but never answers. Keep the listener
/// alive for as long as requests should hang.
pub fn silent_backend() -> (std::net::TcpListener, String) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    (listener, format!("http://{}", addr))
}
