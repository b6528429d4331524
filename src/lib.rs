//! # agent-preview-client
//!
//! Client for the agent builder's prompt backend, plus a headless chat preview
//! built on top of it.
//!
//! ## Overview
//!
//! The backend exposes one JSON endpoint, `POST /api/send-prompt`, that takes a
//! prompt and an email and returns the model's reply. This crate:
//!
//! - checks input locally before anything is sent ([`is_valid_email`],
//!   [`is_valid_prompt`], [`validation::validate_submission`])
//! - performs the exchange with [`PromptClient`], turning every failure into
//!   one of a small closed set of [`ErrorKind`]s with a stable user-facing message
//! - keeps a chat transcript with optimistic updates and a one-send-at-a-time
//!   guard in [`ChatSession`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agent_preview_client::{is_valid_email, is_valid_prompt, PromptClient};
//!
//! #[tokio::main]
//! async fn main() -> agent_preview_client::Result<()> {
//!     let client = PromptClient::new("http://localhost:8080")?;
//!
//!     let (prompt, email) = ("Summarize last month's invoices", "ops@example.com");
//!     if is_valid_prompt(prompt) && is_valid_email(email) {
//!         let reply = client.send_prompt(prompt, email).await?;
//!         println!("{:?}", reply.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | HTTP client for the prompt endpoints |
//! | [`validation`] | Email and prompt checks |
//! | [`types`] | Request and response wire types |
//! | [`session`] | Transcript, send guard and notifications |
//! | [`error_kind`] | Failure classification |

pub mod client;
pub mod error_kind;
pub mod session;
pub mod types;
pub mod validation;

pub use client::{PromptClient, PromptClientBuilder};
pub use error_kind::ErrorKind;
pub use session::{seed_transcript, ChatSession, Link, Message, PromptTransport, SendGuard, Sender};
pub use types::{CsvAttachment, PromptRequest, PromptResponse};
pub use validation::{is_valid_email, is_valid_prompt, MAX_PROMPT_CHARS};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
