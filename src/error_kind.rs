//! Closed set of failure kinds for prompt submission.
//!
//! Every failure the crate surfaces belongs to exactly one [`ErrorKind`]. HTTP
//! status codes are mapped to kinds in [`ErrorKind::from_http_status`] and
//! nowhere else, so supporting a new status is a one-line change.
//!
//! | Kind           | Origin                                    | Message                               |
//! |----------------|-------------------------------------------|---------------------------------------|
//! | `Validation`   | local checks before any network call      | check-specific                        |
//! | `Client`       | HTTP 400                                  | invalid email or empty prompt         |
//! | `Server`       | HTTP 500                                  | server error, try again later         |
//! | `Connectivity` | no HTTP status obtainable                 | could not connect to server           |
//! | `Http`         | any other non-2xx status                  | failed to send message                |
//! | `Unknown`      | malformed body, unexpected internal error | unknown error connecting to server    |
//! | `Busy`         | a send is already in flight               | a message is already being sent       |
//! | `Configuration`| client builder misconfiguration           | check-specific                        |
//!
//! ## Example
//!
//! ```rust
//! use agent_preview_client::ErrorKind;
//!
//! assert_eq!(ErrorKind::from_http_status(400), Some(ErrorKind::Client));
//! assert_eq!(ErrorKind::from_http_status(204), None);
//! assert_eq!(ErrorKind::Server.message(), "server error, try again later");
//! ```

use std::fmt;

/// Classification of a failed prompt exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected locally; nothing was sent.
    Validation,
    /// Backend rejected the request (HTTP 400).
    Client,
    /// Backend failed internally (HTTP 500).
    Server,
    /// Transport failure before any HTTP status was received.
    Connectivity,
    /// Non-success status without a dedicated mapping.
    Http,
    /// Anything else, e.g. a success response whose body is not JSON.
    Unknown,
    /// Another send from the same session is still pending.
    Busy,
    /// The client could not be constructed from the given settings.
    Configuration,
}

impl ErrorKind {
    /// Maps an HTTP status to a failure kind. Success statuses (200–299) map to `None`.
    pub fn from_http_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            400 => Some(Self::Client),
            500 => Some(Self::Server),
            _ => Some(Self::Http),
        }
    }

    /// Canonical user-facing message.
    ///
    /// `Validation` and `Configuration` failures usually carry a more specific
    /// message of their own; this is the fallback.
    #[inline]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation => "invalid input",
            Self::Client => "invalid email or empty prompt",
            Self::Server => "server error, try again later",
            Self::Connectivity => "could not connect to server",
            Self::Http => "failed to send message",
            Self::Unknown => "unknown error connecting to server",
            Self::Busy => "a message is already being sent",
            Self::Configuration => "invalid client configuration",
        }
    }

    /// Stable snake_case name, used as a structured log field.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Client => "client_error",
            Self::Server => "server_error",
            Self::Connectivity => "connectivity",
            Self::Http => "http_error",
            Self::Unknown => "unknown",
            Self::Busy => "busy",
            Self::Configuration => "configuration",
        }
    }

    /// Whether the failure happened before anything was dispatched.
    #[inline]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation | Self::Busy | Self::Configuration)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
