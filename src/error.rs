use crate::error_kind::ErrorKind;
use thiserror::Error;

/// Structured error context for logging and debugging.
///
/// Context never appears in the `Display` output of wire-facing errors: the
/// message shown to end users stays one of the classified strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Where the error was raised (e.g. "send_prompt", "client_builder")
    pub source: Option<String>,
    /// Underlying cause, e.g. the transport or parser error text
    pub details: Option<String>,
    /// HTTP status, when one was received
    pub status_code: Option<u16>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_status_code(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }
}

/// Unified error type for prompt submission.
///
/// The `Display` text of each wire-facing variant is the user-facing message
/// from [`ErrorKind::message`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("{message}")]
    Validation { message: String },

    #[error("{}", ErrorKind::Client.message())]
    Client { context: ErrorContext },

    #[error("{}", ErrorKind::Server.message())]
    Server { context: ErrorContext },

    #[error("{}", ErrorKind::Connectivity.message())]
    Connectivity { context: ErrorContext },

    #[error("{}", ErrorKind::Http.message())]
    Http { status: u16, context: ErrorContext },

    #[error("{}", ErrorKind::Unknown.message())]
    Unknown { context: ErrorContext },

    #[error("{}", ErrorKind::Busy.message())]
    Busy,

    #[error("{message}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

impl Error {
    /// Builds the classified error for a non-success HTTP status.
    ///
    /// A success status has no failure kind; it is reported as `Unknown`
    /// because reaching this with a 2xx is an internal inconsistency.
    pub fn from_status(status: u16) -> Self {
        let context = ErrorContext::new().with_status_code(status);
        match ErrorKind::from_http_status(status) {
            Some(ErrorKind::Client) => Error::Client { context },
            Some(ErrorKind::Server) => Error::Server { context },
            Some(_) => Error::Http { status, context },
            None => Error::Unknown {
                context: context.with_details("success status classified as failure"),
            },
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn connectivity_with_context(context: ErrorContext) -> Self {
        Error::Connectivity { context }
    }

    pub fn unknown_with_context(context: ErrorContext) -> Self {
        Error::Unknown { context }
    }

    /// The failure classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Client { .. } => ErrorKind::Client,
            Error::Server { .. } => ErrorKind::Server,
            Error::Connectivity { .. } => ErrorKind::Connectivity,
            Error::Http { .. } => ErrorKind::Http,
            Error::Unknown { .. } => ErrorKind::Unknown,
            Error::Busy => ErrorKind::Busy,
            Error::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// HTTP status that caused the failure, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => self.context().and_then(|c| c.status_code),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Client { context }
            | Error::Server { context }
            | Error::Connectivity { context }
            | Error::Http { context, .. }
            | Error::Unknown { context }
            | Error::Configuration { context, .. } => Some(context),
            Error::Validation { .. } | Error::Busy => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::unknown_with_context(
            ErrorContext::new()
                .with_source("response_decoder")
                .with_details(e.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_classified_message() {
        assert_eq!(Error::from_status(400).to_string(), "invalid email or empty prompt");
        assert_eq!(Error::from_status(500).to_string(), "server error, try again later");
        assert_eq!(Error::from_status(404).to_string(), "failed to send message");
        assert_eq!(
            Error::connectivity_with_context(ErrorContext::new().with_details("refused"))
                .to_string(),
            "could not connect to server"
        );
    }

    #[test]
    fn wire_errors_display_their_kind_message() {
        let errors = [
            Error::from_status(400),
            Error::from_status(500),
            Error::from_status(502),
            Error::connectivity_with_context(ErrorContext::new()),
            Error::unknown_with_context(ErrorContext::new().with_details("bad body")),
            Error::Busy,
        ];
        for err in errors {
            assert_eq!(err.to_string(), err.kind().message());
        }
    }

    #[test]
    fn status_is_preserved() {
        assert_eq!(Error::from_status(503).status(), Some(503));
        assert_eq!(Error::from_status(400).status(), Some(400));
        assert_eq!(Error::Busy.status(), None);
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Error::from_status(400).kind(), ErrorKind::Client);
        assert_eq!(Error::from_status(418).kind(), ErrorKind::Http);
        assert_eq!(Error::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(Error::from_status(200).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn json_errors_become_unknown() {
        let err: Error = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.to_string(), "unknown error connecting to server");
        assert!(err.context().and_then(|c| c.details.as_ref()).is_some());
    }
}
