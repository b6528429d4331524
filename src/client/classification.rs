//! Transport failure classification.
//!
//! HTTP statuses are mapped in [`crate::ErrorKind::from_http_status`]; this
//! module only deals with failures that happen around the status line.

use crate::{Error, ErrorContext};

/// Classifies a failure to obtain any HTTP response.
///
/// Connection refused, DNS failure, timeouts and resets before a status line
/// all count as connectivity. Request construction problems are not network
/// failures and become `Unknown`.
pub(crate) fn classify_send_error(err: &reqwest::Error, source: &str) -> Error {
    let context = ErrorContext::new()
        .with_source(source)
        .with_details(err.to_string());

    if err.is_builder() {
        return Error::unknown_with_context(context);
    }
    if err.is_connect() || err.is_timeout() || err.is_request() {
        return Error::connectivity_with_context(context);
    }
    Error::unknown_with_context(context)
}

/// Classifies a failure while reading a success body. A status was already
/// received, so this is never a connectivity failure.
pub(crate) fn classify_body_error(err: &reqwest::Error, source: &str, status: u16) -> Error {
    Error::unknown_with_context(
        ErrorContext::new()
            .with_source(source)
            .with_status_code(status)
            .with_details(err.to_string()),
    )
}
