//! Local input checks run before a prompt is submitted.
//!
//! Both predicates are pure and total. The backend client does not call them;
//! whoever issues sends is expected to check first.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on prompt length, counted in characters after trimming.
pub const MAX_PROMPT_CHARS: usize = 5000;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Returns true iff `email` has the shape `local@domain.tld`, where no part
/// contains whitespace or `@`. No normalization, no DNS lookup.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns true iff the trimmed prompt holds between 1 and [`MAX_PROMPT_CHARS`]
/// characters inclusive.
///
/// Length is counted in `char`s (Unicode scalar values) after [`str::trim`].
/// A UTF-16 count, as a browser text field reports it, is larger for characters
/// outside the Basic Multilingual Plane, and a JavaScript trim also strips
/// U+FEFF, which `str::trim` keeps.
pub fn is_valid_prompt(content: &str) -> bool {
    let len = content.trim().chars().count();
    len > 0 && len <= MAX_PROMPT_CHARS
}

/// Runs the submission checks in order and reports the first one that fails.
///
/// Messages are meant for end users, in the order a chat surface presents them:
/// missing prompt, prompt bounds, missing email, malformed email.
pub fn validate_submission(content: &str, email: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::validation("please enter a message"));
    }
    if !is_valid_prompt(content) {
        return Err(Error::validation(format!(
            "message must be between 1 and {} characters",
            MAX_PROMPT_CHARS
        )));
    }
    if email.trim().is_empty() {
        return Err(Error::validation("please enter your email"));
    }
    if !is_valid_email(email) {
        return Err(Error::validation("please enter a valid email"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@exa mple.com"));
        assert!(!is_valid_email(" user@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
    }

    #[test]
    fn prompt_bounds() {
        assert!(!is_valid_prompt(""));
        assert!(!is_valid_prompt("   "));
        assert!(!is_valid_prompt("\n\t "));
        assert!(is_valid_prompt("hello"));
        assert!(is_valid_prompt(" hello "));
        assert!(is_valid_prompt(&"a".repeat(MAX_PROMPT_CHARS)));
        assert!(!is_valid_prompt(&"a".repeat(MAX_PROMPT_CHARS + 1)));
    }

    #[test]
    fn prompt_length_ignores_surrounding_whitespace() {
        let padded = format!("  {}  ", "a".repeat(MAX_PROMPT_CHARS));
        assert!(is_valid_prompt(&padded));
    }

    #[test]
    fn prompt_length_counts_characters_not_bytes() {
        // 'é' is two bytes in UTF-8
        assert!(is_valid_prompt(&"é".repeat(MAX_PROMPT_CHARS)));
        // one char, two UTF-16 units
        assert!(is_valid_prompt(&"😀".repeat(MAX_PROMPT_CHARS)));
        assert!(!is_valid_prompt(&"😀".repeat(MAX_PROMPT_CHARS + 1)));
    }

    #[test]
    fn byte_order_mark_is_not_trimmed() {
        assert!(is_valid_prompt("\u{feff}"));
        assert!(!is_valid_prompt(" \t\n "));
    }

    #[test]
    fn predicates_are_repeatable() {
        for _ in 0..3 {
            assert!(is_valid_email("user@example.com"));
            assert!(!is_valid_email("bad"));
            assert!(is_valid_prompt("hi"));
            assert!(!is_valid_prompt(""));
        }
    }

    #[test]
    fn submission_checks_in_order() {
        let msg = |c: &str, e: &str| validate_submission(c, e).unwrap_err().to_string();

        assert_eq!(msg("  ", "bad"), "please enter a message");
        assert_eq!(
            msg(&"a".repeat(MAX_PROMPT_CHARS + 1), "user@example.com"),
            "message must be between 1 and 5000 characters"
        );
        assert_eq!(msg("hello", "  "), "please enter your email");
        assert_eq!(msg("hello", "nope"), "please enter a valid email");
        assert!(validate_submission("hello", "user@example.com").is_ok());
    }

    #[test]
    fn submission_errors_are_validation_kind() {
        let err = validate_submission("", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
