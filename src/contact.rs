//! Contact form domain: validation, the timed status line, and the mailto
//! handoff.
//!
//! Nothing here sends mail. A valid submission becomes a `mailto:` URI with
//! percent-encoded subject and body; opening it is handed to the system so
//! the user's own mail client takes over.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long a status message, success or error, stays on screen.
pub const STATUS_TTL: Duration = Duration::from_millis(5000);

/// A rejected submission, with the user-facing message as the error text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Message shown after a valid submission.
pub const SUCCESS_MESSAGE: &str = "Thank you! Your email client should open shortly.";

/// A validated submission ready to be turned into a mailto URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Submission {
    /// Validate raw field values in order: completeness first, then the
    /// email shape. Completeness is literal non-emptiness; fields are not
    /// trimmed, so whitespace-only input passes this check and is caught by
    /// the email pattern (or sent as-is).
    pub fn validate(name: &str, email: &str, message: &str) -> Result<Self, ValidationError> {
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    /// Build the `mailto:` URI for `recipient` with the percent-encoded
    /// subject and body.
    pub fn mailto_url(&self, recipient: &str) -> String {
        let subject = format!("Contact from {}", self.name);
        let body = format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        );
        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        )
    }
}

/// Loose email shape check: no whitespace, one "@", a "." somewhere after
/// it. Real validation belongs to the mail client this hands off to.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    EMAIL_REGEX.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The inline status under the form. Expires on its own; the app tick
/// clears expired statuses.
#[derive(Debug, Clone)]
pub struct FormStatus {
    pub kind: StatusKind,
    pub message: String,
    shown_at: Instant,
}

impl FormStatus {
    pub fn success(message: impl Into<String>, now: Instant) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
            shown_at: now,
        }
    }

    pub fn error(message: impl Into<String>, now: Instant) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
            shown_at: now,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= STATUS_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_rejected_first() {
        let err = Submission::validate("", "a@b.com", "hi").unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);
        assert!(err.to_string().contains("fill in all fields"));

        // Completeness wins even when the email is also malformed.
        let err = Submission::validate("", "not-an-email", "").unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);
    }

    #[test]
    fn test_whitespace_only_passes_completeness() {
        // Fields are not trimmed: a whitespace-only message is "filled in"
        // and the submission goes through untouched.
        let submission = Submission::validate("A", "a@b.com", "   ").unwrap();
        assert_eq!(submission.message, "   ");
        // A whitespace-only email clears completeness and then fails the
        // pattern instead.
        let err = Submission::validate("A", "   ", "hi").unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
    }

    #[test]
    fn test_malformed_email_rejected() {
        let err = Submission::validate("A", "not-an-email", "hi").unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
        assert!(err.to_string().contains("valid email"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_valid_submission_builds_mailto() {
        let submission = Submission::validate("A", "a@b.com", "hi").unwrap();
        let url = submission.mailto_url("owner@example.com");
        assert!(url.starts_with("mailto:owner@example.com?subject="));
        assert!(url.contains("Contact%20from%20A"));
        assert!(url.contains("hi"));
        // The body newlines are percent-encoded.
        assert!(url.contains("%0A"));
        assert!(!url.contains('\n'));
    }

    #[test]
    fn test_mailto_encodes_reserved_characters() {
        let submission =
            Submission::validate("Q&A Dept", "a@b.com", "50% off? yes & no").unwrap();
        let url = submission.mailto_url("owner@example.com");
        assert!(url.contains("Q%26A"));
        assert!(url.contains("50%25"));
        // Only the three URI separators we wrote ourselves remain.
        let tail = url.trim_start_matches("mailto:owner@example.com");
        assert_eq!(tail.matches('&').count(), 1);
        assert_eq!(tail.matches('?').count(), 1);
    }

    #[test]
    fn test_status_expires_after_ttl() {
        let now = Instant::now();
        let status = FormStatus::success(SUCCESS_MESSAGE, now);
        assert!(!status.is_expired(now));
        assert!(!status.is_expired(now + STATUS_TTL - Duration::from_millis(1)));
        assert!(status.is_expired(now + STATUS_TTL));

        let error = FormStatus::error("Please fill in all fields.", now);
        assert_eq!(error.kind, StatusKind::Error);
        assert!(error.is_expired(now + STATUS_TTL + Duration::from_millis(1)));
    }
}
