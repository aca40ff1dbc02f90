use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Simple `local@domain.tld` shape check. This is the bar both for request
/// validation and for deciding whether a contact field can receive mail.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// `validator` hook for email-shaped request fields.
pub fn validate_email_pattern(value: &str) -> Result<(), ValidationError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(ValidationError::new("email")
            .with_message("must be a valid email address (local@domain.tld)".into()))
    }
}

/// `validator` hook for required free-text fields.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required").with_message("is required".into()))
    } else {
        Ok(())
    }
}
