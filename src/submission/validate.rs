use std::sync::LazyLock;

use regex::Regex;

use crate::models::SubmissionInput;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(?:\.[A-Za-z0-9_'+\-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingName,
    InvalidEmail,
    MissingContact,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingName => write!(f, "Name is required"),
            ValidationError::InvalidEmail => write!(f, "Invalid email address"),
            ValidationError::MissingContact => {
                write!(f, "At least one contact method (WhatsApp or Email) is required")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a normalized submission. Field shape first, then the contact-method rule.
pub fn validate(input: &SubmissionInput) -> Result<(), ValidationError> {
    if input.name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    if let Some(email) = &input.email {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
    }

    if input.whatsapp.is_none() && input.email.is_none() {
        return Err(ValidationError::MissingContact);
    }

    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
