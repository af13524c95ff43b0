//! Input validation for registration, recovery, and rating requests

use crate::utils::error::{ForumError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

// Structural check only; deliverability is the notifier's problem.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Request field validation utilities
pub struct DataValidator;

impl DataValidator {
    /// Validate that a required text field is present and non-empty
    pub fn validate_required(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ForumError::Validation(format!("{} is required", field)));
        }
        Ok(())
    }

    /// Validate a username
    pub fn validate_username(username: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(ForumError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }

        if username.len() > 50 {
            return Err(ForumError::Validation(
                "Username cannot exceed 50 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate an email address structurally
    pub fn validate_email(email: &str) -> Result<()> {
        if !EMAIL_REGEX.is_match(email) {
            return Err(ForumError::Validation("Invalid email format".to_string()));
        }
        Ok(())
    }

    /// Validate password strength
    pub fn validate_password(password: &str) -> Result<()> {
        if password.len() < 8 {
            return Err(ForumError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if password.len() > 128 {
            return Err(ForumError::Validation(
                "Password cannot exceed 128 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a rating value: within [0, 5] in 0.5 increments
    pub fn validate_rating(value: f32) -> Result<()> {
        if !(0.0..=5.0).contains(&value) {
            return Err(ForumError::Validation(
                "Rating must be between 0 and 5".to_string(),
            ));
        }

        if (value * 2.0).fract() != 0.0 {
            return Err(ForumError::Validation(
                "Rating must be in 0.5 increments (0, 0.5, 1, 1.5, etc.)".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(DataValidator::validate_email("user@example.com").is_ok());
        assert!(DataValidator::validate_email("first.last@sub.domain.org").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(DataValidator::validate_email("").is_err());
        assert!(DataValidator::validate_email("plainaddress").is_err());
        assert!(DataValidator::validate_email("user@nodot").is_err());
        assert!(DataValidator::validate_email("user name@example.com").is_err());
        assert!(DataValidator::validate_email("@example.com").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(DataValidator::validate_password("short").is_err());
        assert!(DataValidator::validate_password("exactly8").is_ok());
        assert!(DataValidator::validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_required_fields() {
        assert!(DataValidator::validate_required("Firstname", "Ada").is_ok());
        assert!(DataValidator::validate_required("Firstname", "  ").is_err());
        assert!(DataValidator::validate_required("Lastname", "").is_err());
    }

    #[test]
    fn test_rating_values() {
        for value in [0.0, 0.5, 1.0, 2.5, 4.5, 5.0] {
            assert!(DataValidator::validate_rating(value).is_ok(), "{}", value);
        }
        for value in [-0.5, 5.5, 3.3, 4.75] {
            assert!(DataValidator::validate_rating(value).is_err(), "{}", value);
        }
    }
}
