//! Hand-rolled input validation helpers.
//!
//! Each helper returns `Result<(), String>`; callers wrap the message in
//! [`crate::error::CoreError::Validation`]. Validation stays here so the DB
//! and API layers share one set of rules.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Accepted `working_hours` values for advocate availability.
pub const WORKING_HOURS_VALUES: &[&str] = &["anytime", "9am_10pm", "24_7"];

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// Validate the basic shape of an email address.
///
/// This is deliberately loose; deliverability is proven by the OTP itself.
pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(format!("Invalid email address: '{email}'"))
    }
}

/// Validate a call rating. Ratings are integers from 1 to 5.
pub fn validate_rating(rating: i32) -> Result<(), String> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err("Rating must be between 1 and 5".to_string())
    }
}

/// Validate a monetary amount that must be strictly positive.
pub fn validate_positive_amount(amount: Decimal) -> Result<(), String> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err("Amount must be positive".to_string())
    }
}

/// Validate a metered call duration. Zero is allowed (a call that dropped
/// immediately costs nothing); negative durations are not.
pub fn validate_duration_minutes(minutes: Decimal) -> Result<(), String> {
    if minutes >= Decimal::ZERO {
        Ok(())
    } else {
        Err("Duration must not be negative".to_string())
    }
}

/// Validate that a list field (languages, law types) is non-empty.
pub fn validate_non_empty_list(values: &[String], field: &str) -> Result<(), String> {
    if values.is_empty() {
        Err(format!("At least one {field} is required"))
    } else {
        Ok(())
    }
}

/// Validate an advocate `working_hours` value.
pub fn validate_working_hours(value: &str) -> Result<(), String> {
    if WORKING_HOURS_VALUES.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid working_hours '{value}'. Must be one of: {}",
            WORKING_HOURS_VALUES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal literal")
    }

    #[test]
    fn test_plain_email_accepted() {
        assert!(validate_email("client@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.domain.in").is_ok());
    }

    #[test]
    fn test_malformed_emails_rejected() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("two words@example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert!(validate_positive_amount(dec("0.01")).is_ok());
        assert!(validate_positive_amount(Decimal::ZERO).is_err());
        assert!(validate_positive_amount(dec("-5")).is_err());
    }

    #[test]
    fn test_duration_zero_allowed_negative_not() {
        assert!(validate_duration_minutes(Decimal::ZERO).is_ok());
        assert!(validate_duration_minutes(dec("3.333")).is_ok());
        assert!(validate_duration_minutes(dec("-1")).is_err());
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(validate_non_empty_list(&[], "language").is_err());
        assert!(validate_non_empty_list(&["Hindi".to_string()], "language").is_ok());
    }

    #[test]
    fn test_working_hours_values() {
        assert!(validate_working_hours("anytime").is_ok());
        assert!(validate_working_hours("9am_10pm").is_ok());
        assert!(validate_working_hours("24_7").is_ok());
        assert!(validate_working_hours("weekends").is_err());
    }
}
