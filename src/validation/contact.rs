//! Email and phone number rules for contact fields.

use std::sync::LazyLock;

use regex::Regex;

/// Number of digits a phone number must contain.
pub const PHONE_DIGITS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern must compile"));

/// Loose email check: something, `@`, something, `.`, something.
///
/// # Example
///
/// ```
/// use site_dashboard::validation::is_valid_email;
///
/// assert!(is_valid_email("priya.sharma@example.in"));
/// assert!(!is_valid_email("priya.sharma.example.in"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Phone check: exactly ten digits once every non-digit is stripped.
///
/// # Example
///
/// ```
/// use site_dashboard::validation::is_valid_phone;
///
/// assert!(is_valid_phone("(987) 654-3210"));
/// assert!(!is_valid_phone("98765 4321"));
/// ```
pub fn is_valid_phone(value: &str) -> bool {
    value.chars().filter(|c| c.is_ascii_digit()).count() == PHONE_DIGITS
}
