//! Per-field validation error collection.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation failures keyed by field name.
///
/// Each field carries at most one message; the first failure recorded for a
/// field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field` unless the field already failed.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns true if `field` failed.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Iterates over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `Ok(value)` when nothing failed, or the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("budget", "Budget is required");
        errors.add("budget", "Budget must be a number");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("budget"), Some("Budget is required"));
    }

    #[test]
    fn test_display_is_field_ordered() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Site name is required");
        errors.add("budget", "Budget is required");
        assert_eq!(
            errors.to_string(),
            "budget: Budget is required; name: Site name is required"
        );
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = ValidationErrors::new();
        errors.add("manager_email", "Invalid email format");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["manager_email"], "Invalid email format");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(5), Ok(5));

        let mut errors = ValidationErrors::new();
        errors.add("x", "bad");
        assert!(errors.into_result(5).is_err());
    }
}
