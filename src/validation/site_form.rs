//! The Add Site form.
//!
//! The form arrives as the raw values the user typed. Validation collects one
//! message per failing field and, when nothing fails, produces a [`NewSite`].

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{BuildingType, NewSite, ProjectType, SiteDetails, SiteStatus};

use super::ValidationErrors;
use super::contact::{is_valid_email, is_valid_phone};
use super::records::within_limit;

/// Date format accepted for start and end dates.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw Add Site form input.
///
/// Every field is optional on the wire and defaults to an empty string.
/// Numeric fields may be sent either as JSON numbers or as strings. JSON
/// numbers are read through `f64`, so a budget with more than fifteen
/// significant digits keeps its exact value only when sent as a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SiteForm {
    #[serde(deserialize_with = "form_text")]
    pub name: String,
    #[serde(deserialize_with = "form_text")]
    pub location: String,
    #[serde(deserialize_with = "form_text")]
    pub address: String,
    #[serde(deserialize_with = "form_text")]
    pub city: String,
    #[serde(deserialize_with = "form_text")]
    pub state: String,
    #[serde(deserialize_with = "form_text")]
    pub pincode: String,
    #[serde(deserialize_with = "form_text")]
    pub manager: String,
    #[serde(deserialize_with = "form_text")]
    pub manager_phone: String,
    #[serde(deserialize_with = "form_text")]
    pub manager_email: String,
    #[serde(deserialize_with = "form_text")]
    pub client_name: String,
    #[serde(deserialize_with = "form_text")]
    pub client_phone: String,
    #[serde(deserialize_with = "form_text")]
    pub client_email: String,
    #[serde(deserialize_with = "form_text")]
    pub project_type: String,
    #[serde(deserialize_with = "form_text")]
    pub start_date: String,
    #[serde(deserialize_with = "form_text")]
    pub end_date: String,
    #[serde(deserialize_with = "form_text")]
    pub budget: String,
    #[serde(deserialize_with = "form_text")]
    pub description: String,
    #[serde(deserialize_with = "form_text")]
    pub site_area: String,
    #[serde(deserialize_with = "form_text")]
    pub building_type: String,
    #[serde(deserialize_with = "form_text")]
    pub floors: String,
    #[serde(deserialize_with = "form_text")]
    pub status: String,
}

/// Accepts a string, a number or null as form text.
fn form_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FormValue {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match FormValue::deserialize(deserializer)? {
        FormValue::Text(text) => text,
        FormValue::Number(number) => number.to_string(),
        FormValue::Missing(()) => String::new(),
    })
}

/// Contact fields count as filled whenever anything was typed, so a
/// whitespace-only entry is checked and rejected rather than dropped.
fn contact(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.trim().to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl SiteForm {
    /// Validates the form.
    ///
    /// Required: name, location, manager, start date, end date, budget and
    /// project type. Optional contact fields are checked only when filled.
    pub fn validate(&self) -> Result<NewSite, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required(&self.name, "name", "Site name is required", &mut errors);
        let location = required(&self.location, "location", "Location is required", &mut errors);
        let manager = required(&self.manager, "manager", "Manager name is required", &mut errors);
        let start_date = required(
            &self.start_date,
            "start_date",
            "Start date is required",
            &mut errors,
        );
        let end_date = required(&self.end_date, "end_date", "End date is required", &mut errors);
        let budget = required(&self.budget, "budget", "Budget is required", &mut errors);
        let project_type = required(
            &self.project_type,
            "project_type",
            "Project type is required",
            &mut errors,
        );

        let start_date = start_date.and_then(|raw| parse_date(&raw, "start_date", &mut errors));
        let end_date = end_date.and_then(|raw| parse_date(&raw, "end_date", &mut errors));
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.add("end_date", "End date must be on or after start date");
            }
        }

        let budget = budget.and_then(|raw| match Decimal::from_str(&raw) {
            Ok(value) if value >= Decimal::ZERO => {
                within_limit(value, "budget", "Budget", &mut errors)
            }
            Ok(_) => {
                errors.add("budget", "Budget cannot be negative");
                None
            }
            Err(_) => {
                errors.add("budget", "Budget must be a number");
                None
            }
        });

        let project_type = project_type.and_then(|raw| {
            let parsed = ProjectType::parse(&raw);
            if parsed.is_none() {
                errors.add("project_type", "Unknown project type");
            }
            parsed
        });

        let building_type = optional(&self.building_type).and_then(|raw| {
            let parsed = BuildingType::parse(&raw);
            if parsed.is_none() {
                errors.add("building_type", "Unknown building type");
            }
            parsed
        });

        let status = match optional(&self.status) {
            None => Some(SiteStatus::Active),
            Some(raw) => {
                let parsed = SiteStatus::parse(&raw);
                if parsed.is_none() {
                    errors.add("status", "Unknown status");
                }
                parsed
            }
        };

        let floors = optional(&self.floors).and_then(|raw| match raw.parse::<u32>() {
            Ok(value) if value >= 1 => Some(value),
            _ => {
                errors.add("floors", "Floors must be a whole number of at least 1");
                None
            }
        });

        let site_area = optional(&self.site_area).and_then(|raw| match Decimal::from_str(&raw) {
            Ok(value) if value >= Decimal::ZERO => {
                within_limit(value, "site_area", "Site area", &mut errors)
            }
            _ => {
                errors.add("site_area", "Site area must be a non-negative number");
                None
            }
        });

        for (field, raw) in [
            ("manager_email", &self.manager_email),
            ("client_email", &self.client_email),
        ] {
            if !raw.is_empty() && !is_valid_email(raw) {
                errors.add(field, "Invalid email format");
            }
        }
        for (field, raw) in [
            ("manager_phone", &self.manager_phone),
            ("client_phone", &self.client_phone),
        ] {
            if !raw.is_empty() && !is_valid_phone(raw) {
                errors.add(field, "Invalid phone number");
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Every required value is Some once no errors were recorded.
        match (name, location, manager, start_date, end_date, budget, status) {
            (
                Some(name),
                Some(location),
                Some(manager),
                Some(start_date),
                Some(end_date),
                Some(budget),
                Some(status),
            ) => Ok(NewSite {
                name,
                location,
                status,
                start_date,
                end_date,
                budget,
                manager,
                details: SiteDetails {
                    address: optional(&self.address),
                    city: optional(&self.city),
                    state: optional(&self.state),
                    pincode: optional(&self.pincode),
                    manager_phone: contact(&self.manager_phone),
                    manager_email: contact(&self.manager_email),
                    client_name: optional(&self.client_name),
                    client_phone: contact(&self.client_phone),
                    client_email: contact(&self.client_email),
                    project_type,
                    building_type,
                    floors,
                    site_area,
                    description: optional(&self.description),
                },
            }),
            _ => Err(errors),
        }
    }
}

fn required(
    value: &str,
    field: &str,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let value = optional(value);
    if value.is_none() {
        errors.add(field, message);
    }
    value
}

fn parse_date(raw: &str, field: &str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, FORM_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Invalid date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SiteForm {
        SiteForm {
            name: "Harbour View Towers".to_string(),
            location: "Mumbai, Maharashtra".to_string(),
            manager: "Rajesh Kumar".to_string(),
            project_type: "residential".to_string(),
            start_date: "2024-03-01".to_string(),
            end_date: "2025-06-30".to_string(),
            budget: "12500000".to_string(),
            ..SiteForm::default()
        }
    }

    #[test]
    fn test_empty_form_reports_each_required_field_once() {
        let errors = SiteForm::default().validate().unwrap_err();

        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get("name"), Some("Site name is required"));
        assert_eq!(errors.get("location"), Some("Location is required"));
        assert_eq!(errors.get("manager"), Some("Manager name is required"));
        assert_eq!(errors.get("start_date"), Some("Start date is required"));
        assert_eq!(errors.get("end_date"), Some("End date is required"));
        assert_eq!(errors.get("budget"), Some("Budget is required"));
        assert_eq!(errors.get("project_type"), Some("Project type is required"));
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut form = valid_form();
        form.name = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("name"));
    }

    #[test]
    fn test_valid_form_produces_new_site() {
        let mut form = valid_form();
        form.city = " Mumbai ".to_string();
        form.floors = "32".to_string();
        form.building_type = "apartment".to_string();

        let site = form.validate().unwrap();
        assert_eq!(site.name, "Harbour View Towers");
        assert_eq!(site.status, SiteStatus::Active);
        assert_eq!(site.budget, Decimal::from(12_500_000));
        assert_eq!(site.details.city.as_deref(), Some("Mumbai"));
        assert_eq!(site.details.floors, Some(32));
        assert_eq!(site.details.building_type, Some(BuildingType::Apartment));
        assert_eq!(site.details.project_type, Some(ProjectType::Residential));
        assert_eq!(site.details.address, None);
    }

    #[test]
    fn test_email_without_at_is_rejected() {
        let mut form = valid_form();
        form.manager_email = "rajesh.kumar.example.com".to_string();
        form.client_email = "client@example.com".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("manager_email"), Some("Invalid email format"));
    }

    #[test]
    fn test_short_phone_is_rejected() {
        let mut form = valid_form();
        form.manager_phone = "98765 4321".to_string();
        form.client_phone = "(987) 654-321".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("manager_phone"), Some("Invalid phone number"));
        assert_eq!(errors.get("client_phone"), Some("Invalid phone number"));
    }

    #[test]
    fn test_formatted_ten_digit_phone_is_accepted() {
        let mut form = valid_form();
        form.manager_phone = "98765-43210".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_whitespace_only_contact_fields_are_invalid() {
        let mut form = valid_form();
        form.manager_phone = "   ".to_string();
        form.client_email = "   ".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("manager_phone"), Some("Invalid phone number"));
        assert_eq!(errors.get("client_email"), Some("Invalid email format"));
    }

    #[test]
    fn test_contact_fields_are_stored_trimmed() {
        let mut form = valid_form();
        form.manager_email = " rajesh@site.co ".to_string();
        let site = form.validate().unwrap();
        assert_eq!(site.details.manager_email.as_deref(), Some("rajesh@site.co"));
        assert_eq!(site.details.client_email, None);
    }

    #[test]
    fn test_budget_above_limit_is_rejected() {
        let mut form = valid_form();
        form.budget = "1000000000000000000000000000".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("budget"), Some("Budget is too large"));
    }

    #[test]
    fn test_string_budget_keeps_every_digit() {
        let json = r#"{
            "name": "Depot",
            "location": "Chennai",
            "manager": "S. Iyer",
            "project_type": "industrial",
            "start_date": "2024-01-01",
            "end_date": "2024-12-31",
            "budget": "123456789012345.67"
        }"#;

        let form: SiteForm = serde_json::from_str(json).unwrap();
        let site = form.validate().unwrap();
        assert_eq!(site.budget, Decimal::from_str("123456789012345.67").unwrap());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut form = valid_form();
        form.end_date = "2024-02-01".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("end_date"),
            Some("End date must be on or after start date")
        );
    }

    #[test]
    fn test_malformed_values() {
        let mut form = valid_form();
        form.start_date = "01/03/2024".to_string();
        form.budget = "twelve crore".to_string();
        form.project_type = "Mixed Use".to_string();
        form.floors = "0".to_string();
        form.site_area = "-5".to_string();
        form.status = "paused".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("start_date"), Some("Invalid date"));
        assert_eq!(errors.get("budget"), Some("Budget must be a number"));
        assert_eq!(errors.get("project_type"), Some("Unknown project type"));
        assert!(errors.contains("floors"));
        assert!(errors.contains("site_area"));
        assert_eq!(errors.get("status"), Some("Unknown status"));
        assert!(!errors.contains("end_date"));
    }

    #[test]
    fn test_negative_budget_is_rejected() {
        let mut form = valid_form();
        form.budget = "-1".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("budget"), Some("Budget cannot be negative"));
    }

    #[test]
    fn test_deserialize_accepts_numbers_and_nulls() {
        let json = r#"{
            "name": "Depot",
            "location": "Chennai",
            "manager": "S. Iyer",
            "project_type": "industrial",
            "start_date": "2024-01-01",
            "end_date": "2024-12-31",
            "budget": 2500000.50,
            "floors": 2,
            "description": null
        }"#;

        let form: SiteForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.budget, "2500000.5");
        assert_eq!(form.floors, "2");
        assert_eq!(form.description, "");

        let site = form.validate().unwrap();
        assert_eq!(site.budget, Decimal::from_str("2500000.5").unwrap());
        assert_eq!(site.details.floors, Some(2));
    }
}
