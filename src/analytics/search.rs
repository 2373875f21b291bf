//! Free-text search over dashboard records.

use crate::models::{Expense, Material, Site, Vehicle};

/// A record that can be matched against a search term.
pub trait Searchable {
    /// The text fields a search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Returns true if any field contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Site {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.location.as_str(), self.manager.as_str()];
        fields.extend(self.details.city.as_deref());
        fields.extend(self.details.client_name.as_deref());
        fields
    }
}

impl Searchable for Material {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.unit.as_str()]
    }
}

impl Searchable for Expense {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str(), self.site.as_str()]
    }
}

impl Searchable for Vehicle {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.vehicle_type.as_str(),
            self.site.as_str(),
        ]
    }
}

/// Filters `items` by a case-insensitive substring match.
///
/// A missing or blank term keeps every item.
pub fn filter_by_search<'a, T: Searchable>(items: &'a [T], term: Option<&str>) -> Vec<&'a T> {
    let needle = term.map(|t| t.trim().to_lowercase()).unwrap_or_default();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| item.matches(&needle)).collect()
}
