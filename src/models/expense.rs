//! Expense model and categories.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spending category for an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Construction materials.
    Materials,
    /// Wages and contractor payments.
    Labor,
    /// Equipment purchase or hire.
    Equipment,
    /// Diesel and petrol.
    Fuel,
    /// Vehicle and machinery rental.
    Rental,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// Parses the wire form (e.g., `Labor`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Materials" => Some(ExpenseCategory::Materials),
            "Labor" => Some(ExpenseCategory::Labor),
            "Equipment" => Some(ExpenseCategory::Equipment),
            "Fuel" => Some(ExpenseCategory::Fuel),
            "Rental" => Some(ExpenseCategory::Rental),
            "Other" => Some(ExpenseCategory::Other),
            _ => None,
        }
    }
}

/// A recorded expense.
///
/// `site` holds the site's display name; it is not checked against the
/// site list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for the expense.
    pub id: String,
    /// What the money was spent on.
    pub description: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Spending category.
    pub category: ExpenseCategory,
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Name of the site the expense belongs to.
    pub site: String,
    /// Whether the expense has been approved.
    #[serde(default)]
    pub approved: bool,
}

/// A validated expense ready to be stored, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// What the money was spent on.
    pub description: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Spending category.
    pub category: ExpenseCategory,
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Name of the site the expense belongs to.
    pub site: String,
}

impl NewExpense {
    /// Builds the stored expense. New expenses await approval.
    pub fn into_expense(self, id: String) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
            site: self.site,
            approved: false,
        }
    }
}
