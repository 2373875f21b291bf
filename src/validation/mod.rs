//! Input validation for dashboard forms.
//!
//! Each form collects every failing field into [`ValidationErrors`] so a
//! client can show the messages inline, and produces a validated record only
//! when nothing failed.

mod contact;
mod errors;
mod records;
mod site_form;

pub use contact::{PHONE_DIGITS, is_valid_email, is_valid_phone};
pub use errors::ValidationErrors;
pub use records::{
    ExpenseForm, MAX_AMOUNT, MaterialForm, QuantityForm, SiteUpdate, VehicleForm, VehicleUpdate,
};
pub use site_form::{FORM_DATE_FORMAT, SiteForm};
