//! Form-level checks. These never fail; callers decide whether to block submission.

use crate::domain::{CategoryPatch, TransactionPatch};

pub const MSG_DATE_REQUIRED: &str = "Date is required";
pub const MSG_TYPE_REQUIRED: &str = "Type is required";
pub const MSG_AMOUNT_POSITIVE: &str = "Amount must be a positive number";
pub const MSG_CATEGORY_REQUIRED: &str = "Category is required";
pub const MSG_CATEGORY_NAME_REQUIRED: &str = "Category name is required";
pub const MSG_COLOR_REQUIRED: &str = "Color is required";

/// Lists every missing or invalid field of a partial transaction.
pub fn validate_transaction(candidate: &TransactionPatch) -> Vec<String> {
    let mut errors = Vec::new();
    if candidate.date.is_none() {
        errors.push(MSG_DATE_REQUIRED.to_string());
    }
    if candidate.kind.is_none() {
        errors.push(MSG_TYPE_REQUIRED.to_string());
    }
    match candidate.amount {
        Some(amount) if amount.is_finite() && amount > 0.0 => {}
        _ => errors.push(MSG_AMOUNT_POSITIVE.to_string()),
    }
    if is_blank(candidate.category.as_deref()) {
        errors.push(MSG_CATEGORY_REQUIRED.to_string());
    }
    errors
}

/// Lists every missing field of a partial category.
pub fn validate_category(candidate: &CategoryPatch) -> Vec<String> {
    let mut errors = Vec::new();
    if is_blank(candidate.name.as_deref()) {
        errors.push(MSG_CATEGORY_NAME_REQUIRED.to_string());
    }
    if candidate.kind.is_none() {
        errors.push(MSG_TYPE_REQUIRED.to_string());
    }
    if is_blank(candidate.color.as_deref()) {
        errors.push(MSG_COLOR_REQUIRED.to_string());
    }
    errors
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}
