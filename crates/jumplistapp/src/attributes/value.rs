//! Attribute value types.

use std::cmp::Ordering;

/// Runtime representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Whole number (e.g., `id`, `num_children`)
    Int(i64),

    /// Text, resolved for the request language (e.g., `title`, `template`)
    Text(String),
}

impl AttrValue {
    /// Get the integer if this is an Int.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the string if this is Text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value the way a selector clause would spell it.
    pub fn to_selector_text(&self) -> String {
        match self {
            AttrValue::Int(v) => v.to_string(),
            AttrValue::Text(s) => s.clone(),
        }
    }

    /// Compare against a selector operand.
    ///
    /// Integers compare numerically and only against numeric operands; text
    /// compares lexically. Returns `None` when the operand cannot be compared.
    pub fn compare(&self, operand: &str) -> Option<Ordering> {
        match self {
            AttrValue::Int(v) => operand.trim().parse::<i64>().ok().map(|o| v.cmp(&o)),
            AttrValue::Text(s) => Some(s.as_str().cmp(operand)),
        }
    }
}
