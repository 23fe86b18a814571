//! Attribute filtering.
//!
//! An [`AttrFilter`] is one clause of a selector: an attribute name, an operation and
//! one or more operands (`title^=A`, `template=products|services`). Several operands
//! mean "any of them".

use std::cmp::Ordering;
use std::fmt;

use super::AttrValue;
use crate::model::{Language, Page};

/// Filter operation for comparing attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact equality match (`=`).
    Eq,
    /// Not equal (`!=`).
    Ne,
    /// Text starts with the operand, ignoring case (`^=`).
    StartsWith,
    /// Text ends with the operand, ignoring case (`$=`).
    EndsWith,
    /// Text contains the operand, ignoring case (`%=` or `*=`).
    Contains,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
}

impl FilterOp {
    /// Operators as spelled in selectors, longest first so prefixes don't shadow them.
    pub const SYMBOLS: &'static [(&'static str, FilterOp)] = &[
        ("!=", FilterOp::Ne),
        ("^=", FilterOp::StartsWith),
        ("$=", FilterOp::EndsWith),
        ("%=", FilterOp::Contains),
        ("*=", FilterOp::Contains),
        (">=", FilterOp::Ge),
        ("<=", FilterOp::Le),
        ("=", FilterOp::Eq),
        (">", FilterOp::Gt),
        ("<", FilterOp::Lt),
    ];

    /// Parse the operator at the start of `input`, returning it with its length.
    pub fn parse_prefix(input: &str) -> Option<(FilterOp, usize)> {
        Self::SYMBOLS
            .iter()
            .find(|(symbol, _)| input.starts_with(symbol))
            .map(|(symbol, op)| (*op, symbol.len()))
    }

    pub fn symbol(self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "!=",
            FilterOp::StartsWith => "^=",
            FilterOp::EndsWith => "$=",
            FilterOp::Contains => "%=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
        }
    }
}

/// A filter condition on an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrFilter {
    /// The attribute name (e.g., "template", "title", "parent_id")
    pub attr: String,
    /// The filter operation
    pub op: FilterOp,
    /// Operands; the clause holds if any of them matches
    pub values: Vec<String>,
}

impl AttrFilter {
    /// Create a new filter condition.
    pub fn new(attr: impl Into<String>, op: FilterOp, values: Vec<String>) -> Self {
        Self {
            attr: attr.into(),
            op,
            values,
        }
    }

    /// Convenience: create an equality filter.
    pub fn eq(attr: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(attr, FilterOp::Eq, vec![value.into()])
    }

    /// Convenience: create a not-equal filter.
    pub fn ne(attr: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(attr, FilterOp::Ne, vec![value.into()])
    }

    /// Convenience: create a starts-with filter.
    pub fn starts_with(attr: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::new(attr, FilterOp::StartsWith, vec![prefix.into()])
    }

    /// Check if this filter matches the given page.
    ///
    /// Returns `false` if the page has no such attribute. `!=` holds only when
    /// none of the operands is equal.
    pub fn matches(&self, page: &Page, language: Option<&Language>) -> bool {
        let Some(value) = page.get_attr(&self.attr, language) else {
            return false;
        };

        match self.op {
            FilterOp::Ne => !self.values.iter().any(|v| equals(&value, v)),
            _ => self.values.iter().any(|v| self.matches_one(&value, v)),
        }
    }

    fn matches_one(&self, value: &AttrValue, operand: &str) -> bool {
        match self.op {
            FilterOp::Eq => equals(value, operand),
            FilterOp::Ne => !equals(value, operand),
            FilterOp::StartsWith => fold(value).starts_with(&operand.to_lowercase()),
            FilterOp::EndsWith => fold(value).ends_with(&operand.to_lowercase()),
            FilterOp::Contains => fold(value).contains(&operand.to_lowercase()),
            FilterOp::Gt => value.compare(operand) == Some(Ordering::Greater),
            FilterOp::Ge => matches!(
                value.compare(operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lt => value.compare(operand) == Some(Ordering::Less),
            FilterOp::Le => matches!(
                value.compare(operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

fn equals(value: &AttrValue, operand: &str) -> bool {
    value.compare(operand) == Some(Ordering::Equal)
}

// Substring operators ignore case, like the host database's collation.
fn fold(value: &AttrValue) -> String {
    value.to_selector_text().to_lowercase()
}

impl fmt::Display for AttrFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.attr, self.op.symbol())?;
        if self.values.len() == 1 && needs_quotes(&self.values[0]) {
            return write!(f, "\"{}\"", self.values[0]);
        }
        write!(f, "{}", self.values.join("|"))
    }
}

fn needs_quotes(value: &str) -> bool {
    value.contains([',', '|'])
}
