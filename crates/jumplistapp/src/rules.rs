//! # Selector Rules
//!
//! Filters are opt-in per parent. The site administrator lists, one per line, the
//! rules identifying parents whose children should get jump filters:
//!
//! ```text
//! id=1234
//! template=products
//! name=events, parent_id=1
//! ```
//!
//! Each line becomes a [`SelectorRule`]:
//!
//! - **`ExactId`**: a line of the form `id=<N>` without a comma. Matched by comparing
//!   ids directly; the fastest kind of rule and the one to prefer.
//! - **`Expression`**: anything else, handed to a [`RuleEvaluator`] supplied by the
//!   host. [`SelectorEvaluator`] is the default and evaluates the line as a
//!   [`Selector`] against the page's attributes.
//!
//! A rule that does not parse never matches. It is not reported as an error while
//! matching; [`SelectorRule::validate`] exists so tooling can surface it.

use serde::Serialize;
use std::fmt;

use crate::error::Result;
use crate::model::{Language, Page, PageId};
use crate::selector::Selector;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum SelectorRule {
    ExactId(PageId),
    Expression(String),
}

impl SelectorRule {
    /// Parse one configured line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if let Some(id) = line.strip_prefix("id=").filter(|_| !line.contains(',')) {
            if let Ok(id) = id.trim().parse::<u64>() {
                return Some(SelectorRule::ExactId(PageId(id)));
            }
        }
        Some(SelectorRule::Expression(line.to_string()))
    }

    /// Check that the rule can ever match, without evaluating it.
    pub fn validate(&self) -> Result<()> {
        match self {
            SelectorRule::ExactId(_) => Ok(()),
            SelectorRule::Expression(expression) => expression.parse::<Selector>().map(|_| ()),
        }
    }
}

impl fmt::Display for SelectorRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorRule::ExactId(id) => write!(f, "id={id}"),
            SelectorRule::Expression(expression) => f.write_str(expression),
        }
    }
}

/// Parse newline-separated rules, keeping their order.
pub fn parse_rules(text: &str) -> Vec<SelectorRule> {
    text.lines().filter_map(SelectorRule::parse).collect()
}

/// Host capability deciding whether a generic rule matches a page.
///
/// Implementations return `Ok(false)` for rules they cannot understand and reserve
/// `Err` for failures of the data they consult.
pub trait RuleEvaluator {
    fn matches(&self, page: &Page, expression: &str, language: Option<&Language>) -> Result<bool>;
}

/// Evaluates rules as selectors against the page's own attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorEvaluator;

impl RuleEvaluator for SelectorEvaluator {
    fn matches(&self, page: &Page, expression: &str, language: Option<&Language>) -> Result<bool> {
        match expression.parse::<Selector>() {
            Ok(selector) => Ok(selector.matches_attrs(page, language)),
            Err(err) => {
                tracing::debug!(rule = expression, error = %err, "ignoring malformed rule");
                Ok(false)
            }
        }
    }
}
