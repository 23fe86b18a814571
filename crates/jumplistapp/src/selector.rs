//! # Selector Language
//!
//! The host describes page queries as selector strings:
//!
//! ```text
//! parent_id=10, title^=A, include=unpublished
//! ```
//!
//! A [`Selector`] is the parsed form: a list of [`AttrFilter`] clauses that must all
//! hold, plus the `include` modifier deciding whether unpublished pages are visible.
//! Jumplist uses selectors in three places:
//!
//! 1. **Generic rules** (`template=products`), matched against a candidate parent
//! 2. **Bucket counts**, handed to the store's `count`
//! 3. **The listing selector**, which the host builds and jumplist extends
//!
//! ## Grammar
//!
//! - Clauses are separated by commas: `a=1, b=2`
//! - A clause is `field OP value` with `OP` one of `=`, `!=`, `^=`, `$=`, `%=`, `*=`,
//!   `>`, `>=`, `<`, `<=`
//! - `value` may list alternatives: `template=a|b`
//! - Double quotes protect commas and pipes: `title="Smith, John"`
//! - `include=unpublished` (or `include=all`) makes unpublished pages visible;
//!   `include=hidden` is accepted and changes nothing
//!
//! Field names are `[A-Za-z0-9_.]+`. Anything else is a [`JumplistError::Selector`].

use std::fmt;
use std::str::FromStr;

use crate::attributes::{AttrFilter, FilterOp};
use crate::error::{JumplistError, Result};
use crate::model::{Language, Page, PageId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    clauses: Vec<AttrFilter>,
    include_unpublished: bool,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector for the direct children of `parent`.
    pub fn children_of(parent: PageId) -> Self {
        Self::new().and(AttrFilter::eq("parent_id", parent.to_string()))
    }

    /// Add a clause.
    pub fn and(mut self, clause: AttrFilter) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn push(&mut self, clause: AttrFilter) {
        self.clauses.push(clause);
    }

    /// Make unpublished pages visible.
    pub fn include_unpublished(mut self) -> Self {
        self.include_unpublished = true;
        self
    }

    pub fn includes_unpublished(&self) -> bool {
        self.include_unpublished
    }

    pub fn clauses(&self) -> &[AttrFilter] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The page id the selector pins `parent_id` to, if it has a single such clause.
    pub fn parent(&self) -> Option<PageId> {
        self.clauses
            .iter()
            .find(|c| (c.attr == "parent_id" || c.attr == "parent") && c.op == FilterOp::Eq)
            .filter(|c| c.values.len() == 1)
            .and_then(|c| c.values[0].trim().parse::<u64>().ok())
            .map(PageId)
    }

    /// True if every clause holds for `page`. Publication status is ignored.
    pub fn matches_attrs(&self, page: &Page, language: Option<&Language>) -> bool {
        self.clauses.iter().all(|c| c.matches(page, language))
    }

    /// True if `page` would be returned by a query with this selector.
    pub fn matches(&self, page: &Page, language: Option<&Language>) -> bool {
        (page.published || self.include_unpublished) && self.matches_attrs(page, language)
    }
}

impl FromStr for Selector {
    type Err = JumplistError;

    fn from_str(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(JumplistError::selector(input, "empty selector"));
        }

        let mut selector = Selector::new();
        for part in split_clauses(input)? {
            let clause = parse_clause(input, &part)?;
            if clause.attr == "include" {
                selector.include_unpublished |= parse_include(input, &clause)?;
            } else {
                selector.clauses.push(clause);
            }
        }
        Ok(selector)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.clauses.iter().map(ToString::to_string).collect();
        if self.include_unpublished {
            parts.push("include=unpublished".to_string());
        }
        f.write_str(&parts.join(", "))
    }
}

/// A raw clause and whether its value was quoted.
struct RawClause {
    text: String,
    quoted: bool,
}

fn split_clauses(input: &str) -> Result<Vec<RawClause>> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
                current.push(ch);
            }
            ',' if !in_quotes => {
                clauses.push(RawClause {
                    text: std::mem::take(&mut current),
                    quoted,
                });
                quoted = false;
            }
            _ => current.push(ch),
        }
    }
    if in_quotes {
        return Err(JumplistError::selector(input, "unterminated quote"));
    }
    clauses.push(RawClause {
        text: current,
        quoted,
    });

    if clauses.iter().any(|c| c.text.trim().is_empty()) {
        return Err(JumplistError::selector(input, "empty clause"));
    }
    Ok(clauses)
}

fn parse_clause(input: &str, raw: &RawClause) -> Result<AttrFilter> {
    let text = raw.text.trim();
    let op_start = text
        .find(|c: char| "=!<>^$%*".contains(c))
        .ok_or_else(|| JumplistError::selector(input, format!("no operator in `{text}`")))?;

    let field = text[..op_start].trim();
    if field.is_empty() {
        return Err(JumplistError::selector(input, format!("missing field in `{text}`")));
    }
    if !field
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(JumplistError::selector(input, format!("invalid field `{field}`")));
    }

    let (op, len) = FilterOp::parse_prefix(&text[op_start..])
        .ok_or_else(|| JumplistError::selector(input, format!("unknown operator in `{text}`")))?;
    let value = text[op_start + len..].trim();

    let values = if raw.quoted {
        let unquoted = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or_else(|| JumplistError::selector(input, format!("misplaced quote in `{text}`")))?;
        vec![unquoted.to_string()]
    } else {
        value.split('|').map(|v| v.trim().to_string()).collect()
    };

    Ok(AttrFilter::new(field, op, values))
}

fn parse_include(input: &str, clause: &AttrFilter) -> Result<bool> {
    if clause.op != FilterOp::Eq {
        return Err(JumplistError::selector(input, "include only supports `=`"));
    }
    let mut unpublished = false;
    for value in &clause.values {
        match value.as_str() {
            "unpublished" | "all" => unpublished = true,
            "hidden" => {}
            other => {
                return Err(JumplistError::selector(
                    input,
                    format!("unknown include mode `{other}`"),
                ))
            }
        }
    }
    Ok(unpublished)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(title: &str) -> Page {
        Page::new(20u64, 10u64, "child")
            .with_template("product")
            .with_field("title", title)
    }

    #[test]
    fn parses_clauses_and_include() {
        let selector: Selector = "parent_id=10, title^=A, include=unpublished".parse().unwrap();

        assert_eq!(selector.clauses().len(), 2);
        assert_eq!(selector.clauses()[1], AttrFilter::starts_with("title", "A"));
        assert!(selector.includes_unpublished());
        assert_eq!(selector.parent(), Some(PageId(10)));
    }

    #[test]
    fn renders_canonical_form() {
        let selector = Selector::children_of(PageId(10))
            .and(AttrFilter::starts_with("title", "A"))
            .include_unpublished();
        assert_eq!(selector.to_string(), "parent_id=10, title^=A, include=unpublished");

        let reparsed: Selector = selector.to_string().parse().unwrap();
        assert_eq!(reparsed, selector);
    }

    #[test]
    fn pipe_separates_alternatives() {
        let selector: Selector = "template=category|product".parse().unwrap();
        assert_eq!(selector.clauses()[0].values, vec!["category", "product"]);
        assert!(selector.matches_attrs(&child("Apple"), None));
    }

    #[test]
    fn quotes_protect_commas() {
        let selector: Selector = r#"title="Smith, John", template=product"#.parse().unwrap();
        assert_eq!(selector.clauses().len(), 2);
        assert_eq!(selector.clauses()[0].values, vec!["Smith, John"]);
        assert!(selector.matches_attrs(&child("Smith, John"), None));
    }

    #[test]
    fn rejects_malformed_input() {
        for input in [
            "",
            "   ",
            "template",
            "=product",
            "temp late=product",
            "title=\"open",
            "title=A,,template=x",
            "include=trash",
            "title!x",
        ] {
            assert!(input.parse::<Selector>().is_err(), "accepted `{input}`");
        }
    }

    #[test]
    fn unpublished_pages_need_include() {
        let page = child("Apple").unpublished();
        let plain: Selector = "parent_id=10".parse().unwrap();
        let all: Selector = "parent_id=10, include=all".parse().unwrap();

        assert!(!plain.matches(&page, None));
        assert!(plain.matches_attrs(&page, None));
        assert!(all.matches(&page, None));
    }

    #[test]
    fn parent_requires_single_numeric_eq() {
        let selector: Selector = "parent_id=10|11".parse().unwrap();
        assert_eq!(selector.parent(), None);
        let selector: Selector = "template=x".parse().unwrap();
        assert_eq!(selector.parent(), None);
    }
}
