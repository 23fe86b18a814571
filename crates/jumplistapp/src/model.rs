//! # Domain Model: Pages, Fields and Sort Attributes
//!
//! This module defines the host records jumplist reads: [`Page`], its identifier
//! [`PageId`], its named [`FieldValue`]s and the [`Language`] a request is made in.
//!
//! ## Sort Attributes
//!
//! Every parent page declares how its children are ordered in a raw `sortfield`
//! string, the way the host stores it:
//!
//! | Raw value | Resolved | Meaning |
//! |-----------|----------|---------|
//! | `title` | `Some("title")` | ascending by title |
//! | `-name` | `Some("name")` | descending by name (the `-` is only direction) |
//! | `sort` | `None` | manual drag-and-drop order |
//! | `` | `None` | host default, which is manual order |
//!
//! Filters are only ever offered for a resolved sort attribute: bucketing manually
//! ordered siblings by first letter would contradict the order the editor chose.
//!
//! ## Localized Values
//!
//! A [`FieldValue::Localized`] carries a base value plus per-language translations.
//! When a request language is set and the translation for it is non-empty, the
//! translation wins; otherwise the base value is used. The same resolution applies
//! to prefix derivation, bucket counts and selector matching so they always agree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::attributes::AttrValue;

/// Identifier of a page. `0` is reserved for "no page".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl PageId {
    pub const NONE: PageId = PageId(0);

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PageId {
    fn from(id: u64) -> Self {
        PageId(id)
    }
}

/// A language code as the host names it (e.g. `"fr"`, `"de"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value of a named page field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Localized {
        base: String,
        #[serde(default)]
        translations: BTreeMap<Language, String>,
    },
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Localized value with a single translation.
    pub fn localized(
        base: impl Into<String>,
        language: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        let mut translations = BTreeMap::new();
        translations.insert(Language::new(language), translation.into());
        FieldValue::Localized {
            base: base.into(),
            translations,
        }
    }

    /// Text as seen by a request in `language`. `None` for non-text values.
    pub fn resolve(&self, language: Option<&Language>) -> Option<&str> {
        match self {
            FieldValue::Integer(_) => None,
            FieldValue::Text(text) => Some(text),
            FieldValue::Localized { base, .. } => {
                Some(self.translation(language).unwrap_or(base.as_str()))
            }
        }
    }

    /// The base (default language) text. `None` for non-text values.
    pub fn base(&self) -> Option<&str> {
        match self {
            FieldValue::Integer(_) => None,
            FieldValue::Text(text) => Some(text),
            FieldValue::Localized { base, .. } => Some(base),
        }
    }

    /// The non-empty translation for `language`, if any.
    pub fn translation(&self, language: Option<&Language>) -> Option<&str> {
        let FieldValue::Localized { translations, .. } = self else {
            return None;
        };
        language
            .and_then(|lang| translations.get(lang))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn to_attr(&self, language: Option<&Language>) -> AttrValue {
        match self {
            FieldValue::Integer(value) => AttrValue::Int(*value),
            _ => AttrValue::Text(self.resolve(language).unwrap_or_default().to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub parent_id: PageId,
    pub name: FieldValue,
    #[serde(default)]
    pub template: String,
    /// Raw sort setting for this page's children, e.g. `title`, `-created`, `sort`.
    #[serde(default)]
    pub sortfield: String,
    #[serde(default = "default_published")]
    pub published: bool,
    /// Maintained by the store; not trusted from input.
    #[serde(default)]
    pub num_children: usize,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Page {
    pub fn new(id: impl Into<PageId>, parent_id: impl Into<PageId>, name: &str) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            name: FieldValue::text(name),
            template: String::new(),
            sortfield: String::new(),
            published: true,
            num_children: 0,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.template = template.to_string();
        self
    }

    pub fn with_sortfield(mut self, sortfield: &str) -> Self {
        self.sortfield = sortfield.to_string();
        self
    }

    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_name(mut self, name: FieldValue) -> Self {
        self.name = name;
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }

    /// The attribute this page's children are sorted by, or `None` for manual order.
    pub fn sortfield(&self) -> Option<&str> {
        resolve_sortfield(&self.sortfield)
    }

    pub fn has_children(&self) -> bool {
        self.num_children > 0
    }

    /// Look up a sortable value by name. `name` is a page property, not a field.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        match name {
            "name" => Some(&self.name),
            _ => self.fields.get(name),
        }
    }

    /// Get an attribute value by name, as seen by a request in `language`.
    ///
    /// Returns `None` if the page has no such property or field.
    ///
    /// | Name | Type | Description |
    /// |------|------|-------------|
    /// | `"id"` | `Int` | Page identifier |
    /// | `"parent_id"`, `"parent"` | `Int` | Parent identifier |
    /// | `"name"` | `Text` | Page name (localized) |
    /// | `"template"` | `Text` | Template name |
    /// | `"sortfield"` | `Text` | Raw child sort setting |
    /// | `"num_children"`, `"numChildren"` | `Int` | Direct child count |
    /// | any field name | `Int` / `Text` | Field value (localized) |
    pub fn get_attr(&self, name: &str, language: Option<&Language>) -> Option<AttrValue> {
        match name {
            "id" => Some(AttrValue::Int(self.id.0 as i64)),
            "parent_id" | "parent" => Some(AttrValue::Int(self.parent_id.0 as i64)),
            "template" => Some(AttrValue::Text(self.template.clone())),
            "sortfield" => Some(AttrValue::Text(self.sortfield.clone())),
            "num_children" | "numChildren" => Some(AttrValue::Int(self.num_children as i64)),
            _ => self.field(name).map(|value| value.to_attr(language)),
        }
    }
}

/// Strip the descending marker and drop manual ordering.
pub fn resolve_sortfield(raw: &str) -> Option<&str> {
    let field = raw.trim().trim_start_matches('-');
    if field.is_empty() || field == "sort" {
        None
    } else {
        Some(field)
    }
}
