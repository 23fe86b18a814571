//! # Storage Layer
//!
//! Jumplist does not own pages: the host's data store does. The [`PageStore`] trait is
//! the narrow read-only interface jumplist needs from it.
//!
//! ## Queries
//!
//! | Method | Used by | Host equivalent |
//! |--------|---------|-----------------|
//! | `get_page` | request resolution | load a page by id |
//! | `leading_chars` | prefix derivation | one `SUBSTRING(value, 1, 1)` query over the children |
//! | `count` | bucket counts, count override | count pages matching a selector |
//! | `find` | demo host listing | find pages matching a selector |
//!
//! `leading_chars` deliberately returns the raw leading characters of both the base
//! value and the request-language value. Deciding which one wins, case folding and
//! de-duplication are jumplist's job (see `commands::prefixes`), so every store agrees
//! on the result.
//!
//! ## Failures
//!
//! All methods are synchronous and return `Result`. Jumplist never retries: an error
//! from the store propagates to the host untouched. A missing page is not an error
//! (`Ok(None)`), since an unknown id in a request simply means "no filter".
//!
//! ## Implementations
//!
//! - [`memory::InMemoryPages`]: A page tree held in memory, with a query log.
//! - [`fs::load_pages`]: Loads an `InMemoryPages` from a JSON file.

use crate::error::Result;
use crate::model::{Language, Page, PageId};
use crate::selector::Selector;

pub mod fs;
pub mod memory;

/// Leading characters of one child's sort value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadingChars {
    /// First character of the base value, empty if the value is empty.
    pub base: String,
    /// First character of the request-language value; `None` without a request
    /// language, empty when there is no translation.
    pub localized: Option<String>,
}

impl LeadingChars {
    pub fn new(base: impl Into<String>, localized: Option<String>) -> Self {
        Self {
            base: base.into(),
            localized,
        }
    }

    /// The character this child contributes: the localized one when non-empty.
    pub fn resolved(&self) -> &str {
        match self.localized.as_deref() {
            Some(localized) if !localized.is_empty() => localized,
            _ => &self.base,
        }
    }
}

/// First character of `text` as a string, empty for empty text.
pub fn leading_char(text: &str) -> String {
    text.chars().next().map(String::from).unwrap_or_default()
}

/// Read-only access to the host's pages.
pub trait PageStore {
    /// Load a page by id.
    fn get_page(&self, id: PageId) -> Result<Option<Page>>;

    /// Leading characters of `field` for every direct child of `parent` that has
    /// a text value for it.
    fn leading_chars(
        &self,
        parent: PageId,
        field: &str,
        language: Option<&Language>,
    ) -> Result<Vec<LeadingChars>>;

    /// Number of pages matching `selector`.
    fn count(&self, selector: &Selector, language: Option<&Language>) -> Result<usize>;

    /// Pages matching `selector`, in id order.
    fn find(&self, selector: &Selector, language: Option<&Language>) -> Result<Vec<Page>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_char_wins_when_present() {
        assert_eq!(LeadingChars::new("Z", Some("É".into())).resolved(), "É");
    }

    #[test]
    fn base_char_used_without_translation() {
        assert_eq!(LeadingChars::new("Z", Some(String::new())).resolved(), "Z");
        assert_eq!(LeadingChars::new("Z", None).resolved(), "Z");
    }

    #[test]
    fn leading_char_handles_multibyte_and_empty() {
        assert_eq!(leading_char("Étoile"), "É");
        assert_eq!(leading_char(""), "");
    }
}
