//! Filter sets: the buckets offered for one parent.
//!
//! A [`FilterSet`] is either empty (no filters for this parent) or fully formed:
//!
//! ```text
//! All:1, A:2, B:1, É:1
//! ```
//!
//! - `All` comes first and its count is a presence flag, always 1.
//! - Real buckets follow in ascending order, each with the live number of children
//!   whose sort value starts with it. A bucket counting zero is dropped.
//! - If no real bucket survives, the set is empty; `All` never stands alone.

use serde::Serialize;

use crate::attributes::AttrFilter;
use crate::cache::Cached;
use crate::commands::{matcher, prefixes, RequestScope};
use crate::error::Result;
use crate::model::{Page, PageId};
use crate::rules::RuleEvaluator;
use crate::selector::Selector;
use crate::store::PageStore;

/// Sentinel bucket meaning "show every child".
pub const ALL_PREFIX: &str = "All";

/// Token some clients send for "show every child"; never narrows.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterEntry {
    pub prefix: String,
    pub count: usize,
}

impl FilterEntry {
    pub fn is_all(&self) -> bool {
        self.prefix == ALL_PREFIX
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterSet {
    entries: Vec<FilterEntry>,
}

impl FilterSet {
    /// Assemble from `(prefix, count)` buckets in ascending prefix order.
    ///
    /// Zero counts are dropped and `All` is prepended only if something remains.
    pub fn from_buckets(buckets: impl IntoIterator<Item = (String, usize)>) -> Self {
        let buckets: Vec<FilterEntry> = buckets
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(prefix, count)| FilterEntry { prefix, count })
            .collect();
        if buckets.is_empty() {
            return Self::default();
        }

        let mut entries = Vec::with_capacity(buckets.len() + 1);
        entries.push(FilterEntry {
            prefix: ALL_PREFIX.to_string(),
            count: 1,
        });
        entries.extend(buckets);
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, prefix: &str) -> Option<&FilterEntry> {
        self.entries.iter().find(|e| e.prefix == prefix)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.get(prefix).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.prefix.as_str())
    }

    pub fn first(&self) -> Option<&FilterEntry> {
        self.entries.first()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterEntry;
    type IntoIter = std::slice::Iter<'a, FilterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Selector counting children of `parent` whose `sortfield` starts with `prefix`.
///
/// Unpublished children are included so counts agree with prefix derivation, which
/// sees every child.
pub fn bucket_selector(parent: PageId, sortfield: &str, prefix: &str) -> Selector {
    Selector::children_of(parent)
        .and(AttrFilter::starts_with(sortfield, prefix))
        .include_unpublished()
}

/// Build the filter set for `page`, memoized for the request.
pub fn run<S: PageStore, E: RuleEvaluator>(
    scope: &mut RequestScope<'_, S, E>,
    page: &Page,
) -> Result<FilterSet> {
    let Some(sortfield) = page.sortfield() else {
        return Ok(FilterSet::default());
    };
    if let Some(cached) = scope.cache.filters(page.id) {
        tracing::trace!(page = %page.id, "filter cache hit");
        return Ok(cached.clone());
    }
    if matcher::run(scope, page)?.is_none() {
        return Ok(FilterSet::default());
    }

    let mut buckets = Vec::new();
    if page.has_children() {
        for prefix in prefixes::run(scope, page, Some(sortfield))? {
            let selector = bucket_selector(page.id, sortfield, &prefix);
            let count = scope.store.count(&selector, scope.language())?;
            buckets.push((prefix, count));
        }
    }

    let filters = FilterSet::from_buckets(buckets);
    tracing::debug!(page = %page.id, buckets = filters.len(), "built filter set");
    scope.cache.set(page.id, Cached::Filters(filters.clone()));
    Ok(filters)
}
