//! # Request Cache
//!
//! Deriving buckets costs one prefix query plus one count per bucket, and the host asks
//! for the same parent's filters several times while rendering one response (action
//! list, child count, request validation). [`FilterCache`] memoizes each computation
//! per parent for the lifetime of one request.
//!
//! ## Lifecycle
//!
//! A cache is created empty with each [`crate::api::PageListRequest`] and dropped with
//! it. Nothing is invalidated and nothing is shared between requests, so there is no
//! staleness to manage and no locking: the next request recomputes everything.
//!
//! ## Keys
//!
//! Entries are keyed by `(PageId, Computation)`. The resolved request filter belongs to
//! the request rather than to a parent and lives in the singleton slot
//! `(PageId::NONE, Computation::RequestFilter)`.

use std::collections::{BTreeSet, HashMap};

use crate::commands::filters::FilterSet;
use crate::commands::request::RequestFilter;
use crate::model::PageId;
use crate::rules::SelectorRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Computation {
    Prefixes,
    Filters,
    Selector,
    RequestFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
    Prefixes(BTreeSet<String>),
    Filters(FilterSet),
    /// The winning rule, or `None` when no rule matched.
    Selector(Option<SelectorRule>),
    RequestFilter(RequestFilter),
}

impl Cached {
    pub fn computation(&self) -> Computation {
        match self {
            Cached::Prefixes(_) => Computation::Prefixes,
            Cached::Filters(_) => Computation::Filters,
            Cached::Selector(_) => Computation::Selector,
            Cached::RequestFilter(_) => Computation::RequestFilter,
        }
    }
}

#[derive(Debug, Default)]
pub struct FilterCache {
    entries: HashMap<(PageId, Computation), Cached>,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page: PageId, computation: Computation) -> Option<&Cached> {
        self.entries.get(&(page, computation))
    }

    /// Store a value under the computation it belongs to.
    pub fn set(&mut self, page: PageId, value: Cached) {
        self.entries.insert((page, value.computation()), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn prefixes(&self, page: PageId) -> Option<&BTreeSet<String>> {
        match self.get(page, Computation::Prefixes) {
            Some(Cached::Prefixes(prefixes)) => Some(prefixes),
            _ => None,
        }
    }

    pub fn filters(&self, page: PageId) -> Option<&FilterSet> {
        match self.get(page, Computation::Filters) {
            Some(Cached::Filters(filters)) => Some(filters),
            _ => None,
        }
    }

    /// `Some(None)` records that no rule matched `page`.
    pub fn selector(&self, page: PageId) -> Option<Option<&SelectorRule>> {
        match self.get(page, Computation::Selector) {
            Some(Cached::Selector(rule)) => Some(rule.as_ref()),
            _ => None,
        }
    }

    pub fn request_filter(&self) -> Option<&RequestFilter> {
        match self.get(PageId::NONE, Computation::RequestFilter) {
            Some(Cached::RequestFilter(filter)) => Some(filter),
            _ => None,
        }
    }

    pub fn set_request_filter(&mut self, filter: RequestFilter) {
        self.set(PageId::NONE, Cached::RequestFilter(filter));
    }
}
