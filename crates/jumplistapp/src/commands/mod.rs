//! # Command Layer
//!
//! This module contains the **core logic** of jumplist. Each step of the filter
//! pipeline lives in its own submodule as plain functions over a [`RequestScope`].
//!
//! ## Pipeline
//!
//! ```text
//! request ──► filters ──► matcher          (is filtering enabled for this parent?)
//!    │           └──────► prefixes         (which first letters exist?)
//!    │                    + store counts   (how many children per letter?)
//!    ▼
//! augment ──► extra `sortfield^=X` clause, overridden child count
//! actions ──► one PageAction per bucket
//! ```
//!
//! Every step consults the scope's [`FilterCache`] first and stores what it computed,
//! so asking twice within one request never queries the store twice.
//!
//! ## What Commands Do NOT Do
//!
//! - **Write anything**: the store is only read
//! - **Report invalid input**: a bad token or id degrades to "no filter"
//! - **Catch store errors**: they propagate to the caller as-is
//!
//! ## Command Modules
//!
//! - [`matcher`]: Which configured rule enables filtering for a parent
//! - [`prefixes`]: Distinct leading characters of the children's sort values
//! - [`filters`]: The ordered filter set with live counts
//! - [`request`]: Validation of the client's filter token
//! - [`augment`]: Listing selector and child count augmentation
//! - [`actions`]: Filter actions for the page list UI

use serde::{Deserialize, Serialize};

use crate::cache::FilterCache;
use crate::model::Language;
use crate::rules::{RuleEvaluator, SelectorRule};
use crate::store::PageStore;

pub mod actions;
pub mod augment;
pub mod filters;
pub mod matcher;
pub mod prefixes;
pub mod request;

/// Request parameters jumplist reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    /// Client-chosen bucket token (`filter=A`).
    pub filter: Option<String>,
    /// Target parent (`id=10`). Signed so that junk like `-1` can be rejected.
    pub id: Option<i64>,
    /// Language of the requesting user; `None` is the default language.
    pub language: Option<Language>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Read `filter` and `id` from a raw query string such as
    /// `id=10&render=JSON&start=0&filter=A`. A non-numeric id is treated as absent.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        {
            match key.as_ref() {
                "filter" => params.filter = Some(value.into_owned()),
                "id" => params.id = value.trim().parse().ok(),
                _ => {}
            }
        }
        params
    }
}

/// Everything one request's commands work with.
pub struct RequestScope<'a, S: PageStore, E: RuleEvaluator> {
    pub store: &'a S,
    pub evaluator: &'a E,
    pub rules: &'a [SelectorRule],
    pub params: RequestParams,
    pub cache: FilterCache,
}

impl<'a, S: PageStore, E: RuleEvaluator> RequestScope<'a, S, E> {
    pub fn new(
        store: &'a S,
        evaluator: &'a E,
        rules: &'a [SelectorRule],
        params: RequestParams,
    ) -> Self {
        Self {
            store,
            evaluator,
            rules,
            params,
            cache: FilterCache::new(),
        }
    }

    pub fn language(&self) -> Option<&Language> {
        self.params.language.as_ref()
    }
}
