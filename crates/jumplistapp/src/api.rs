//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point a host uses, whatever its listing UI looks like.
//!
//! ## Two Lifetimes
//!
//! - [`PageListFilter`] is long-lived. It owns the store handle, the rule evaluator
//!   and the parsed rules, and nothing that changes between requests.
//! - [`PageListRequest`] lives for one inbound listing request. It owns the
//!   request's parameters and its [`FilterCache`], and implements
//!   [`PageListHooks`] for the host to call.
//!
//! ```text
//! let filter = PageListFilter::new(store, &config);
//! // per request:
//! let mut request = filter.request(RequestParams::from_query(query));
//! let total = request.before_get_num_children(&parent)?.unwrap_or_else(|| parent.num_children);
//! let selector = request.after_get_selector(&parent, base)?;
//! let actions = request.after_get_page_actions(&parent, actions)?;
//! ```
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Execute listings**: the host runs the returned selector itself
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over PageStore
//!
//! `PageListFilter<S: PageStore, E: RuleEvaluator>` is generic over the host's data
//! store and its rule evaluator:
//! - Tests and the demo host: `PageListFilter<InMemoryPages>`
//! - Embedding hosts: their own `PageStore`, optionally their own `RuleEvaluator`

use std::collections::BTreeSet;

use crate::cache::FilterCache;
use crate::commands::actions::{self, PageAction};
use crate::commands::filters::{self, FilterSet};
use crate::commands::request::{self, RequestFilter};
use crate::commands::{augment, matcher, prefixes, RequestParams, RequestScope};
use crate::config::FilterConfig;
use crate::error::Result;
use crate::hooks::{HookOutcome, PageListHooks};
use crate::model::Page;
use crate::rules::{RuleEvaluator, SelectorEvaluator, SelectorRule};
use crate::selector::Selector;
use crate::store::PageStore;

/// The main API facade for jumplist.
pub struct PageListFilter<S: PageStore, E: RuleEvaluator = SelectorEvaluator> {
    store: S,
    evaluator: E,
    rules: Vec<SelectorRule>,
}

impl<S: PageStore> PageListFilter<S, SelectorEvaluator> {
    pub fn new(store: S, config: &FilterConfig) -> Self {
        Self::with_evaluator(store, SelectorEvaluator, config)
    }
}

impl<S: PageStore, E: RuleEvaluator> PageListFilter<S, E> {
    pub fn with_evaluator(store: S, evaluator: E, config: &FilterConfig) -> Self {
        let rules = config.rules();
        tracing::debug!(rules = rules.len(), "page list filter ready");
        Self {
            store,
            evaluator,
            rules,
        }
    }

    pub fn rules(&self) -> &[SelectorRule] {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether any rule is configured at all.
    pub fn is_enabled(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Start handling one inbound listing request.
    pub fn request(&self, params: RequestParams) -> PageListRequest<'_, S, E> {
        PageListRequest {
            scope: RequestScope::new(&self.store, &self.evaluator, &self.rules, params),
        }
    }
}

/// One listing request. Everything computed here is dropped with it.
pub struct PageListRequest<'a, S: PageStore, E: RuleEvaluator> {
    scope: RequestScope<'a, S, E>,
}

impl<'a, S: PageStore, E: RuleEvaluator> PageListRequest<'a, S, E> {
    pub fn params(&self) -> &RequestParams {
        &self.scope.params
    }

    pub fn cache(&self) -> &FilterCache {
        &self.scope.cache
    }

    /// The first rule enabling filters for `page`, if any.
    pub fn matching_rule(&mut self, page: &Page) -> Result<Option<SelectorRule>> {
        matcher::run(&mut self.scope, page)
    }

    pub fn prefixes(&mut self, page: &Page) -> Result<BTreeSet<String>> {
        prefixes::run(&mut self.scope, page, None)
    }

    pub fn filters(&mut self, page: &Page) -> Result<FilterSet> {
        filters::run(&mut self.scope, page)
    }

    /// The request's validated filter, checked against the parent named by `id`.
    pub fn request_filter(&mut self) -> Result<RequestFilter> {
        request::run(&mut self.scope, None)
    }

    /// Like [`Self::request_filter`], but checked against `parent` if this is the
    /// first time the filter is resolved in this request.
    pub fn request_filter_for(&mut self, parent: &Page) -> Result<RequestFilter> {
        request::run(&mut self.scope, Some(parent))
    }

    pub fn filter_actions(&mut self, page: &Page) -> Result<Vec<PageAction>> {
        let mut list = Vec::new();
        actions::run(&mut self.scope, page, &mut list)?;
        Ok(list)
    }
}

impl<'a, S: PageStore, E: RuleEvaluator> PageListHooks for PageListRequest<'a, S, E> {
    fn after_get_selector(&mut self, parent: &Page, base: Selector) -> Result<Selector> {
        augment::selector(&mut self.scope, parent, base)
    }

    fn after_get_page_actions(
        &mut self,
        page: &Page,
        mut list: Vec<PageAction>,
    ) -> Result<Vec<PageAction>> {
        actions::run(&mut self.scope, page, &mut list)?;
        Ok(list)
    }

    fn before_get_num_children(&mut self, page: &Page) -> Result<HookOutcome<usize>> {
        if matcher::run(&mut self.scope, page)?.is_none() {
            return Ok(HookOutcome::Proceed);
        }
        let count = augment::num_children(&mut self.scope, page)?;
        Ok(HookOutcome::Replace(count))
    }
}
