use serde::Serialize;
use std::fmt;

use crate::commands::filters::{self, ALL_PREFIX, WILDCARD};
use crate::commands::prefixes;
use crate::commands::RequestScope;
use crate::error::Result;
use crate::model::{Page, PageId};
use crate::rules::RuleEvaluator;
use crate::store::PageStore;

/// The validated filter token for the current request; empty when none is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestFilter(String);

impl RequestFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the filter actually narrows a listing. `All` and `*` mean "everything".
    pub fn is_narrowing(&self) -> bool {
        !self.0.is_empty() && self.0 != ALL_PREFIX && self.0 != WILDCARD
    }
}

impl fmt::Display for RequestFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token is a single alphanumeric character.
pub fn is_valid_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphanumeric())
}

/// Resolve the request's filter token, at most once per request.
///
/// The token is checked against the filter set of `explicit_parent`, or of the page
/// named by the request's `id` parameter. Every validation failure yields
/// [`RequestFilter::none`]; only store errors are returned as errors.
pub fn run<S: PageStore, E: RuleEvaluator>(
    scope: &mut RequestScope<'_, S, E>,
    explicit_parent: Option<&Page>,
) -> Result<RequestFilter> {
    if let Some(cached) = scope.cache.request_filter() {
        return Ok(cached.clone());
    }

    let filter = resolve(scope, explicit_parent)?;
    tracing::debug!(
        token = scope.params.filter.as_deref().unwrap_or(""),
        resolved = filter.as_str(),
        "resolved request filter"
    );
    scope.cache.set_request_filter(filter.clone());
    Ok(filter)
}

fn resolve<S: PageStore, E: RuleEvaluator>(
    scope: &mut RequestScope<'_, S, E>,
    explicit_parent: Option<&Page>,
) -> Result<RequestFilter> {
    let Some(token) = scope.params.filter.clone() else {
        return Ok(RequestFilter::none());
    };
    if !is_valid_token(&token) {
        return Ok(RequestFilter::none());
    }

    let loaded: Page;
    let parent = match explicit_parent {
        Some(parent) => parent,
        None => {
            let Some(id) = scope.params.id.and_then(|id| u64::try_from(id).ok()) else {
                return Ok(RequestFilter::none());
            };
            if id == 0 {
                return Ok(RequestFilter::none());
            }
            match scope.store.get_page(PageId(id))? {
                Some(page) => {
                    loaded = page;
                    &loaded
                }
                None => return Ok(RequestFilter::none()),
            }
        }
    };

    let normalized = prefixes::fold_case(&token);
    let filters = filters::run(scope, parent)?;
    if filters.contains(&normalized) {
        Ok(RequestFilter(normalized))
    } else {
        Ok(RequestFilter::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{rules, scope};
    use crate::commands::RequestParams;
    use crate::store::memory::fixtures::PageTreeFixture;

    fn fruits() -> PageTreeFixture {
        PageTreeFixture::new()
            .with_parent(10, "title")
            .with_titled_child(10, "Apple")
            .with_titled_child(10, "apple")
            .with_titled_child(10, "Banana")
            .with_titled_child(10, "7 Up")
    }

    fn resolve_with(params: RequestParams) -> RequestFilter {
        let fixture = fruits();
        let rules = rules("id=10");
        let mut scope = scope(&fixture.store, &rules, params);
        run(&mut scope, None).unwrap()
    }

    #[test]
    fn token_validation() {
        assert!(is_valid_token("A"));
        assert!(is_valid_token("7"));
        assert!(is_valid_token("é"));
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("AB"));
        assert!(!is_valid_token("*"));
        assert!(!is_valid_token("-"));
        assert!(!is_valid_token("All"));
    }

    #[test]
    fn valid_token_resolves_case_insensitively() {
        let filter = resolve_with(RequestParams::new().with_filter("a").with_id(10));
        assert_eq!(filter.as_str(), "A");
        assert!(filter.is_narrowing());
    }

    #[test]
    fn digit_bucket_resolves() {
        let filter = resolve_with(RequestParams::new().with_filter("7").with_id(10));
        assert_eq!(filter.as_str(), "7");
    }

    #[test]
    fn sharp_s_bucket_is_selectable() {
        let fixture = PageTreeFixture::new()
            .with_parent(10, "title")
            .with_titled_child(10, "ßeta")
            .with_titled_child(10, "Ssang");
        let rules = rules("id=10");
        let params = RequestParams::new().with_filter("ß").with_id(10);
        let mut scope = scope(&fixture.store, &rules, params);

        let filter = run(&mut scope, None).unwrap();
        assert_eq!(filter.as_str(), "ß");
        assert!(filter.is_narrowing());
    }

    #[test]
    fn unknown_bucket_is_none() {
        let filter = resolve_with(RequestParams::new().with_filter("5").with_id(10));
        assert_eq!(filter, RequestFilter::none());
    }

    #[test]
    fn missing_or_non_positive_id_is_none() {
        for params in [
            RequestParams::new().with_filter("A"),
            RequestParams::new().with_filter("A").with_id(0),
            RequestParams::new().with_filter("A").with_id(-10),
        ] {
            assert!(resolve_with(params).is_empty());
        }
    }

    #[test]
    fn unknown_page_is_none() {
        let filter = resolve_with(RequestParams::new().with_filter("A").with_id(4242));
        assert!(filter.is_empty());
    }

    #[test]
    fn missing_token_is_none() {
        assert!(resolve_with(RequestParams::new().with_id(10)).is_empty());
    }

    #[test]
    fn explicit_parent_skips_id_lookup() {
        let fixture = fruits();
        let rules = rules("id=10");
        let mut scope = scope(&fixture.store, &rules, RequestParams::new().with_filter("b"));
        let parent = fixture.page(10);
        fixture.store.reset_query_log();

        let filter = run(&mut scope, Some(&parent)).unwrap();
        assert_eq!(filter.as_str(), "B");
        assert_eq!(fixture.store.query_log().page_loads, 0);
    }

    #[test]
    fn resolved_once_per_request() {
        let fixture = fruits();
        let rules = rules("id=10");
        let params = RequestParams::new().with_filter("a").with_id(10);
        let mut scope = scope(&fixture.store, &rules, params);

        let first = run(&mut scope, None).unwrap();
        let queries = fixture.store.query_log();
        let other_parent = fixture.page(1);
        let second = run(&mut scope, Some(&other_parent)).unwrap();

        assert_eq!(first, second);
        assert_eq!(fixture.store.query_log().total(), queries.total() + 1);
    }

    #[test]
    fn all_and_wildcard_do_not_narrow() {
        assert!(!RequestFilter(ALL_PREFIX.into()).is_narrowing());
        assert!(!RequestFilter(WILDCARD.into()).is_narrowing());
        assert!(!RequestFilter::none().is_narrowing());
    }
}
