//! Shaping the host's listing for the active request filter.
//!
//! Both functions only build a selector or pick a number; the host's own query
//! layer executes the listing afterwards.

use crate::attributes::AttrFilter;
use crate::commands::filters::bucket_selector;
use crate::commands::{request, RequestScope};
use crate::error::Result;
use crate::model::Page;
use crate::rules::RuleEvaluator;
use crate::selector::Selector;
use crate::store::PageStore;

/// Number of children the host should report for `page`.
///
/// With a narrowing request filter this is the number of children in that bucket;
/// otherwise the page's own child count.
pub fn num_children<S: PageStore, E: RuleEvaluator>(
    scope: &mut RequestScope<'_, S, E>,
    page: &Page,
) -> Result<usize> {
    let filter = request::run(scope, None)?;
    if !filter.is_narrowing() {
        return Ok(page.num_children);
    }
    let Some(sortfield) = page.sortfield() else {
        return Ok(page.num_children);
    };
    let selector = bucket_selector(page.id, sortfield, filter.as_str());
    scope.store.count(&selector, scope.language())
}

/// The listing selector for `page`'s children, narrowed to the request's bucket.
pub fn selector<S: PageStore, E: RuleEvaluator>(
    scope: &mut RequestScope<'_, S, E>,
    page: &Page,
    base: Selector,
) -> Result<Selector> {
    let filter = request::run(scope, None)?;
    if !filter.is_narrowing() {
        return Ok(base);
    }
    match page.sortfield() {
        Some(sortfield) => Ok(base.and(AttrFilter::starts_with(sortfield, filter.as_str()))),
        None => Ok(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{rules, scope};
    use crate::commands::RequestParams;
    use crate::model::PageId;
    use crate::store::memory::fixtures::PageTreeFixture;

    fn fruits() -> PageTreeFixture {
        PageTreeFixture::new()
            .with_parent(10, "-title")
            .with_titled_child(10, "Apple")
            .with_titled_child(10, "apple")
            .with_titled_child(10, "Banana")
    }

    #[test]
    fn count_is_narrowed_to_bucket() {
        let fixture = fruits();
        let rules = rules("id=10");
        let params = RequestParams::new().with_filter("A").with_id(10);
        let mut scope = scope(&fixture.store, &rules, params);

        assert_eq!(num_children(&mut scope, &fixture.page(10)).unwrap(), 2);
    }

    #[test]
    fn count_passes_through_without_filter() {
        let fixture = fruits();
        let rules = rules("id=10");
        let mut scope = scope(&fixture.store, &rules, RequestParams::new().with_id(10));

        assert_eq!(num_children(&mut scope, &fixture.page(10)).unwrap(), 3);
    }

    #[test]
    fn count_passes_through_for_manual_sort() {
        let fixture = fruits().with_parent(20, "sort").with_titled_child(20, "Avocado");
        let rules = rules("id=10\nid=20");
        let params = RequestParams::new().with_filter("A").with_id(10);
        let mut scope = scope(&fixture.store, &rules, params);

        assert_eq!(num_children(&mut scope, &fixture.page(20)).unwrap(), 1);
    }

    #[test]
    fn selector_gains_starts_with_clause() {
        let fixture = fruits();
        let rules = rules("id=10");
        let params = RequestParams::new().with_filter("b").with_id(10);
        let mut scope = scope(&fixture.store, &rules, params);

        let base = Selector::children_of(PageId(10));
        let augmented = selector(&mut scope, &fixture.page(10), base).unwrap();
        assert_eq!(augmented.to_string(), "parent_id=10, title^=B");
    }

    #[test]
    fn selector_unchanged_for_invalid_filter() {
        let fixture = fruits();
        let rules = rules("id=10");
        let params = RequestParams::new().with_filter("Z").with_id(10);
        let mut scope = scope(&fixture.store, &rules, params);

        let base = Selector::children_of(PageId(10));
        let augmented = selector(&mut scope, &fixture.page(10), base.clone()).unwrap();
        assert_eq!(augmented, base);
    }
}
