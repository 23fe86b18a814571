//! Filter actions for the page list.
//!
//! The page list shows a row of actions under each open parent (edit, view, new...).
//! For a parent with filters, one action is appended per bucket. Clicking one makes
//! the client re-request the parent's children with the bucket attached:
//!
//! ```text
//! ./?id=10&render=JSON&start=0&filter=A
//! ```
//!
//! `render=JSON` marks the request as a data refresh rather than a page load; the
//! client uses it, together with the parent id, to find the one pending refresh the
//! token belongs to.

use serde::Serialize;

use crate::commands::{filters, RequestScope};
use crate::error::Result;
use crate::model::{Page, PageId};
use crate::rules::RuleEvaluator;
use crate::store::PageStore;

/// Icon shown instead of the `All` label.
pub const ALL_ICON: &str = "sort-alpha-asc";

/// Query parameter marking a data refresh.
pub const RENDER_PARAM: (&str, &str) = ("render", "JSON");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageAction {
    pub identifier: String,
    /// CSS classes for the action's list item.
    pub class: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub url: String,
}

impl PageAction {
    pub fn new(identifier: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            class: String::new(),
            label: label.into(),
            icon: None,
            url: url.into(),
        }
    }

    /// The action selecting `entry`'s bucket under `parent`.
    pub fn for_filter(parent: PageId, entry: &filters::FilterEntry) -> Self {
        let prefix = &entry.prefix;
        Self {
            identifier: format!("filter-{prefix}"),
            class: format!("Filter Filter{prefix}"),
            label: prefix.clone(),
            icon: entry.is_all().then(|| ALL_ICON.to_string()),
            url: filter_url(parent, prefix),
        }
    }

    pub fn is_filter(&self) -> bool {
        self.identifier.starts_with("filter-")
    }
}

/// URL refreshing `parent`'s children narrowed to `prefix`.
pub fn filter_url(parent: PageId, prefix: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("id", &parent.to_string())
        .append_pair(RENDER_PARAM.0, RENDER_PARAM.1)
        .append_pair("start", "0")
        .append_pair("filter", prefix)
        .finish();
    format!("./?{query}")
}

/// Append `page`'s filter actions to `actions`. Returns how many were added.
pub fn run<S: PageStore, E: RuleEvaluator>(
    scope: &mut RequestScope<'_, S, E>,
    page: &Page,
    actions: &mut Vec<PageAction>,
) -> Result<usize> {
    let filters = filters::run(scope, page)?;
    actions.extend(filters.iter().map(|entry| PageAction::for_filter(page.id, entry)));
    Ok(filters.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{rules, scope};
    use crate::commands::RequestParams;
    use crate::store::memory::fixtures::PageTreeFixture;

    #[test]
    fn filter_url_encodes_prefix() {
        assert_eq!(
            filter_url(PageId(10), "A"),
            "./?id=10&render=JSON&start=0&filter=A"
        );
        assert_eq!(
            filter_url(PageId(10), "É"),
            "./?id=10&render=JSON&start=0&filter=%C3%89"
        );
    }

    #[test]
    fn all_action_carries_icon() {
        let entry = filters::FilterEntry {
            prefix: "All".into(),
            count: 1,
        };
        let action = PageAction::for_filter(PageId(10), &entry);

        assert_eq!(action.identifier, "filter-All");
        assert_eq!(action.class, "Filter FilterAll");
        assert_eq!(action.icon.as_deref(), Some(ALL_ICON));
        assert!(action.is_filter());
    }

    #[test]
    fn appends_after_existing_actions() {
        let fixture = PageTreeFixture::new()
            .with_parent(10, "title")
            .with_titled_child(10, "Apple")
            .with_titled_child(10, "Banana");
        let rules = rules("id=10");
        let mut scope = scope(&fixture.store, &rules, RequestParams::new());
        let mut actions = vec![PageAction::new("edit", "Edit", "./edit/?id=10")];

        let added = run(&mut scope, &fixture.page(10), &mut actions).unwrap();

        assert_eq!(added, 3);
        let ids: Vec<&str> = actions.iter().map(|a| a.identifier.as_str()).collect();
        assert_eq!(ids, vec!["edit", "filter-All", "filter-A", "filter-B"]);
        assert_eq!(actions[2].label, "A");
        assert_eq!(actions[2].icon, None);
    }

    #[test]
    fn no_filters_leaves_actions_alone() {
        let fixture = PageTreeFixture::new()
            .with_parent(10, "title")
            .with_titled_child(10, "Apple");
        let rules = rules("");
        let mut scope = scope(&fixture.store, &rules, RequestParams::new());
        let mut actions = vec![PageAction::new("edit", "Edit", "./edit/?id=10")];

        assert_eq!(run(&mut scope, &fixture.page(10), &mut actions).unwrap(), 0);
        assert_eq!(actions.len(), 1);
    }
}
