use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{leading_char, LeadingChars, PageStore};
use crate::error::Result;
use crate::model::{Language, Page, PageId};
use crate::selector::Selector;

/// Number of queries served, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryLog {
    pub page_loads: usize,
    pub prefix_queries: usize,
    pub counts: usize,
    pub finds: usize,
}

impl QueryLog {
    pub fn total(&self) -> usize {
        self.page_loads + self.prefix_queries + self.counts + self.finds
    }
}

/// In-memory page tree.
///
/// Uses `RefCell` for the query log since requests are single-threaded; the
/// `PageStore` trait takes `&self` for every query.
#[derive(Debug, Default)]
pub struct InMemoryPages {
    pages: BTreeMap<PageId, Page>,
    log: RefCell<QueryLog>,
}

impl InMemoryPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a page, keeping `num_children` consistent.
    pub fn insert(&mut self, mut page: Page) {
        if let Some(old) = self.pages.remove(&page.id) {
            self.adjust_children(old.parent_id, -1);
        }
        page.num_children = self
            .pages
            .values()
            .filter(|p| p.parent_id == page.id)
            .count();
        let parent = page.parent_id;
        self.pages.insert(page.id, page);
        self.adjust_children(parent, 1);
    }

    fn adjust_children(&mut self, parent: PageId, delta: isize) {
        if let Some(parent) = self.pages.get_mut(&parent) {
            parent.num_children = parent.num_children.saturating_add_signed(delta);
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Queries served so far.
    pub fn query_log(&self) -> QueryLog {
        *self.log.borrow()
    }

    pub fn reset_query_log(&self) {
        *self.log.borrow_mut() = QueryLog::default();
    }

    fn children(&self, parent: PageId) -> impl Iterator<Item = &Page> {
        self.pages.values().filter(move |p| p.parent_id == parent)
    }

    fn candidates<'a>(&'a self, selector: &Selector) -> Box<dyn Iterator<Item = &'a Page> + 'a> {
        match selector.parent() {
            Some(parent) => Box::new(self.children(parent)),
            None => Box::new(self.pages.values()),
        }
    }
}

impl PageStore for InMemoryPages {
    fn get_page(&self, id: PageId) -> Result<Option<Page>> {
        self.log.borrow_mut().page_loads += 1;
        Ok(self.pages.get(&id).cloned())
    }

    fn leading_chars(
        &self,
        parent: PageId,
        field: &str,
        language: Option<&Language>,
    ) -> Result<Vec<LeadingChars>> {
        self.log.borrow_mut().prefix_queries += 1;
        let rows = self
            .children(parent)
            .filter_map(|child| child.field(field))
            .filter_map(|value| {
                let base = value.base()?;
                let localized =
                    language.map(|lang| leading_char(value.translation(Some(lang)).unwrap_or("")));
                Some(LeadingChars::new(leading_char(base), localized))
            })
            .collect();
        Ok(rows)
    }

    fn count(&self, selector: &Selector, language: Option<&Language>) -> Result<usize> {
        self.log.borrow_mut().counts += 1;
        Ok(self
            .candidates(selector)
            .filter(|p| selector.matches(p, language))
            .count())
    }

    fn find(&self, selector: &Selector, language: Option<&Language>) -> Result<Vec<Page>> {
        self.log.borrow_mut().finds += 1;
        Ok(self
            .candidates(selector)
            .filter(|p| selector.matches(p, language))
            .cloned()
            .collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::FieldValue;
    use crate::store::PageStore;

    pub struct PageTreeFixture {
        pub store: InMemoryPages,
        next_id: u64,
    }

    impl Default for PageTreeFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PageTreeFixture {
        pub fn new() -> Self {
            let mut store = InMemoryPages::new();
            store.insert(Page::new(1u64, 0u64, "home"));
            Self {
                store,
                next_id: 1000,
            }
        }

        /// A parent under the home page, sorting its children by `sortfield`.
        pub fn with_parent(mut self, id: u64, sortfield: &str) -> Self {
            let parent = Page::new(id, 1u64, &format!("parent-{id}"))
                .with_template("category")
                .with_sortfield(sortfield);
            self.store.insert(parent);
            self
        }

        /// A published child whose `title` field is `title`.
        pub fn with_titled_child(self, parent: u64, title: &str) -> Self {
            self.with_child(parent, "title", FieldValue::text(title))
        }

        pub fn with_child(mut self, parent: u64, field: &str, value: FieldValue) -> Self {
            let id = self.next_id();
            let child = Page::new(id, parent, &format!("child-{id}")).with_field(field, value);
            self.store.insert(child);
            self
        }

        pub fn with_unpublished_child(mut self, parent: u64, title: &str) -> Self {
            let id = self.next_id();
            let child = Page::new(id, parent, &format!("child-{id}"))
                .with_field("title", title)
                .unpublished();
            self.store.insert(child);
            self
        }

        pub fn page(&self, id: u64) -> Page {
            self.store
                .get_page(PageId(id))
                .unwrap()
                .expect("fixture page exists")
        }

        fn next_id(&mut self) -> u64 {
            self.next_id += 1;
            self.next_id
        }
    }
}
