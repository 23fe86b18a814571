//! # Extension Points
//!
//! The host's listing pipeline calls out at three fixed points while rendering one
//! level of the page tree. Jumplist implements all three on
//! [`crate::api::PageListRequest`]:
//!
//! | Point | Runs | Input | Output |
//! |-------|------|-------|--------|
//! | `after_get_selector` | after the host built its child query | parent, base selector | selector narrowed to the active bucket |
//! | `after_get_page_actions` | after the host built a page's actions | page, actions | actions with one filter action per bucket |
//! | `before_get_num_children` | before the host counts children | page | [`HookOutcome`] |
//!
//! "After" points receive the host's value and return it extended; they never drop or
//! reorder what the host put there. The "before" point may replace the host's
//! computation entirely or let it proceed.
//!
//! Hosts typically call them in this order for a parent that is being opened:
//!
//! ```text
//! before_get_num_children(parent)  ─► pagination total
//! after_get_selector(parent, base) ─► query for the visible children
//! after_get_page_actions(parent)   ─► action row under the parent
//! ```

use crate::commands::actions::PageAction;
use crate::error::Result;
use crate::model::Page;
use crate::selector::Selector;

/// Result of a "before" extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome<T> {
    /// Let the host compute the value itself.
    Proceed,
    /// Use this value instead.
    Replace(T),
}

impl<T> HookOutcome<T> {
    pub fn is_replace(&self) -> bool {
        matches!(self, HookOutcome::Replace(_))
    }

    /// The replacement, or the host's own value.
    pub fn unwrap_or_else(self, host: impl FnOnce() -> T) -> T {
        match self {
            HookOutcome::Proceed => host(),
            HookOutcome::Replace(value) => value,
        }
    }
}

impl<T> From<Option<T>> for HookOutcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => HookOutcome::Replace(value),
            None => HookOutcome::Proceed,
        }
    }
}

pub trait PageListHooks {
    fn after_get_selector(&mut self, parent: &Page, base: Selector) -> Result<Selector>;

    fn after_get_page_actions(
        &mut self,
        page: &Page,
        actions: Vec<PageAction>,
    ) -> Result<Vec<PageAction>>;

    fn before_get_num_children(&mut self, page: &Page) -> Result<HookOutcome<usize>>;
}
