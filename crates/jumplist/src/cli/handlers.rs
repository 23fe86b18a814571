//! Command handlers for the jumplist CLI.
//!
//! Each handler plays one part of a host: it opens a request on the shared
//! [`PageListFilter`], calls the extension points a listing UI would call, and hands
//! the results to `render`.

use anyhow::{Context, Result};
use std::cmp::Ordering;

use jumplistapp::api::PageListFilter;
use jumplistapp::attributes::AttrValue;
use jumplistapp::commands::RequestParams;
use jumplistapp::error::JumplistError;
use jumplistapp::hooks::PageListHooks;
use jumplistapp::model::{Language, Page, PageId};
use jumplistapp::rules::SelectorRule;
use jumplistapp::selector::Selector;
use jumplistapp::store::memory::InMemoryPages;
use jumplistapp::store::PageStore;

use super::render::{self, ChildRow, ListingView, RuleRow};
use super::setup::OutputFormat;

pub struct AppState {
    pub api: PageListFilter<InMemoryPages>,
    pub language: Option<Language>,
    pub output: OutputFormat,
}

impl AppState {
    fn params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        params.language = self.language.clone();
        params
    }

    fn page(&self, id: u64) -> Result<Page> {
        self.api
            .store()
            .get_page(PageId(id))?
            .ok_or(JumplistError::PageNotFound(PageId(id)))
            .with_context(|| format!("cannot open page {id}"))
    }
}

pub fn filters(state: &AppState, id: u64) -> Result<String> {
    let parent = state.page(id)?;
    let filters = state.api.request(state.params()).filters(&parent)?;
    Ok(render::filters(id, &filters, state.output)?)
}

pub fn actions(state: &AppState, id: u64) -> Result<String> {
    let parent = state.page(id)?;
    let actions = state
        .api
        .request(state.params())
        .after_get_page_actions(&parent, Vec::new())?;
    Ok(render::actions(id, &actions, state.output)?)
}

/// Render one level of the tree the way a host listing would.
///
/// The request carries `id` and `filter` exactly as a client refresh would send them.
/// Like an admin tree, the listing shows unpublished children too, so its rows agree
/// with the reported total.
pub fn list(state: &AppState, id: u64, filter: Option<String>) -> Result<String> {
    let parent = state.page(id)?;
    let mut params = state.params().with_id(i64::try_from(id)?);
    params.filter = filter;
    let mut request = state.api.request(params);

    let outcome = request.before_get_num_children(&parent)?;
    let total_replaced = outcome.is_replace();
    let total = outcome.unwrap_or_else(|| parent.num_children);
    let base = Selector::children_of(parent.id).include_unpublished();
    let selector = request.after_get_selector(&parent, base)?;
    let actions = request.after_get_page_actions(&parent, Vec::new())?;
    let resolved = request.request_filter()?;

    let language = state.language.as_ref();
    let mut children = state.api.store().find(&selector, language)?;
    sort_children(&mut children, &parent, language);

    let view = ListingView {
        parent: id,
        filter: resolved.to_string(),
        selector: selector.to_string(),
        total,
        total_replaced,
        children: children
            .iter()
            .map(|child| ChildRow {
                id: child.id.get(),
                label: label(child, language),
                sort_value: parent
                    .sortfield()
                    .and_then(|field| child.get_attr(field, language))
                    .map(|value| value.to_selector_text()),
            })
            .collect(),
        actions,
    };
    Ok(render::listing(&view, state.output)?)
}

pub fn rules(state: &AppState) -> Result<String> {
    let rows: Vec<RuleRow> = state
        .api
        .rules()
        .iter()
        .map(|rule| {
            let error = rule.validate().err().map(|e| e.to_string());
            RuleRow {
                kind: match rule {
                    SelectorRule::ExactId(_) => "exact_id",
                    SelectorRule::Expression(_) => "expression",
                },
                rule: rule.to_string(),
                valid: error.is_none(),
                error,
            }
        })
        .collect();
    Ok(render::rules(&rows, state.output)?)
}

/// A page's `title` if it has one, else its name.
fn label(page: &Page, language: Option<&Language>) -> String {
    page.field("title")
        .and_then(|title| title.resolve(language))
        .filter(|title| !title.is_empty())
        .or_else(|| page.name.resolve(language))
        .unwrap_or_default()
        .to_string()
}

/// Order children by the parent's sort setting; manual order keeps id order.
fn sort_children(children: &mut [Page], parent: &Page, language: Option<&Language>) {
    let Some(field) = parent.sortfield() else {
        return;
    };
    let descending = parent.sortfield.trim_start().starts_with('-');
    children.sort_by(|a, b| {
        let ord = compare_values(
            a.get_attr(field, language).as_ref(),
            b.get_attr(field, language).as_ref(),
        );
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

fn compare_values(a: Option<&AttrValue>, b: Option<&AttrValue>) -> Ordering {
    match (a, b) {
        (Some(AttrValue::Int(a)), Some(AttrValue::Int(b))) => a.cmp(b),
        (Some(a), Some(b)) => a
            .to_selector_text()
            .to_lowercase()
            .cmp(&b.to_selector_text().to_lowercase()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
