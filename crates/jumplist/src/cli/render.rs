//! # Rendering Module
//!
//! Handlers build plain view structs; this module turns them into text or JSON.
//!
//! ## Table Layout
//!
//! Text output is a header line followed by aligned rows. Column widths are computed
//! per table from the display width of the widest cell (`unicode-width`), so accented
//! buckets like `É` line up with ASCII ones.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use jumplistapp::commands::actions::PageAction;
use jumplistapp::commands::filters::FilterSet;

use super::setup::OutputFormat;
use super::styles;

/// Gap between columns.
const GUTTER: usize = 2;

#[derive(Debug, Serialize)]
pub struct ChildRow {
    pub id: u64,
    pub label: String,
    /// Sort value the listing was ordered by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListingView {
    pub parent: u64,
    /// Validated request filter; empty when none is active.
    pub filter: String,
    pub selector: String,
    /// Child count reported to the host's pagination.
    pub total: usize,
    /// True if the filter engine replaced the host's own count.
    pub total_replaced: bool,
    pub children: Vec<ChildRow>,
    pub actions: Vec<PageAction>,
}

#[derive(Debug, Serialize)]
pub struct RuleRow {
    pub kind: &'static str,
    pub rule: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill + GUTTER))
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(UnicodeWidthStr::width).max().unwrap_or(0)
}

pub fn filters(parent: u64, filters: &FilterSet, format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return to_json(filters);
    }
    if filters.is_empty() {
        return Ok(format!("No filters for page {parent}"));
    }

    let width = column_width(filters.keys());
    let mut out = vec![styles::title()
        .apply_to(format!("Filters for page {parent}"))
        .to_string()];
    for entry in filters {
        let count = if entry.is_all() {
            String::new()
        } else {
            entry.count.to_string()
        };
        out.push(format!(
            "  {}{}",
            styles::prefix().apply_to(pad(&entry.prefix, width)),
            styles::muted().apply_to(count)
        ));
    }
    Ok(out.join("\n"))
}

pub fn actions(parent: u64, actions: &[PageAction], format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return to_json(actions);
    }
    if actions.is_empty() {
        return Ok(format!("No filter actions for page {parent}"));
    }

    let id_width = column_width(actions.iter().map(|a| a.identifier.as_str()));
    let label_width = column_width(actions.iter().map(|a| a.label.as_str()));
    let mut out = vec![styles::title()
        .apply_to(format!("Actions for page {parent}"))
        .to_string()];
    for action in actions {
        out.push(format!(
            "  {}{}{}",
            pad(&action.identifier, id_width),
            styles::prefix().apply_to(pad(&action.label, label_width)),
            styles::muted().apply_to(&action.url)
        ));
    }
    Ok(out.join("\n"))
}

pub fn listing(view: &ListingView, format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return to_json(view);
    }

    let filter = if view.filter.is_empty() {
        styles::muted().apply_to("none".to_string())
    } else {
        styles::highlight().apply_to(format!(" {} ", view.filter))
    };
    let mut out = vec![
        styles::title()
            .apply_to(format!("Children of page {}", view.parent))
            .to_string(),
        format!("  filter:   {filter}"),
        format!("  selector: {}", styles::muted().apply_to(&view.selector)),
        format!("  total:    {}", view.total),
    ];
    if !view.actions.is_empty() {
        let labels: Vec<String> = view
            .actions
            .iter()
            .map(|a| styles::prefix().apply_to(&a.label).to_string())
            .collect();
        out.push(format!("  jump to:  {}", labels.join(" ")));
    }
    out.push(String::new());

    if view.children.is_empty() {
        out.push("  (no children)".to_string());
    }
    let ids: Vec<String> = view.children.iter().map(|c| c.id.to_string()).collect();
    let id_width = column_width(ids.iter().map(String::as_str));
    for (id, child) in ids.iter().zip(&view.children) {
        out.push(format!(
            "  {}{}",
            styles::muted().apply_to(pad(id, id_width)),
            child.label
        ));
    }
    Ok(out.join("\n"))
}

pub fn rules(rows: &[RuleRow], format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return to_json(rows);
    }
    if rows.is_empty() {
        return Ok("No rules configured; filtering is disabled".to_string());
    }

    let kind_width = column_width(rows.iter().map(|r| r.kind));
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let mut line = format!("{}{}", styles::muted().apply_to(pad(row.kind, kind_width)), row.rule);
        if let Some(error) = &row.error {
            line.push_str(&format!("  {}", styles::warning().apply_to(error)));
        }
        out.push(line);
    }
    Ok(out.join("\n"))
}
