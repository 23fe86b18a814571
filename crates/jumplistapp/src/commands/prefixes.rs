use std::collections::BTreeSet;

use crate::cache::Cached;
use crate::commands::RequestScope;
use crate::error::Result;
use crate::model::Page;
use crate::rules::RuleEvaluator;
use crate::store::{LeadingChars, PageStore};

/// Distinct uppercase leading characters of the children's sort values.
///
/// `sortfield` defaults to the parent's own sort attribute; a parent in manual order
/// has no prefixes. Issues a single store query, then memoizes per parent.
pub fn run<S: PageStore, E: RuleEvaluator>(
    scope: &mut RequestScope<'_, S, E>,
    parent: &Page,
    sortfield: Option<&str>,
) -> Result<BTreeSet<String>> {
    let Some(sortfield) = sortfield.or_else(|| parent.sortfield()) else {
        return Ok(BTreeSet::new());
    };
    if let Some(cached) = scope.cache.prefixes(parent.id) {
        tracing::trace!(parent = %parent.id, "prefix cache hit");
        return Ok(cached.clone());
    }

    let rows = scope
        .store
        .leading_chars(parent.id, sortfield, scope.language())?;
    let prefixes = normalize(&rows);

    tracing::debug!(
        parent = %parent.id,
        sortfield,
        children = rows.len(),
        prefixes = prefixes.len(),
        "derived child prefixes"
    );
    scope.cache.set(parent.id, Cached::Prefixes(prefixes.clone()));
    Ok(prefixes)
}

/// Resolve each row's language override, uppercase it and drop empties.
pub fn normalize(rows: &[LeadingChars]) -> BTreeSet<String> {
    rows.iter()
        .map(LeadingChars::resolved)
        .filter(|ch| !ch.is_empty())
        .map(fold_case)
        .collect()
}

/// Uppercase `text` char by char. A char whose uppercase form is longer than one
/// char (`ß` → `SS`) is kept as is, so a prefix stays a single char.
pub fn fold_case(text: &str) -> String {
    text.chars()
        .map(|ch| {
            let mut upper = ch.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => ch,
            }
        })
        .collect()
}
