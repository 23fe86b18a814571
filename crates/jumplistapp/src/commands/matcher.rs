use crate::cache::Cached;
use crate::commands::RequestScope;
use crate::error::Result;
use crate::model::Page;
use crate::rules::{RuleEvaluator, SelectorRule};
use crate::store::PageStore;

/// The first configured rule matching `page`, or `None` if filtering is disabled for it.
///
/// Pages without children never match: there is nothing to filter. The outcome,
/// hit or miss, is cached for the rest of the request.
pub fn run<S: PageStore, E: RuleEvaluator>(
    scope: &mut RequestScope<'_, S, E>,
    page: &Page,
) -> Result<Option<SelectorRule>> {
    if scope.rules.is_empty() {
        return Ok(None);
    }
    if let Some(cached) = scope.cache.selector(page.id) {
        return Ok(cached.cloned());
    }

    let mut matched = None;
    if page.has_children() {
        for rule in scope.rules {
            let hit = match rule {
                SelectorRule::ExactId(id) => *id == page.id,
                SelectorRule::Expression(expression) => {
                    scope.evaluator.matches(page, expression, scope.language())?
                }
            };
            if hit {
                matched = Some(rule.clone());
                break;
            }
        }
    }

    tracing::debug!(page = %page.id, rule = ?matched, "matched selector rules");
    scope.cache.set(page.id, Cached::Selector(matched.clone()));
    Ok(matched)
}
