//! Styles for the jumplist CLI.
//!
//! Output is styled with `console`, which drops the escape codes when stdout is not a
//! terminal. Renderers ask for styles by role, never by color.

use console::Style;

/// Bucket labels and other things the user clicks.
pub fn prefix() -> Style {
    Style::new().cyan().bold()
}

/// Counts, ids, urls.
pub fn muted() -> Style {
    Style::new().dim()
}

pub fn title() -> Style {
    Style::new().bold()
}

/// The active request filter.
pub fn highlight() -> Style {
    Style::new().black().on_yellow()
}

pub fn warning() -> Style {
    Style::new().yellow().bold()
}
