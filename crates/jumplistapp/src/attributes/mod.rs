//! # Attribute System
//!
//! Pages expose their properties (`id`, `template`, ...) and named fields (`title`,
//! `headline`, ...) through one accessor, [`crate::model::Page::get_attr`], which
//! returns an [`AttrValue`]. Conditions over those values are expressed as
//! [`AttrFilter`]s, so the same matching code serves:
//!
//! - **Selector rules**: `template=products` deciding which parents get filters
//! - **Bucket counts**: `title^=A` counting children per first letter
//! - **Listing augmentation**: the extra `title^=A` clause handed to the host
//!
//! ## Attribute Types
//!
//! | Kind | Examples | Description |
//! |------|----------|-------------|
//! | `Int` | `id`, `parent_id`, `num_children` | Whole numbers |
//! | `Text` | `name`, `template`, `title` | Strings, already resolved for the request language |
//!
//! ## Usage
//!
//! ```ignore
//! let filter = AttrFilter::starts_with("title", "A");
//! if filter.matches(&page, language) { ... }
//! ```

mod filter;
mod value;

pub use filter::{AttrFilter, FilterOp};
pub use value::AttrValue;
