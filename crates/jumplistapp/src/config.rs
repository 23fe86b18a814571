//! # Configuration
//!
//! Jumplist has a single setting, loaded with [`confique`] from layered sources.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `JUMPLIST_USE_SELECTORS`
//! 2. **Config file**: a TOML file chosen by the host (the demo CLI looks in the OS
//!    config directory, via the `directories` crate)
//! 3. **Compiled Defaults**: no rules, so no parent gets filters
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `use_selectors` | `""` | Newline-separated rules naming the parents that get filters |
//!
//! ```toml
//! use_selectors = """
//! id=1234
//! template=products
//! """
//! ```

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::rules::{parse_rules, SelectorRule};

/// Configuration for jumplist, stored in `jumplist.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FilterConfig {
    /// Rules, one per line. Blank lines are ignored; empty disables filtering.
    #[config(default = "", env = "JUMPLIST_USE_SELECTORS")]
    pub use_selectors: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            use_selectors: String::new(),
        }
    }
}

impl FilterConfig {
    pub fn new(use_selectors: impl Into<String>) -> Self {
        Self {
            use_selectors: use_selectors.into(),
        }
    }

    /// Parsed rules, in configured order.
    pub fn rules(&self) -> Vec<SelectorRule> {
        parse_rules(&self.use_selectors)
    }

    /// Load from the environment, then `path` if given, then defaults.
    ///
    /// A missing file is not an error; confique skips it.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        tracing::debug!(rules = config.rules().len(), "loaded filter config");
        Ok(config)
    }
}
