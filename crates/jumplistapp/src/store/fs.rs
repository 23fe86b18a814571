//! JSON page trees on disk.
//!
//! A page tree file lists pages flat, each naming its parent:
//!
//! ```json
//! {
//!   "pages": [
//!     { "id": 1, "name": "home" },
//!     { "id": 10, "parent_id": 1, "name": "fruits", "sortfield": "title" },
//!     { "id": 11, "parent_id": 10, "name": "apple", "fields": { "title": "Apple" } }
//!   ]
//! }
//! ```
//!
//! `num_children` is recomputed on load; values present in the file are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::memory::InMemoryPages;
use crate::error::{JumplistError, Result};
use crate::model::Page;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PageTree {
    pub pages: Vec<Page>,
}

/// Load a page tree file into memory.
pub fn load_pages(path: &Path) -> Result<InMemoryPages> {
    let text = fs::read_to_string(path)?;
    parse_pages(&text)
}

/// Parse page tree JSON into memory.
pub fn parse_pages(text: &str) -> Result<InMemoryPages> {
    let tree: PageTree = serde_json::from_str(text)?;

    let mut seen = HashSet::new();
    let mut store = InMemoryPages::new();
    for page in tree.pages {
        if page.id.is_none() {
            return Err(JumplistError::Store("page id 0 is reserved".to_string()));
        }
        if !seen.insert(page.id) {
            return Err(JumplistError::Store(format!("duplicate page id {}", page.id)));
        }
        store.insert(page);
    }
    tracing::debug!(pages = store.len(), "loaded page tree");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageId;
    use crate::store::PageStore;
    use std::io::Write;

    const TREE: &str = r#"{
        "pages": [
            { "id": 1, "name": "home" },
            { "id": 10, "parent_id": 1, "name": "fruits", "sortfield": "title", "num_children": 99 },
            { "id": 11, "parent_id": 10, "name": "apple", "fields": { "title": "Apple" } },
            { "id": 12, "parent_id": 10, "name": "banana", "fields": { "title": "Banana" } }
        ]
    }"#;

    #[test]
    fn parse_recomputes_num_children() {
        let store = parse_pages(TREE).unwrap();
        let fruits = store.get_page(PageId(10)).unwrap().unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(fruits.num_children, 2);
        assert_eq!(fruits.sortfield(), Some("title"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let text = r#"{"pages": [{"id": 1, "name": "a"}, {"id": 1, "name": "b"}]}"#;
        match parse_pages(text) {
            Err(JumplistError::Store(msg)) => assert!(msg.contains("duplicate")),
            other => panic!("Expected Store error, got {other:?}"),
        }
    }

    #[test]
    fn reserved_id_is_rejected() {
        let text = r#"{"pages": [{"id": 0, "name": "a"}]}"#;
        assert!(matches!(parse_pages(text), Err(JumplistError::Store(_))));
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        assert!(matches!(
            parse_pages("{ not json"),
            Err(JumplistError::Serialization(_))
        ));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TREE.as_bytes()).unwrap();

        let store = load_pages(file.path()).unwrap();
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_pages(&dir.path().join("absent.json")),
            Err(JumplistError::Io(_))
        ));
    }
}
