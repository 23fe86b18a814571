#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PAGES: &str = r#"{
  "pages": [
    { "id": 1, "name": "home" },
    { "id": 10, "parent_id": 1, "name": "fruits", "template": "category", "sortfield": "title" },
    { "id": 11, "parent_id": 10, "name": "apple", "fields": { "title": "Apple" } },
    { "id": 12, "parent_id": 10, "name": "apple-2", "fields": { "title": "apple" } },
    { "id": 13, "parent_id": 10, "name": "banana", "fields": { "title": "Banana" } },
    { "id": 15, "parent_id": 10, "name": "avocado", "published": false,
      "fields": { "title": "Avocado" } },
    { "id": 14, "parent_id": 10, "name": "star",
      "fields": { "title": { "base": "Zeta", "translations": { "fr": "Étoile" } } } },
    { "id": 20, "parent_id": 1, "name": "about", "sortfield": "sort" }
  ]
}"#;

fn write_pages(dir: &Path) -> PathBuf {
    let path = dir.join("pages.json");
    fs::write(&path, PAGES).unwrap();
    path
}

fn jumplist_cmd(pages: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("jumplist"));
    cmd.env_remove("JUMPLIST_CONFIG")
        .env_remove("JUMPLIST_PAGES")
        .env_remove("RUST_LOG")
        .arg("--pages")
        .arg(pages);
    cmd
}

fn with_rules(pages: &Path, rules: &str) -> Command {
    let mut cmd = jumplist_cmd(pages);
    cmd.env("JUMPLIST_USE_SELECTORS", rules);
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_filters_text() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());

    with_rules(&pages, "id=10")
        .args(["filters", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filters for page 10"))
        .stdout(predicate::str::contains("All"))
        .stdout(predicate::str::contains("Z"));
}

#[test]
fn test_filters_json_counts() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());

    let value = json_stdout(with_rules(&pages, "template=category").args([
        "filters", "10", "--output", "json",
    ]));
    let pairs: Vec<(String, u64)> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["prefix"].as_str().unwrap().to_string(),
                e["count"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("All".to_string(), 1),
            ("A".to_string(), 3),
            ("B".to_string(), 1),
            ("Z".to_string(), 1),
        ]
    );
}

#[test]
fn test_filters_follow_language() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());

    let value = json_stdout(with_rules(&pages, "id=10").args([
        "filters",
        "10",
        "--language",
        "fr",
        "--output",
        "json",
    ]));
    let keys: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["prefix"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["All", "A", "B", "É"]);
}

#[test]
fn test_manual_sort_has_no_filters() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());

    with_rules(&pages, "id=20")
        .args(["filters", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No filters for page 20"));
}

#[test]
fn test_list_narrows_to_bucket() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());

    let value = json_stdout(with_rules(&pages, "id=10").args([
        "list", "10", "--filter", "a", "--output", "json",
    ]));
    assert_eq!(value["filter"], "A");
    assert_eq!(
        value["selector"],
        "parent_id=10, title^=A, include=unpublished"
    );
    assert_eq!(value["total"], 3);
    assert_eq!(value["total_replaced"], true);
    let mut ids: Vec<u64> = value["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![11, 12, 15]);
}

#[test]
fn test_list_ignores_unknown_bucket() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());

    let value = json_stdout(with_rules(&pages, "id=10").args([
        "list", "10", "--filter", "5", "--output", "json",
    ]));
    assert_eq!(value["filter"], "");
    assert_eq!(value["selector"], "parent_id=10, include=unpublished");
    assert_eq!(value["total"], 5);
    assert_eq!(value["children"].as_array().unwrap().len(), 5);
}

#[test]
fn test_actions_json() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());

    let value = json_stdout(with_rules(&pages, "id=10").args(["actions", "10", "--output", "json"]));
    let actions = value.as_array().unwrap();
    assert_eq!(actions.len(), 4);
    assert_eq!(actions[0]["identifier"], "filter-All");
    assert_eq!(actions[0]["icon"], "sort-alpha-asc");
    assert_eq!(actions[1]["class"], "Filter FilterA");
    assert_eq!(actions[1]["url"], "./?id=10&render=JSON&start=0&filter=A");
}

#[test]
fn test_rules_from_config_file() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());
    let config = temp.path().join("jumplist.toml");
    fs::write(
        &config,
        "use_selectors = \"\"\"\nid=10\n\ntemplate=category\ntemplate\n\"\"\"\n",
    )
    .unwrap();

    jumplist_cmd(&pages)
        .env_remove("JUMPLIST_USE_SELECTORS")
        .arg("--config")
        .arg(&config)
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("exact_id"))
        .stdout(predicate::str::contains("template=category"))
        .stdout(predicate::str::contains("expression"));
}

#[test]
fn test_no_rules_disables_filters() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());
    let config = temp.path().join("jumplist.toml");
    fs::write(&config, "use_selectors = \"\"\n").unwrap();

    jumplist_cmd(&pages)
        .env_remove("JUMPLIST_USE_SELECTORS")
        .arg("--config")
        .arg(&config)
        .args(["filters", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No filters for page 10"));
}

#[test]
fn test_unknown_page_fails() {
    let temp = TempDir::new().unwrap();
    let pages = write_pages(temp.path());

    with_rules(&pages, "id=10")
        .args(["filters", "4242"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page not found: 4242"));
}

#[test]
fn test_missing_pages_file_fails() {
    let temp = TempDir::new().unwrap();

    with_rules(&temp.path().join("missing.json"), "id=10")
        .args(["filters", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load pages"));
}
