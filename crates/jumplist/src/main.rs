//! # Jumplist Demo Host
//!
//! Jumplist is a library that plugs into a host's page listing. This binary plays the
//! host: it loads a page tree from JSON, builds the filter engine from configuration
//! and runs the extension points the way a listing UI would, printing what each one
//! produced. The binary is intentionally thin: the CLI lives in `src/cli/`, while
//! this file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/jumplistapp/`: the filter engine, UI agnostic
//! - `crates/jumplist/`: this demo host, depends on the `jumplistapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/jumplist/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Host behavior: load pages, call hooks (handlers.rs)      │
//! │  - Text and JSON output (render.rs, styles.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/jumplistapp/src/api.rs)                  │
//! │  - PageListFilter built once, PageListRequest per request   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! Engine behavior is tested in the library. The CLI is covered end to end in
//! `tests/cli_e2e.rs`, which writes a page tree to a temp dir and runs the binary.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
