//! # Jumplist Architecture
//!
//! Jumplist adds click-driven "jump to bucket" filters (first letter A–Z, digits,
//! accented letters) to a host's hierarchical page listing. It is a **library that
//! plugs into a host**: the host owns the pages, the listing pipeline and the UI;
//! jumplist derives the buckets, validates the client's chosen bucket and shapes the
//! host's listing query and child count.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Hook Layer (hooks.rs, api.rs)                              │
//! │  - Three extension points the host calls while listing      │
//! │  - One PageListRequest (and one cache) per inbound request  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - matcher → prefixes → filters → request → augment/actions │
//! │  - Pure logic over RequestScope, memoized in FilterCache    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - PageStore trait: the host's data store                   │
//! │  - InMemoryPages (tests, demo host), JSON loader            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Request Lifecycle
//!
//! [`api::PageListFilter`] is built once from [`config::FilterConfig`] and lives as long
//! as the host likes. For every inbound listing request the host calls
//! [`api::PageListFilter::request`] with the request's [`commands::RequestParams`]; the
//! returned [`api::PageListRequest`] owns a fresh [`cache::FilterCache`] and implements
//! [`hooks::PageListHooks`]. Dropping it discards everything computed for the request.
//!
//! ## Nothing Is Written
//!
//! Jumplist never mutates stored pages and never persists filter state. Every store
//! call is a read; every failure from the store propagates unchanged to the host.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade and the per-request handle
//! - [`hooks`]: Extension point contracts
//! - [`commands`]: Filter derivation, validation and query augmentation
//! - [`cache`]: Request-scoped memoization
//! - [`rules`]: Selector rules deciding which parents get filters
//! - [`selector`]: The host's selector language (`parent_id=10, title^=A`)
//! - [`attributes`]: Attribute values and single-clause filters
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Page`, `PageId`, `FieldValue`)
//! - [`config`]: Configuration
//! - [`error`]: Error types

pub mod api;
pub mod attributes;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod hooks;
pub mod model;
pub mod rules;
pub mod selector;
pub mod store;
