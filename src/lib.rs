//! Prospects-RS: an administrative console for prospect entities and work orders
//!
//! The console lists and creates records through a REST API. Its forms pick
//! related records with debounced, remote-backed autocomplete fields.

pub mod autocomplete;
pub mod config;
pub mod debounce;
pub mod forms;
pub mod listing;
pub mod lookup;
pub mod network;
pub mod notify;
pub mod services;
pub mod web;

pub use autocomplete::{AutocompleteField, FieldConfig, FieldContext};
pub use config::Settings;
pub use debounce::Debouncer;
pub use lookup::{resolve, LookupSource};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows per page, and the total assumed when the API omits `x-total-count`
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Quiet period before an autocomplete query is sent
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
