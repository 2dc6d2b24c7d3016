/// State management module
///
/// This module handles all application state, including:
/// - Product records and spec keys (data.rs)
/// - The read-only product catalog (catalog.rs)
/// - Search and brand filtering (filter.rs)
/// - The key-value store seam and its SQLite backing (store.rs, library.rs)
/// - The selection set and its persistence (selection.rs)
/// - Spec comparison and the comparison view state machine (comparison.rs)
/// - Theme preference (preferences.rs)
/// - The per-run session that ties them together (session.rs)

pub mod catalog;
pub mod comparison;
pub mod data;
pub mod filter;
pub mod library;
pub mod preferences;
pub mod selection;
pub mod session;
pub mod store;
