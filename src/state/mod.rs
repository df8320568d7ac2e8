/// State management module
///
/// This module handles all application state, including:
/// - Catalog records and their display helpers (data.rs, catalog.rs)
/// - Category filtering (filter.rs)
/// - The gallery modal state machine (gallery.rs)
/// - Saved descriptions in SQLite (overlay.rs)
/// - The controller that ties them together (showcase.rs)

pub mod catalog;
pub mod data;
pub mod filter;
pub mod gallery;
pub mod overlay;
pub mod showcase;
