//! # limone-menu
//!
//! Pure menu-filtering logic for limone. No I/O, no state: the filtering
//! engine derives the visible item subset from (all items, selected
//! category, search text), with search taking precedence, and the category
//! resolver applies the fallback list to query failures only.

pub mod categories;
pub mod filter;

// ── re-exports ───────────────────────────────────────────────────────

pub use categories::{FALLBACK_CATEGORIES, ensure_selection, resolve_categories};
pub use filter::filter_items;
