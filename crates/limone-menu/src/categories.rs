//! Category resolution.
//!
//! The canonical category set is whatever the live distinct-category query
//! returns. The hardcoded fallback list exists for the failure case only:
//! a successful empty result is a real (empty) category set, not a reason
//! to show defaults.

use tracing::warn;

use limone_store::StoreResult;

/// Categories shown when the live query fails.
pub const FALLBACK_CATEGORIES: [&str; 4] = ["Starters", "Mains", "Desserts", "Drinks"];

/// Turn a distinct-category query result into the list to display.
///
/// `Ok` values pass through unchanged, including an empty list. Only an
/// `Err` substitutes [`FALLBACK_CATEGORIES`].
pub fn resolve_categories(result: StoreResult<Vec<String>>) -> Vec<String> {
    match result {
        Ok(categories) => categories,
        Err(err) => {
            warn!(%err, "category query failed, using fallback list");
            FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect()
        }
    }
}

/// Keep the current selection if the live set still contains it, otherwise
/// move to the first live category.
///
/// With an empty live set the current selection is kept as-is; there is
/// nothing better to switch to.
pub fn ensure_selection(categories: &[String], selected: &str) -> String {
    if categories.is_empty() || categories.iter().any(|c| c == selected) {
        selected.to_string()
    } else {
        categories[0].clone()
    }
}

// ── tests ────────────────────────────────────────────────────────────
