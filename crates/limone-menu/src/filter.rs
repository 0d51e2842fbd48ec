//! The menu filtering engine.
//!
//! A pure function of three inputs: the full item set, the selected
//! category, and the search text. Search takes precedence over the
//! category filter; the caller re-evaluates whenever any input changes.

use limone_store::MenuItem;

/// Derive the visible subset of `items`.
///
/// With a non-empty (trimmed) `search_text`, items whose name or
/// description contains the text case-insensitively are returned and the
/// category is ignored entirely. Otherwise items whose category equals
/// `selected_category` case-insensitively are returned. The input order is
/// preserved; nothing is re-sorted.
pub fn filter_items<'a>(
    items: &'a [MenuItem],
    selected_category: &str,
    search_text: &str,
) -> Vec<&'a MenuItem> {
    let query = search_text.trim().to_lowercase();

    if !query.is_empty() {
        items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&query)
                    || item.description.to_lowercase().contains(&query)
            })
            .collect()
    } else {
        let category = selected_category.to_lowercase();
        items
            .iter()
            .filter(|item| item.category.to_lowercase() == category)
            .collect()
    }
}

// ── tests ────────────────────────────────────────────────────────────
