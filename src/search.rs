//! Substring matching over the item collection.

use crate::model::InventoryItem;

/// Result of a substring search over the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No query text was supplied.
    NoQuery,
    /// A query was supplied but no item matched it.
    NoMatches,
    /// Items matching the query, in original collection order.
    Matches(Vec<InventoryItem>),
}

/// Matches `query` case-insensitively against item names and descriptions.
///
/// An absent or empty query yields [`SearchOutcome::NoQuery`] so callers can
/// distinguish "nothing searched" from "nothing found".
pub fn match_items(items: &[InventoryItem], query: Option<&str>) -> SearchOutcome {
    let needle = match query {
        Some(text) if !text.is_empty() => text.to_lowercase(),
        _ => return SearchOutcome::NoQuery,
    };

    let matches: Vec<InventoryItem> = items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Matches(matches)
    }
}
