//! Sort and filter derivations. All functions return fresh vectors; the
//! source slice keeps backend order.

use std::cmp::Ordering;

use shared::domain::{DocumentRecord, SortDirection, SortKey};

use crate::state::ActiveSort;

pub fn compare(key: SortKey, a: &DocumentRecord, b: &DocumentRecord) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Date => a.created_on.cmp(&b.created_on),
        SortKey::Size => a.size.cmp(&b.size),
    }
}

/// Stable ascending sort; descending is that order reversed.
pub fn sorted(items: &[DocumentRecord], sort: ActiveSort) -> Vec<DocumentRecord> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| compare(sort.key, a, b));
    if sort.direction == SortDirection::Descending {
        out.reverse();
    }
    out
}

/// Case-sensitive substring match on `name`, keeping source order. An empty
/// pattern matches everything.
pub fn filtered(items: &[DocumentRecord], pattern: &str) -> Vec<DocumentRecord> {
    items
        .iter()
        .filter(|item| item.name.contains(pattern))
        .cloned()
        .collect()
}

pub fn derive_displayed(
    all_items: &[DocumentRecord],
    sort: Option<ActiveSort>,
    filter: &str,
) -> Vec<DocumentRecord> {
    match sort {
        Some(sort) => sorted(all_items, sort),
        None => filtered(all_items, filter),
    }
}
