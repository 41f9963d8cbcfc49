//! Gallery state snapshot. Mutated only through [`crate::reducer::reduce`].

use shared::domain::{DocumentRecord, SortDirection, SortKey};

use crate::pagination::{PageView, Paginator};

pub const DEFAULT_ITEMS_PER_ROW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Initial fetch has not completed yet.
    #[default]
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    pub(crate) phase: LoadPhase,
    pub(crate) all_items: Vec<DocumentRecord>,
    pub(crate) displayed_items: Vec<DocumentRecord>,
    pub(crate) active_sort: Option<ActiveSort>,
    pub(crate) filter: String,
    pub(crate) current_page: usize,
    pub(crate) items_per_row: usize,
    pub(crate) applied_load_seq: u64,
    pub(crate) last_error: Option<String>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_ROW)
    }
}

impl GalleryState {
    pub fn new(items_per_row: usize) -> Self {
        Self {
            phase: LoadPhase::Loading,
            all_items: Vec::new(),
            displayed_items: Vec::new(),
            active_sort: None,
            filter: String::new(),
            current_page: 1,
            items_per_row: items_per_row.max(1),
            applied_load_seq: 0,
            last_error: None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn all_items(&self) -> &[DocumentRecord] {
        &self.all_items
    }

    pub fn displayed_items(&self) -> &[DocumentRecord] {
        &self.displayed_items
    }

    pub fn active_sort(&self) -> Option<ActiveSort> {
        self.active_sort
    }

    pub fn is_sorted_by(&self, key: SortKey) -> bool {
        self.active_sort.is_some_and(|sort| sort.key == key)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_filtered(&self) -> bool {
        !self.filter.is_empty()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    pub fn applied_load_seq(&self) -> u64 {
        self.applied_load_seq
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.items_per_row)
    }

    pub fn page_count(&self) -> usize {
        self.paginator().page_count(self.displayed_items.len())
    }

    pub fn current_page_view(&self) -> PageView<'_> {
        self.paginator().page(&self.displayed_items, self.current_page)
    }

    pub fn find(&self, name: &str) -> Option<&DocumentRecord> {
        self.all_items.iter().find(|item| item.name == name)
    }
}
