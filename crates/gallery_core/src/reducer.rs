//! Pure state transitions for the gallery.

use shared::domain::{DocumentRecord, SortDirection, SortKey};
use tracing::debug;

use crate::{
    pagination::PageNav,
    state::{ActiveSort, GalleryState, LoadPhase},
    view,
};

#[derive(Debug, Clone, PartialEq)]
pub enum GalleryAction {
    LoadSucceeded {
        seq: u64,
        items: Vec<DocumentRecord>,
    },
    LoadFailed {
        seq: u64,
        message: String,
    },
    SortBy(SortKey),
    FilterByName(String),
    Navigate(PageNav),
}

impl GalleryAction {
    pub fn name(&self) -> &'static str {
        match self {
            GalleryAction::LoadSucceeded { .. } => "load_succeeded",
            GalleryAction::LoadFailed { .. } => "load_failed",
            GalleryAction::SortBy(_) => "sort_by",
            GalleryAction::FilterByName(_) => "filter_by_name",
            GalleryAction::Navigate(_) => "navigate",
        }
    }
}

pub fn reduce(mut state: GalleryState, action: GalleryAction) -> GalleryState {
    debug!(action = action.name(), "reducing gallery action");

    match action {
        GalleryAction::LoadSucceeded { seq, items } => {
            if is_stale(&state, seq) {
                return state;
            }
            state.applied_load_seq = seq;
            state.phase = LoadPhase::Loaded;
            state.last_error = None;
            state.active_sort = None;
            state.filter.clear();
            state.displayed_items = items.clone();
            state.all_items = items;
            clamp_current_page(&mut state);
        }
        GalleryAction::LoadFailed { seq, message } => {
            if is_stale(&state, seq) {
                return state;
            }
            state.applied_load_seq = seq;
            state.phase = LoadPhase::Loaded;
            state.last_error = Some(message);
        }
        GalleryAction::SortBy(key) => {
            let direction = match state.active_sort {
                Some(active) if active.key == key => active.direction.flipped(),
                _ => SortDirection::Ascending,
            };
            state.active_sort = Some(ActiveSort { key, direction });
            state.filter.clear();
            rederive(&mut state);
        }
        GalleryAction::FilterByName(pattern) => {
            state.active_sort = None;
            state.filter = pattern;
            rederive(&mut state);
        }
        GalleryAction::Navigate(nav) => {
            state.current_page = state.paginator().navigate(
                state.current_page,
                nav,
                state.displayed_items.len(),
            );
        }
    }

    state
}

fn is_stale(state: &GalleryState, seq: u64) -> bool {
    let stale = seq <= state.applied_load_seq;
    if stale {
        debug!(
            seq,
            applied = state.applied_load_seq,
            "discarding stale load completion"
        );
    }
    stale
}

fn rederive(state: &mut GalleryState) {
    state.displayed_items =
        view::derive_displayed(&state.all_items, state.active_sort, &state.filter);
    clamp_current_page(state);
}

fn clamp_current_page(state: &mut GalleryState) {
    state.current_page = state
        .paginator()
        .clamp_page(state.current_page, state.displayed_items.len());
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
