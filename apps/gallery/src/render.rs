//! Plain-text rendering of gallery state.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, Local, Month, TimeZone, Timelike};
use gallery_core::GalleryState;
use shared::domain::{DocumentRecord, SortDirection, SortKey};

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `March 3rd 2021, 4:05:06`: 12-hour clock without an am/pm marker.
pub fn format_created_on<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let (_, hour) = at.hour12();
    let month = u8::try_from(at.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or_default();
    format!(
        "{} {}{} {}, {}:{:02}:{:02}",
        month,
        at.day(),
        ordinal_suffix(at.day()),
        at.year(),
        hour,
        at.minute(),
        at.second()
    )
}

pub fn format_size(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

pub fn describe(item: &DocumentRecord) -> String {
    format!(
        "{}  |  {}  |  {}",
        item.render_key(),
        format_created_on(&item.created_on.with_timezone(&Local)),
        format_size(item.size)
    )
}

fn sort_bar(state: &GalleryState) -> String {
    let mut bar = String::from("Sort by:");
    for key in SortKey::ALL {
        let arrow = match state.active_sort() {
            Some(active) if active.key == key && active.direction == SortDirection::Descending => {
                "▼"
            }
            _ => "▲",
        };
        let label = key.as_str().to_ascii_uppercase();
        if state.is_sorted_by(key) {
            let _ = write!(bar, " [{label} {arrow}]");
        } else {
            let _ = write!(bar, " {label} {arrow}");
        }
    }
    if state.is_filtered() {
        let _ = write!(bar, "    Filter: \"{}\"", state.filter());
    }
    bar
}

pub fn render_state(
    state: &GalleryState,
    describe_item: impl Fn(&DocumentRecord) -> String,
) -> String {
    if state.is_loading() {
        return "Loading documents...\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", sort_bar(state));
    let _ = writeln!(out);

    let page = state.current_page_view();
    if page.is_empty() {
        let _ = writeln!(out, "No documents.");
        if let Some(err) = state.last_error() {
            let _ = writeln!(out, "Last load failed: {err}");
        }
        return out;
    }

    for (index, row) in page.rows().enumerate() {
        let _ = writeln!(out, "Row {}:", index + 1);
        for item in row {
            let _ = writeln!(out, "  {}", describe_item(item));
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Page {} of {}", page.number, page.page_count);
    if let Some(err) = state.last_error() {
        let _ = writeln!(out, "Last refresh failed: {err}");
    }
    out
}
