//! Fixed-size paging over the displayed items. A page holds two rows of
//! `items_per_row` records each.

use shared::domain::DocumentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    items_per_row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Prev,
    Next,
    Last,
    To(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageView<'a> {
    pub number: usize,
    pub page_count: usize,
    pub first_row: &'a [DocumentRecord],
    pub second_row: Option<&'a [DocumentRecord]>,
}

impl<'a> PageView<'a> {
    pub fn is_empty(&self) -> bool {
        self.first_row.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &'a DocumentRecord> + 'a {
        self.first_row
            .iter()
            .chain(self.second_row.unwrap_or_default().iter())
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [DocumentRecord]> + 'a {
        std::iter::once(self.first_row).chain(self.second_row)
    }
}

impl Paginator {
    pub fn new(items_per_row: usize) -> Self {
        Self {
            items_per_row: items_per_row.max(1),
        }
    }

    pub fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    pub fn page_width(&self) -> usize {
        self.items_per_row * 2
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_width())
    }

    /// Clamps `page` into `1..=max(page_count, 1)`.
    pub fn clamp_page(&self, page: usize, total: usize) -> usize {
        page.clamp(1, self.page_count(total).max(1))
    }

    pub fn navigate(&self, current: usize, nav: PageNav, total: usize) -> usize {
        let last = self.page_count(total).max(1);
        let target = match nav {
            PageNav::First => 1,
            PageNav::Prev => current.saturating_sub(1),
            PageNav::Next => current.saturating_add(1),
            PageNav::Last => last,
            PageNav::To(page) => page,
        };
        target.clamp(1, last)
    }

    pub fn page<'a>(&self, items: &'a [DocumentRecord], number: usize) -> PageView<'a> {
        let width = self.page_width();
        let row = self.items_per_row;
        let total = items.len();

        let start = number.saturating_sub(1).saturating_mul(width).min(total);
        let split = start.saturating_add(row).min(total);
        let end = start.saturating_add(width).min(total);

        let second_row = (split < total && split < end).then(|| &items[split..end]);

        PageView {
            number,
            page_count: self.page_count(total),
            first_row: &items[start..split],
            second_row,
        }
    }
}
