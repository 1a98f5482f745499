//! Page windows and the "Page X of Y" footer.

use std::ops::Range;

/// Current page of a paginated table.
///
/// `page` is 1-indexed. `total` is the number of rows across all pages,
/// which may exceed the rows actually passed to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationConfig {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            total: 0,
        }
    }
}

impl PaginationConfig {
    #[must_use]
    pub const fn new(page: usize, page_size: usize, total: usize) -> Self {
        Self {
            page,
            page_size,
            total,
        }
    }

    /// Number of pages: `ceil(total / page_size)`, and 0 for a zero page size.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }

    /// Row range of the current page within the full data set.
    ///
    /// Page 0 and a zero page size produce an empty range.
    #[must_use]
    pub const fn window(&self) -> Range<usize> {
        if self.page == 0 || self.page_size == 0 {
            return 0..0;
        }
        let start = (self.page - 1).saturating_mul(self.page_size);
        start..start.saturating_add(self.page_size)
    }

    /// Rows of the current page.
    ///
    /// Data holding at most one page while `total` promises more is taken to
    /// be that page already and is returned unchanged, so callers may pass
    /// either the full data set or just the visible rows. Out-of-range pages
    /// yield an empty slice.
    ///
    /// Short data is always taken as the current page, whatever the page
    /// number: 5 rows with `total = 50`, `page = 3` and `page_size = 10` are
    /// shown as page 3 rather than as an empty out-of-range page.
    #[must_use]
    pub fn slice<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        if self.page > 0 && data.len() <= self.page_size && data.len() < self.total {
            return data;
        }
        let window = self.window();
        let end = window.end.min(data.len());
        let start = window.start.min(end);
        &data[start..end]
    }

    /// `"Page {page} of {total_pages}"`.
    #[must_use]
    pub fn footer_text(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages())
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// The following page, clamped to the last page.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.has_next() {
            Self {
                page: self.page + 1,
                ..self
            }
        } else {
            self
        }
    }

    /// The preceding page, clamped to the first page.
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.has_prev() {
            Self {
                page: self.page - 1,
                ..self
            }
        } else {
            self
        }
    }
}
