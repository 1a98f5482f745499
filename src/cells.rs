//! Unicode character cell width calculations.
//!
//! Every table cell is measured, truncated and padded in terminal cells rather
//! than bytes or chars, so wide characters (CJK, emoji) keep columns aligned.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use unicode_width::UnicodeWidthChar;

/// Minimum string length to cache (shorter strings have minimal overhead).
const CACHE_MIN_LEN: usize = 8;

/// Cell widths of recently measured strings. Table bodies re-measure the same
/// values on every render pass.
static CELL_LEN_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// Horizontal placement of content inside a wider cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    /// Content starts at the left edge.
    #[default]
    Start,
    /// Leftover space is split, the odd cell going to the right.
    Center,
    /// Content ends at the right edge.
    End,
}

impl Justify {
    /// Split `leftover` cells into (before, after) padding.
    #[must_use]
    pub const fn split(self, leftover: usize) -> (usize, usize) {
        match self {
            Self::Start => (0, leftover),
            Self::Center => (leftover / 2, leftover - leftover / 2),
            Self::End => (leftover, 0),
        }
    }
}

/// Get the cell width of a single character.
///
/// Most characters are 1 cell wide, but CJK characters and some emoji
/// are 2 cells wide. Control characters have 0 width.
#[must_use]
pub fn get_character_cell_size(c: char) -> usize {
    c.width().unwrap_or(0)
}

#[inline]
fn compute_cell_width(text: &str) -> usize {
    text.chars().map(get_character_cell_size).sum()
}

/// Get the total cell width of a string (cached for longer strings).
#[must_use]
pub fn cell_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_cell_width(text);
    }

    if let Ok(mut cache) = CELL_LEN_CACHE.lock()
        && let Some(&cached) = cache.get(text)
    {
        return cached;
    }

    let width = compute_cell_width(text);

    if let Ok(mut cache) = CELL_LEN_CACHE.lock() {
        cache.put(text.to_string(), width);
    }

    width
}

/// Truncate a string to a maximum cell width.
///
/// Returns the kept prefix and its actual width, which is smaller than
/// `max_width` when a wide character straddles the limit.
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    let mut byte_pos = 0;

    for (i, c) in text.char_indices() {
        let char_width = get_character_cell_size(c);
        if width + char_width > max_width {
            break;
        }
        width += char_width;
        byte_pos = i + c.len_utf8();
    }

    (&text[..byte_pos], width)
}

/// Force a string to exactly `total` cells, truncating or right-padding.
#[must_use]
pub fn set_cell_size(text: &str, total: usize) -> String {
    align(text, total, Justify::Start)
}

/// Truncate `text` to `width` cells, then pad it to exactly `width` cells
/// according to `justify`.
#[must_use]
pub fn align(text: &str, width: usize, justify: Justify) -> String {
    let (kept, kept_width) = truncate(text, width);
    let (before, after) = justify.split(width - kept_width);

    let mut result = String::with_capacity(kept.len() + before + after);
    result.extend(std::iter::repeat_n(' ', before));
    result.push_str(kept);
    result.extend(std::iter::repeat_n(' ', after));
    result
}
