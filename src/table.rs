//! Table - rows of data rendered as a bordered grid.
//!
//! A [`Table`] borrows a slice of rows and owns the column definitions. It
//! composes a [`Node`] tree (separators, header, body rows or the empty
//! state, and the pagination footer) and renders it at a given width.
//!
//! # Examples
//!
//! ```
//! use rich_table::prelude::*;
//! use serde_json::json;
//!
//! let data = vec![
//!     json!({"name": "Alice", "age": 28}),
//!     json!({"name": "Bob", "age": 32}),
//! ];
//! let table = Table::new(
//!     &data,
//!     vec![
//!         ColumnDef::new("name").title("Name").width(10),
//!         ColumnDef::new("age").title("Age").width(5).align(Align::Right),
//!     ],
//! );
//!
//! assert_eq!(
//!     table.render_plain(40),
//!     "┌──────────┬─────┐\n\
//!      │Name      │  Age│\n\
//!      ├──────────┼─────┤\n\
//!      │Alice     │   28│\n\
//!      │Bob       │   32│\n\
//!      └──────────┴─────┘"
//! );
//! ```
//!
//! The table never sorts or fetches rows. Sort state only decorates the
//! header, and pagination shows one page of whatever rows it is given.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::border::{BorderChars, BorderStyle, SeparatorPosition};
use crate::cell::{CellContent, RowData, extract_value, format_value};
use crate::cells::Justify;
use crate::color::ColorSystem;
use crate::column::{ColumnDef, GridTrack, columns_to_grid_template};
use crate::layout::Node;
use crate::pagination::PaginationConfig;
use crate::segment::{self, Segment};
use crate::sort::{SortState, sort_indicator};
use crate::style::Style;

/// Computes the style of a body row from the row and its index on the page.
pub type RowStyleFn<R> = Arc<dyn Fn(&R, usize) -> Style + Send + Sync>;

/// Width of the whole table relative to the width it is rendered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableWidth {
    /// The full render width.
    #[default]
    Auto,
    /// Exactly this many cells, capped at the render width.
    Fixed(usize),
    /// A percentage of the render width, capped at 100.
    Percent(u32),
}

impl TableWidth {
    /// Resolve against the available width.
    #[must_use]
    pub fn resolve(self, available: usize) -> usize {
        match self {
            Self::Auto => available,
            Self::Fixed(n) => n.min(available),
            Self::Percent(p) => {
                let p = usize::try_from(p.min(100)).unwrap_or(100);
                available.saturating_mul(p) / 100
            }
        }
    }
}

impl From<usize> for TableWidth {
    fn from(width: usize) -> Self {
        Self::Fixed(width)
    }
}

/// A data table.
pub struct Table<'a, R> {
    data: &'a [R],
    columns: Vec<ColumnDef<R>>,
    border_style: BorderStyle,
    show_header: bool,
    empty_text: CellContent,
    sort_state: Option<SortState>,
    pagination: Option<PaginationConfig>,
    header_style: Style,
    row_style: Option<RowStyleFn<R>>,
    cell_style: Style,
    width: TableWidth,
}

impl<'a, R: RowData> Table<'a, R> {
    /// Create a table over `data` with single-line borders and a header.
    #[must_use]
    pub fn new(data: &'a [R], columns: Vec<ColumnDef<R>>) -> Self {
        Self {
            data,
            columns,
            border_style: BorderStyle::Single,
            show_header: true,
            empty_text: CellContent::from("No data"),
            sort_state: None,
            pagination: None,
            header_style: Style::new(),
            row_style: None,
            cell_style: Style::new(),
            width: TableWidth::Auto,
        }
    }

    /// Set the border style by value or by name.
    #[must_use]
    pub fn border_style(mut self, style: impl Into<BorderStyle>) -> Self {
        self.border_style = style.into();
        self
    }

    #[must_use]
    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Content shown when the current page has no rows.
    #[must_use]
    pub fn empty_text(mut self, text: impl Into<CellContent>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Mark a column as sorted. Only the header indicator changes.
    #[must_use]
    pub fn sort_state(mut self, state: SortState) -> Self {
        self.sort_state = Some(state);
        self
    }

    #[must_use]
    pub fn pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Style of the header row.
    #[must_use]
    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    /// Style each body row from its data and index on the current page.
    #[must_use]
    pub fn row_style<F>(mut self, style: F) -> Self
    where
        F: Fn(&R, usize) -> Style + Send + Sync + 'static,
    {
        self.row_style = Some(Arc::new(style));
        self
    }

    /// Style of every body cell.
    #[must_use]
    pub fn cell_style(mut self, style: Style) -> Self {
        self.cell_style = style;
        self
    }

    #[must_use]
    pub fn width(mut self, width: impl Into<TableWidth>) -> Self {
        self.width = width.into();
        self
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    /// Rows shown on the current page.
    #[must_use]
    pub fn page_rows(&self) -> &'a [R] {
        match &self.pagination {
            Some(pagination) => pagination.slice(self.data),
            None => self.data,
        }
    }

    /// Build the layout tree.
    #[must_use]
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip_all,
            fields(columns = self.columns.len(), rows = self.data.len())
        )
    )]
    pub fn compose(&self) -> Node {
        let chars = self.border_style.chars();
        let bordered = !self.border_style.is_none();
        let tracks = self.grid_tracks(bordered);
        let rows = self.page_rows();

        self.warn_duplicate_keys();

        let mut children = Vec::with_capacity(rows.len() + 5);

        if bordered {
            children.push(self.separator(&tracks, chars, SeparatorPosition::Top));
        }

        if self.show_header {
            children.push(self.header(&tracks, chars, bordered));
            if bordered {
                children.push(self.separator(&tracks, chars, SeparatorPosition::Middle));
            }
        }

        if rows.is_empty() {
            children.push(self.empty_state(chars, bordered));
        } else {
            children.extend(
                rows.iter()
                    .enumerate()
                    .map(|(index, row)| self.body_row(row, index, &tracks, chars, bordered)),
            );
            if bordered {
                children.push(self.separator(&tracks, chars, SeparatorPosition::Bottom));
            }
        }

        if let Some(pagination) = &self.pagination {
            children.push(
                Node::row(
                    Justify::Center,
                    vec![Node::styled_text(pagination.footer_text(), Style::new().dim())],
                )
                .with_margin_top(1)
                .with_key("pagination"),
            );
        }

        log::trace!(
            "composed table: {} columns, {} of {} rows, border {}",
            self.columns.len(),
            rows.len(),
            self.data.len(),
            self.border_style
        );

        Node::column(children).with_key("table")
    }

    /// Render to lines of exactly the resolved table width.
    #[must_use]
    pub fn render_lines(&self, width: usize) -> Vec<Vec<Segment>> {
        self.compose()
            .render_lines(self.width.resolve(width), &Style::new())
    }

    /// Render to segments, with a newline segment after every line.
    #[must_use]
    pub fn render(&self, width: usize) -> Vec<Segment> {
        self.compose().render(self.width.resolve(width))
    }

    /// Render to plain text with trailing spaces trimmed from every line.
    #[must_use]
    pub fn render_plain(&self, width: usize) -> String {
        self.compose().render_plain(self.width.resolve(width))
    }

    /// Render to a string with ANSI escapes for `color_system`. `None` gives
    /// the padded text without escapes.
    #[must_use]
    pub fn render_ansi(&self, width: usize, color_system: Option<ColorSystem>) -> String {
        segment::render_ansi(&self.render(width), color_system)
    }

    /// `[1, c0, 1, c1, ..., cN, 1]` with borders, the column tracks alone
    /// without. A bordered table without columns keeps both edges.
    fn grid_tracks(&self, bordered: bool) -> Vec<GridTrack> {
        let template = columns_to_grid_template(&self.columns);
        if !bordered {
            return template;
        }
        let mut tracks = Vec::with_capacity(template.len() * 2 + 1);
        tracks.push(GridTrack::Fixed(1));
        if template.is_empty() {
            tracks.push(GridTrack::Fixed(1));
        }
        for track in template {
            tracks.push(track);
            tracks.push(GridTrack::Fixed(1));
        }
        tracks
    }

    fn separator(
        &self,
        tracks: &[GridTrack],
        chars: &BorderChars,
        position: SeparatorPosition,
    ) -> Node {
        let (left, cross, right) = chars.separator_glyphs(position);
        let last = self.columns.len().saturating_sub(1);

        let mut children = Vec::with_capacity(tracks.len());
        children.push(glyph(left));
        for i in 0..self.columns.len() {
            children.push(Node::rule(chars.horizontal));
            children.push(glyph(if i == last { right } else { cross }));
        }
        if self.columns.is_empty() {
            children.push(glyph(right));
        }

        let key = match position {
            SeparatorPosition::Top => "separator-top",
            SeparatorPosition::Middle => "separator-middle",
            SeparatorPosition::Bottom => "separator-bottom",
        };
        Node::grid(tracks.to_vec(), children).with_key(key)
    }

    fn header(&self, tracks: &[GridTrack], chars: &BorderChars, bordered: bool) -> Node {
        let mut children = Vec::with_capacity(tracks.len());
        if bordered {
            children.push(glyph(chars.vertical));
        }
        for column in &self.columns {
            let label = format!(
                "{}{}",
                column.header_label(),
                sort_indicator(&column.key, self.sort_state.as_ref())
            );
            children.push(Node::row(
                column.align.into(),
                vec![Node::styled_text(label, Style::new().bold())],
            ));
            if bordered {
                children.push(glyph(chars.vertical));
            }
        }
        if bordered && self.columns.is_empty() {
            children.push(glyph(chars.vertical));
        }

        Node::grid(tracks.to_vec(), children)
            .with_style(self.header_style.clone())
            .with_key("header")
    }

    fn body_row(
        &self,
        row: &R,
        index: usize,
        tracks: &[GridTrack],
        chars: &BorderChars,
        bordered: bool,
    ) -> Node {
        let mut children = Vec::with_capacity(tracks.len());
        if bordered {
            children.push(glyph(chars.vertical));
        }
        for column in &self.columns {
            let value = extract_value(row, column);
            let cell = match format_value(value, row, index, column) {
                CellContent::Plain(text) => Node::row(column.align.into(), vec![Node::text(text)]),
                CellContent::Custom(node) => Node::column(vec![node]),
            };
            children.push(cell.with_style(self.cell_style.clone()));
            if bordered {
                children.push(glyph(chars.vertical));
            }
        }
        if bordered && self.columns.is_empty() {
            children.push(glyph(chars.vertical));
        }

        let style = self
            .row_style
            .as_ref()
            .map_or_else(Style::new, |row_style| row_style(row, index));
        Node::grid(tracks.to_vec(), children)
            .with_style(style)
            .with_key(format!("row-{index}"))
    }

    fn empty_state(&self, chars: &BorderChars, bordered: bool) -> Node {
        let content = match &self.empty_text {
            CellContent::Plain(text) => Node::text(text.clone()),
            CellContent::Custom(node) => node.clone(),
        };
        let node = Node::row(Justify::Center, vec![content]);
        let node = if bordered { node.with_border(*chars) } else { node };
        node.with_key("empty")
    }

    fn warn_duplicate_keys(&self) {
        let mut seen = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !seen.insert(column.key.as_str()) {
                log::warn!("duplicate column key {:?}", column.key);
            }
        }
    }
}

fn glyph(c: char) -> Node {
    Node::text(c.to_string())
}

impl<R> Clone for Table<'_, R> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            columns: self.columns.clone(),
            border_style: self.border_style,
            show_header: self.show_header,
            empty_text: self.empty_text.clone(),
            sort_state: self.sort_state.clone(),
            pagination: self.pagination,
            header_style: self.header_style.clone(),
            row_style: self.row_style.clone(),
            cell_style: self.cell_style.clone(),
            width: self.width,
        }
    }
}

impl<R> fmt::Debug for Table<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("border_style", &self.border_style)
            .field("show_header", &self.show_header)
            .field("empty_text", &self.empty_text)
            .field("sort_state", &self.sort_state)
            .field("pagination", &self.pagination)
            .field("header_style", &self.header_style)
            .field("row_style", &self.row_style.as_ref().map(|_| "<fn>"))
            .field("cell_style", &self.cell_style)
            .field("width", &self.width)
            .finish()
    }
}
