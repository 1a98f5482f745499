//! # rich_table
//!
//! Bordered, aligned, sortable and paginated data tables for the terminal.
//!
//! Rows are any [`RowData`] (a `serde_json` object, a map of JSON values, or
//! your own type), columns are [`ColumnDef`]s, and a [`Table`] turns both
//! into lines of styled segments, plain text or ANSI-escaped text.
//!
//! ## Quick Start
//!
//! ```
//! use rich_table::prelude::*;
//! use serde_json::json;
//!
//! let data = vec![json!({"name": "Alice", "role": "admin"})];
//! let table = Table::new(
//!     &data,
//!     vec![
//!         ColumnDef::new("name").title("Name"),
//!         ColumnDef::new("role").title("Role").align(Align::Center),
//!     ],
//! )
//! .border_style(BorderStyle::Round);
//!
//! println!("{}", table.render_plain(40));
//! ```
//!
//! ## Core Concepts
//!
//! - **ColumnDef**: title, width (fixed, auto or `"N%"`), alignment and an
//!   optional cell renderer for one field
//! - **BorderStyle**: one of the named border glyph sets
//! - **Node**: the layout tree a table composes into
//! - **Segment**: the atomic rendering unit (text + style)
//!
//! ## Logging
//!
//! Soft fallbacks (unknown border names, malformed widths) are reported at
//! `debug` through the `log` facade and duplicate column keys at `warn`. With
//! the `tracing` feature, table composition also runs inside a tracing span.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod border;
pub mod cell;
pub mod cells;
pub mod color;
pub mod column;
pub mod layout;
#[cfg(feature = "tracing")]
pub mod logging;
pub mod pagination;
pub mod segment;
pub mod sort;
pub mod style;
pub mod table;
pub mod terminal;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::border::{
        BorderChars, BorderStyle, SeparatorPosition, render_separator, resolve_border_chars,
    };
    pub use crate::cell::{CellContent, RowData};
    pub use crate::cells::Justify;
    pub use crate::color::{Color, ColorSystem};
    pub use crate::column::{Align, ColumnDef, ColumnWidth, GridTrack, columns_to_grid_template};
    pub use crate::layout::Node;
    pub use crate::pagination::PaginationConfig;
    pub use crate::segment::Segment;
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::style::{Attributes, Style};
    pub use crate::table::{Table, TableWidth};
    pub use crate::terminal::detect_color_system;
}

// Re-export key types at crate root
pub use border::{BorderChars, BorderStyle};
pub use cell::{CellContent, RowData};
pub use color::{Color, ColorSystem};
pub use column::{Align, ColumnDef, ColumnWidth};
pub use pagination::PaginationConfig;
pub use segment::Segment;
pub use sort::{SortDirection, SortState};
pub use style::Style;
pub use table::Table;
