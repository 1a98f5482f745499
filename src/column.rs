//! Column definitions and grid template construction.
//!
//! A [`ColumnDef`] describes how one field of the row data is titled, sized,
//! aligned and rendered. [`columns_to_grid_template`] converts the width of
//! each column into a [`GridTrack`] for the layout engine:
//!
//! - `Fixed(n)` stays a fixed track of `n` cells
//! - `Auto` becomes a flexible track of weight 1
//! - `"N%"` becomes a flexible track of weight `N` (weights are relative, not
//!   normalized to 100)
//! - anything malformed becomes a flexible track of weight 1

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::cell::CellContent;
use crate::cells::Justify;

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Align> for Justify {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Justify::Start,
            Align::Center => Justify::Center,
            Align::Right => Justify::End,
        }
    }
}

/// Requested width of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ColumnWidth {
    /// Share leftover space equally with other flexible columns.
    #[default]
    Auto,
    /// Exactly this many cells.
    Fixed(usize),
    /// Relative weight, written as `"N%"`.
    Percent(u32),
    /// A width string that could not be understood. Sized like `Auto`.
    Invalid(String),
}

// Leading integer part is the weight, so "33.3%" weighs 33.
static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)(?:\.\d*)?\s*%\s*$").expect("invalid regex"));

static STRICT_PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)%$").expect("invalid regex"));

impl ColumnWidth {
    /// Returns true for widths that size as a flexible track.
    #[must_use]
    pub const fn is_flexible(&self) -> bool {
        !matches!(self, Self::Fixed(_))
    }

    fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("auto") {
            return Self::Auto;
        }
        PERCENT_RE
            .captures(raw)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .map_or_else(|| Self::Invalid(raw.to_string()), Self::Percent)
    }
}

impl From<usize> for ColumnWidth {
    fn from(width: usize) -> Self {
        Self::Fixed(width)
    }
}

/// Lenient conversion: `"auto"` and `"N%"` are understood, everything else
/// becomes [`ColumnWidth::Invalid`].
impl From<&str> for ColumnWidth {
    fn from(raw: &str) -> Self {
        Self::parse_lenient(raw)
    }
}

impl From<String> for ColumnWidth {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

/// Strict parsing for callers that want to reject bad widths up front.
impl FromStr for ColumnWidth {
    type Err = WidthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            return Ok(Self::Auto);
        }
        if let Some(caps) = STRICT_PERCENT_RE.captures(s) {
            return caps[1]
                .parse::<u32>()
                .map(Self::Percent)
                .map_err(|_| WidthParseError::InvalidPercent(s.to_string()));
        }
        if s.ends_with('%') {
            return Err(WidthParseError::InvalidPercent(s.to_string()));
        }
        Err(WidthParseError::Unrecognized(s.to_string()))
    }
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Invalid(raw) => write!(f, "{raw}"),
        }
    }
}

/// Error type for strict column width parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidthParseError {
    /// Neither `"auto"` nor a percentage.
    Unrecognized(String),
    /// Ends in `%` but is not a whole non-negative number that fits in `u32`.
    InvalidPercent(String),
}

impl fmt::Display for WidthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(s) => write!(f, "Unrecognized column width: {s}"),
            Self::InvalidPercent(s) => write!(f, "Invalid percentage width: {s}"),
        }
    }
}

impl std::error::Error for WidthParseError {}

/// A flexible grid track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlexTrack {
    /// Share of the leftover width, relative to the other flexible tracks.
    pub weight: u32,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

/// Sizing instruction for one grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridTrack {
    Fixed(usize),
    Flex(FlexTrack),
}

impl GridTrack {
    /// An unclamped flexible track.
    #[must_use]
    pub const fn flex(weight: u32) -> Self {
        Self::Flex(FlexTrack {
            weight,
            min: None,
            max: None,
        })
    }
}

/// Produces the content of a body cell from its value, row and in-page index.
pub type CellRenderer<R> = Arc<dyn Fn(Option<&Value>, &R, usize) -> CellContent + Send + Sync>;

/// Definition of one table column.
pub struct ColumnDef<R> {
    /// Unique key; also the default field looked up in each row.
    pub key: String,
    /// Header label. Falls back to the key.
    pub title: Option<String>,
    /// Field to read instead of `key`.
    pub data_key: Option<String>,
    pub width: ColumnWidth,
    pub min_width: Option<usize>,
    pub max_width: Option<usize>,
    pub align: Align,
    /// Advisory only: the table never sorts rows itself.
    pub sortable: bool,
    pub render: Option<CellRenderer<R>>,
}

impl<R> ColumnDef<R> {
    /// Create an auto-width, left-aligned column for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            data_key: None,
            width: ColumnWidth::Auto,
            min_width: None,
            max_width: None,
            align: Align::Left,
            sortable: false,
            render: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn data_key(mut self, data_key: impl Into<String>) -> Self {
        self.data_key = Some(data_key.into());
        self
    }

    /// Set the width from a cell count or a width string.
    #[must_use]
    pub fn width(mut self, width: impl Into<ColumnWidth>) -> Self {
        self.width = width.into();
        self
    }

    /// Minimum width of a flexible column.
    #[must_use]
    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Maximum width of a flexible column.
    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Render body cells with a custom function.
    #[must_use]
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &R, usize) -> CellContent + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Header label: the title, or the key when no title is set.
    #[must_use]
    pub fn header_label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }

    /// Field name used for value lookup.
    #[must_use]
    pub fn field_key(&self) -> &str {
        self.data_key.as_deref().unwrap_or(&self.key)
    }

    /// The grid track this column occupies.
    #[must_use]
    pub fn grid_track(&self) -> GridTrack {
        let weight = match &self.width {
            ColumnWidth::Fixed(n) => return GridTrack::Fixed(*n),
            ColumnWidth::Auto => 1,
            ColumnWidth::Percent(p) => *p,
            ColumnWidth::Invalid(raw) => {
                log::debug!("column {:?}: malformed width {raw:?}, using auto", self.key);
                1
            }
        };
        GridTrack::Flex(FlexTrack {
            weight,
            min: self.min_width,
            max: self.max_width,
        })
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            data_key: self.data_key.clone(),
            width: self.width.clone(),
            min_width: self.min_width,
            max_width: self.max_width,
            align: self.align,
            sortable: self.sortable,
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("data_key", &self.data_key)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Convert column widths to grid tracks, preserving order.
#[must_use]
pub fn columns_to_grid_template<R>(columns: &[ColumnDef<R>]) -> Vec<GridTrack> {
    columns.iter().map(ColumnDef::grid_track).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    type Row = Map<String, Value>;

    fn col(key: &str) -> ColumnDef<Row> {
        ColumnDef::new(key)
    }

    #[test]
    fn test_fixed_widths() {
        let columns = [col("a").width(20), col("b").width(10)];
        assert_eq!(
            columns_to_grid_template(&columns),
            vec![GridTrack::Fixed(20), GridTrack::Fixed(10)]
        );
    }

    #[test]
    fn test_auto_and_default() {
        let columns = [col("a"), col("b").width("auto")];
        assert_eq!(
            columns_to_grid_template(&columns),
            vec![GridTrack::flex(1), GridTrack::flex(1)]
        );
    }

    #[test]
    fn test_percent_is_weight() {
        let columns = [col("a").width("50%"), col("b").width("25%"), col("c").width("0%")];
        assert_eq!(
            columns_to_grid_template(&columns),
            vec![GridTrack::flex(50), GridTrack::flex(25), GridTrack::flex(0)]
        );
    }

    #[test]
    fn test_mixed_preserves_order() {
        let columns = [col("a").width(20), col("b"), col("c").width(10)];
        assert_eq!(
            columns_to_grid_template(&columns),
            vec![GridTrack::Fixed(20), GridTrack::flex(1), GridTrack::Fixed(10)]
        );
    }

    #[test]
    fn test_malformed_is_weight_one() {
        let columns = [col("a").width("wide"), col("b").width("20"), col("c").width("x%")];
        assert_eq!(
            columns_to_grid_template(&columns),
            vec![GridTrack::flex(1); 3]
        );
    }

    #[test]
    fn test_flex_carries_clamps() {
        let columns = [col("a").min_width(4).max_width(9)];
        assert_eq!(
            columns_to_grid_template(&columns),
            vec![GridTrack::Flex(FlexTrack {
                weight: 1,
                min: Some(4),
                max: Some(9),
            })]
        );
    }

    #[test]
    fn test_empty_columns() {
        assert!(columns_to_grid_template::<Row>(&[]).is_empty());
    }

    #[test]
    fn test_lenient_width_conversion() {
        assert_eq!(ColumnWidth::from("33.3%"), ColumnWidth::Percent(33));
        assert_eq!(ColumnWidth::from(" 40 %"), ColumnWidth::Percent(40));
        assert_eq!(ColumnWidth::from("AUTO"), ColumnWidth::Auto);
        assert_eq!(
            ColumnWidth::from("-5%"),
            ColumnWidth::Invalid("-5%".to_string())
        );
        assert_eq!(
            ColumnWidth::from("99999999999%"),
            ColumnWidth::Invalid("99999999999%".to_string())
        );
    }

    #[test]
    fn test_strict_width_parse() {
        assert_eq!("auto".parse::<ColumnWidth>(), Ok(ColumnWidth::Auto));
        assert_eq!("50%".parse::<ColumnWidth>(), Ok(ColumnWidth::Percent(50)));
        assert_eq!(
            "50.5%".parse::<ColumnWidth>(),
            Err(WidthParseError::InvalidPercent("50.5%".to_string()))
        );
        assert_eq!(
            "wide".parse::<ColumnWidth>(),
            Err(WidthParseError::Unrecognized("wide".to_string()))
        );
    }

    #[test]
    fn test_header_label_and_field_key() {
        let plain = col("name");
        assert_eq!(plain.header_label(), "name");
        assert_eq!(plain.field_key(), "name");

        let titled = col("display").title("Full Name").data_key("name");
        assert_eq!(titled.header_label(), "Full Name");
        assert_eq!(titled.field_key(), "name");
    }

    #[test]
    fn test_align_to_justify() {
        assert_eq!(Justify::from(Align::Left), Justify::Start);
        assert_eq!(Justify::from(Align::Center), Justify::Center);
        assert_eq!(Justify::from(Align::Right), Justify::End);
    }

    #[test]
    fn test_debug_hides_renderer() {
        let column = col("a").render(|_, _, _| CellContent::from("x"));
        let debug = format!("{column:?}");
        assert!(debug.contains("<fn>"));
    }
}
