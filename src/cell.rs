//! Row access and cell value formatting.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::column::ColumnDef;
use crate::layout::Node;

/// A row of table data: a mapping from field names to values.
///
/// The table only reads rows; it never mutates or clones them.
pub trait RowData {
    /// Look up a field. Absent fields return `None`.
    fn field(&self, key: &str) -> Option<&Value>;
}

impl RowData for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Objects expose their fields; any other value has none.
impl RowData for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(key))
    }
}

impl<S: std::hash::BuildHasher> RowData for HashMap<String, Value, S> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl RowData for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<T: RowData + ?Sized> RowData for &T {
    fn field(&self, key: &str) -> Option<&Value> {
        (**self).field(key)
    }
}

/// What a cell displays.
#[derive(Debug, Clone)]
pub enum CellContent {
    /// Text, aligned by the column and truncated to the track width.
    Plain(String),
    /// A caller-built node, placed in the cell as is.
    Custom(Node),
}

impl CellContent {
    /// The text of plain content.
    #[must_use]
    pub fn plain_text(&self) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Custom(_) => None,
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for CellContent {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<String> for CellContent {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<Node> for CellContent {
    fn from(node: Node) -> Self {
        Self::Custom(node)
    }
}

/// The value a column shows for a row: the `data_key` field if set, else the
/// `key` field.
#[must_use]
pub fn extract_value<'r, R: RowData>(row: &'r R, column: &ColumnDef<R>) -> Option<&'r Value> {
    row.field(column.field_key())
}

/// Produce the content of a body cell.
///
/// A column renderer's result is used verbatim. Otherwise the value is shown
/// as text: missing and `null` as empty, strings without quotes, and any other
/// value in its compact JSON form.
#[must_use]
pub fn format_value<R>(
    value: Option<&Value>,
    row: &R,
    row_index: usize,
    column: &ColumnDef<R>,
) -> CellContent {
    if let Some(render) = &column.render {
        return render(value, row, row_index);
    }
    CellContent::Plain(value_to_string(value))
}

/// Stringify a cell value without a renderer.
#[must_use]
pub fn value_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
