//! Sort state and header indicators.
//!
//! The table only displays sort state; it never reorders rows. Hosts that
//! keep their rows in memory can use [`SortState::toggle`] and [`sort_rows`]
//! to apply the state themselves before handing the rows to the table.

use std::cmp::Ordering;

use serde_json::Value;

use crate::cell::RowData;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    None,
}

impl SortDirection {
    /// Next direction in the click cycle: ascending, descending, unsorted.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::None,
            Self::None => Self::Ascending,
        }
    }

    /// Header suffix for this direction.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => " \u{25B2}",
            Self::Descending => " \u{25BC}",
            Self::None => "",
        }
    }
}

/// The column the host considers sorted, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    #[must_use]
    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    #[must_use]
    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Advance the state after a header click on `key`.
    ///
    /// Clicking the sorted column cycles its direction; clicking another
    /// column starts it at ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key == key {
            self.direction = self.direction.cycle();
        } else {
            key.clone_into(&mut self.key);
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Suffix for a column header: `" ▲"` or `" ▼"` when `key` is the sorted
/// column, empty otherwise.
#[must_use]
pub fn sort_indicator(key: &str, state: Option<&SortState>) -> &'static str {
    match state {
        Some(state) if state.key == key => state.direction.indicator(),
        _ => "",
    }
}

/// Stably sort rows by the state's key.
///
/// Numbers compare numerically, strings lexically, booleans `false < true`.
/// A column mixing kinds is grouped by kind first: booleans, numbers,
/// strings, arrays, then objects (the reverse when descending). Arrays and
/// objects keep their relative order. Missing and `null` values sort last in
/// either direction. `SortDirection::None` leaves the rows untouched.
pub fn sort_rows<R: RowData>(rows: &mut [R], state: &SortState) {
    let descending = match state.direction {
        SortDirection::None => return,
        SortDirection::Ascending => false,
        SortDirection::Descending => true,
    };

    rows.sort_by(|a, b| {
        let a = a.field(&state.key).filter(|v| !v.is_null());
        let b = b.field(&state.key).filter(|v| !v.is_null());
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ordering = compare_values(a, b);
                if descending { ordering.reverse() } else { ordering }
            }
        }
    });
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over non-null values: by kind, then within the kind.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}
