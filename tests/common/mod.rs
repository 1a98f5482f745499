//! Common test utilities and logging infrastructure
//!
//! Import this module in integration tests:
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=rich_table::layout=trace` - Module-specific tracing
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing

#![allow(dead_code)]

use std::sync::Once;

use serde_json::{Map, Value};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rich_table::prelude::*;

static INIT: Once = Once::new();

/// Row type used throughout the integration tests.
pub type Row = Map<String, Value>;

/// Initialize test logging infrastructure.
///
/// Library records emitted through `log` are bridged into the subscriber, so
/// `RUST_LOG=rich_table=debug` shows border and width fallbacks. Calling it
/// more than once is safe.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rich_table=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_ansi(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// A test span guard that logs entry; exit happens on drop.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

// =============================================================================
// Fixtures
// =============================================================================

/// Convert a JSON array of objects into rows. Non-objects are skipped.
pub fn rows(values: Value) -> Vec<Row> {
    match values {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// A single-field row.
pub fn row(key: &str, value: Value) -> Row {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    map
}

/// `{"id": 1}` .. `{"id": n}`.
pub fn numbered(n: usize) -> Vec<Row> {
    (1..=n).map(|i| row("id", Value::from(i))).collect()
}

/// Two people with names and ages.
pub fn people() -> Vec<Row> {
    rows(serde_json::json!([
        {"name": "Alice", "age": 28},
        {"name": "Bob", "age": 32},
    ]))
}

/// Name (10 cells) and right-aligned age (5 cells).
pub fn people_columns() -> Vec<ColumnDef<Row>> {
    vec![
        ColumnDef::new("name").title("Name").width(10),
        ColumnDef::new("age").title("Age").width(5).align(Align::Right),
    ]
}

/// Cell width of every line of a rendering.
pub fn line_widths(plain: &str) -> Vec<usize> {
    plain.lines().map(rich_table::cells::cell_len).collect()
}
