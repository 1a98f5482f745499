//! Integration tests for the logging infrastructure.
//!
//! Run with: RUST_LOG=debug cargo test --test logging_test -- --nocapture

mod common;

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use common::{Row, init_test_logging, people, people_columns, test_phase};
use rich_table::prelude::*;

/// Records the message of every event it sees.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<String>>>);

impl Capture {
    fn messages(&self) -> Vec<String> {
        self.0.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        if let Ok(mut messages) = self.0.lock() {
            messages.push(visitor.0);
        }
    }
}

/// Run `f` with a capturing subscriber as the thread default.
fn capture<F: FnOnce()>(f: F) -> Vec<String> {
    // Installs the log -> tracing bridge.
    init_test_logging();
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture.messages()
}

#[test]
fn test_logging_infrastructure_works() {
    init_test_logging();

    {
        let _setup = test_phase("setup");
        tracing::debug!("Setting up test");
    }

    {
        let _execute = test_phase("execute");
        let data = people();
        let output = Table::new(&data, people_columns()).render_plain(40);
        tracing::info!(lines = output.lines().count(), "Rendered table");
    }

    {
        let _verify = test_phase("verify");
        tracing::debug!("Verification complete");
    }
}

#[test]
fn test_duplicate_keys_are_logged() {
    let messages = capture(|| {
        let data = people();
        let columns: Vec<ColumnDef<Row>> = vec![ColumnDef::new("name"), ColumnDef::new("name")];
        let _ = Table::new(&data, columns).compose();
    });
    tracing::debug!(?messages, "captured");
    assert!(
        messages.iter().any(|m| m.contains("duplicate column key")),
        "{messages:?}"
    );
}

#[test]
fn test_unique_keys_are_quiet() {
    let messages = capture(|| {
        let data = people();
        let _ = Table::new(&data, people_columns()).compose();
    });
    assert!(!messages.iter().any(|m| m.contains("duplicate")), "{messages:?}");
}

#[test_log::test]
fn test_fallbacks_still_render() {
    let data = people();
    let columns: Vec<ColumnDef<Row>> = vec![
        ColumnDef::new("name").width("wide"),
        ColumnDef::new("age").width("-5%"),
    ];
    let output = Table::new(&data, columns)
        .border_style("sparkly")
        .render_plain(21);
    assert_eq!(
        output.lines().next(),
        Some("┌─────────┬─────────┐")
    );
}
