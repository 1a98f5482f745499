//! Basic example demonstrating rich_table functionality.
//!
//! Run with: cargo run --example basic --features tracing

use rich_table::prelude::*;
use serde_json::{Map, Value, json};

type Row = Map<String, Value>;

fn rows(values: Value) -> Vec<Row> {
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

/// The table never measures the terminal; the caller picks the width.
fn terminal_width() -> usize {
    crossterm::terminal::size()
        .ok()
        .map(|(w, _)| usize::from(w))
        .filter(|&w| w > 0)
        .unwrap_or(80)
}

fn main() {
    #[cfg(feature = "tracing")]
    let _ = rich_table::logging::init(tracing::Level::DEBUG);

    let width = terminal_width().min(100);
    let color_system = detect_color_system();
    let print = |title: &str, table: &Table<'_, Row>| {
        println!("{title}");
        print!("{}", table.render_ansi(width, color_system));
        println!();
    };

    let mut data = rows(json!([
        {"name": "Alice", "role": "admin", "age": 28, "active": true},
        {"name": "Bob", "role": "developer", "age": 32, "active": false},
        {"name": "Carol", "role": "designer", "age": 41, "active": true},
        {"name": "Dave", "role": "developer", "age": null, "active": true},
    ]));

    let columns = || {
        vec![
            ColumnDef::new("name").title("Name").width("40%").sortable(true),
            ColumnDef::new("role").title("Role").align(Align::Center),
            ColumnDef::new("age")
                .title("Age")
                .width(5)
                .align(Align::Right)
                .sortable(true),
            ColumnDef::new("active").title("Active").width(8).render(|value, _: &Row, _| {
                if value == Some(&Value::Bool(true)) {
                    Node::styled_text("yes", Style::new().color(Color::Ansi(2))).into()
                } else {
                    Node::styled_text("no", Style::new().dim()).into()
                }
            }),
        ]
    };

    // Sorting happens outside the table; it only shows the indicator.
    let mut sort = SortState::ascending("age");
    rich_table::sort::sort_rows(&mut data, &sort);
    print(
        "Sorted by age:",
        &Table::new(&data, columns())
            .border_style(BorderStyle::Round)
            .header_style(Style::parse("bold cyan").unwrap_or_default())
            .sort_state(sort.clone()),
    );

    sort.toggle("age");
    rich_table::sort::sort_rows(&mut data, &sort);
    print(
        "Clicked again:",
        &Table::new(&data, columns())
            .sort_state(sort)
            .row_style(|_, index| {
                if index % 2 == 1 {
                    Style::new().dim()
                } else {
                    Style::new()
                }
            }),
    );

    let many: Vec<Row> = (1..=42)
        .map(|i| {
            let mut row = Map::new();
            row.insert("id".to_string(), Value::from(i));
            row.insert("square".to_string(), Value::from(i * i));
            row
        })
        .collect();
    let page = PaginationConfig::new(1, 5, many.len()).next();
    print(
        "Second page:",
        &Table::new(
            &many,
            vec![
                ColumnDef::new("id").title("#").width(4).align(Align::Right),
                ColumnDef::new("square").title("Square").align(Align::Right),
            ],
        )
        .border_style("double")
        .pagination(page),
    );

    let nothing: Vec<Row> = Vec::new();
    print(
        "Empty:",
        &Table::new(&nothing, columns()).empty_text("Nobody here yet"),
    );

    print(
        "Borderless:",
        &Table::new(&data, columns()).border_style(BorderStyle::None),
    );
}
