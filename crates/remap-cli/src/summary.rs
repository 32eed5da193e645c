use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use remap_core::{FileSession, HeaderComparison, MatchedEntry, ToastState};

use crate::commands::ReplayReport;

pub fn print_comparison(comparison: &HeaderComparison) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Missing"),
        header_cell("Extra"),
        header_cell("Matched"),
    ]);
    apply_table_style(&mut table);

    let rows = comparison
        .missing
        .len()
        .max(comparison.extra.len())
        .max(comparison.matched.len());
    for index in 0..rows {
        table.add_row(vec![
            list_cell(&comparison.missing, index, Color::Yellow),
            list_cell(&comparison.extra, index, Color::Magenta),
            list_cell(&comparison.matched, index, Color::Green),
        ]);
    }
    println!("{table}");

    if comparison.is_exact() {
        println!("Headers match the guideline.");
    } else {
        println!(
            "{} missing, {} extra, {} matched",
            comparison.missing.len(),
            comparison.extra.len(),
            comparison.matched.len()
        );
    }
}

pub fn print_session(session: &FileSession, report: &ReplayReport) {
    println!("File: {} ({})", session.filename(), session.file_id());

    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Matched"), header_cell("Origin")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, entry) in session.matched().iter().enumerate() {
        let (origin, color) = match entry {
            MatchedEntry::Preset(_) => ("preset", Color::DarkGrey),
            MatchedEntry::Mapped { .. } => ("mapped", Color::Green),
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(entry.label()),
            Cell::new(origin).fg(color),
        ]);
    }
    println!("{table}");

    if !session.extra().is_empty() {
        println!("Unmapped extra: {}", session.extra().join(", "));
    }
    if !session.missing().is_empty() {
        println!("Still missing: {}", session.missing().join(", "));
    }
    for (extra, missing) in &report.skipped {
        println!("Skipped: {extra} -> {missing}");
    }
    if report.undone > 0 {
        println!("Undone: {}", report.undone);
    }
}

/// Matched list as plain lines, tagged by origin.
pub fn format_matched_lines(session: &FileSession) -> String {
    session
        .matched()
        .iter()
        .map(|entry| {
            let tag = if entry.is_new() { "new" } else { "preset" };
            format!("[{tag}] {}", entry.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Notification as a single `kind: message` line.
pub fn format_toast(toast: &ToastState) -> String {
    format!("{}: {}", toast.kind.label(), toast.message)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn list_cell(items: &[String], index: usize, color: Color) -> Cell {
    match items.get(index) {
        Some(item) => Cell::new(item).fg(color),
        None => Cell::new(""),
    }
}
