use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mods_cli::pipeline::{RecordStatus, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Output: {}", result.output_dir.display());
    if result.dry_run {
        println!("Dry run: no files written");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("File"),
        header_cell("Fields"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for outcome in &result.records {
        let file = if outcome.output_name.is_empty() {
            "-".to_string()
        } else {
            outcome.output_name.clone()
        };
        table.add_row(vec![
            Cell::new(&outcome.mapped_id),
            Cell::new(file),
            Cell::new(outcome.fields),
            status_cell(&outcome.status),
        ]);
    }
    println!("{table}");
    let failed: Vec<&str> = result
        .records
        .iter()
        .filter_map(|outcome| match &outcome.status {
            RecordStatus::Failed(reason) => Some(reason.as_str()),
            _ => None,
        })
        .collect();
    println!(
        "{} written, {} failed ({} ms)",
        result.written_count(),
        failed.len(),
        result.elapsed_ms
    );
    if !failed.is_empty() {
        eprintln!("Errors:");
        for reason in failed {
            eprintln!("- {reason}");
        }
    }
}

fn status_cell(status: &RecordStatus) -> Cell {
    match status {
        RecordStatus::Written => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        RecordStatus::Assembled => Cell::new("ok").fg(Color::Cyan),
        RecordStatus::Failed(_) => Cell::new("✗")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
