use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dvf_cli::{RunReport, StageRecord};

pub fn print_summary(report: &RunReport) {
    println!("Year: {}", report.year);
    if let Some(path) = &report.output {
        println!("Output: {}", path.display());
    }
    if let Some(target) = &report.imported_into {
        println!("Imported into: {target}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("Dropped"),
        header_cell("Time (ms)"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut previous_rows: Option<usize> = None;
    let mut total_ms = 0u128;
    for record in &report.stages {
        let dropped = match (previous_rows, record.rows) {
            (Some(before), Some(after)) => Some(before.saturating_sub(after)),
            _ => None,
        };
        if record.rows.is_some() {
            previous_rows = record.rows;
        }
        total_ms += record.duration.as_millis();
        table.add_row(stage_row(record, dropped));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.final_rows()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_ms).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn stage_row(record: &StageRecord, dropped: Option<usize>) -> Vec<Cell> {
    vec![
        Cell::new(record.stage.as_str()),
        record.rows.map_or_else(|| dim_cell("-"), Cell::new),
        match dropped {
            Some(value) if value > 0 => Cell::new(value).fg(Color::Yellow),
            Some(value) => dim_cell(value),
            None => dim_cell("-"),
        },
        Cell::new(record.duration.as_millis()),
    ]
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
