use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use airr_model::{FAILED_FILES_LOG, ProcessingOutcome, RunReport};

pub fn print_summary(report: &RunReport, output_dir: &Path) {
    println!("Output: {}", output_dir.display());
    println!("{}", summary_table(report));
    if report.has_failures() {
        println!();
        println!("Failures (see {}):", output_dir.join(FAILED_FILES_LOG).display());
        println!("{}", failure_table(report));
    }
}

fn summary_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);

    for outcome in report.outcomes() {
        match outcome {
            ProcessingOutcome::Success {
                file_name,
                output_path,
                rows,
            } => {
                let output = output_path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                table.add_row(vec![
                    Cell::new(file_name),
                    Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
                    Cell::new(rows),
                    Cell::new(output),
                ]);
            }
            ProcessingOutcome::Failure { file_name, .. } => {
                table.add_row(vec![
                    Cell::new(file_name),
                    Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
        }
    }

    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.failure_count(), report.success_count()),
        Cell::new(report.total_rows()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn failure_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("File"), header_cell("Error")]);
    apply_table_style(&mut table);
    for (file_name, message) in report.failures() {
        table.add_row(vec![Cell::new(file_name), Cell::new(message).fg(Color::Red)]);
    }
    table
}

fn count_cell(failed: usize, converted: usize) -> Cell {
    let text = format!("{converted} ok / {failed} failed");
    if failed > 0 {
        Cell::new(text).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new(text).fg(Color::Green).add_attribute(Attribute::Bold)
    }
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn tables_list_every_outcome() {
        let mut report = RunReport::new();
        report.push(ProcessingOutcome::success("S1.csv.gz", PathBuf::from("out/S1.parquet"), 12));
        report.push(ProcessingOutcome::failure("S2.csv.gz", "truncated input"));

        let summary = summary_table(&report).to_string();
        assert!(summary.contains("S1.csv.gz"));
        assert!(summary.contains("S1.parquet"));
        assert!(summary.contains("S2.csv.gz"));
        assert!(summary.contains("1 ok / 1 failed"));

        let failures = failure_table(&report).to_string();
        assert!(failures.contains("truncated input"));
        assert!(!failures.contains("S1.csv.gz"));
    }
}
