use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use formfill_cli::types::{RowReport, RowStatus, RunReport};
use formfill_map::ResolutionIssue;
use formfill_pdf::FieldInfo;

pub fn print_summary(report: &RunReport) {
    println!("Input: {}", report.input.display());
    if let Some(sheet) = &report.sheet {
        println!("Sheet: {sheet}");
    }
    println!("Template: {}", report.template.display());
    println!("Output: {}", report.output_dir.display());
    if report.dry_run {
        println!("Dry run: no documents written");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Output"),
        header_cell("Status"),
        header_cell("Applied"),
        header_cell("Unmatched"),
        header_cell("Issues"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    let mut total_applied = 0usize;
    let mut total_unmatched = 0usize;
    for row in &report.rows {
        total_applied += row.applied;
        total_unmatched += row.unmatched.len();
        table.add_row(vec![
            Cell::new(row.row),
            output_cell(row),
            status_cell(&row.status),
            Cell::new(row.applied),
            count_cell(row.unmatched.len(), Color::DarkYellow),
            count_cell(row.issues.len(), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} of {} documents",
            report.succeeded(),
            report.rows.len()
        ))
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold),
        count_cell(report.failed(), Color::Red).add_attribute(Attribute::Bold),
        Cell::new(total_applied).add_attribute(Attribute::Bold),
        count_cell(total_unmatched, Color::DarkYellow).add_attribute(Attribute::Bold),
        count_cell(report.issue_count(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_issue_table(report);

    let failures: Vec<(usize, &str)> = report
        .rows
        .iter()
        .filter_map(|row| match &row.status {
            RowStatus::Failed(message) => Some((row.row, message.as_str())),
            _ => None,
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (row, message) in failures {
            eprintln!("- row {row}: {message}");
        }
    }
}

fn print_issue_table(report: &RunReport) {
    let issues: Vec<(usize, &ResolutionIssue)> = report
        .rows
        .iter()
        .flat_map(|row| row.issues.iter().map(move |issue| (row.row, issue)))
        .collect();
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Kind"),
        header_cell("Column"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (row, issue) in issues {
        table.add_row(vec![
            Cell::new(row),
            Cell::new(issue.code()).fg(Color::Yellow),
            Cell::new(issue.column()),
            Cell::new(issue.to_string()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

/// Prints a template's form fields.
pub fn print_fields(fields: &[FieldInfo]) {
    if fields.is_empty() {
        println!("No form fields found");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Name"),
        header_cell("Type"),
        header_cell("Flags"),
        header_cell("States"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for field in fields {
        let states = if field.states.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(field.states.join(", "))
        };
        table.add_row(vec![
            dim_cell(&field.qualified_name),
            Cell::new(&field.partial_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(field.field_type.clone()),
            Cell::new(field.flags),
            states,
            Cell::new(&field.value),
        ]);
    }
    println!("{table}");
}

fn output_cell(row: &RowReport) -> Cell {
    let name = row
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| row.path.display().to_string());
    match row.status {
        RowStatus::Failed(_) => dim_cell(name),
        _ => Cell::new(name),
    }
}

fn status_cell(status: &RowStatus) -> Cell {
    match status {
        RowStatus::Written => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        RowStatus::Planned => Cell::new("planned").fg(Color::Cyan),
        RowStatus::Failed(_) => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Percentage(55)),
        ]);
    }
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
