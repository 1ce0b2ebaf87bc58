use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use fieldmap_model::{Aggregation, FieldRole, MappingEntry};
use fieldmap_validate::{BatchReport, Issue, QualityTier, Severity, ValidationOutcome};

use crate::types::{ClassifyResult, ValidateResult};

/// Review items listed in full; the rest are only counted.
const REVIEW_LIMIT: usize = 20;

pub fn print_classify_summary(result: &ClassifyResult) {
    println!("Sources: {}", result.sources.join(", "));
    for warning in &result.store_warnings {
        eprintln!("warning: skipped {}: {}", warning.path.display(), warning.message);
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Canonical"),
        header_cell("Group"),
        header_cell("Kind"),
        header_cell("Role"),
        header_cell("Agg"),
        header_cell("Stage"),
        header_cell("Notes"),
    ]);
    apply_entry_table_style(&mut table);
    for entry in &result.batch.entries {
        table.add_row(entry_row(entry));
    }
    println!("{table}");

    let batch = &result.batch;
    println!(
        "Resolved {} of {} fields",
        batch.resolved_count(),
        batch.entries.len()
    );
    if !batch.unresolved.is_empty() {
        eprintln!("Unresolved:");
        for name in &batch.unresolved {
            eprintln!("- {name}");
        }
    }

    if let Some(report) = &result.report {
        println!();
        print_report(report);
    }
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &result.learned {
        println!("Learned: {}", path.display());
    }
    if let Some(error) = &result.learn_error {
        eprintln!("error: learn failed: {error}");
    }
}

pub fn print_validate_summary(result: &ValidateResult) {
    print_report(&result.report);
    if let Some(path) = &result.output {
        println!("Report: {}", path.display());
    }
}

fn entry_row(entry: &MappingEntry) -> Vec<Cell> {
    let measure = entry.role == FieldRole::Measure;
    let role = if measure {
        Cell::new(entry.role).fg(Color::Green)
    } else {
        Cell::new(entry.role)
    };
    let aggregation = if entry.aggregation == Aggregation::None {
        dim_cell(entry.aggregation)
    } else {
        Cell::new(entry.aggregation)
    };
    let notes = if entry.notes.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(entry.notes_text())
    };
    let canonical = if entry.is_resolved {
        Cell::new(&entry.canonical_name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("unresolved").fg(Color::Red)
    };
    vec![
        Cell::new(&entry.source_name),
        canonical,
        Cell::new(entry.group),
        Cell::new(entry.kind),
        role,
        aggregation,
        dim_cell(entry.origin),
        notes,
    ]
}

fn print_report(report: &BatchReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Canonical"),
        header_cell("Score"),
        header_cell("Tier"),
        header_cell("Issues"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for outcome in &report.outcomes {
        table.add_row(vec![
            Cell::new(&outcome.source_name),
            Cell::new(&outcome.canonical_name),
            Cell::new(outcome.overall_score),
            tier_cell(outcome.quality_tier),
            count_cell(outcome.issues.len(), Color::Red),
            count_cell(outcome.warnings.len(), Color::Yellow),
        ]);
    }
    println!("{table}");

    let summary = &report.summary;
    let mut totals = Table::new();
    totals.set_header(vec![
        header_cell("Total"),
        header_cell("Mean"),
        header_cell("Excellent"),
        header_cell("Good"),
        header_cell("Fair"),
        header_cell("Poor"),
        header_cell("Critical"),
        header_cell("Review"),
    ]);
    apply_table_style(&mut totals);
    totals.add_row(vec![
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", summary.mean_score)).add_attribute(Attribute::Bold),
        count_cell(summary.count(QualityTier::Excellent), Color::Green),
        count_cell(summary.count(QualityTier::Good), Color::Cyan),
        count_cell(summary.count(QualityTier::Fair), Color::Yellow),
        count_cell(summary.count(QualityTier::Poor), Color::Red),
        count_cell(summary.critical_count, Color::Red),
        count_cell(summary.needs_review.len(), Color::Yellow),
    ]);
    println!("{totals}");

    print_review_table(report);
}

fn print_review_table(report: &BatchReport) {
    let flagged: Vec<&ValidationOutcome> = report
        .outcomes
        .iter()
        .filter(|outcome| {
            report
                .summary
                .needs_review
                .iter()
                .any(|item| item.source_name == outcome.source_name)
        })
        .collect();
    if flagged.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Canonical"),
        header_cell("Severity"),
        header_cell("Check"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for outcome in flagged.iter().take(REVIEW_LIMIT) {
        let mut issues: Vec<&Issue> = outcome.all_issues().collect();
        issues.sort_by_key(|issue| issue.severity());
        for issue in issues {
            table.add_row(vec![
                Cell::new(&outcome.source_name),
                Cell::new(&outcome.canonical_name),
                severity_cell(issue.severity()),
                Cell::new(issue.check().label()),
                Cell::new(issue.to_string()),
            ]);
        }
        for suggestion in &outcome.suggestions {
            table.add_row(vec![
                Cell::new(&outcome.source_name),
                Cell::new(&outcome.canonical_name),
                dim_cell("-"),
                dim_cell("suggest"),
                Cell::new(suggestion).fg(Color::Green),
            ]);
        }
    }
    println!();
    println!("Needs review:");
    println!("{table}");
    if flagged.len() > REVIEW_LIMIT {
        println!("({} of {} entries shown)", REVIEW_LIMIT, flagged.len());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_entry_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn tier_cell(tier: QualityTier) -> Cell {
    let color = match tier {
        QualityTier::Excellent => Color::Green,
        QualityTier::Good => Color::Cyan,
        QualityTier::Fair => Color::Yellow,
        QualityTier::Poor => Color::Red,
    };
    Cell::new(tier).fg(color)
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Critical => Cell::new("CRITICAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub(crate) fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
