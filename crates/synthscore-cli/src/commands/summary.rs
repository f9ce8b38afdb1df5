//! The `synthscore summary` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use synthscore_core::parser::{parse_result, validate_result};
use synthscore_core::statistics::{aggregate, Summary, ThresholdTable};
use synthscore_report::config::load_config_from;

pub fn execute(input: PathBuf, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let result = parse_result(&input)?;
    let warnings = validate_result(&result)
        .with_context(|| format!("cannot summarize {}", input.display()))?;
    super::print_warnings(&warnings);
    let summary = aggregate(&result, &config.thresholds)?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "text" => print_summary(&summary),
        other => anyhow::bail!("unknown summary format: {other}"),
    }

    Ok(())
}

fn print_summary(summary: &Summary) {
    println!("Student: {} ({})", summary.student_name, summary.student_id);
    println!(
        "Score: {} / {} ({:.1}%)",
        summary.correct_count, summary.total_questions, summary.percentage
    );
    println!("Status: {}", summary.communication_status.label);
    println!(
        "Performance: {}",
        ThresholdTable::performance_levels().label_for(summary.percentage)
    );

    let mut table = Table::new();
    table.set_header(vec!["Category", "Correct", "Incorrect", "Total"]);
    for c in &summary.categories {
        table.add_row(vec![
            Cell::new(&c.category),
            Cell::new(c.correct),
            Cell::new(c.incorrect()),
            Cell::new(c.total),
        ]);
    }
    println!("\n{table}");

    let focus = summary.focus_areas();
    if !focus.is_empty() {
        println!("\nFocus areas: {}", focus.join(", "));
    }
}
