//! The `synthscore render` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use synthscore_core::parser::parse_result;
use synthscore_report::config::load_config_from;
use synthscore_report::export::ExportFormat;
use synthscore_report::pipeline::synthesize;

pub fn execute(
    input: PathBuf,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
    timestamp: Option<String>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let formats = ExportFormat::parse_list(&format).map_err(anyhow::Error::msg)?;
    let exported_at = match &timestamp {
        Some(ts) => DateTime::parse_from_rfc3339(ts)
            .with_context(|| format!("invalid --timestamp '{ts}', expected RFC 3339"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let result = parse_result(&input)?;
    let synthesis = synthesize(&result, &config, &formats, exported_at)
        .with_context(|| format!("failed to render {}", input.display()))?;

    super::print_warnings(&synthesis.warnings);

    let summary = &synthesis.summary;
    eprintln!(
        "{} ({}): {}/{} correct, {} page(s), {}",
        summary.student_name,
        summary.student_id,
        summary.correct_count,
        summary.total_questions,
        synthesis.page_count,
        summary.communication_status.label
    );

    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
    tracing::debug!(output_dir = %output_dir.display(), ?formats, "writing artifacts");
    for artifact in &synthesis.artifacts {
        let path = artifact.write_to(&output_dir)?;
        println!("{}", path.display());
    }

    Ok(())
}
