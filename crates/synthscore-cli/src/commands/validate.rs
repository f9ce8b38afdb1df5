//! The `synthscore validate` command.

use std::path::PathBuf;

use anyhow::Result;

use synthscore_core::parser::{load_result_directory, parse_result, validate_result};

pub fn execute(input: PathBuf) -> Result<()> {
    let results = if input.is_dir() {
        load_result_directory(&input)?
    } else {
        vec![parse_result(&input)?]
    };

    let mut total_warnings = 0;
    let mut invalid = 0;

    for result in &results {
        println!(
            "Result: {} ({}, {} questions)",
            result.student_name,
            result.student_id,
            result.questions.len()
        );

        match validate_result(result) {
            Ok(warnings) => {
                for w in &warnings {
                    let prefix = w
                        .question_id
                        .map(|id| format!("  [Q{id}]"))
                        .unwrap_or_else(|| "  ".to_string());
                    println!("{prefix} WARNING: {}", w.message);
                }
                total_warnings += warnings.len();
            }
            Err(e) => {
                println!("  ERROR: {e}");
                invalid += 1;
            }
        }
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} of {} result(s) invalid", results.len());
    }

    if total_warnings == 0 {
        println!("All results valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
