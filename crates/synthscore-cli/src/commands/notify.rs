//! The `synthscore notify` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use synthscore_core::notification::ParentNotification;
use synthscore_core::parser::{parse_result, validate_result};
use synthscore_core::statistics::aggregate;
use synthscore_report::config::load_config_from;

pub fn execute(
    input: PathBuf,
    parent_email: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut result = parse_result(&input)?;
    if let Some(email) = parent_email {
        result = result.with_parent_email(email);
    }

    let warnings = validate_result(&result)
        .with_context(|| format!("cannot notify for {}", input.display()))?;
    super::print_warnings(&warnings);

    let summary = aggregate(&result, &config.thresholds)?;
    let notification = ParentNotification::new(&result, &summary)?;

    tracing::info!(
        student_id = %result.student_id,
        parent_email = %notification.parent_email,
        "notification prepared"
    );
    eprintln!("Notification for {}", notification.headline());
    println!("{}", serde_json::to_string_pretty(&notification)?);

    Ok(())
}
