pub mod init;
pub mod notify;
pub mod render;
pub mod summary;
pub mod validate;

use synthscore_core::parser::ValidationWarning;

/// Print soft validation warnings to stderr.
pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .question_id
            .map(|id| format!("[Q{id}] "))
            .unwrap_or_default();
        eprintln!("Warning: {prefix}{}", w.message);
    }
}
