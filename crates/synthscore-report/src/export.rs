//! Document export: turns laid-out pages into a named artifact.
//!
//! Artifacts are assembled fully in memory. Writing one to disk goes through
//! a temporary file in the destination directory that only becomes visible
//! under its final name once every byte has been flushed.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};

use synthscore_core::error::ReportError;
use synthscore_core::layout::{LayoutConfig, Page};

use crate::pdf::write_pdf;
use crate::render::Renderer;
use crate::style::StyleConfig;
use crate::text::write_text;

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Text => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }

    /// Parse a comma-separated list; `all` selects every format.
    pub fn parse_list(s: &str) -> Result<Vec<ExportFormat>, String> {
        if s.trim() == "all" {
            return Ok(vec![ExportFormat::Pdf, ExportFormat::Text]);
        }
        let mut formats = Vec::new();
        for part in s.split(',') {
            let format: ExportFormat = part.trim().parse()?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        Ok(formats)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Who the document is for and when it was exported.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportMetadata {
    pub student_name: String,
    pub student_id: String,
    pub exported_at: DateTime<Utc>,
}

impl ExportMetadata {
    /// Document title embedded in the artifact.
    pub fn title(&self) -> String {
        format!("Evaluation Report - {}", self.student_name)
    }

    /// `evaluation-report-<slug>-<timestamp>.<ext>`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "evaluation-report-{}-{}.{}",
            slugify(&self.student_name),
            self.exported_at.format("%Y-%m-%dT%H%M%S"),
            format.extension()
        )
    }
}

/// Lowercase `name` and join its whitespace-separated parts with `-`.
///
/// Path separators are replaced too, so the result is always a single path
/// component.
pub fn slugify(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .replace(['/', '\\', ':'], "-");
    if slug.is_empty() {
        "student".to_string()
    } else {
        slug
    }
}

/// A finished, named document.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub student_id: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Write the artifact into `dir` and return its final path.
    ///
    /// Nothing appears under the final name unless the whole artifact was
    /// written; on failure the temporary file is removed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let fail = |reason: String, source: std::io::Error| {
            ReportError::export(&self.student_id, reason, Some(source))
        };

        std::fs::create_dir_all(dir)
            .map_err(|e| fail(format!("cannot create {}", dir.display()), e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| fail(format!("cannot create temporary file in {}", dir.display()), e))?;
        tmp.write_all(&self.bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| fail("cannot write artifact".to_string(), e))?;

        let path = dir.join(&self.file_name);
        tmp.persist(&path)
            .map_err(|e| fail(format!("cannot persist {}", path.display()), e.error))?;

        tracing::info!(
            student_id = %self.student_id,
            format = %self.format,
            content_type = self.format.content_type(),
            bytes = self.bytes.len(),
            path = %path.display(),
            "artifact written"
        );
        Ok(path)
    }
}

/// Renders pages and serializes them in a chosen format.
#[derive(Debug, Clone)]
pub struct Exporter<'a> {
    layout: &'a LayoutConfig,
    style: &'a StyleConfig,
}

impl<'a> Exporter<'a> {
    pub fn new(layout: &'a LayoutConfig, style: &'a StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Produce one artifact containing every page in order.
    pub fn export(
        &self,
        pages: &[Page],
        metadata: &ExportMetadata,
        format: ExportFormat,
    ) -> Result<Artifact, ReportError> {
        if pages.is_empty() {
            return Err(ReportError::export(
                &metadata.student_id,
                "document has no pages",
                None,
            ));
        }

        let bytes = match format {
            ExportFormat::Pdf => {
                let renderer = Renderer::new(self.layout, self.style);
                let rendered: Vec<_> = pages.iter().map(|p| renderer.render(p)).collect();
                write_pdf(&rendered, self.layout, metadata)
            }
            ExportFormat::Text => write_text(pages, metadata, self.style).into_bytes(),
        };

        tracing::debug!(
            student_id = %metadata.student_id,
            %format,
            pages = pages.len(),
            bytes = bytes.len(),
            "exported document"
        );

        Ok(Artifact {
            file_name: metadata.file_name(format),
            format,
            student_id: metadata.student_id.clone(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metadata(name: &str) -> ExportMetadata {
        ExportMetadata {
            student_name: name.into(),
            student_id: "STU-001".into(),
            exported_at: Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 5).unwrap(),
        }
    }

    #[test]
    fn file_name_is_deterministic() {
        let meta = metadata("John  Smith");
        assert_eq!(
            meta.file_name(ExportFormat::Pdf),
            "evaluation-report-john-smith-2026-10-19T093005.pdf"
        );
        assert_eq!(meta.file_name(ExportFormat::Pdf), meta.file_name(ExportFormat::Pdf));
        assert!(meta.file_name(ExportFormat::Text).ends_with(".txt"));
    }

    #[test]
    fn content_type_matches_extension() {
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
        assert!(ExportFormat::Text.content_type().starts_with("text/plain"));
    }

    #[test]
    fn slug_is_a_single_component() {
        assert_eq!(slugify("  Mary Ann\tLee "), "mary-ann-lee");
        assert_eq!(slugify("../etc/passwd"), "..-etc-passwd");
        assert_eq!(slugify("   "), "student");
    }

    #[test]
    fn parse_format_list() {
        assert_eq!(
            ExportFormat::parse_list("all").unwrap(),
            vec![ExportFormat::Pdf, ExportFormat::Text]
        );
        assert_eq!(
            ExportFormat::parse_list("txt, pdf, text").unwrap(),
            vec![ExportFormat::Text, ExportFormat::Pdf]
        );
        assert!(ExportFormat::parse_list("docx").is_err());
    }

    #[test]
    fn export_without_pages_fails() {
        let layout = LayoutConfig::default();
        let style = StyleConfig::default();
        let err = Exporter::new(&layout, &style)
            .export(&[], &metadata("John Smith"), ExportFormat::Pdf)
            .unwrap_err();
        assert_eq!(err.stage(), synthscore_core::error::Stage::Export);
    }

    #[test]
    fn write_to_persists_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = Artifact {
            file_name: "evaluation-report-john-smith-2026-10-19T093005.txt".into(),
            format: ExportFormat::Text,
            student_id: "STU-001".into(),
            bytes: b"EVALUATION REPORT".to_vec(),
        };
        let path = artifact.write_to(dir.path()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"EVALUATION REPORT");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_to_unwritable_location_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let artifact = Artifact {
            file_name: "report.txt".into(),
            format: ExportFormat::Text,
            student_id: "STU-001".into(),
            bytes: b"data".to_vec(),
        };
        let err = artifact.write_to(&blocker.join("nested")).unwrap_err();
        assert!(matches!(err, ReportError::ExportFailure { .. }));
        assert_eq!(err.student_id(), "STU-001");
    }
}
