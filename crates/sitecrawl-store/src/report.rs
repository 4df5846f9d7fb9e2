//! Append-only Markdown artifact

use crate::ReportError;
use sitecrawl_domain::traits::ReportSink;
use sitecrawl_domain::SectionBody;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Markdown report writer
///
/// Every call opens the file in append mode (creating it and its parent
/// directory if missing), writes one section, flushes and closes. Existing
/// content is never truncated or rewritten.
#[derive(Debug, Clone)]
pub struct MarkdownReport {
    path: PathBuf,
}

impl MarkdownReport {
    /// Create a writer for the artifact at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the artifact
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, text: &str) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

impl ReportSink for MarkdownReport {
    type Error = ReportError;

    fn append_section(&mut self, url: &str, body: &SectionBody) -> Result<(), Self::Error> {
        self.append(&body.render(url))?;
        debug!(
            "Appended {} section for {} to {}",
            if body.is_error() { "error" } else { "content" },
            url,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sections_are_appended_in_order() {
        let dir = TempDir::new().unwrap();
        let mut report = MarkdownReport::new(dir.path().join("out").join("run.md"));

        report
            .append_section("a.com/1", &SectionBody::Content("One".into()))
            .unwrap();
        report
            .append_section("a.com/2", &SectionBody::Error("HTTP 404".into()))
            .unwrap();

        let text = fs::read_to_string(report.path()).unwrap();
        assert_eq!(text, "# a.com/1\n\nOne\n\n# a.com/2\n\n[ERROR] HTTP 404\n\n");
    }

    #[test]
    fn test_existing_content_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.md");
        fs::write(&path, "# earlier\n\nkept\n\n").unwrap();

        let mut report = MarkdownReport::new(&path);
        report
            .append_section("a.com/3", &SectionBody::Content("Three".into()))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# earlier\n\nkept\n\n"));
        assert!(text.ends_with("# a.com/3\n\nThree\n\n"));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let mut report = MarkdownReport::new(dir.path());
        let result = report.append_section("a.com/1", &SectionBody::Content("x".into()));
        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}
