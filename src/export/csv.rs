//! CSV writer for export operations
//!
//! Output layout:
//! - a header row with the table's columns
//! - one row per document, no index column
//! - `\n` line endings, fields quoted only when needed
//!
//! A table without columns (no documents matched) produces an empty file.
//!
//! The file is written to a temporary sibling and renamed over the target, so
//! a failed run never leaves a truncated export behind.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use tracing::debug;

use crate::error::{ExportError, Result};
use crate::table::ReviewTable;

/// Writes review tables to a CSV file
#[derive(Debug, Clone)]
pub struct CsvWriter {
    /// Path to the output file
    path: PathBuf,
}

impl CsvWriter {
    /// Create a new CSV writer
    ///
    /// # Arguments
    /// * `path` - Output file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write `table` to the output file, replacing any previous content
    ///
    /// # Returns
    /// * `Result<u64>` - Number of bytes written
    pub async fn write_table(&self, table: &ReviewTable) -> Result<u64> {
        self.ensure_parent_dir().await?;

        let bytes = render_csv(table)?;
        let path = self.path.clone();
        let len = bytes.len();
        tokio::task::spawn_blocking(move || persist_atomically(&path, &bytes))
            .await
            .map_err(io::Error::other)
            .and_then(|written| written)
            .map_err(|source| ExportError::Write {
                path: self.path.display().to_string(),
                source,
            })?;

        debug!(
            "Wrote CSV file: {} ({} rows, {} bytes)",
            self.path.display(),
            table.len(),
            len
        );
        Ok(len as u64)
    }

    /// Create the output directory if missing
    async fn ensure_parent_dir(&self) -> Result<()> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() {
            return Ok(());
        }

        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ExportError::CreateDirectory {
                path: parent.display().to_string(),
                source,
            })?;
        Ok(())
    }
}

/// Write `bytes` to a temporary file next to `path`, then rename it over `path`
fn persist_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(bytes)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Render a table as CSV bytes
pub fn render_csv(table: &ReviewTable) -> std::result::Result<Vec<u8>, ExportError> {
    if table.columns().is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ReviewExportError};
    use mongodb::bson::doc;

    #[test]
    fn test_render_header_and_rows() {
        let table = ReviewTable::from_documents(&[
            doc! { "score": 5, "content": "Great" },
            doc! { "score": 2, "content": "Meh" },
        ]);
        let bytes = render_csv(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "content,score\nGreat,5\nMeh,2\n"
        );
    }

    #[test]
    fn test_render_escapes_special_characters() {
        let table = ReviewTable::from_documents(&[
            doc! { "text": "Hello, world!" },
            doc! { "text": "Quote: \"test\"" },
            doc! { "text": "Newline\ntest" },
        ]);
        let content = String::from_utf8(render_csv(&table).unwrap()).unwrap();
        assert!(content.contains("\"Hello, world!\""));
        assert!(content.contains("\"Quote: \"\"test\"\"\""));
        assert!(content.contains("\"Newline\ntest\""));
    }

    #[test]
    fn test_render_empty_table() {
        let bytes = render_csv(&ReviewTable::default()).unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_write_table_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("output").join("reviews_export.csv");
        let writer = CsvWriter::new(&path);

        let table = ReviewTable::from_documents(&[doc! { "id": 1 }]);
        let written = writer.write_table(&table).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "id\n1\n");
        assert_eq!(written, content.len() as u64);
    }

    #[tokio::test]
    async fn test_write_table_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        tokio::fs::write(&path, "stale,data\n1,2\n3,4\n").await.unwrap();

        let writer = CsvWriter::new(&path);
        writer
            .write_table(&ReviewTable::from_documents(&[doc! { "a": "x" }]))
            .await
            .unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "a\nx\n");
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_write_table_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let writer = CsvWriter::new(&path);

        for _ in 0..2 {
            writer
                .write_table(&ReviewTable::from_documents(&[doc! { "a": 1 }]))
                .await
                .unwrap();
        }

        assert_eq!(dir_entries(dir.path()), vec!["out.csv"]);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let previous = dir.path().join("previous.csv");
        std::fs::write(&previous, "a\nold\n").unwrap();

        // A non-empty directory at the target path cannot be replaced by a file.
        let target = dir.path().join("out.csv");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();

        let err = CsvWriter::new(&target)
            .write_table(&ReviewTable::from_documents(&[doc! { "a": "new" }]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReviewExportError::Export(ExportError::Write { .. })
        ));
        assert_eq!(dir_entries(dir.path()), vec!["out.csv", "previous.csv"]);
        assert_eq!(std::fs::read_to_string(&previous).unwrap(), "a\nold\n");
        assert_eq!(std::fs::read_to_string(target.join("keep")).unwrap(), "x");
    }

    #[tokio::test]
    async fn test_write_table_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        tokio::fs::write(&blocker, "not a directory").await.unwrap();

        let writer = CsvWriter::new(blocker.join("out.csv"));
        let err = writer
            .write_table(&ReviewTable::from_documents(&[doc! { "a": 1 }]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Export);
        assert!(matches!(
            err,
            ReviewExportError::Export(ExportError::CreateDirectory { .. })
        ));
    }
}
