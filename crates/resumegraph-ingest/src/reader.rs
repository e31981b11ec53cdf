//! Plain-text document reader

use resumegraph_domain::traits::DocumentReader;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a document
#[derive(Error, Debug)]
pub enum ReadError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file's format needs external conversion first
    #[error("Unsupported file type '{0}': convert to plain text or markdown first")]
    UnsupportedFormat(String),
}

/// Extensions this reader accepts as-is
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "text"];

/// Reads plain text and markdown documents
///
/// Binary formats (pdf, docx, ...) are a conversion collaborator's job; this
/// reader rejects them instead of decoding garbage.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileReader;

impl TextFileReader {
    /// Create a reader
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for TextFileReader {
    type Error = ReadError;

    fn read(&self, path: &Path) -> Result<String, Self::Error> {
        if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
            let extension = extension.to_lowercase();
            if !TEXT_EXTENSIONS.contains(&extension.as_str()) {
                return Err(ReadError::UnsupportedFormat(extension));
            }
        }

        std::fs::read_to_string(path).map_err(|source| ReadError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_markdown_file() {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        writeln!(file, "# Jane Doe\n\n## Skills\nRust").unwrap();

        let content = TextFileReader::new().read(file.path()).unwrap();
        assert!(content.contains("## Skills"));
    }

    #[test]
    fn test_reads_file_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume");
        std::fs::write(&path, "plain resume text").unwrap();

        let content = TextFileReader::new().read(&path).unwrap();
        assert_eq!(content, "plain resume text");
    }

    #[test]
    fn test_rejects_binary_format() {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let result = TextFileReader::new().read(file.path());
        assert!(matches!(result, Err(ReadError::UnsupportedFormat(ext)) if ext == "pdf"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TextFileReader::new().read(Path::new("/nonexistent/resume.txt"));
        assert!(matches!(result, Err(ReadError::Io { .. })));
    }
}
