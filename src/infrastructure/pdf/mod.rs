use crate::error::AppError;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("input path is not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("input file must have a .pdf extension: {}", .0.display())]
    WrongExtension(PathBuf),
    #[error("cannot read {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },
    #[error("cannot parse {} as PDF: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Source(err.to_string())
    }
}

/// Character and word totals of an extracted document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    pub char_count: usize,
    pub word_count: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            char_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
        }
    }
}

/// Check that `path` names an existing file with a `.pdf` extension
pub fn validate_pdf_path(path: &Path) -> Result<(), SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SourceError::NotAFile(path.to_path_buf()));
    }
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(SourceError::WrongExtension(path.to_path_buf()));
    }
    Ok(())
}

/// Collapse whitespace runs (line wraps, page breaks) into single spaces
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the plain text of a PDF document
#[derive(Debug, Clone, Default)]
pub struct PdfTextSource {
    normalize_whitespace: bool,
}

impl PdfTextSource {
    pub fn new(normalize_whitespace: bool) -> Self {
        Self {
            normalize_whitespace,
        }
    }

    /// Extract the text of every page, in page order, as one string
    pub async fn extract(&self, path: &Path) -> Result<String, SourceError> {
        validate_pdf_path(path)?;

        tracing::info!(path = %path.display(), "Extracting text from PDF");

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SourceError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        // Parsing is CPU bound and the parser may panic on malformed input
        let pages = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        })
        .await
        .map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            message: format!("parser aborted: {}", e),
        })?
        .map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(page_count = pages.len(), "PDF pages parsed");
        let text = join_pages(&pages);

        let text = if self.normalize_whitespace {
            clean_text(&text)
        } else {
            text
        };

        let stats = TextStats::of(&text);
        tracing::info!(
            path = %path.display(),
            char_count = stats.char_count,
            word_count = stats.word_count,
            "Text extracted"
        );

        Ok(text)
    }
}

/// Join page texts in page order; a newline keeps the last word of one page
/// apart from the first word of the next
fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}
