//! Error types for the PDF grid library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF grid library
#[derive(Error, Debug)]
pub enum Error {
    /// Columns or rows below one, or too many cells per page
    #[error("Invalid grid {columns} x {rows}: columns and rows must be at least 1 and their product must fit in usize")]
    InvalidGridSpec { columns: usize, rows: usize },

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input exists but could not be read as a PDF
    #[error("Cannot open {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// First page has no MediaBox, not even an inherited one
    #[error("Page has no MediaBox: {}", .0.display())]
    MissingMediaBox(PathBuf),

    /// Output could not be created or written
    #[error("Cannot write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// No files matched pattern
    #[error("No PDF files found matching pattern: {0}")]
    NoFilesMatched(String),
}
