//! PDF Grid Library
//!
//! Arranges the first page of each input PDF onto output pages laid out as a
//! fixed grid of columns and rows. Pages keep their original size: nothing is
//! scaled and no margins are added. This library provides functionality to:
//! - Compute grid placements for a list of page sizes
//! - Read page sizes from PDF files
//! - Compose the placed pages into a new PDF
//!
//! # Example
//!
//! ```no_run
//! use pdf_gridcat::layout::{CellSizing, GridSpec};
//! use pdf_gridcat::pdf::{arrange_pdfs, GridOptions};
//! use std::path::PathBuf;
//!
//! let options = GridOptions {
//!     input_paths: vec![
//!         PathBuf::from("card-1.pdf"),
//!         PathBuf::from("card-2.pdf"),
//!         PathBuf::from("card-3.pdf"),
//!     ],
//!     output_path: PathBuf::from("cards.pdf"),
//!     grid: GridSpec::new(3, 3).expect("non-zero grid"),
//!     sizing: CellSizing::Native,
//! };
//!
//! arrange_pdfs(&options).expect("Failed to arrange PDFs");
//! ```

pub mod error;
pub mod layout;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};
pub use layout::{compute_layout, CellSizing, GridSpec, Layout, PageSize, Placement};
