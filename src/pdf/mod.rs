//! PDF reading and composition module

pub mod compose;
pub mod metadata;

// Re-export commonly used items
pub use compose::{arrange_pdfs, plan_layout, GridOptions, GridSummary};
pub use metadata::{count_pages, first_page_size, load_input, page_content, MediaBox};
