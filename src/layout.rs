//! Grid placement calculations
//!
//! Everything here is pure: page sizes go in, placements and output page
//! sizes come out. Coordinates are PDF user space with the origin at the
//! bottom-left of an output page.

use crate::error::{Error, Result};

/// Page dimensions in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// US Letter size (8.5" × 11")
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// A4 size (210mm × 297mm)
    pub fn a4() -> Self {
        Self::new(595.276, 841.89)
    }
}

/// Number of columns and rows on each output page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    columns: usize,
    rows: usize,
}

impl GridSpec {
    /// Create a grid, rejecting a zero column or row count and a grid whose
    /// cell count does not fit in `usize`
    pub fn new(columns: usize, rows: usize) -> Result<Self> {
        match columns.checked_mul(rows) {
            Some(capacity) if capacity > 0 => Ok(Self { columns, rows }),
            _ => Err(Error::InvalidGridSpec { columns, rows }),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Input pages that fit on one output page
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Output pages needed for `inputs` input pages
    pub fn page_count(&self, inputs: usize) -> usize {
        inputs.div_ceil(self.capacity())
    }

    /// Returns (output page, column, row) for the input at `index`
    pub fn cell(&self, index: usize) -> (usize, usize, usize) {
        let slot = index % self.capacity();
        (index / self.capacity(), slot % self.columns, slot / self.columns)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { columns: 1, rows: 1 }
    }
}

/// How grid cells are sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellSizing {
    /// Each page keeps its own footprint; rows are packed left to right and
    /// columns need not line up.
    #[default]
    Native,
    /// Cell width is the widest page in its column, cell height the tallest
    /// page in its row, per output page.
    Uniform,
}

/// Where one input page is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position of the page in the input list
    pub input_index: usize,
    /// Output page index
    pub page: usize,
    pub column: usize,
    pub row: usize,
    /// Bottom-left corner on the output page
    pub x: f64,
    pub y: f64,
    /// Always the input page's own size
    pub width: f64,
    pub height: f64,
}

/// Placements for every input plus the size of every output page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub placements: Vec<Placement>,
    pub pages: Vec<PageSize>,
}

impl Layout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Placements on one output page, in input order
    pub fn placements_on(&self, page: usize) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.page == page)
    }
}

/// Compute where every input page lands on the output pages
///
/// Pages are consumed in input order and fill cells row-major: column index
/// fastest, then row, then output page. No page is ever scaled and no gap is
/// inserted between cells.
///
/// An invalid grid cannot reach this function: [`GridSpec::new`] rejects a
/// zero column or row count, and a column × row product that overflows, with
/// [`Error::InvalidGridSpec`].
pub fn compute_layout(pages: &[PageSize], grid: GridSpec, sizing: CellSizing) -> Layout {
    let mut layout = Layout::default();

    for (sheet, chunk) in pages.chunks(grid.capacity()).enumerate() {
        let first_index = sheet * grid.capacity();
        let rows: Vec<&[PageSize]> = chunk.chunks(grid.columns).collect();

        let row_heights: Vec<f64> = rows
            .iter()
            .map(|row| row.iter().map(|p| p.height).fold(0.0, f64::max))
            .collect();
        let sheet_height: f64 = row_heights.iter().sum();

        let column_widths: Vec<f64> = (0..grid.columns.min(chunk.len()))
            .map(|col| {
                rows.iter()
                    .filter_map(|row| row.get(col))
                    .map(|p| p.width)
                    .fold(0.0, f64::max)
            })
            .collect();

        let sheet_width = match sizing {
            CellSizing::Native => rows
                .iter()
                .map(|row| row.iter().map(|p| p.width).sum::<f64>())
                .fold(0.0, f64::max),
            CellSizing::Uniform => column_widths.iter().sum(),
        };

        for (row_index, row) in rows.iter().enumerate() {
            // Rows stack downwards from the top edge
            let y: f64 = row_heights[row_index + 1..].iter().sum();
            let mut x = 0.0;

            for (column, size) in row.iter().enumerate() {
                let input_index = first_index + row_index * grid.columns + column;
                layout.placements.push(Placement {
                    input_index,
                    page: sheet,
                    column,
                    row: row_index,
                    x,
                    y,
                    width: size.width,
                    height: size.height,
                });

                x += match sizing {
                    CellSizing::Native => size.width,
                    CellSizing::Uniform => column_widths[column],
                };
            }
        }

        layout.pages.push(PageSize::new(sheet_width, sheet_height));
    }

    layout
}
