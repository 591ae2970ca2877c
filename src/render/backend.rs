//! Render collaborator traits.
//!
//! The coordinator decides which cells are visible and where; a
//! [`CellRenderer`] does the actual painting. A [`CustomCell`] override can
//! take over individual data cells.

use crate::content::CellContent;
use crate::types::{Rect, Size};

/// Which band a cell belongs to, with data-relative indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Intersection of header rows and header columns
    Corner,
    /// Column-header band cell for data column `col`
    ColumnHeader { col: u32 },
    /// Row-header band cell for data row `row`
    RowHeader { row: u32 },
    Data { col: u32, row: u32 },
}

impl CellKind {
    /// Classify a total-coordinate cell.
    pub fn classify(col: u32, row: u32, header_cols: u32, header_rows: u32) -> Self {
        match (col < header_cols, row < header_rows) {
            (true, true) => Self::Corner,
            (false, true) => Self::ColumnHeader {
                col: col - header_cols,
            },
            (true, false) => Self::RowHeader {
                row: row - header_rows,
            },
            (false, false) => Self::Data {
                col: col - header_cols,
                row: row - header_rows,
            },
        }
    }

    pub fn is_header(&self) -> bool {
        !matches!(self, Self::Data { .. })
    }
}

/// The two drawing passes, run back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintPass {
    Background,
    Foreground,
}

/// Everything a renderer needs to paint one cell.
#[derive(Debug, Clone)]
pub struct CellPaint<'a> {
    /// Total column index
    pub col: u32,
    /// Total row index
    pub row: u32,
    pub kind: CellKind,
    /// Full cell rectangle in client coordinates
    pub rect: Rect,
    /// Part of `rect` that may be painted
    pub clip: Rect,
    pub content: CellContent<'a>,
    /// Inside the selection (the selected cell, or its row in row mode)
    pub selected: bool,
    /// The selected cell itself
    pub focused: bool,
}

/// Paints cells. Called once per visible cell per pass.
pub trait CellRenderer {
    fn draw_background(&mut self, cell: &CellPaint<'_>);
    fn draw_foreground(&mut self, cell: &CellPaint<'_>);
}

/// Intercepts specific data cells with its own size and drawing.
pub trait CustomCell {
    /// True if this override draws the data cell `(col, row)`.
    fn handles(&self, col: u32, row: u32) -> bool;

    /// Preferred size of the cell, used by autosizing.
    fn measure(&self, _col: u32, _row: u32) -> Option<Size> {
        None
    }

    fn draw(&mut self, pass: PaintPass, cell: &CellPaint<'_>);
}
