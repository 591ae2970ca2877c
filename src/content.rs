//! Cell content providers.
//!
//! The engine only sees [`ContentProvider`]; where the text comes from is
//! the host's business. [`TextGrid`] is the plain string-backed adapter.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Host-side handle for an embedded widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellContent<'a> {
    #[default]
    Empty,
    Text(Cow<'a, str>),
    /// A host widget positioned over the cell rectangle.
    Widget(WidgetId),
}

impl CellContent<'_> {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Supplies cell content in data-relative coordinates.
pub trait ContentProvider {
    fn cell(&self, col: u32, row: u32) -> CellContent<'_>;

    /// Title shown in the column-header band.
    fn column_title(&self, _col: u32) -> Option<Cow<'_, str>> {
        None
    }

    /// Title shown in the row-header band.
    fn row_title(&self, _row: u32) -> Option<Cow<'_, str>> {
        None
    }

    /// Data size the provider wants; the grid resizes to it when attached.
    fn dimensions(&self) -> Option<(u32, u32)> {
        None
    }

    /// Pinned data columns, overriding the grid's own setting.
    fn fixed_cols(&self) -> Option<u32> {
        None
    }

    /// Pinned data rows, overriding the grid's own setting.
    fn fixed_rows(&self) -> Option<u32> {
        None
    }
}

/// Convert a 0-based column index to spreadsheet letters (A, B, ..., Z, AA, ...)
pub fn col_to_letter(col: u32) -> String {
    let mut result = Vec::new();
    let mut n = u64::from(col) + 1;
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or(0);
        result.push(char::from(b'A' + offset));
        n /= 26;
    }
    result.iter().rev().collect()
}

/// String-backed content: a dense table of cell texts plus optional titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextGrid {
    /// Column titles; missing entries fall back to letters
    pub column_titles: Vec<String>,
    /// Row titles; missing entries fall back to 1-based numbers
    pub row_titles: Vec<String>,
    /// Cell text, row-major
    pub rows: Vec<Vec<String>>,
    pub fixed_cols: Option<u32>,
    pub fixed_rows: Option<u32>,
}

impl TextGrid {
    pub fn new(cols: u32, rows: u32) -> Self {
        let mut grid = Self::default();
        grid.resize(cols, rows);
        grid
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut grid: TextGrid = serde_json::from_str(json)?;
        // Ragged input is padded so every row has the same width.
        let (cols, rows) = grid.size();
        grid.resize(cols, rows);
        Ok(grid)
    }

    /// (columns, rows)
    pub fn size(&self) -> (u32, u32) {
        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (
            u32::try_from(cols).unwrap_or(u32::MAX),
            u32::try_from(self.rows.len()).unwrap_or(u32::MAX),
        )
    }

    pub fn resize(&mut self, cols: u32, rows: u32) {
        self.rows.resize_with(rows as usize, Vec::new);
        for row in &mut self.rows {
            row.resize(cols as usize, String::new());
        }
    }

    /// Set a cell's text. Returns false when out of range.
    pub fn set_cell(&mut self, col: u32, row: u32, text: impl Into<String>) -> bool {
        match self
            .rows
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            Some(cell) => {
                *cell = text.into();
                true
            }
            None => false,
        }
    }

    pub fn cell_text(&self, col: u32, row: u32) -> Option<&str> {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .map(String::as_str)
    }
}

impl ContentProvider for TextGrid {
    fn cell(&self, col: u32, row: u32) -> CellContent<'_> {
        match self.cell_text(col, row) {
            Some(text) if !text.is_empty() => CellContent::Text(Cow::Borrowed(text)),
            _ => CellContent::Empty,
        }
    }

    fn column_title(&self, col: u32) -> Option<Cow<'_, str>> {
        Some(match self.column_titles.get(col as usize) {
            Some(title) => Cow::Borrowed(title.as_str()),
            None => Cow::Owned(col_to_letter(col)),
        })
    }

    fn row_title(&self, row: u32) -> Option<Cow<'_, str>> {
        Some(match self.row_titles.get(row as usize) {
            Some(title) => Cow::Borrowed(title.as_str()),
            None => Cow::Owned((u64::from(row) + 1).to_string()),
        })
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        Some(self.size())
    }

    fn fixed_cols(&self) -> Option<u32> {
        self.fixed_cols
    }

    fn fixed_rows(&self) -> Option<u32> {
        self.fixed_rows
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_letter() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(701), "ZZ");
        assert_eq!(col_to_letter(702), "AAA");
    }

    #[test]
    fn test_text_grid_cells() {
        let mut grid = TextGrid::new(2, 2);
        assert!(grid.set_cell(1, 0, "hello"));
        assert!(!grid.set_cell(5, 0, "nope"));
        assert_eq!(grid.cell(1, 0).text(), Some("hello"));
        assert_eq!(grid.cell(0, 0), CellContent::Empty);
        assert_eq!(grid.cell(9, 9), CellContent::Empty);
    }

    #[test]
    fn test_titles_fall_back() {
        let grid = TextGrid {
            column_titles: vec!["Name".to_string()],
            ..TextGrid::new(3, 1)
        };
        assert_eq!(grid.column_title(0).as_deref(), Some("Name"));
        assert_eq!(grid.column_title(1).as_deref(), Some("B"));
        assert_eq!(grid.row_title(0).as_deref(), Some("1"));
    }

    #[test]
    fn test_from_json_pads_ragged_rows() {
        let grid = TextGrid::from_json(r#"{"rows": [["a"], ["b", "c", "d"]], "fixedRows": 1}"#)
            .unwrap();
        assert_eq!(grid.size(), (3, 2));
        assert_eq!(grid.cell_text(2, 0), Some(""));
        assert_eq!(grid.fixed_rows(), Some(1));
        assert_eq!(grid.fixed_cols(), None);
    }
}
