//! Per-column widths and per-row heights with cumulative offset tables.
//!
//! The cumulative tables are rebuilt on every size change, so every query
//! sees current geometry. Position lookups are O(log n) binary searches.

use tracing::debug;

use crate::config::GridConfig;
use crate::types::{Rect, Size};

/// Leading columns/rows that never scroll (headers plus fixed data bands).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bands {
    pub cols: u32,
    pub rows: u32,
}

impl Bands {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }
}

/// Size index for a grid, including its header columns/rows.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    col_widths: Vec<i32>,
    row_heights: Vec<i32>,
    /// `col_cumulative[i]` = x of column i's right edge
    col_cumulative: Vec<i32>,
    /// `row_cumulative[i]` = y of row i's bottom edge
    row_cumulative: Vec<i32>,
    header_cols: u32,
    header_rows: u32,
    default_col_width: i32,
    default_row_height: i32,
    header_col_width: i32,
    header_row_height: i32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}

/// Index whose `[start, end)` pixel range contains `pos` in a cumulative
/// table. Positions before the first entry give 0, positions at or past the
/// last edge give the last index. `None` only for an empty table.
pub fn position_to_index(cumulative: &[i32], pos: i32) -> Option<u32> {
    let last = cumulative.len().checked_sub(1)?;
    // First index whose right/bottom edge lies beyond `pos`.
    let idx = cumulative.partition_point(|&end| end <= pos).min(last);
    u32::try_from(idx).ok()
}

fn len_u32(values: &[i32]) -> u32 {
    u32::try_from(values.len()).unwrap_or(u32::MAX)
}

fn prefix_sums(sizes: &[i32], out: &mut Vec<i32>) {
    out.clear();
    out.reserve(sizes.len());
    let mut acc: i32 = 0;
    for &size in sizes {
        acc = acc.saturating_add(size);
        out.push(acc);
    }
}

impl GridGeometry {
    /// Create an index holding only the configured header columns/rows.
    pub fn new(config: &GridConfig) -> Self {
        let mut geometry = Self {
            col_widths: vec![config.header_col_width.max(0); config.header_cols as usize],
            row_heights: vec![config.header_row_height.max(0); config.header_rows as usize],
            col_cumulative: Vec::new(),
            row_cumulative: Vec::new(),
            header_cols: config.header_cols,
            header_rows: config.header_rows,
            default_col_width: config.default_col_width.max(0),
            default_row_height: config.default_row_height.max(0),
            header_col_width: config.header_col_width.max(0),
            header_row_height: config.header_row_height.max(0),
        };
        geometry.recompute();
        geometry
    }

    fn recompute(&mut self) {
        prefix_sums(&self.col_widths, &mut self.col_cumulative);
        prefix_sums(&self.row_heights, &mut self.row_cumulative);
    }

    /// Total column count, headers included
    pub fn col_count(&self) -> u32 {
        len_u32(&self.col_widths)
    }

    /// Total row count, headers included
    pub fn row_count(&self) -> u32 {
        len_u32(&self.row_heights)
    }

    pub fn header_cols(&self) -> u32 {
        self.header_cols
    }

    pub fn header_rows(&self) -> u32 {
        self.header_rows
    }

    pub fn data_cols(&self) -> u32 {
        self.col_count().saturating_sub(self.header_cols)
    }

    pub fn data_rows(&self) -> u32 {
        self.row_count().saturating_sub(self.header_rows)
    }

    /// True when there is no data cell at all.
    pub fn is_empty(&self) -> bool {
        self.data_cols() == 0 || self.data_rows() == 0
    }

    /// Set the data column/row counts. New entries get the default sizes;
    /// shrinking truncates. Returns false (and touches nothing) when the
    /// counts are unchanged.
    pub fn resize(&mut self, data_cols: u32, data_rows: u32) -> bool {
        if data_cols == self.data_cols() && data_rows == self.data_rows() {
            return false;
        }
        let total_cols = self.header_cols.saturating_add(data_cols) as usize;
        let total_rows = self.header_rows.saturating_add(data_rows) as usize;
        self.col_widths.resize(total_cols, self.default_col_width);
        self.row_heights.resize(total_rows, self.default_row_height);
        self.recompute();
        debug!(data_cols, data_rows, "grid geometry resized");
        true
    }

    /// Change the number of header columns, keeping the data columns.
    pub fn set_header_cols(&mut self, count: u32) -> bool {
        if count == self.header_cols {
            return false;
        }
        if count > self.header_cols {
            let added = (count - self.header_cols) as usize;
            self.col_widths
                .splice(0..0, std::iter::repeat(self.header_col_width).take(added));
        } else {
            let removed = (self.header_cols - count) as usize;
            self.col_widths.drain(0..removed.min(self.col_widths.len()));
        }
        self.header_cols = count;
        self.recompute();
        debug!(header_cols = count, "header columns changed");
        true
    }

    /// Change the number of header rows, keeping the data rows.
    pub fn set_header_rows(&mut self, count: u32) -> bool {
        if count == self.header_rows {
            return false;
        }
        if count > self.header_rows {
            let added = (count - self.header_rows) as usize;
            self.row_heights
                .splice(0..0, std::iter::repeat(self.header_row_height).take(added));
        } else {
            let removed = (self.header_rows - count) as usize;
            self.row_heights.drain(0..removed.min(self.row_heights.len()));
        }
        self.header_rows = count;
        self.recompute();
        debug!(header_rows = count, "header rows changed");
        true
    }

    /// Sizes used for entries added by later [`resize`](Self::resize) calls.
    pub fn set_default_sizes(&mut self, col_width: i32, row_height: i32) {
        self.default_col_width = col_width.max(0);
        self.default_row_height = row_height.max(0);
    }

    pub fn default_col_width(&self) -> i32 {
        self.default_col_width
    }

    pub fn default_row_height(&self) -> i32 {
        self.default_row_height
    }

    /// Set one column's width (clamped to >= 0). Returns true if it changed.
    pub fn set_col_width(&mut self, col: u32, width: i32) -> bool {
        let width = width.max(0);
        match self.col_widths.get_mut(col as usize) {
            Some(w) if *w != width => {
                *w = width;
                prefix_sums(&self.col_widths, &mut self.col_cumulative);
                true
            }
            _ => false,
        }
    }

    /// Set one row's height (clamped to >= 0). Returns true if it changed.
    pub fn set_row_height(&mut self, row: u32, height: i32) -> bool {
        let height = height.max(0);
        match self.row_heights.get_mut(row as usize) {
            Some(h) if *h != height => {
                *h = height;
                prefix_sums(&self.row_heights, &mut self.row_cumulative);
                true
            }
            _ => false,
        }
    }

    /// Column width, 0 when out of range
    pub fn col_width(&self, col: u32) -> i32 {
        self.col_widths.get(col as usize).copied().unwrap_or(0)
    }

    /// Row height, 0 when out of range
    pub fn row_height(&self, row: u32) -> i32 {
        self.row_heights.get(row as usize).copied().unwrap_or(0)
    }

    pub fn col_widths(&self) -> &[i32] {
        &self.col_widths
    }

    pub fn row_heights(&self) -> &[i32] {
        &self.row_heights
    }

    pub fn col_cumulative(&self) -> &[i32] {
        &self.col_cumulative
    }

    pub fn row_cumulative(&self) -> &[i32] {
        &self.row_cumulative
    }

    /// Left edge of a column (unscrolled)
    pub fn col_start(&self, col: u32) -> i32 {
        self.col_end(col) - self.col_width(col)
    }

    /// Right edge of a column (unscrolled), 0 when out of range
    pub fn col_end(&self, col: u32) -> i32 {
        self.col_cumulative.get(col as usize).copied().unwrap_or(0)
    }

    pub fn row_start(&self, row: u32) -> i32 {
        self.row_end(row) - self.row_height(row)
    }

    pub fn row_end(&self, row: u32) -> i32 {
        self.row_cumulative.get(row as usize).copied().unwrap_or(0)
    }

    pub fn total_width(&self) -> i32 {
        self.col_cumulative.last().copied().unwrap_or(0)
    }

    pub fn total_height(&self) -> i32 {
        self.row_cumulative.last().copied().unwrap_or(0)
    }

    /// Column containing x (unscrolled)
    pub fn col_at(&self, x: i32) -> Option<u32> {
        position_to_index(&self.col_cumulative, x)
    }

    /// Row containing y (unscrolled)
    pub fn row_at(&self, y: i32) -> Option<u32> {
        position_to_index(&self.row_cumulative, y)
    }

    /// Unscrolled cell bounds; a zero rect when either index is out of range.
    pub fn cell_rect(&self, col: u32, row: u32) -> Rect {
        if col >= self.col_count() || row >= self.row_count() {
            return Rect::ZERO;
        }
        Rect::new(
            self.col_start(col),
            self.row_start(row),
            self.col_width(col),
            self.row_height(row),
        )
    }

    /// Pixel size of the non-scrolling leading bands.
    pub fn non_scroll_extent(&self, bands: Bands) -> Size {
        let width = match bands.cols.min(self.col_count()) {
            0 => 0,
            n => self.col_end(n - 1),
        };
        let height = match bands.rows.min(self.row_count()) {
            0 => 0,
            n => self.row_end(n - 1),
        };
        Size::new(width, height)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn geometry(data_cols: u32, data_rows: u32) -> GridGeometry {
        let mut g = GridGeometry::new(&GridConfig::default());
        g.resize(data_cols, data_rows);
        g
    }

    #[test]
    fn test_new_holds_only_headers() {
        let g = GridGeometry::default();
        assert_eq!(g.col_count(), 1);
        assert_eq!(g.row_count(), 1);
        assert_eq!(g.data_cols(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn test_resize_extends_with_defaults() {
        let g = geometry(3, 2);
        assert_eq!(g.col_count(), 4);
        assert_eq!(g.row_count(), 3);
        assert_eq!(g.col_cumulative(), &[40, 104, 168, 232]);
        assert_eq!(g.row_cumulative(), &[20, 40, 60]);
    }

    #[test]
    fn test_resize_same_values_is_noop() {
        let mut g = geometry(3, 2);
        let before = g.col_cumulative().to_vec();
        assert!(!g.resize(3, 2));
        assert_eq!(g.col_cumulative(), before.as_slice());
    }

    #[test]
    fn test_shrink_truncates() {
        let mut g = geometry(5, 5);
        assert!(g.resize(2, 1));
        assert_eq!(g.col_count(), 3);
        assert_eq!(g.row_cumulative().len(), 2);
    }

    #[test]
    fn test_set_col_width_recomputes() {
        let mut g = geometry(3, 1);
        assert!(g.set_col_width(2, 10));
        assert_eq!(g.col_cumulative(), &[40, 104, 114, 178]);
        assert!(g.set_col_width(1, -7));
        assert_eq!(g.col_width(1), 0);
        assert!(!g.set_col_width(99, 10));
    }

    #[test]
    fn test_position_to_index() {
        let table = [10, 30, 30, 60];
        assert_eq!(position_to_index(&table, -5), Some(0));
        assert_eq!(position_to_index(&table, 0), Some(0));
        assert_eq!(position_to_index(&table, 9), Some(0));
        assert_eq!(position_to_index(&table, 10), Some(1));
        assert_eq!(position_to_index(&table, 29), Some(1));
        // zero-width index 2 never contains a position
        assert_eq!(position_to_index(&table, 30), Some(3));
        assert_eq!(position_to_index(&table, 60), Some(3));
        assert_eq!(position_to_index(&table, 1000), Some(3));
        assert_eq!(position_to_index(&[], 5), None);
    }

    #[test]
    fn test_cell_rect_out_of_range_is_zero() {
        let g = geometry(2, 2);
        assert_eq!(g.cell_rect(1, 1), Rect::new(40, 20, 64, 20));
        assert_eq!(g.cell_rect(9, 0), Rect::ZERO);
        assert_eq!(g.cell_rect(0, 9), Rect::ZERO);
    }

    #[test]
    fn test_header_cols_change_keeps_data() {
        let mut g = geometry(2, 2);
        assert!(g.set_header_cols(2));
        assert_eq!(g.col_count(), 4);
        assert_eq!(g.data_cols(), 2);
        assert_eq!(g.col_widths(), &[40, 40, 64, 64]);
        assert!(g.set_header_cols(0));
        assert_eq!(g.col_widths(), &[64, 64]);
    }

    #[test]
    fn test_non_scroll_extent() {
        let g = geometry(4, 4);
        assert_eq!(g.non_scroll_extent(Bands::new(0, 0)), Size::new(0, 0));
        assert_eq!(g.non_scroll_extent(Bands::new(1, 1)), Size::new(40, 20));
        assert_eq!(g.non_scroll_extent(Bands::new(2, 3)), Size::new(104, 60));
        // bands past the end clamp to the whole grid
        assert_eq!(g.non_scroll_extent(Bands::new(50, 50)).width, g.total_width());
    }
}
