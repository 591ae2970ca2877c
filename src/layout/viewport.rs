//! Viewport state: client size and clamped scroll offsets.
//!
//! Scroll offsets are measured from the end of the non-scrolling bands, so
//! `scroll_x == 0` shows the first scrollable column right after the fixed
//! columns. All queries take the current geometry and bands; nothing derived
//! from them is cached.

use tracing::trace;

use super::geometry::{position_to_index, Bands, GridGeometry};
use crate::types::{Rect, Size};

/// Scroll direction selector for the per-axis helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One axis of the grid as seen through the viewport.
#[derive(Clone, Copy)]
struct AxisView<'a> {
    cumulative: &'a [i32],
    band: u32,
    non_scroll: i32,
    visible: i32,
    scroll: i32,
}

impl AxisView<'_> {
    fn last(&self) -> Option<u32> {
        u32::try_from(self.cumulative.len().checked_sub(1)?).ok()
    }

    fn start(&self, idx: u32) -> i32 {
        match idx.checked_sub(1) {
            Some(prev) => self.cumulative.get(prev as usize).copied().unwrap_or(0),
            None => 0,
        }
    }

    fn end(&self, idx: u32) -> i32 {
        self.cumulative.get(idx as usize).copied().unwrap_or(0)
    }

    fn total(&self) -> i32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// First index whose range starts at or after the scroll origin.
    fn first_visible(&self) -> u32 {
        let Some(last) = self.last() else {
            return 0;
        };
        let floor = self.band.min(last);
        let origin = self.non_scroll + self.scroll;
        let Some(mut idx) = position_to_index(self.cumulative, origin) else {
            return floor;
        };
        if self.start(idx) < origin {
            idx += 1;
        }
        idx.clamp(floor, last)
    }

    /// Last index whose range ends at or before the viewport's far edge.
    fn last_fully_visible(&self) -> u32 {
        let first = self.first_visible();
        if self.visible <= 0 {
            return first;
        }
        let edge = self.non_scroll + self.scroll + self.visible;
        let Some(nominal) = position_to_index(self.cumulative, edge - 1) else {
            return first;
        };
        if nominal <= first {
            return first;
        }
        if self.end(nominal) > edge {
            // Partially visible: step back unless that passes the first index.
            return nominal - 1;
        }
        nominal
    }

    /// Largest permitted scroll offset.
    ///
    /// Besides the pixel-exact `full - visible`, the range reaches the
    /// smallest cell-aligned offset at which the final cell is fully shown,
    /// so cell-granular scrolling never stops with the last cell cut off.
    fn max_scroll(&self) -> i32 {
        let full = self.total() - self.non_scroll;
        if full <= self.visible {
            return 0;
        }
        let Some(last) = self.last() else {
            return 0;
        };
        let pixel_max = full - self.visible;
        let threshold = self.total() - self.visible;
        let head = self.cumulative.get(..last as usize).unwrap_or(&[]);
        let k = u32::try_from(1 + head.partition_point(|&end| end < threshold))
            .unwrap_or(last)
            .min(last)
            .max(self.band);
        let aligned_max = self.start(k) - self.non_scroll;
        aligned_max.max(pixel_max).max(0)
    }

    /// Offset that brings the first visible index `delta` cells along.
    ///
    /// Zero-size indices share their origin with a neighbour, so the target
    /// keeps moving in the step direction until the offset changes or the
    /// band/last bound is reached.
    fn offset_after_step(&self, delta: i32) -> i32 {
        let Some(last) = self.last() else {
            return self.scroll;
        };
        if delta == 0 || self.band > last {
            return self.scroll;
        }
        let first = i64::from(self.first_visible());
        let target = (first + i64::from(delta)).clamp(i64::from(self.band), i64::from(last));
        let mut target = u32::try_from(target).unwrap_or(last);
        let offset = |idx: u32| self.start(idx) - self.non_scroll;
        if delta < 0 {
            while target > self.band && offset(target) >= self.scroll {
                target -= 1;
            }
        } else {
            while target < last && offset(target) <= self.scroll {
                target += 1;
            }
        }
        offset(target)
    }

    /// Smallest offset change that shows `idx` fully (or its start, if it is
    /// wider than the viewport).
    fn offset_to_show(&self, idx: u32) -> i32 {
        if idx < self.band || idx as usize >= self.cumulative.len() {
            return self.scroll;
        }
        let start = self.start(idx) - self.non_scroll;
        let end = self.end(idx) - self.non_scroll;
        if start < self.scroll {
            start.max(0)
        } else if end > self.scroll + self.visible {
            start.min(end - self.visible).max(0)
        } else {
            self.scroll
        }
    }
}

/// Visible area of the grid and its scroll position.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    client: Size,
    scroll_x: i32,
    scroll_y: i32,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client_size(&self) -> Size {
        self.client
    }

    /// Record a new client size. Callers re-clamp scroll afterwards.
    pub fn set_client_size(&mut self, width: i32, height: i32) {
        self.client = Size::new(width.max(0), height.max(0));
    }

    pub fn scroll_x(&self) -> i32 {
        self.scroll_x
    }

    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    pub fn scroll(&self) -> (i32, i32) {
        (self.scroll_x, self.scroll_y)
    }

    fn axis<'a>(&self, axis: Axis, geometry: &'a GridGeometry, bands: Bands) -> AxisView<'a> {
        let non_scroll = geometry.non_scroll_extent(bands);
        let visible = self.visible_scroll_size(geometry, bands);
        match axis {
            Axis::Horizontal => AxisView {
                cumulative: geometry.col_cumulative(),
                band: bands.cols,
                non_scroll: non_scroll.width,
                visible: visible.width,
                scroll: self.scroll_x,
            },
            Axis::Vertical => AxisView {
                cumulative: geometry.row_cumulative(),
                band: bands.rows,
                non_scroll: non_scroll.height,
                visible: visible.height,
                scroll: self.scroll_y,
            },
        }
    }

    /// Client area left over for the scrollable region.
    pub fn visible_scroll_size(&self, geometry: &GridGeometry, bands: Bands) -> Size {
        let non_scroll = geometry.non_scroll_extent(bands);
        Size::new(
            (self.client.width - non_scroll.width).max(0),
            (self.client.height - non_scroll.height).max(0),
        )
    }

    /// Screen rectangle of the scrollable region.
    pub fn scroll_rect(&self, geometry: &GridGeometry, bands: Bands) -> Rect {
        let non_scroll = geometry.non_scroll_extent(bands);
        Rect::from_edges(
            non_scroll.width,
            non_scroll.height,
            self.client.width,
            self.client.height,
        )
    }

    /// Maximum scroll offsets, extended so the final column/row can be
    /// shown in full.
    pub fn max_scroll(&self, geometry: &GridGeometry, bands: Bands) -> (i32, i32) {
        (
            self.axis(Axis::Horizontal, geometry, bands).max_scroll(),
            self.axis(Axis::Vertical, geometry, bands).max_scroll(),
        )
    }

    /// Set the scroll offsets, clamped to `[0, max]`. Returns true when the
    /// clamped position differs from the previous one.
    pub fn scroll_to(&mut self, x: i32, y: i32, geometry: &GridGeometry, bands: Bands) -> bool {
        let (max_x, max_y) = self.max_scroll(geometry, bands);
        let x = x.clamp(0, max_x);
        let y = y.clamp(0, max_y);
        if x == self.scroll_x && y == self.scroll_y {
            return false;
        }
        trace!(from_x = self.scroll_x, from_y = self.scroll_y, x, y, "scroll");
        self.scroll_x = x;
        self.scroll_y = y;
        true
    }

    /// Re-clamp the current offsets after a geometry or client change.
    pub fn clamp(&mut self, geometry: &GridGeometry, bands: Bands) -> bool {
        self.scroll_to(self.scroll_x, self.scroll_y, geometry, bands)
    }

    /// Cell-granular scroll: move the first visible column/row by the given
    /// deltas and align the offset to that cell's origin. An axis with a zero
    /// delta keeps its current offset.
    pub fn scroll_by(
        &mut self,
        delta_cols: i32,
        delta_rows: i32,
        geometry: &GridGeometry,
        bands: Bands,
    ) -> bool {
        let x = self
            .axis(Axis::Horizontal, geometry, bands)
            .offset_after_step(delta_cols);
        let y = self
            .axis(Axis::Vertical, geometry, bands)
            .offset_after_step(delta_rows);
        self.scroll_to(x, y, geometry, bands)
    }

    pub fn first_visible(&self, axis: Axis, geometry: &GridGeometry, bands: Bands) -> u32 {
        self.axis(axis, geometry, bands).first_visible()
    }

    pub fn last_fully_visible(&self, axis: Axis, geometry: &GridGeometry, bands: Bands) -> u32 {
        self.axis(axis, geometry, bands).last_fully_visible()
    }

    pub fn first_visible_col(&self, geometry: &GridGeometry, bands: Bands) -> u32 {
        self.first_visible(Axis::Horizontal, geometry, bands)
    }

    pub fn last_visible_col(&self, geometry: &GridGeometry, bands: Bands) -> u32 {
        self.last_fully_visible(Axis::Horizontal, geometry, bands)
    }

    pub fn first_visible_row(&self, geometry: &GridGeometry, bands: Bands) -> u32 {
        self.first_visible(Axis::Vertical, geometry, bands)
    }

    pub fn last_visible_row(&self, geometry: &GridGeometry, bands: Bands) -> u32 {
        self.last_fully_visible(Axis::Vertical, geometry, bands)
    }

    /// True if `idx` is in the fixed band or fully inside the scrolled
    /// viewport on that axis.
    pub fn is_fully_visible(
        &self,
        axis: Axis,
        idx: u32,
        geometry: &GridGeometry,
        bands: Bands,
    ) -> bool {
        let view = self.axis(axis, geometry, bands);
        if idx < view.band {
            return true;
        }
        idx >= view.first_visible() && idx <= view.last_fully_visible()
    }

    /// Scroll the minimal amount needed to bring a cell into view.
    pub fn make_visible(
        &mut self,
        col: u32,
        row: u32,
        geometry: &GridGeometry,
        bands: Bands,
    ) -> bool {
        let x = self
            .axis(Axis::Horizontal, geometry, bands)
            .offset_to_show(col);
        let y = self.axis(Axis::Vertical, geometry, bands).offset_to_show(row);
        self.scroll_to(x, y, geometry, bands)
    }

    /// Scroll one page towards the end of `axis`.
    ///
    /// Steps the first visible index a cell at a time until it reaches the
    /// page's starting last-fully-visible index. Stops early when a step
    /// makes no progress.
    pub fn page_forward(&mut self, axis: Axis, geometry: &GridGeometry, bands: Bands) -> bool {
        let view = self.axis(axis, geometry, bands);
        let start_offset = view.scroll;
        let target = view
            .last_fully_visible()
            .max(view.first_visible().saturating_add(1));
        loop {
            if !self.step(axis, 1, geometry, bands) {
                break;
            }
            if self.first_visible(axis, geometry, bands) >= target {
                break;
            }
        }
        self.axis(axis, geometry, bands).scroll != start_offset
    }

    /// Scroll one page towards the start of `axis`.
    ///
    /// Steps back a cell at a time until the last fully visible index comes
    /// down to the page's starting first visible index.
    pub fn page_back(&mut self, axis: Axis, geometry: &GridGeometry, bands: Bands) -> bool {
        let view = self.axis(axis, geometry, bands);
        let start_offset = view.scroll;
        let target = view.first_visible();
        loop {
            if !self.step(axis, -1, geometry, bands) {
                break;
            }
            if self.last_fully_visible(axis, geometry, bands) <= target {
                break;
            }
        }
        self.axis(axis, geometry, bands).scroll != start_offset
    }

    fn step(&mut self, axis: Axis, delta: i32, geometry: &GridGeometry, bands: Bands) -> bool {
        match axis {
            Axis::Horizontal => self.scroll_by(delta, 0, geometry, bands),
            Axis::Vertical => self.scroll_by(0, delta, geometry, bands),
        }
    }

    /// Scroll one axis to its start (0) or end (max).
    pub fn scroll_to_extreme(
        &mut self,
        axis: Axis,
        to_end: bool,
        geometry: &GridGeometry,
        bands: Bands,
    ) -> bool {
        let (max_x, max_y) = self.max_scroll(geometry, bands);
        match (axis, to_end) {
            (Axis::Horizontal, false) => self.scroll_to(0, self.scroll_y, geometry, bands),
            (Axis::Horizontal, true) => self.scroll_to(max_x, self.scroll_y, geometry, bands),
            (Axis::Vertical, false) => self.scroll_to(self.scroll_x, 0, geometry, bands),
            (Axis::Vertical, true) => self.scroll_to(self.scroll_x, max_y, geometry, bands),
        }
    }

    /// Screen rectangle of a cell: fixed bands stay put, the rest shifts by
    /// the scroll offsets.
    pub fn cell_screen_rect(
        &self,
        col: u32,
        row: u32,
        geometry: &GridGeometry,
        bands: Bands,
    ) -> Rect {
        let rect = geometry.cell_rect(col, row);
        let dx = if col >= bands.cols { -self.scroll_x } else { 0 };
        let dy = if row >= bands.rows { -self.scroll_y } else { 0 };
        rect.translate(dx, dy)
    }

    /// Convert a client point to unscrolled grid coordinates.
    pub fn to_content(&self, x: i32, y: i32, geometry: &GridGeometry, bands: Bands) -> (i32, i32) {
        let non_scroll = geometry.non_scroll_extent(bands);
        let cx = if x < non_scroll.width {
            x
        } else {
            x + self.scroll_x
        };
        let cy = if y < non_scroll.height {
            y
        } else {
            y + self.scroll_y
        };
        (cx, cy)
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
    use crate::config::GridConfig;

    /// 1 zero-width header column/row, `n` data columns/rows of `size` px.
    fn uniform(n: u32, size: i32) -> GridGeometry {
        let config = GridConfig {
            header_col_width: 0,
            header_row_height: 0,
            default_col_width: size,
            default_row_height: size,
            ..GridConfig::default()
        };
        let mut g = GridGeometry::new(&config);
        g.resize(n, n);
        g
    }

    #[test]
    fn test_last_visible_skips_partial_column() {
        let g = uniform(3, 50);
        let bands = Bands::new(1, 1);
        let mut vp = Viewport::new();
        vp.set_client_size(120, 120);
        assert_eq!(vp.first_visible_col(&g, bands), 1);
        // data column 1 (total 2) ends at 100 <= 120; data column 2 ends at 150
        assert_eq!(vp.last_visible_col(&g, bands), 2);
    }

    #[test]
    fn test_max_scroll_extends_to_cell_boundary() {
        let g = uniform(3, 50);
        let bands = Bands::new(1, 1);
        let mut vp = Viewport::new();
        vp.set_client_size(120, 120);
        // pixel max would be 30, the aligned max is the start of data col 1
        assert_eq!(vp.max_scroll(&g, bands), (50, 50));
    }

    #[test]
    fn test_scroll_to_clamps_and_reports_change() {
        let g = uniform(10, 50);
        let bands = Bands::new(1, 1);
        let mut vp = Viewport::new();
        vp.set_client_size(200, 200);
        assert!(vp.scroll_to(-10, 10_000, &g, bands));
        assert_eq!(vp.scroll(), (0, 300));
        assert!(!vp.scroll_to(0, 300, &g, bands));
    }

    #[test]
    fn test_narrow_viewport_first_equals_last() {
        let g = uniform(4, 50);
        let bands = Bands::new(1, 1);
        let mut vp = Viewport::new();
        vp.set_client_size(30, 30);
        assert_eq!(vp.first_visible_col(&g, bands), 1);
        assert_eq!(vp.last_visible_col(&g, bands), 1);
    }

    #[test]
    fn test_make_visible_minimal_scroll() {
        let g = uniform(10, 50);
        let bands = Bands::new(1, 1);
        let mut vp = Viewport::new();
        vp.set_client_size(120, 120);
        // data col 3 (total 4) spans [150, 200): needs scroll 80
        assert!(vp.make_visible(4, 1, &g, bands));
        assert_eq!(vp.scroll_x(), 80);
        assert!(vp.make_visible(2, 1, &g, bands));
        assert_eq!(vp.scroll_x(), 50);
    }

    #[test]
    fn test_page_forward_then_back() {
        let g = uniform(20, 50);
        let bands = Bands::new(1, 1);
        let mut vp = Viewport::new();
        vp.set_client_size(200, 200);
        // first 1, last 4
        assert!(vp.page_forward(Axis::Vertical, &g, bands));
        assert_eq!(vp.first_visible_row(&g, bands), 4);
        assert!(vp.page_back(Axis::Vertical, &g, bands));
        assert_eq!(vp.last_visible_row(&g, bands), 4);
        assert_eq!(vp.first_visible_row(&g, bands), 1);
        assert!(!vp.page_back(Axis::Vertical, &g, bands));
    }
}
