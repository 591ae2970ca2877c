//! The `Grid` aggregate: geometry, viewport, selection and listeners.
//!
//! Everything runs synchronously on the caller's thread. Each mutating call
//! recomputes dependent state (cumulative tables, clamped scroll, clamped
//! selection) before it returns, then fires notifications. Listeners receive
//! `&mut Grid` and may call back into it.

mod navigation;
mod pointer;

use tracing::{debug, trace};

use crate::config::GridConfig;
use crate::content::ContentProvider;
use crate::layout::{Axis, Bands, GridGeometry, Viewport};
use crate::render::CustomCell;
use crate::types::{Rect, ResizeSession, Selection, SelectionMode, Size};

pub use pointer::HitTest;

/// "Cell selected"/"cell activated" sink: `(grid, data_col, data_row)`.
pub type CellListener = Box<dyn FnMut(&mut Grid, u32, u32)>;

/// "View scrolled" sink: `(grid, scroll_x, scroll_y)`.
pub type ScrollListener = Box<dyn FnMut(&mut Grid, i32, i32)>;

pub struct Grid {
    pub(crate) geometry: GridGeometry,
    pub(crate) viewport: Viewport,
    pub(crate) selection: Selection,
    pub(crate) mode: SelectionMode,
    pub(crate) fixed_cols: u32,
    pub(crate) fixed_rows: u32,
    pub(crate) resize_hit_width: i32,
    pub(crate) wheel_step: i32,
    pub(crate) resize_session: Option<ResizeSession>,
    /// Set while the primary button is down after pressing a data cell
    pub(crate) drag_selecting: bool,
    pub(crate) content: Option<Box<dyn ContentProvider>>,
    pub(crate) custom_cell: Option<Box<dyn CustomCell>>,
    on_cell_selected: Option<CellListener>,
    on_cell_activated: Option<CellListener>,
    on_view_scrolled: Option<ScrollListener>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("cols", &self.col_count())
            .field("rows", &self.row_count())
            .field("selection", &self.selection)
            .field("scroll", &self.viewport.scroll())
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Empty grid with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&GridConfig::default())
    }

    /// Empty grid (headers only) built from a configuration.
    pub fn with_config(config: &GridConfig) -> Self {
        Self {
            geometry: GridGeometry::new(config),
            viewport: Viewport::new(),
            selection: Selection::new(config.header_cols, config.header_rows),
            mode: config.selection_mode,
            fixed_cols: config.fixed_cols,
            fixed_rows: config.fixed_rows,
            resize_hit_width: config.resize_hit_width.max(1),
            wheel_step: config.wheel_step.max(1),
            resize_session: None,
            drag_selecting: false,
            content: None,
            custom_cell: None,
            on_cell_selected: None,
            on_cell_activated: None,
            on_view_scrolled: None,
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    // =====================================================================
    // Counts and bands
    // =====================================================================

    pub fn col_count(&self) -> u32 {
        self.geometry.col_count()
    }

    pub fn row_count(&self) -> u32 {
        self.geometry.row_count()
    }

    pub fn header_cols(&self) -> u32 {
        self.geometry.header_cols()
    }

    pub fn header_rows(&self) -> u32 {
        self.geometry.header_rows()
    }

    pub fn data_cols(&self) -> u32 {
        self.geometry.data_cols()
    }

    pub fn data_rows(&self) -> u32 {
        self.geometry.data_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Pinned data columns. The content provider's value wins when it has one.
    pub fn fixed_cols(&self) -> u32 {
        self.content
            .as_ref()
            .and_then(|c| c.fixed_cols())
            .unwrap_or(self.fixed_cols)
    }

    /// Pinned data rows. The content provider's value wins when it has one.
    pub fn fixed_rows(&self) -> u32 {
        self.content
            .as_ref()
            .and_then(|c| c.fixed_rows())
            .unwrap_or(self.fixed_rows)
    }

    /// Non-scrolling leading columns/rows (headers + fixed), clamped to the
    /// grid size.
    pub fn bands(&self) -> Bands {
        Bands::new(
            self.header_cols()
                .saturating_add(self.fixed_cols())
                .min(self.col_count()),
            self.header_rows()
                .saturating_add(self.fixed_rows())
                .min(self.row_count()),
        )
    }

    /// Pixel size of the header + fixed bands.
    pub fn non_scroll_extent(&self) -> Size {
        self.geometry.non_scroll_extent(self.bands())
    }

    // =====================================================================
    // Sizing (explicit setters; each re-lays out synchronously)
    // =====================================================================

    /// Set the data column/row counts. Shrinking re-clamps the selection to
    /// the last valid cell. Unchanged counts are a no-op.
    pub fn resize(&mut self, data_cols: u32, data_rows: u32) -> bool {
        if !self.geometry.resize(data_cols, data_rows) {
            return false;
        }
        self.relayout();
        true
    }

    /// Change the header column count; the selected data cell is kept.
    pub fn set_header_cols(&mut self, count: u32) -> bool {
        let old = self.header_cols();
        if !self.geometry.set_header_cols(count) {
            return false;
        }
        self.selection.col = self.selection.col.saturating_sub(old).saturating_add(count);
        self.relayout();
        true
    }

    /// Change the header row count; the selected data cell is kept.
    pub fn set_header_rows(&mut self, count: u32) -> bool {
        let old = self.header_rows();
        if !self.geometry.set_header_rows(count) {
            return false;
        }
        self.selection.row = self.selection.row.saturating_sub(old).saturating_add(count);
        self.relayout();
        true
    }

    /// Set the locally stored fixed column count (ignored while the content
    /// provider supplies one). Re-clamps scroll.
    pub fn set_fixed_cols(&mut self, count: u32) {
        if self.fixed_cols != count {
            debug!(fixed_cols = count, "fixed columns changed");
            self.fixed_cols = count;
            self.clamp_scroll();
        }
    }

    /// Set the locally stored fixed row count. Re-clamps scroll.
    pub fn set_fixed_rows(&mut self, count: u32) {
        if self.fixed_rows != count {
            debug!(fixed_rows = count, "fixed rows changed");
            self.fixed_rows = count;
            self.clamp_scroll();
        }
    }

    /// Sizes for columns/rows added by later resizes.
    pub fn set_default_sizes(&mut self, col_width: i32, row_height: i32) {
        self.geometry.set_default_sizes(col_width, row_height);
    }

    /// Set a column width (clamped to >= 0) and re-clamp scroll.
    pub fn set_col_width(&mut self, col: u32, width: i32) -> bool {
        if !self.geometry.set_col_width(col, width) {
            return false;
        }
        self.clamp_scroll();
        true
    }

    /// Set a row height (clamped to >= 0) and re-clamp scroll.
    pub fn set_row_height(&mut self, row: u32, height: i32) -> bool {
        if !self.geometry.set_row_height(row, height) {
            return false;
        }
        self.clamp_scroll();
        true
    }

    pub fn col_width(&self, col: u32) -> i32 {
        self.geometry.col_width(col)
    }

    pub fn row_height(&self, row: u32) -> i32 {
        self.geometry.row_height(row)
    }

    /// Host viewport changed size.
    pub fn set_client_size(&mut self, width: i32, height: i32) {
        self.viewport.set_client_size(width, height);
        self.clamp_scroll();
    }

    pub fn client_size(&self) -> Size {
        self.viewport.client_size()
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn row_select(&self) -> bool {
        self.mode == SelectionMode::Row
    }

    pub fn set_row_select(&mut self, enabled: bool) {
        self.mode = if enabled {
            SelectionMode::Row
        } else {
            SelectionMode::Cell
        };
    }

    pub fn set_resize_hit_width(&mut self, width: i32) {
        self.resize_hit_width = width.max(1);
    }

    /// Attach (or detach) the content provider. A provider that reports
    /// dimensions resizes the grid to them.
    pub fn set_content(&mut self, content: Option<Box<dyn ContentProvider>>) {
        let dims = content.as_ref().and_then(|c| c.dimensions());
        self.content = content;
        match dims {
            Some((cols, rows)) if self.geometry.resize(cols, rows) => self.relayout(),
            // Fixed counts may come from the new provider.
            _ => {
                self.clamp_scroll();
            }
        }
    }

    pub fn content(&self) -> Option<&dyn ContentProvider> {
        self.content.as_deref()
    }

    pub fn set_custom_cell(&mut self, custom: Option<Box<dyn CustomCell>>) {
        self.custom_cell = custom;
    }

    /// Grow a data column to the widest size the custom-cell override
    /// measures in it.
    pub fn autosize_col(&mut self, col: u32) -> bool {
        let hc = self.header_cols();
        if col < hc || col >= self.col_count() {
            return false;
        }
        let Some(custom) = self.custom_cell.as_ref() else {
            return false;
        };
        let data_col = col - hc;
        let widest = (0..self.data_rows())
            .filter(|&r| custom.handles(data_col, r))
            .filter_map(|r| custom.measure(data_col, r))
            .map(|size| size.width)
            .max();
        match widest {
            Some(width) if width > self.col_width(col) => self.set_col_width(col, width),
            _ => false,
        }
    }

    /// Grow a data row to the tallest size the custom-cell override
    /// measures in it.
    pub fn autosize_row(&mut self, row: u32) -> bool {
        let hr = self.header_rows();
        if row < hr || row >= self.row_count() {
            return false;
        }
        let Some(custom) = self.custom_cell.as_ref() else {
            return false;
        };
        let data_row = row - hr;
        let tallest = (0..self.data_cols())
            .filter(|&c| custom.handles(c, data_row))
            .filter_map(|c| custom.measure(c, data_row))
            .map(|size| size.height)
            .max();
        match tallest {
            Some(height) if height > self.row_height(row) => self.set_row_height(row, height),
            _ => false,
        }
    }

    /// Re-clamp selection and scroll after the grid's shape changed.
    fn relayout(&mut self) {
        self.clamp_selection();
        self.clamp_scroll();
    }

    /// Pull the selection back inside the data area (last valid cell when
    /// the grid shrank). An empty grid keeps its selection untouched.
    fn clamp_selection(&mut self) {
        if self.is_empty() {
            return;
        }
        let col = self
            .selection
            .col
            .clamp(self.header_cols(), self.col_count() - 1);
        let row = self
            .selection
            .row
            .clamp(self.header_rows(), self.row_count() - 1);
        if (col, row) != (self.selection.col, self.selection.row) {
            trace!(col, row, "selection re-clamped");
            self.selection = Selection::new(col, row);
            self.notify_cell_selected();
        }
    }

    // =====================================================================
    // Geometry queries
    // =====================================================================

    /// Unscrolled cell rectangle; zero for out-of-range indices.
    pub fn cell_rect(&self, col: u32, row: u32) -> Rect {
        self.geometry.cell_rect(col, row)
    }

    /// Cell rectangle in client coordinates.
    pub fn cell_screen_rect(&self, col: u32, row: u32) -> Rect {
        self.viewport
            .cell_screen_rect(col, row, &self.geometry, self.bands())
    }

    /// Client rectangle of the scrollable region.
    pub fn scroll_rect(&self) -> Rect {
        self.viewport.scroll_rect(&self.geometry, self.bands())
    }

    pub fn first_visible_col(&self) -> u32 {
        self.viewport.first_visible_col(&self.geometry, self.bands())
    }

    pub fn last_visible_col(&self) -> u32 {
        self.viewport.last_visible_col(&self.geometry, self.bands())
    }

    pub fn first_visible_row(&self) -> u32 {
        self.viewport.first_visible_row(&self.geometry, self.bands())
    }

    pub fn last_visible_row(&self) -> u32 {
        self.viewport.last_visible_row(&self.geometry, self.bands())
    }

    pub(crate) fn is_fully_visible(&self, axis: Axis, idx: u32) -> bool {
        self.viewport
            .is_fully_visible(axis, idx, &self.geometry, self.bands())
    }

    // =====================================================================
    // Scrolling
    // =====================================================================

    pub fn scroll_x(&self) -> i32 {
        self.viewport.scroll_x()
    }

    pub fn scroll_y(&self) -> i32 {
        self.viewport.scroll_y()
    }

    pub fn max_scroll(&self) -> (i32, i32) {
        self.viewport.max_scroll(&self.geometry, self.bands())
    }

    /// Set scroll offsets (clamped). Fires "view scrolled" only on change.
    pub fn scroll_to(&mut self, x: i32, y: i32) -> bool {
        let bands = self.bands();
        let changed = self.viewport.scroll_to(x, y, &self.geometry, bands);
        self.after_scroll(changed)
    }

    /// Scroll by whole cells.
    pub fn scroll_by(&mut self, delta_cols: i32, delta_rows: i32) -> bool {
        let bands = self.bands();
        let changed = self
            .viewport
            .scroll_by(delta_cols, delta_rows, &self.geometry, bands);
        self.after_scroll(changed)
    }

    /// Minimal scroll that brings a cell into view.
    pub fn make_visible(&mut self, col: u32, row: u32) -> bool {
        let bands = self.bands();
        let changed = self
            .viewport
            .make_visible(col, row, &self.geometry, bands);
        self.after_scroll(changed)
    }

    pub(crate) fn clamp_scroll(&mut self) -> bool {
        let bands = self.bands();
        let changed = self.viewport.clamp(&self.geometry, bands);
        self.after_scroll(changed)
    }

    pub(crate) fn after_scroll(&mut self, changed: bool) -> bool {
        if changed {
            self.notify_view_scrolled();
        }
        changed
    }

    // =====================================================================
    // Selection state
    // =====================================================================

    /// Selected cell in total coordinates.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// True when the grid has a selectable cell (and so a valid selection).
    pub fn has_selection(&self) -> bool {
        !self.is_empty()
    }

    /// Selected cell in data-relative coordinates, `None` for an empty grid.
    pub fn data_selection(&self) -> Option<(u32, u32)> {
        self.has_selection().then(|| {
            self.selection
                .data_relative(self.header_cols(), self.header_rows())
        })
    }

    /// True if `(col, row)` is a selectable (non-header, in-range) cell.
    pub fn is_data_cell(&self, col: u32, row: u32) -> bool {
        col >= self.header_cols()
            && row >= self.header_rows()
            && col < self.col_count()
            && row < self.row_count()
    }

    // =====================================================================
    // Listeners (single slot each; None clears)
    // =====================================================================

    pub fn set_on_cell_selected(&mut self, listener: Option<CellListener>) {
        self.on_cell_selected = listener;
    }

    pub fn set_on_cell_activated(&mut self, listener: Option<CellListener>) {
        self.on_cell_activated = listener;
    }

    pub fn set_on_view_scrolled(&mut self, listener: Option<ScrollListener>) {
        self.on_view_scrolled = listener;
    }

    // The listener is taken out of its slot while it runs, so re-entrant
    // calls from inside it do not fire it again. A listener installed during
    // the callback replaces the running one.

    pub(crate) fn notify_cell_selected(&mut self) {
        if let Some(mut listener) = self.on_cell_selected.take() {
            let (col, row) = self
                .selection
                .data_relative(self.header_cols(), self.header_rows());
            listener(self, col, row);
            if self.on_cell_selected.is_none() {
                self.on_cell_selected = Some(listener);
            }
        }
    }

    pub(crate) fn notify_cell_activated(&mut self, col: u32, row: u32) {
        if let Some(mut listener) = self.on_cell_activated.take() {
            let data_col = col.saturating_sub(self.header_cols());
            let data_row = row.saturating_sub(self.header_rows());
            listener(self, data_col, data_row);
            if self.on_cell_activated.is_none() {
                self.on_cell_activated = Some(listener);
            }
        }
    }

    pub(crate) fn notify_view_scrolled(&mut self) {
        if let Some(mut listener) = self.on_view_scrolled.take() {
            let (x, y) = self.viewport.scroll();
            listener(self, x, y);
            if self.on_view_scrolled.is_none() {
                self.on_view_scrolled = Some(listener);
            }
        }
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
    use crate::content::TextGrid;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn grid(cols: u32, rows: u32) -> Grid {
        let mut g = Grid::new();
        g.resize(cols, rows);
        g.set_client_size(300, 200);
        g
    }

    #[test]
    fn test_new_grid_is_empty() {
        let g = Grid::new();
        assert!(g.is_empty());
        assert!(!g.has_selection());
        assert_eq!(g.data_selection(), None);
    }

    #[test]
    fn test_shrink_reclamps_selection() {
        let mut g = grid(10, 10);
        assert!(g.select_cell(8, 9, false));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        g.set_on_cell_selected(Some(Box::new(move |_, c, r| sink.borrow_mut().push((c, r)))));
        assert!(g.resize(3, 2));
        assert_eq!(g.selection(), Selection::new(3, 2));
        assert_eq!(seen.borrow().as_slice(), &[(2, 1)]);
    }

    #[test]
    fn test_fixed_counts_delegate_independently() {
        let mut g = grid(10, 10);
        g.set_fixed_cols(1);
        g.set_fixed_rows(3);
        let content = TextGrid {
            fixed_cols: Some(2),
            ..TextGrid::new(10, 10)
        };
        g.set_content(Some(Box::new(content)));
        assert_eq!(g.fixed_cols(), 2);
        // the provider has no row value, so the local one stays in force
        assert_eq!(g.fixed_rows(), 3);
        assert_eq!(g.bands(), Bands::new(3, 4));
    }

    #[test]
    fn test_set_content_resizes_to_dimensions() {
        let mut g = Grid::new();
        g.set_content(Some(Box::new(TextGrid::new(4, 7))));
        assert_eq!(g.data_cols(), 4);
        assert_eq!(g.data_rows(), 7);
    }

    #[test]
    fn test_header_change_keeps_selected_data_cell() {
        let mut g = grid(5, 5);
        assert!(g.select_cell(3, 2, false));
        assert!(g.set_header_cols(2));
        assert_eq!(g.selection(), Selection::new(4, 2));
        assert_eq!(g.data_selection(), Some((2, 1)));
    }

    #[test]
    fn test_reentrant_listener_does_not_recurse() {
        let mut g = grid(5, 5);
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        g.set_on_cell_selected(Some(Box::new(move |grid, col, row| {
            *counter.borrow_mut() += 1;
            // bounce the selection one row further down from inside the callback
            let (hc, hr) = (grid.header_cols(), grid.header_rows());
            grid.select_cell(col + hc, row + hr + 1, true);
        })));
        assert!(g.select_cell(2, 1, true));
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(g.selection(), Selection::new(2, 2));
        assert_eq!(g.geometry().col_cumulative().len(), 6);
    }
}
