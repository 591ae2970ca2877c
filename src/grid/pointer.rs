//! Pointer input: hit testing, column-resize drags, click selection and
//! the wheel.

use tracing::debug;

use super::Grid;
use crate::types::{CursorHint, Modifiers, PointerButton, PointerEvent, Rect, ResizeSession};

/// Result of mapping a client point to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTest {
    /// Total column index
    pub col: u32,
    /// Total row index
    pub row: u32,
    /// Cell rectangle in client coordinates
    pub rect: Rect,
    /// False when the point lies outside the resolved cell (past the last
    /// column/row, or across the fixed/scroll seam)
    pub inside: bool,
}

impl Grid {
    /// Resolve the cell under a client point.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<HitTest> {
        let bands = self.bands();
        let (cx, cy) = self.viewport.to_content(x, y, &self.geometry, bands);
        let col = self.geometry.col_at(cx)?;
        let row = self.geometry.row_at(cy)?;
        let rect = self.viewport.cell_screen_rect(col, row, &self.geometry, bands);
        Some(HitTest {
            col,
            row,
            rect,
            inside: rect.contains(x, y),
        })
    }

    /// Column whose trailing edge is within half the resize hit width of
    /// the point, looking only inside the header-row band.
    pub fn column_resize_target(&self, x: i32, y: i32) -> Option<u32> {
        let header_rows = self.header_rows();
        if header_rows == 0 || y < 0 || y >= self.geometry.row_end(header_rows - 1) {
            return None;
        }
        let hit = self.hit_test(x, y)?;
        let half = (self.resize_hit_width / 2).max(1);
        if (x - hit.rect.right()).abs() <= half {
            return Some(hit.col);
        }
        let mut prev = hit.col.checked_sub(1)?;
        let mut prev_rect = self.cell_screen_rect(prev, hit.row);
        let band_cols = self.bands().cols;
        if prev >= band_cols && prev_rect.right() <= self.non_scroll_extent().width {
            // Scrolled under the fixed band: the visible edge is the band's.
            prev = band_cols.checked_sub(1)?;
            prev_rect = self.cell_screen_rect(prev, hit.row);
        }
        ((x - prev_rect.right()).abs() <= half).then_some(prev)
    }

    /// Pointer shape for the host to show at a client point.
    pub fn cursor_at(&self, x: i32, y: i32) -> CursorHint {
        if self.resize_session.is_some() || self.column_resize_target(x, y).is_some() {
            CursorHint::ColumnResize
        } else {
            CursorHint::Default
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.resize_session.is_some()
    }

    pub fn resize_session(&self) -> Option<ResizeSession> {
        self.resize_session
    }

    /// Button press. Starts a column resize near a header boundary,
    /// otherwise selects (or, on a double click of the selected cell,
    /// activates) the data cell under the pointer.
    pub fn pointer_down(&mut self, event: PointerEvent) -> bool {
        if event.button != PointerButton::Primary || self.resize_session.is_some() {
            return false;
        }
        if let Some(column) = self.column_resize_target(event.x, event.y) {
            let session = ResizeSession {
                column,
                start_x: event.x,
                start_width: self.col_width(column),
            };
            debug!(column, start_width = session.start_width, "column resize started");
            self.resize_session = Some(session);
            return true;
        }
        let Some(hit) = self.hit_test(event.x, event.y) else {
            return false;
        };
        if !hit.inside || !self.is_data_cell(hit.col, hit.row) {
            return false;
        }
        self.drag_selecting = true;
        let already_selected =
            self.selection.col == hit.col && self.selection.row == hit.row;
        if event.is_double_click() && already_selected {
            return self.activate_cell(hit.col, hit.row);
        }
        self.select_cell(hit.col, hit.row, true)
    }

    /// Pointer motion. Drives an active resize session; otherwise, while a
    /// press-drag is in progress, selects the cell under the pointer.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        if let Some(session) = self.resize_session {
            return self.set_col_width(session.column, session.width_at(x));
        }
        if !self.drag_selecting {
            return false;
        }
        match self.hit_test(x, y) {
            Some(hit) if hit.inside => self.select_cell(hit.col, hit.row, true),
            _ => false,
        }
    }

    /// Button release: ends a resize session or a drag selection.
    pub fn pointer_up(&mut self) -> bool {
        self.drag_selecting = false;
        self.end_resize()
    }

    /// Pointer capture lost: the resize session ends where it is.
    pub fn pointer_cancel(&mut self) -> bool {
        self.drag_selecting = false;
        self.end_resize()
    }

    fn end_resize(&mut self) -> bool {
        match self.resize_session.take() {
            Some(session) => {
                debug!(
                    column = session.column,
                    width = self.col_width(session.column),
                    "column resize finished"
                );
                true
            }
            None => false,
        }
    }

    /// Wheel notches (positive = down/right). Shift scrolls horizontally.
    pub fn wheel(&mut self, notches: i32, modifiers: Modifiers) -> bool {
        if notches == 0 {
            return false;
        }
        let delta = notches.saturating_mul(self.wheel_step);
        if modifiers.shift {
            self.scroll_by(delta, 0)
        } else {
            self.scroll_by(0, delta)
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

    fn grid() -> Grid {
        let mut g = Grid::new();
        g.resize(10, 10);
        g.set_client_size(300, 200);
        g
    }

    #[test]
    fn test_hit_test_data_cell() {
        let g = grid();
        // header col [0,40), data col 0 [40,104); header row [0,20)
        let hit = g.hit_test(50, 25).unwrap();
        assert_eq!((hit.col, hit.row), (1, 1));
        assert_eq!(hit.rect, Rect::new(40, 20, 64, 20));
        assert!(hit.inside);
    }

    #[test]
    fn test_hit_test_past_end_is_outside() {
        let mut g = grid();
        g.resize(2, 2);
        let hit = g.hit_test(290, 10).unwrap();
        assert_eq!(hit.col, 2);
        assert!(!hit.inside);
    }

    #[test]
    fn test_resize_target_only_in_header_band() {
        let g = grid();
        // boundary between data col 0 and 1 at x = 104
        assert_eq!(g.column_resize_target(103, 10), Some(1));
        assert_eq!(g.column_resize_target(106, 10), Some(1));
        assert_eq!(g.column_resize_target(130, 10), None);
        assert_eq!(g.column_resize_target(104, 30), None);
    }

    #[test]
    fn test_resize_drag_lifecycle() {
        let mut g = grid();
        assert!(g.pointer_down(PointerEvent::primary(104, 10)));
        assert!(g.is_resizing());
        assert_eq!(g.cursor_at(500, 500), CursorHint::ColumnResize);
        assert!(g.pointer_move(134, 10));
        assert_eq!(g.col_width(1), 94);
        assert_eq!(g.geometry().col_end(1), 134);
        assert!(g.pointer_move(0, 10));
        assert_eq!(g.col_width(1), 0);
        assert!(g.pointer_up());
        assert!(!g.is_resizing());
        // selection never moved during the drag
        assert_eq!((g.selection().col, g.selection().row), (1, 1));
    }

    #[test]
    fn test_click_header_does_not_select() {
        let mut g = grid();
        assert!(!g.pointer_down(PointerEvent::primary(20, 50)));
        assert_eq!((g.selection().col, g.selection().row), (1, 1));
    }

    #[test]
    fn test_wheel_axis() {
        let mut g = grid();
        assert!(g.wheel(1, Modifiers::NONE));
        assert_eq!(g.scroll_y(), 20);
        assert!(g.wheel(1, Modifiers::shift()));
        assert_eq!(g.scroll_x(), 64);
    }
}
