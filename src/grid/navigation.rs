//! Selection and keyboard navigation.
//!
//! State is just the selected `(col, row)`. Commands either move it, scroll
//! the viewport, or both; a move onto a header, out of range, or onto the
//! current cell is rejected and changes nothing.

use tracing::trace;

use super::Grid;
use crate::layout::Axis;
use crate::types::{Modifiers, NavCommand, Selection};

impl Grid {
    /// Select a cell (total coordinates). Returns false, changing nothing,
    /// for header cells, out-of-range cells and the current cell. On success
    /// optionally scrolls it into view and fires "cell selected".
    pub fn select_cell(&mut self, col: u32, row: u32, make_visible: bool) -> bool {
        self.select_cell_with(col, row, make_visible, true)
    }

    /// Like [`select_cell`](Self::select_cell) with the notification
    /// optionally suppressed.
    pub fn select_cell_with(
        &mut self,
        col: u32,
        row: u32,
        make_visible: bool,
        notify: bool,
    ) -> bool {
        if !self.is_data_cell(col, row) {
            return false;
        }
        if self.selection == Selection::new(col, row) {
            return false;
        }
        trace!(col, row, "cell selected");
        self.selection = Selection::new(col, row);
        if make_visible {
            self.make_visible(col, row);
        }
        if notify {
            self.notify_cell_selected();
        }
        true
    }

    /// Select the cell if needed, then fire "cell activated" even when the
    /// selection did not change. False only for non-data cells.
    pub fn activate_cell(&mut self, col: u32, row: u32) -> bool {
        if !self.is_data_cell(col, row) {
            return false;
        }
        self.select_cell(col, row, true);
        self.notify_cell_activated(col, row);
        true
    }

    /// Map a key to a command and run it. False when the key is unbound or
    /// the command changed nothing.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        match NavCommand::from_key(key, modifiers) {
            Some(cmd) => self.execute(cmd),
            None => false,
        }
    }

    /// Run a navigation command. Returns true if the selection or the
    /// scroll position changed (or a cell was activated).
    pub fn execute(&mut self, cmd: NavCommand) -> bool {
        if self.is_empty() {
            return false;
        }
        let Selection { col, row } = self.selection;
        let row_mode = self.row_select();
        match cmd {
            NavCommand::MoveUp => match row.checked_sub(1) {
                Some(up) => self.select_cell(col, up, true),
                None => false,
            },
            NavCommand::MoveDown => self.select_cell(col, row.saturating_add(1), true),
            NavCommand::MoveLeft if row_mode => self.scroll_by(-1, 0),
            NavCommand::MoveRight if row_mode => self.scroll_by(1, 0),
            NavCommand::MoveLeft => match col.checked_sub(1) {
                Some(left) => self.select_cell(left, row, true),
                None => false,
            },
            NavCommand::MoveRight => self.select_cell(col.saturating_add(1), row, true),
            NavCommand::ScrollUp => self.scroll_by(0, -1),
            NavCommand::ScrollDown => self.scroll_by(0, 1),
            NavCommand::ScrollLeft => self.scroll_by(-1, 0),
            NavCommand::ScrollRight => self.scroll_by(1, 0),
            NavCommand::PageUp => self.page_up(),
            NavCommand::PageDown => self.page_down(),
            NavCommand::PageLeft => self.scroll_page(Axis::Horizontal, false),
            NavCommand::PageRight => self.scroll_page(Axis::Horizontal, true),
            NavCommand::LineStart if row_mode => self.scroll_extreme(Axis::Horizontal, false),
            NavCommand::LineEnd if row_mode => self.scroll_extreme(Axis::Horizontal, true),
            NavCommand::LineStart => self.jump_to(self.header_cols(), row, false),
            NavCommand::LineEnd => self.jump_to(self.col_count() - 1, row, true),
            NavCommand::DocumentStart => {
                let target_col = if row_mode { col } else { self.header_cols() };
                self.jump_to(target_col, self.header_rows(), false)
            }
            NavCommand::DocumentEnd => {
                let target_col = if row_mode { col } else { self.col_count() - 1 };
                self.jump_to(target_col, self.row_count() - 1, true)
            }
            NavCommand::Activate => self.activate_cell(col, row),
        }
    }

    /// Scroll a full page without touching the selection. One notification.
    pub fn scroll_page(&mut self, axis: Axis, forward: bool) -> bool {
        let bands = self.bands();
        let changed = if forward {
            self.viewport.page_forward(axis, &self.geometry, bands)
        } else {
            self.viewport.page_back(axis, &self.geometry, bands)
        };
        self.after_scroll(changed)
    }

    fn scroll_extreme(&mut self, axis: Axis, to_end: bool) -> bool {
        let bands = self.bands();
        let changed = self
            .viewport
            .scroll_to_extreme(axis, to_end, &self.geometry, bands);
        self.after_scroll(changed)
    }

    /// Move the selection to the bottom visible row, or page down and follow
    /// with the selection when it is already there.
    fn page_down(&mut self) -> bool {
        let Selection { col, row } = self.selection;
        let first = self.first_visible_row();
        let bottom = self.last_visible_row();
        if row < bottom {
            return self.select_cell(col, bottom, true);
        }
        let page_rows = bottom.saturating_sub(first).max(1);
        let scrolled = self.scroll_page(Axis::Vertical, true);
        let mut target = self.last_visible_row();
        if target <= row {
            target = row
                .saturating_add(page_rows)
                .min(self.row_count().saturating_sub(1));
        }
        let moved = self.select_cell(col, target, true);
        scrolled || moved
    }

    /// Move the selection to the top visible row, or page up and follow with
    /// the selection when it is already there.
    fn page_up(&mut self) -> bool {
        let Selection { col, row } = self.selection;
        let top = self.first_visible_row();
        let bottom = self.last_visible_row();
        if row > top {
            return self.select_cell(col, top, true);
        }
        let page_rows = bottom.saturating_sub(top).max(1);
        let scrolled = self.scroll_page(Axis::Vertical, false);
        let mut target = self.first_visible_row();
        if target >= row {
            target = row.saturating_sub(page_rows).max(self.header_rows());
        }
        let moved = self.select_cell(col, target, true);
        scrolled || moved
    }

    /// Select a boundary cell. If it is already on screen only the selection
    /// moves; otherwise the scroll resets to the matching extreme first.
    fn jump_to(&mut self, col: u32, row: u32, to_end: bool) -> bool {
        let row_mode = self.row_select();
        let col_visible = row_mode || self.is_fully_visible(Axis::Horizontal, col);
        let row_visible = self.is_fully_visible(Axis::Vertical, row);
        let mut scrolled = false;
        if !col_visible {
            scrolled |= self.scroll_extreme(Axis::Horizontal, to_end);
        }
        if !row_visible {
            scrolled |= self.scroll_extreme(Axis::Vertical, to_end);
        }
        let moved = self.select_cell(col, row, false);
        scrolled || moved
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

    fn grid(cols: u32, rows: u32) -> Grid {
        let mut g = Grid::new();
        g.resize(cols, rows);
        // header col 40 + 4 data cols of 64 = 296 fully visible horizontally
        g.set_client_size(300, 200);
        g
    }

    #[test]
    fn test_header_cell_rejected() {
        let mut g = grid(5, 5);
        assert!(!g.select_cell(0, 3, true));
        assert!(!g.select_cell(3, 0, true));
        assert_eq!(g.selection(), Selection::new(1, 1));
    }

    #[test]
    fn test_same_cell_rejected() {
        let mut g = grid(5, 5);
        assert!(!g.select_cell(1, 1, true));
    }

    #[test]
    fn test_move_left_stops_at_header() {
        let mut g = grid(5, 5);
        assert!(!g.execute(NavCommand::MoveLeft));
        assert!(g.execute(NavCommand::MoveRight));
        assert_eq!(g.selection().col, 2);
    }

    #[test]
    fn test_line_end_visible_moves_without_scroll() {
        let mut g = grid(4, 5);
        assert!(g.execute(NavCommand::LineEnd));
        assert_eq!(g.selection().col, 4);
        assert_eq!(g.scroll_x(), 0);
    }

    #[test]
    fn test_line_end_offscreen_scrolls_to_max() {
        let mut g = grid(20, 5);
        assert!(g.execute(NavCommand::LineEnd));
        assert_eq!(g.selection().col, 20);
        assert_eq!(g.scroll_x(), g.max_scroll().0);
        assert!(g.execute(NavCommand::LineStart));
        assert_eq!(g.selection().col, 1);
        assert_eq!(g.scroll_x(), 0);
    }

    #[test]
    fn test_activate_fires_even_without_selection_change() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut g = grid(5, 5);
        let activated = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&activated);
        g.set_on_cell_activated(Some(Box::new(move |_, c, r| sink.borrow_mut().push((c, r)))));
        assert!(g.execute(NavCommand::Activate));
        assert!(g.execute(NavCommand::Activate));
        assert_eq!(activated.borrow().as_slice(), &[(0, 0), (0, 0)]);
    }

    #[test]
    fn test_empty_grid_ignores_commands() {
        let mut g = Grid::new();
        g.set_client_size(300, 200);
        assert!(!g.execute(NavCommand::MoveDown));
        assert!(!g.execute(NavCommand::DocumentEnd));
        assert!(!g.execute(NavCommand::Activate));
    }
}
