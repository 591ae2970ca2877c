//! Common test utilities: grid builders and notification recorders.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use gridview::{Grid, GridConfig};

/// Shared log of listener calls.
pub type Log<T> = Rc<RefCell<Vec<T>>>;

/// Grid with default sizes (header col 40, data cols 64, rows 20).
pub fn grid(cols: u32, rows: u32, width: i32, height: i32) -> Grid {
    let mut g = Grid::new();
    g.resize(cols, rows);
    g.set_client_size(width, height);
    g
}

/// Grid with uniform data cell sizes and zero-size headers, so data
/// column/row `i` spans `[i * size, (i + 1) * size)`.
pub fn uniform_grid(cols: u32, rows: u32, size: i32, width: i32, height: i32) -> Grid {
    let config = GridConfig {
        header_col_width: 0,
        header_row_height: 0,
        default_col_width: size,
        default_row_height: size,
        ..GridConfig::default()
    };
    let mut g = Grid::with_config(&config);
    g.resize(cols, rows);
    g.set_client_size(width, height);
    g
}

/// Record every "cell selected" notification.
pub fn record_selected(grid: &mut Grid) -> Log<(u32, u32)> {
    let log: Log<(u32, u32)> = Rc::default();
    let sink = Rc::clone(&log);
    grid.set_on_cell_selected(Some(Box::new(move |_, c, r| sink.borrow_mut().push((c, r)))));
    log
}

/// Record every "cell activated" notification.
pub fn record_activated(grid: &mut Grid) -> Log<(u32, u32)> {
    let log: Log<(u32, u32)> = Rc::default();
    let sink = Rc::clone(&log);
    grid.set_on_cell_activated(Some(Box::new(move |_, c, r| sink.borrow_mut().push((c, r)))));
    log
}

/// Record every "view scrolled" notification.
pub fn record_scrolled(grid: &mut Grid) -> Log<(i32, i32)> {
    let log: Log<(i32, i32)> = Rc::default();
    let sink = Rc::clone(&log);
    grid.set_on_view_scrolled(Some(Box::new(move |_, x, y| sink.borrow_mut().push((x, y)))));
    log
}

/// Assert the selection lies inside the data area.
pub fn assert_selection_in_bounds(grid: &Grid) {
    let sel = grid.selection();
    assert!(
        sel.col >= grid.header_cols() && sel.col < grid.col_count(),
        "selected column {} outside [{}, {})",
        sel.col,
        grid.header_cols(),
        grid.col_count()
    );
    assert!(
        sel.row >= grid.header_rows() && sel.row < grid.row_count(),
        "selected row {} outside [{}, {})",
        sel.row,
        grid.header_rows(),
        grid.row_count()
    );
}
