//! Pointer interaction tests
//!
//! Hit testing, click and drag selection, double-click activation, column
//! resizing and the wheel.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use gridview::{CursorHint, Modifiers, PointerButton, PointerEvent, Selection};
use test_case::test_case;

// Default layout: header column [0,40), data columns 64 wide starting at 40;
// header row [0,20), data rows 20 high starting at 20.

// =============================================================================
// HIT TESTING
// =============================================================================

#[test_case(10, 10, 0, 0 ; "corner")]
#[test_case(50, 10, 1, 0 ; "column header")]
#[test_case(10, 30, 0, 1 ; "row header")]
#[test_case(110, 45, 2, 2 ; "data cell")]
#[test_case(103, 39, 1, 1 ; "last pixel of first data cell")]
fn test_hit_test(x: i32, y: i32, col: u32, row: u32) {
    let g = common::grid(10, 10, 300, 200);
    let hit = g.hit_test(x, y).unwrap();
    assert_eq!((hit.col, hit.row), (col, row));
    assert!(hit.inside);
}

#[test]
fn test_hit_test_follows_scroll() {
    let mut g = common::grid(10, 10, 300, 200);
    g.scroll_to(64, 20);
    let hit = g.hit_test(50, 25).unwrap();
    assert_eq!((hit.col, hit.row), (2, 2));
    // the header band does not scroll
    let header = g.hit_test(50, 10).unwrap();
    assert_eq!((header.col, header.row), (2, 0));
    let row_header = g.hit_test(10, 25).unwrap();
    assert_eq!((row_header.col, row_header.row), (0, 2));
}

// =============================================================================
// CLICK AND DRAG SELECTION
// =============================================================================

#[test]
fn test_click_selects_and_notifies() {
    let mut g = common::grid(10, 10, 300, 200);
    let log = common::record_selected(&mut g);
    assert!(g.pointer_down(PointerEvent::primary(110, 45)));
    g.pointer_up();
    assert_eq!(g.selection(), Selection::new(2, 2));
    assert_eq!(log.borrow().as_slice(), &[(1, 1)]);
}

#[test]
fn test_click_outside_cells_ignored() {
    let mut g = common::grid(2, 2, 300, 200);
    // past the last column (data ends at 168)
    assert!(!g.pointer_down(PointerEvent::primary(250, 30)));
    assert_eq!(g.selection(), Selection::new(1, 1));
}

#[test]
fn test_secondary_button_ignored() {
    let mut g = common::grid(10, 10, 300, 200);
    let event = PointerEvent {
        button: PointerButton::Secondary,
        ..PointerEvent::primary(110, 45)
    };
    assert!(!g.pointer_down(event));
    assert_eq!(g.selection(), Selection::new(1, 1));
}

#[test]
fn test_drag_extends_selection_until_release() {
    let mut g = common::grid(10, 10, 300, 200);
    g.pointer_down(PointerEvent::primary(50, 25));
    assert!(g.pointer_move(110, 45));
    assert_eq!(g.selection(), Selection::new(2, 2));
    assert!(g.pointer_move(180, 65));
    assert_eq!(g.selection(), Selection::new(3, 3));
    g.pointer_up();
    assert!(!g.pointer_move(50, 25));
    assert_eq!(g.selection(), Selection::new(3, 3));
}

#[test]
fn test_double_click_activates_selected_cell() {
    let mut g = common::grid(10, 10, 300, 200);
    let activated = common::record_activated(&mut g);
    g.pointer_down(PointerEvent::primary(110, 45));
    g.pointer_up();
    assert!(g.pointer_down(PointerEvent::double(110, 45)));
    g.pointer_up();
    assert_eq!(activated.borrow().as_slice(), &[(1, 1)]);
}

#[test]
fn test_double_click_on_other_cell_only_selects() {
    let mut g = common::grid(10, 10, 300, 200);
    let activated = common::record_activated(&mut g);
    assert!(g.pointer_down(PointerEvent::double(110, 45)));
    assert_eq!(g.selection(), Selection::new(2, 2));
    assert!(activated.borrow().is_empty());
}

#[test]
fn test_click_partly_visible_cell_scrolls_it_in() {
    let mut g = common::grid(10, 10, 300, 200);
    let scrolled = common::record_scrolled(&mut g);
    // data column 4 spans [296, 360)
    assert!(g.pointer_down(PointerEvent::primary(298, 30)));
    assert_eq!(g.selection(), Selection::new(5, 1));
    assert_eq!(g.scroll_x(), 60);
    assert_eq!(scrolled.borrow().len(), 1);
}

// =============================================================================
// COLUMN RESIZE
// =============================================================================

#[test_case(100, Some(1) ; "left of boundary")]
#[test_case(104, Some(1) ; "on boundary")]
#[test_case(108, Some(1) ; "right of boundary")]
#[test_case(99, None ; "too far left")]
#[test_case(109, None ; "too far right")]
#[test_case(42, Some(0) ; "header column edge")]
fn test_resize_target(x: i32, expected: Option<u32>) {
    let g = common::grid(10, 10, 300, 200);
    assert_eq!(g.column_resize_target(x, 10), expected);
    let cursor = if expected.is_some() {
        CursorHint::ColumnResize
    } else {
        CursorHint::Default
    };
    assert_eq!(g.cursor_at(x, 10), cursor);
}

#[test]
fn test_resize_zone_only_in_header_rows() {
    let g = common::grid(10, 10, 300, 200);
    assert_eq!(g.column_resize_target(104, 30), None);
    assert_eq!(g.cursor_at(104, 30), CursorHint::Default);
}

#[test_case(0, 42, 0 ; "under header column")]
#[test_case(1, 106, 1 ; "under fixed column")]
fn test_resize_target_skips_column_scrolled_under_band(fixed: u32, x: i32, expected: u32) {
    let mut g = common::grid(10, 10, 300, 200);
    g.set_fixed_cols(fixed);
    // the first scrolled column now sits entirely under the band
    assert!(g.scroll_to(64, 0));
    assert_eq!(g.column_resize_target(x, 10), Some(expected));
    assert!(g.pointer_down(PointerEvent::primary(x, 10)));
    assert_eq!(g.resize_session().unwrap().column, expected);
}

#[test]
fn test_resize_drag_updates_geometry() {
    let mut g = common::grid(10, 10, 300, 200);
    let selected = common::record_selected(&mut g);
    assert!(g.pointer_down(PointerEvent::primary(106, 5)));
    let session = g.resize_session().unwrap();
    assert_eq!(session.column, 1);
    assert_eq!(session.start_width, 64);

    assert!(g.pointer_move(146, 5));
    assert_eq!(g.col_width(1), 104);
    assert_eq!(g.geometry().col_end(2), 40 + 104 + 64);

    // dragging far left clamps at zero
    assert!(g.pointer_move(-500, 5));
    assert_eq!(g.col_width(1), 0);

    assert!(g.pointer_up());
    assert!(!g.is_resizing());
    assert!(selected.borrow().is_empty());
}

#[test]
fn test_resize_reclamps_scroll() {
    let mut g = common::grid(6, 5, 300, 200);
    g.scroll_to(i32::MAX, 0);
    let before = g.scroll_x();
    assert!(before > 0);
    let scrolled = common::record_scrolled(&mut g);
    // shrink the column under the header boundary at x = 104
    g.pointer_down(PointerEvent::primary(104, 5));
    let column = g.resize_session().unwrap().column;
    g.pointer_move(104 - 64, 5);
    assert_eq!(g.col_width(column), 0);
    assert!(g.scroll_x() < before);
    assert!(!scrolled.borrow().is_empty());
    assert!(g.pointer_cancel());
}

#[test]
fn test_cancel_ends_session_in_place() {
    let mut g = common::grid(10, 10, 300, 200);
    g.pointer_down(PointerEvent::primary(104, 5));
    g.pointer_move(124, 5);
    assert!(g.pointer_cancel());
    assert!(!g.is_resizing());
    assert_eq!(g.col_width(1), 84);
    assert!(!g.pointer_move(200, 5));
}

// =============================================================================
// WHEEL
// =============================================================================

#[test]
fn test_wheel_scrolls_rows() {
    let mut g = common::grid(10, 50, 300, 200);
    assert!(g.wheel(3, Modifiers::NONE));
    assert_eq!(g.scroll_y(), 60);
    assert!(g.wheel(-1, Modifiers::NONE));
    assert_eq!(g.scroll_y(), 40);
    assert!(!g.wheel(0, Modifiers::NONE));
}

#[test]
fn test_shift_wheel_scrolls_columns() {
    let mut g = common::grid(10, 50, 300, 200);
    assert!(g.wheel(2, Modifiers::shift()));
    assert_eq!(g.scroll_x(), 128);
    assert_eq!(g.scroll_y(), 0);
}
