//! Selection and keyboard navigation tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use gridview::{Axis, Grid, GridConfig, Modifiers, NavCommand, Selection, SelectionMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_case::test_case;

const ALL_COMMANDS: [NavCommand; 17] = [
    NavCommand::MoveUp,
    NavCommand::MoveDown,
    NavCommand::MoveLeft,
    NavCommand::MoveRight,
    NavCommand::ScrollUp,
    NavCommand::ScrollDown,
    NavCommand::ScrollLeft,
    NavCommand::ScrollRight,
    NavCommand::PageUp,
    NavCommand::PageDown,
    NavCommand::PageLeft,
    NavCommand::PageRight,
    NavCommand::LineStart,
    NavCommand::LineEnd,
    NavCommand::DocumentStart,
    NavCommand::DocumentEnd,
    NavCommand::Activate,
];

// =============================================================================
// SELECTION RULES
// =============================================================================

#[test]
fn test_initial_selection_is_first_data_cell() {
    let g = common::grid(5, 5, 300, 200);
    assert_eq!(g.selection(), Selection::new(1, 1));
    assert_eq!(g.data_selection(), Some((0, 0)));
}

#[test_case(0, 3 ; "header column")]
#[test_case(2, 0 ; "header row")]
#[test_case(0, 0 ; "corner")]
#[test_case(6, 2 ; "past last column")]
#[test_case(2, 6 ; "past last row")]
fn test_select_rejected(col: u32, row: u32) {
    let mut g = common::grid(5, 5, 300, 200);
    let log = common::record_selected(&mut g);
    assert!(!g.select_cell(col, row, true));
    assert_eq!(g.selection(), Selection::new(1, 1));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_select_notifies_data_relative() {
    let mut g = common::grid(5, 5, 300, 200);
    let log = common::record_selected(&mut g);
    assert!(g.select_cell(3, 4, true));
    assert_eq!(log.borrow().as_slice(), &[(2, 3)]);
}

#[test]
fn test_select_without_notification() {
    let mut g = common::grid(5, 5, 300, 200);
    let log = common::record_selected(&mut g);
    assert!(g.select_cell_with(3, 4, false, false));
    assert_eq!(g.selection(), Selection::new(3, 4));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_down_five_times_in_three_rows() {
    let mut g = common::grid(3, 3, 400, 400);
    let scrolled = common::record_scrolled(&mut g);
    let results: Vec<bool> = (0..5)
        .map(|_| g.handle_key("ArrowDown", Modifiers::NONE))
        .collect();
    assert_eq!(results, vec![true, true, false, false, false]);
    assert_eq!(g.data_selection(), Some((0, 2)));
    assert!(scrolled.borrow().is_empty());
}

#[test]
fn test_selection_stays_in_bounds() {
    for row_mode in [false, true] {
        let mut g = common::grid(30, 60, 300, 200);
        g.set_fixed_cols(1);
        g.set_fixed_rows(1);
        g.set_row_select(row_mode);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..2000 {
            let cmd = ALL_COMMANDS[rng.gen_range(0..ALL_COMMANDS.len())];
            g.execute(cmd);
            common::assert_selection_in_bounds(&g);
            assert!(g.scroll_x() <= g.max_scroll().0);
            assert!(g.scroll_y() <= g.max_scroll().1);
        }
    }
}

#[test]
fn test_moving_selection_scrolls_it_into_view() {
    let mut g = common::grid(30, 60, 300, 200);
    for _ in 0..15 {
        g.execute(NavCommand::MoveDown);
        g.execute(NavCommand::MoveRight);
    }
    let sel = g.selection();
    let rect = g.cell_screen_rect(sel.col, sel.row);
    let area = g.scroll_rect();
    assert!(rect.x >= area.x && rect.right() <= area.right());
    assert!(rect.y >= area.y && rect.bottom() <= area.bottom());
}

// =============================================================================
// KEY MAPPING
// =============================================================================

#[test]
fn test_ctrl_arrow_scrolls_without_moving() {
    let mut g = common::grid(30, 60, 300, 200);
    assert!(g.handle_key("ArrowDown", Modifiers::ctrl()));
    assert_eq!(g.scroll_y(), 20);
    assert_eq!(g.selection(), Selection::new(1, 1));
}

#[test]
fn test_unknown_key_not_consumed() {
    let mut g = common::grid(5, 5, 300, 200);
    assert!(!g.handle_key("q", Modifiers::NONE));
    assert!(!g.handle_key("F5", Modifiers::ctrl()));
}

#[test]
fn test_enter_activates_selected_cell() {
    let mut g = common::grid(5, 5, 300, 200);
    let activated = common::record_activated(&mut g);
    g.select_cell(2, 3, true);
    assert!(g.handle_key("Enter", Modifiers::NONE));
    assert_eq!(activated.borrow().as_slice(), &[(1, 2)]);
}

// =============================================================================
// PAGING
// =============================================================================

#[test]
fn test_page_down_moves_to_bottom_then_pages() {
    // header row 20 + 9 rows of 20 fit in 200
    let mut g = common::grid(5, 100, 400, 200);
    let scrolled = common::record_scrolled(&mut g);
    assert!(g.execute(NavCommand::PageDown));
    assert_eq!(g.selection().row, 9);
    assert!(scrolled.borrow().is_empty());

    assert!(g.execute(NavCommand::PageDown));
    assert_eq!(g.first_visible_row(), 9);
    assert_eq!(g.selection().row, 17);
    assert_eq!(scrolled.borrow().as_slice(), &[(0, 160)]);
}

#[test]
fn test_page_up_mirrors_page_down() {
    let mut g = common::grid(5, 100, 400, 200);
    g.execute(NavCommand::PageDown);
    g.execute(NavCommand::PageDown);

    assert!(g.execute(NavCommand::PageUp));
    assert_eq!(g.selection().row, 9);
    assert_eq!(g.scroll_y(), 160);

    assert!(g.execute(NavCommand::PageUp));
    assert_eq!(g.scroll_y(), 0);
    assert_eq!(g.selection().row, 1);
    assert!(!g.execute(NavCommand::PageUp));
}

/// First visible, last fully visible, offset, max offset and the scroll
/// region's leading edge on one axis.
fn axis_state(g: &Grid, axis: Axis) -> (u32, u32, i32, i32, i32) {
    let area = g.scroll_rect();
    match axis {
        Axis::Horizontal => (
            g.first_visible_col(),
            g.last_visible_col(),
            g.scroll_x(),
            g.max_scroll().0,
            area.x,
        ),
        Axis::Vertical => (
            g.first_visible_row(),
            g.last_visible_row(),
            g.scroll_y(),
            g.max_scroll().1,
            area.y,
        ),
    }
}

#[test_case(Axis::Vertical, &[20, 35, 10, 50] ; "mixed rows")]
#[test_case(Axis::Vertical, &[20, 0, 30, 0, 25] ; "hidden rows")]
#[test_case(Axis::Vertical, &[90, 15, 15, 60] ; "tall rows")]
#[test_case(Axis::Horizontal, &[64, 12, 100, 40] ; "mixed columns")]
#[test_case(Axis::Horizontal, &[30, 0, 0, 80, 55] ; "hidden columns")]
fn test_page_over_irregular_sizes(axis: Axis, sizes: &[i32]) {
    let mut g = common::grid(40, 40, 300, 200);
    for (i, &size) in sizes.iter().cycle().take(40).enumerate() {
        let idx = u32::try_from(i).unwrap() + 1;
        match axis {
            Axis::Horizontal => g.set_col_width(idx, size),
            Axis::Vertical => g.set_row_height(idx, size),
        };
    }
    let scrolled = common::record_scrolled(&mut g);

    let mut pages = 0;
    loop {
        let (first, last, _, _, _) = axis_state(&g, axis);
        let notified = scrolled.borrow().len();
        if !g.scroll_page(axis, true) {
            break;
        }
        pages += 1;
        assert!(pages < 100, "paging forward never ends");
        assert_eq!(scrolled.borrow().len(), notified + 1);

        let (new_first, _, offset, max, edge) = axis_state(&g, axis);
        assert!(new_first > first);
        // the old last cell is the new first one, unless the end was reached
        assert!(new_first >= last || offset == max);
        // and it was not scrolled past
        let rect = match axis {
            Axis::Horizontal => g.cell_screen_rect(last, 1),
            Axis::Vertical => g.cell_screen_rect(1, last),
        };
        let start = match axis {
            Axis::Horizontal => rect.x,
            Axis::Vertical => rect.y,
        };
        assert!(start >= edge, "cell {last} skipped");
    }
    let (_, _, offset, max, _) = axis_state(&g, axis);
    assert!(pages > 1);
    assert_eq!(offset, max);

    let mut back = 0;
    while g.scroll_page(axis, false) {
        back += 1;
        assert!(back < 100, "paging back never ends");
    }
    assert_eq!(axis_state(&g, axis).2, 0);
}

#[test]
fn test_page_right_leaves_selection() {
    let mut g = common::grid(30, 10, 300, 200);
    assert!(g.handle_key("PageDown", Modifiers::ctrl()));
    assert!(g.scroll_x() > 0);
    assert_eq!(g.selection(), Selection::new(1, 1));
    assert!(g.handle_key("PageUp", Modifiers::ctrl()));
    assert_eq!(g.scroll_x(), 0);
}

// =============================================================================
// LINE AND DOCUMENT JUMPS
// =============================================================================

#[test]
fn test_document_end_shows_last_cell() {
    let mut g = common::grid(20, 100, 300, 200);
    assert!(g.handle_key("End", Modifiers::ctrl()));
    assert_eq!(g.selection(), Selection::new(20, 100));
    assert_eq!((g.scroll_x(), g.scroll_y()), g.max_scroll());
    let rect = g.cell_screen_rect(20, 100);
    assert!(rect.right() <= 300 && rect.bottom() <= 200);

    assert!(g.handle_key("Home", Modifiers::ctrl()));
    assert_eq!(g.selection(), Selection::new(1, 1));
    assert_eq!((g.scroll_x(), g.scroll_y()), (0, 0));
}

#[test]
fn test_home_end_on_visible_row_only_moves() {
    let mut g = common::grid(3, 3, 400, 400);
    let scrolled = common::record_scrolled(&mut g);
    assert!(g.handle_key("End", Modifiers::NONE));
    assert_eq!(g.selection(), Selection::new(3, 1));
    assert!(g.handle_key("Home", Modifiers::NONE));
    assert_eq!(g.selection(), Selection::new(1, 1));
    assert!(!g.handle_key("Home", Modifiers::NONE));
    assert!(scrolled.borrow().is_empty());
}

#[test]
fn test_home_onto_fixed_column_keeps_offset() {
    let mut g = common::grid(20, 10, 300, 200);
    g.set_fixed_cols(1);
    assert!(g.scroll_to(128, 0));
    assert!(g.select_cell(6, 1, false));
    let scrolled = common::record_scrolled(&mut g);

    // the first data column is pinned, so it is already on screen
    assert!(g.handle_key("Home", Modifiers::NONE));
    assert_eq!(g.selection(), Selection::new(1, 1));
    assert_eq!(g.scroll_x(), 128);
    assert!(scrolled.borrow().is_empty());

    assert!(g.handle_key("End", Modifiers::NONE));
    assert_eq!(g.selection(), Selection::new(20, 1));
    assert_eq!(g.scroll_x(), g.max_scroll().0);
}

// =============================================================================
// ROW MODE
// =============================================================================

fn row_mode_grid(header_cols: u32) -> Grid {
    let config = GridConfig {
        header_cols,
        selection_mode: SelectionMode::Row,
        ..GridConfig::default()
    };
    let mut g = Grid::with_config(&config);
    g.resize(10, 10);
    g.set_client_size(200, 200);
    g
}

#[test]
fn test_row_mode_without_header_columns() {
    let mut g = row_mode_grid(0);
    assert_eq!(g.selection(), Selection::new(0, 1));

    assert!(g.execute(NavCommand::MoveRight));
    assert_eq!(g.scroll_x(), 64);
    assert_eq!(g.selection().col, 0);

    assert!(g.execute(NavCommand::MoveLeft));
    assert_eq!(g.scroll_x(), 0);
    assert!(!g.execute(NavCommand::MoveLeft));

    assert!(g.execute(NavCommand::LineEnd));
    // 10 x 64 = 640 wide in 200: the aligned end is the start of column 7
    assert_eq!(g.scroll_x(), 448);
    assert_eq!(g.scroll_x(), g.max_scroll().0);
    assert_eq!(g.selection(), Selection::new(0, 1));
}

#[test]
fn test_row_mode_vertical_moves_keep_column() {
    let mut g = row_mode_grid(1);
    assert!(g.execute(NavCommand::MoveDown));
    assert!(g.execute(NavCommand::DocumentEnd));
    assert_eq!(g.selection(), Selection::new(1, 10));
    assert!(g.execute(NavCommand::DocumentStart));
    assert_eq!(g.selection(), Selection::new(1, 1));
}
