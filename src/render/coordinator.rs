//! Visible-cell enumeration and the two-pass paint.
//!
//! Cells are visited row-major. A scrolled cell is clipped to the scrollable
//! region so it never paints over the fixed bands; fixed cells are clipped
//! to the client area. All backgrounds are painted before any foreground.

use std::borrow::Cow;

use super::backend::{CellKind, CellPaint, CellRenderer, PaintPass};
use crate::content::CellContent;
use crate::grid::Grid;
use crate::types::Rect;

/// A cell that intersects the client area, with its clip rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleCell {
    pub col: u32,
    pub row: u32,
    /// Full cell rectangle in client coordinates
    pub rect: Rect,
    /// Paintable part of `rect`
    pub clip: Rect,
}

/// Client-space span `[lo, hi)` each index of one axis may occupy.
fn axis_regions(band: u32, non_scroll: i32, client: i32) -> impl Fn(u32) -> (i32, i32) {
    move |idx| {
        if idx < band {
            (0, client)
        } else {
            (non_scroll, client)
        }
    }
}

impl Grid {
    /// Cells that are at least partly visible, row-major.
    pub fn visible_cells(&self) -> Vec<VisibleCell> {
        let client = self.client_size();
        if self.is_empty() || client.width <= 0 || client.height <= 0 {
            return Vec::new();
        }
        let bands = self.bands();
        let non_scroll = self.non_scroll_extent();
        let (scroll_x, scroll_y) = self.viewport.scroll();
        let (Some(max_col), Some(max_row)) = (
            self.geometry.col_at(client.width.saturating_add(scroll_x)),
            self.geometry.row_at(client.height.saturating_add(scroll_y)),
        ) else {
            return Vec::new();
        };

        let col_region = axis_regions(bands.cols, non_scroll.width, client.width);
        let row_region = axis_regions(bands.rows, non_scroll.height, client.height);

        // Per-column visibility is the same for every row.
        let cols: Vec<(u32, i32, i32)> = (0..=max_col)
            .filter_map(|col| {
                let rect = self.cell_screen_rect(col, bands.rows.min(max_row));
                let (lo, hi) = col_region(col);
                let left = rect.x.max(lo);
                let right = rect.right().min(hi);
                (right > left).then_some((col, left, right))
            })
            .collect();

        let mut cells = Vec::new();
        for row in 0..=max_row {
            let row_rect = self.cell_screen_rect(bands.cols.min(max_col), row);
            let (lo, hi) = row_region(row);
            let top = row_rect.y.max(lo);
            let bottom = row_rect.bottom().min(hi);
            if bottom <= top {
                continue;
            }
            for &(col, left, right) in &cols {
                cells.push(VisibleCell {
                    col,
                    row,
                    rect: self.cell_screen_rect(col, row),
                    clip: Rect::from_edges(left, top, right, bottom),
                });
            }
        }
        cells
    }

    fn cell_content(&self, kind: CellKind) -> CellContent<'_> {
        let Some(content) = self.content.as_deref() else {
            return CellContent::Empty;
        };
        fn title(t: Option<Cow<'_, str>>) -> CellContent<'_> {
            t.map_or(CellContent::Empty, CellContent::Text)
        }
        match kind {
            CellKind::Corner => CellContent::Empty,
            CellKind::ColumnHeader { col } => title(content.column_title(col)),
            CellKind::RowHeader { row } => title(content.row_title(row)),
            CellKind::Data { col, row } => content.cell(col, row),
        }
    }

    fn is_cell_selected(&self, kind: CellKind, col: u32, row: u32) -> bool {
        if !self.has_selection() {
            return false;
        }
        let sel = self.selection;
        let row_mode = self.row_select();
        match kind {
            CellKind::Corner => false,
            CellKind::ColumnHeader { .. } => !row_mode && col == sel.col,
            CellKind::RowHeader { .. } => row == sel.row,
            CellKind::Data { .. } => row == sel.row && (row_mode || col == sel.col),
        }
    }

    /// Paint every visible cell: a background pass, then a foreground pass.
    /// Data cells claimed by the custom-cell override are drawn by it
    /// instead of `renderer`. Returns the number of cells painted per pass.
    pub fn render(&mut self, renderer: &mut dyn CellRenderer) -> usize {
        let visible = self.visible_cells();
        let mut custom = self.custom_cell.take();
        let (hc, hr) = (self.header_cols(), self.header_rows());
        let sel = self.selection;
        let has_selection = self.has_selection();

        let paints: Vec<CellPaint<'_>> = visible
            .iter()
            .map(|cell| {
                let kind = CellKind::classify(cell.col, cell.row, hc, hr);
                CellPaint {
                    col: cell.col,
                    row: cell.row,
                    kind,
                    rect: cell.rect,
                    clip: cell.clip,
                    content: self.cell_content(kind),
                    selected: self.is_cell_selected(kind, cell.col, cell.row),
                    focused: has_selection && cell.col == sel.col && cell.row == sel.row,
                }
            })
            .collect();

        for pass in [PaintPass::Background, PaintPass::Foreground] {
            for paint in &paints {
                let claimed = match (&paint.kind, custom.as_mut()) {
                    (CellKind::Data { col, row }, Some(c)) if c.handles(*col, *row) => {
                        c.draw(pass, paint);
                        true
                    }
                    _ => false,
                };
                if claimed {
                    continue;
                }
                match pass {
                    PaintPass::Background => renderer.draw_background(paint),
                    PaintPass::Foreground => renderer.draw_foreground(paint),
                }
            }
        }
        let count = paints.len();
        drop(paints);
        self.custom_cell = custom;
        count
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
    use crate::render::CustomCell;

    /// Records every call as `(pass, col, row)`.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(PaintPass, u32, u32)>,
        texts: Vec<String>,
    }

    impl CellRenderer for Recorder {
        fn draw_background(&mut self, cell: &CellPaint<'_>) {
            self.calls.push((PaintPass::Background, cell.col, cell.row));
        }

        fn draw_foreground(&mut self, cell: &CellPaint<'_>) {
            self.calls.push((PaintPass::Foreground, cell.col, cell.row));
            if let Some(text) = cell.content.text() {
                self.texts.push(text.to_string());
            }
        }
    }

    struct Diagonal {
        drawn: usize,
    }

    impl CustomCell for Diagonal {
        fn handles(&self, col: u32, row: u32) -> bool {
            col == row
        }

        fn draw(&mut self, _pass: PaintPass, _cell: &CellPaint<'_>) {
            self.drawn += 1;
        }
    }

    fn grid(cols: u32, rows: u32, width: i32, height: i32) -> Grid {
        let mut g = Grid::new();
        g.resize(cols, rows);
        g.set_client_size(width, height);
        g
    }

    #[test]
    fn test_empty_grid_draws_nothing() {
        let mut g = Grid::new();
        g.set_client_size(300, 200);
        let mut rec = Recorder::default();
        assert_eq!(g.render(&mut rec), 0);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_visible_cells_row_major() {
        // header 40 + 2 x 64 = 168 wide, header 20 + 2 x 20 = 60 tall
        let g = grid(2, 2, 300, 200);
        let cells: Vec<(u32, u32)> = g.visible_cells().iter().map(|c| (c.col, c.row)).collect();
        assert_eq!(
            cells,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn test_backgrounds_precede_foregrounds() {
        let mut g = grid(2, 2, 300, 200);
        let mut rec = Recorder::default();
        let count = g.render(&mut rec);
        assert_eq!(count, 9);
        assert_eq!(rec.calls.len(), 18);
        assert!(rec.calls[..9].iter().all(|c| c.0 == PaintPass::Background));
        assert!(rec.calls[9..].iter().all(|c| c.0 == PaintPass::Foreground));
    }

    #[test]
    fn test_scrolled_cell_clipped_to_scroll_region() {
        let mut g = grid(10, 3, 200, 200);
        assert!(g.scroll_to(30, 0));
        let cells = g.visible_cells();
        // data col 0 starts at 40 - 30 = 10 but may not cross the header edge
        let first = cells.iter().find(|c| c.col == 1 && c.row == 1).unwrap();
        assert_eq!(first.rect.x, 10);
        assert_eq!(first.clip.x, 40);
        assert_eq!(first.clip.right(), 74);
        // the header column keeps its place
        let header = cells.iter().find(|c| c.col == 0 && c.row == 1).unwrap();
        assert_eq!(header.clip, Rect::new(0, 20, 40, 20));
    }

    #[test]
    fn test_partial_cell_clipped_to_client() {
        let g = grid(10, 3, 200, 200);
        let cells = g.visible_cells();
        // data col 2 spans [168, 232)
        let last = cells.iter().filter(|c| c.row == 1).last().unwrap();
        assert_eq!(last.col, 3);
        assert_eq!(last.clip.right(), 200);
        assert_eq!(last.rect.right(), 232);
    }

    #[test]
    fn test_content_and_titles_reach_renderer() {
        let mut g = grid(1, 1, 300, 200);
        let mut text = TextGrid::new(1, 1);
        text.set_cell(0, 0, "hello");
        g.set_content(Some(Box::new(text)));
        let mut rec = Recorder::default();
        g.render(&mut rec);
        assert_eq!(rec.texts, vec!["A", "1", "hello"]);
    }

    #[test]
    fn test_custom_cell_takes_over_claimed_cells() {
        let mut g = grid(2, 2, 300, 200);
        g.set_custom_cell(Some(Box::new(Diagonal { drawn: 0 })));
        let mut rec = Recorder::default();
        g.render(&mut rec);
        // data (0,0) and (1,1) go to the override, twice each
        assert_eq!(rec.calls.len(), 18 - 4);
        assert!(!rec.calls.contains(&(PaintPass::Background, 1, 1)));
        assert!(!rec.calls.contains(&(PaintPass::Foreground, 2, 2)));
        assert!(g.custom_cell.is_some());
    }

    #[test]
    fn test_row_mode_marks_whole_row() {
        let mut g = grid(3, 3, 300, 200);
        g.set_row_select(true);
        let paints: Vec<(u32, u32, bool)> = {
            struct Sel(Vec<(u32, u32, bool)>);
            impl CellRenderer for Sel {
                fn draw_background(&mut self, cell: &CellPaint<'_>) {
                    self.0.push((cell.col, cell.row, cell.selected));
                }
                fn draw_foreground(&mut self, _cell: &CellPaint<'_>) {}
            }
            let mut sel = Sel(Vec::new());
            g.render(&mut sel);
            sel.0
        };
        let selected: Vec<(u32, u32)> = paints
            .iter()
            .filter(|p| p.2)
            .map(|p| (p.0, p.1))
            .collect();
        assert_eq!(selected, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }
}
