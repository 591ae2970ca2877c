use serde::{Deserialize, Serialize};

/// What a selection spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionMode {
    /// A single cell (default)
    #[default]
    Cell,
    /// The whole row of the selected cell; horizontal moves become scrolls
    Row,
}

/// The selected cell, in total (header-inclusive) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub col: u32,
    pub row: u32,
}

impl Selection {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Data-relative coordinates (header offset subtracted).
    pub fn data_relative(&self, header_cols: u32, header_rows: u32) -> (u32, u32) {
        (
            self.col.saturating_sub(header_cols),
            self.row.saturating_sub(header_rows),
        )
    }
}

/// An in-progress interactive column resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    /// Total column index being resized
    pub column: u32,
    /// Pointer x at drag start
    pub start_x: i32,
    /// Column width at drag start
    pub start_width: i32,
}

impl ResizeSession {
    /// Width the column should have with the pointer at `x`.
    pub fn width_at(&self, x: i32) -> i32 {
        (self.start_width + (x - self.start_x)).max(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_data_relative() {
        let sel = Selection::new(3, 1);
        assert_eq!(sel.data_relative(1, 1), (2, 0));
        assert_eq!(sel.data_relative(0, 0), (3, 1));
    }

    #[test]
    fn test_resize_session_clamps_to_zero() {
        let session = ResizeSession {
            column: 2,
            start_x: 100,
            start_width: 30,
        };
        assert_eq!(session.width_at(120), 50);
        assert_eq!(session.width_at(40), 0);
    }
}
