//! Grid configuration.
//!
//! Loaded once through [`GridConfig::from_json`] or built in code; after a
//! grid is constructed, flags change only through the explicit setters on
//! [`crate::Grid`].

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::SelectionMode;

/// Default data column width in pixels
pub const DEFAULT_COL_WIDTH: i32 = 64;

/// Default data row height in pixels
pub const DEFAULT_ROW_HEIGHT: i32 = 20;

/// Default row-header column width in pixels
pub const DEFAULT_HEADER_COL_WIDTH: i32 = 40;

/// Default column-header row height in pixels
pub const DEFAULT_HEADER_ROW_HEIGHT: i32 = 20;

/// Width of the column-resize hit zone straddling a column boundary
pub const DEFAULT_RESIZE_HIT_WIDTH: i32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Width given to newly added data columns
    pub default_col_width: i32,
    /// Height given to newly added data rows
    pub default_row_height: i32,
    /// Width of each header column
    pub header_col_width: i32,
    /// Height of each header row
    pub header_row_height: i32,
    /// Number of leading header columns
    pub header_cols: u32,
    /// Number of leading header rows
    pub header_rows: u32,
    /// Pinned data columns after the header columns
    pub fixed_cols: u32,
    /// Pinned data rows after the header rows
    pub fixed_rows: u32,
    pub selection_mode: SelectionMode,
    pub resize_hit_width: i32,
    /// Cells scrolled per wheel notch
    pub wheel_step: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_col_width: DEFAULT_COL_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            header_col_width: DEFAULT_HEADER_COL_WIDTH,
            header_row_height: DEFAULT_HEADER_ROW_HEIGHT,
            header_cols: 1,
            header_rows: 1,
            fixed_cols: 0,
            fixed_rows: 0,
            selection_mode: SelectionMode::Cell,
            resize_hit_width: DEFAULT_RESIZE_HIT_WIDTH,
            wheel_step: 1,
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("defaultColWidth", self.default_col_width),
            ("defaultRowHeight", self.default_row_height),
            ("headerColWidth", self.header_col_width),
            ("headerRowHeight", self.header_row_height),
        ];
        for (name, value) in sizes {
            if value < 0 {
                return Err(GridError::InvalidConfig(format!(
                    "{name} must be >= 0, got {value}"
                )));
            }
        }
        if self.resize_hit_width <= 0 {
            return Err(GridError::InvalidConfig(format!(
                "resizeHitWidth must be > 0, got {}",
                self.resize_hit_width
            )));
        }
        if self.wheel_step <= 0 {
            return Err(GridError::InvalidConfig(format!(
                "wheelStep must be > 0, got {}",
                self.wheel_step
            )));
        }
        Ok(())
    }

    pub fn row_select(&self) -> bool {
        self.selection_mode == SelectionMode::Row
    }
}
