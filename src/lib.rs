//! gridview - grid layout, scrolling and navigation engine
//!
//! A rectangular grid of cells with header rows/columns, fixed (pinned)
//! bands, per-column widths and per-row heights:
//! - Prefix-sum geometry with O(log n) point-to-cell lookup
//! - Scrolling with fixed bands, page stepping and make-visible
//! - Cell/row selection driven by keys, clicks and drags
//! - Column resizing by dragging header boundaries
//! - Two-pass rendering through a pluggable painter
//!
//! # Usage (Rust)
//!
//! ```
//! use gridview::{Grid, NavCommand};
//!
//! let mut grid = Grid::new();
//! grid.resize(10, 100);
//! grid.set_client_size(400, 300);
//! grid.execute(NavCommand::PageDown);
//! assert!(grid.selection().row > 1);
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridview';
//! await init();
//! const view = new GridView(canvas, { headerCols: 1, fixedRows: 1 });
//! view.loadJson(json);
//! view.render();
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod grid;
pub mod layout;
pub mod render;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::GridConfig;
pub use content::{CellContent, ContentProvider, TextGrid, WidgetId};
pub use error::{GridError, Result};
pub use grid::{CellListener, Grid, HitTest, ScrollListener};
pub use layout::{position_to_index, Axis, Bands, GridGeometry, Viewport};
pub use render::{CellKind, CellPaint, CellRenderer, CustomCell, PaintPass, VisibleCell};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;

/// Crate version, for hosts to log.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
