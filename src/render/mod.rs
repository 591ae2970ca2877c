//! Rendering: visible-cell enumeration and a pluggable painter.
//!
//! This module provides:
//! - Collaborator traits ([`CellRenderer`], [`CustomCell`])
//! - The two-pass render coordinator on [`Grid`](crate::grid::Grid)
//! - A Canvas 2D painter (wasm32 only)

pub mod backend;
mod coordinator;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use backend::{CellKind, CellPaint, CellRenderer, CustomCell, PaintPass};
pub use coordinator::VisibleCell;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
