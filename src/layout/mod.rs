//! Layout engine: cell positions and viewport state.
//!
//! This module handles:
//! - Cumulative column/row edges from widths and heights
//! - Binary search for the cell at a content coordinate
//! - Scroll offsets, the non-scrolling bands and visible ranges

mod geometry;
mod viewport;

pub use geometry::{position_to_index, Bands, GridGeometry};
pub use viewport::{Axis, Viewport};
