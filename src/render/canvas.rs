//! Canvas 2D painter.
//!
//! Paints plain text cells with header shading and a selection tint. Hosts
//! that need richer cells install a [`CustomCell`](super::CustomCell).

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::backend::{CellKind, CellPaint, CellRenderer};
use crate::error::{GridError, Result};
use crate::types::Rect;

const CELL_PADDING: f64 = 4.0;
const FONT: &str = "13px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";
const HEADER_FONT: &str = "500 11px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

/// Palette matching common spreadsheet styling
mod colors {
    pub const CELL_BG: &str = "#FFFFFF";
    pub const HEADER_BG: &str = "#F8F9FA";
    pub const HEADER_SELECTED_BG: &str = "#D3E3FD";
    pub const SELECTED_BG: &str = "#E8F0FE";
    pub const GRID_LINE: &str = "#E2E3E3";
    pub const HEADER_LINE: &str = "#C4C7C5";
    pub const TEXT: &str = "#202124";
    pub const HEADER_TEXT: &str = "#444746";
    pub const FOCUS: &str = "#1A73E8";
}

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Create a painter over a canvas element's 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GridError::Render("failed to get 2d context".into()))?
            .ok_or_else(|| GridError::Render("no 2d context available".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GridError::Render("failed to cast to CanvasRenderingContext2d".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Clear the whole canvas before a frame.
    pub fn clear(&self) {
        self.ctx.set_fill_style_str(colors::CELL_BG);
        self.ctx.fill_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    /// Run `draw` with the context clipped to `clip`.
    fn clipped(&self, clip: Rect, draw: impl FnOnce(&CanvasRenderingContext2d)) {
        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(
            f64::from(clip.x),
            f64::from(clip.y),
            f64::from(clip.width),
            f64::from(clip.height),
        );
        self.ctx.clip();
        draw(&self.ctx);
        self.ctx.restore();
    }
}

fn background_color(cell: &CellPaint<'_>) -> &'static str {
    match (cell.kind.is_header(), cell.selected) {
        (true, true) => colors::HEADER_SELECTED_BG,
        (true, false) => colors::HEADER_BG,
        (false, true) => colors::SELECTED_BG,
        (false, false) => colors::CELL_BG,
    }
}

impl CellRenderer for CanvasRenderer {
    fn draw_background(&mut self, cell: &CellPaint<'_>) {
        let Rect {
            x,
            y,
            width,
            height,
        } = cell.rect;
        let (x, y, w, h) = (f64::from(x), f64::from(y), f64::from(width), f64::from(height));
        let header = cell.kind.is_header();
        self.clipped(cell.clip, |ctx| {
            ctx.set_fill_style_str(background_color(cell));
            ctx.fill_rect(x, y, w, h);
            // Trailing edges only; the neighbour draws the leading ones.
            ctx.set_stroke_style_str(if header {
                colors::HEADER_LINE
            } else {
                colors::GRID_LINE
            });
            ctx.set_line_width(1.0);
            ctx.begin_path();
            ctx.move_to(x + w - 0.5, y);
            ctx.line_to(x + w - 0.5, y + h);
            ctx.move_to(x, y + h - 0.5);
            ctx.line_to(x + w, y + h - 0.5);
            ctx.stroke();
        });
    }

    fn draw_foreground(&mut self, cell: &CellPaint<'_>) {
        let rect = cell.rect;
        let (x, y, w, h) = (
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
        let focused = cell.focused;
        let kind = cell.kind;
        let text = cell.content.text();
        self.clipped(cell.clip, |ctx| {
            if let Some(text) = text {
                ctx.set_text_baseline("middle");
                if kind.is_header() {
                    ctx.set_font(HEADER_FONT);
                    ctx.set_fill_style_str(colors::HEADER_TEXT);
                    ctx.set_text_align("center");
                    let _ = ctx.fill_text(text, x + w / 2.0, y + h / 2.0);
                } else {
                    ctx.set_font(FONT);
                    ctx.set_fill_style_str(colors::TEXT);
                    ctx.set_text_align("left");
                    let _ = ctx.fill_text(text, x + CELL_PADDING, y + h / 2.0);
                }
            }
            if focused && matches!(kind, CellKind::Data { .. }) {
                ctx.set_stroke_style_str(colors::FOCUS);
                ctx.set_line_width(2.0);
                ctx.stroke_rect(x + 1.0, y + 1.0, w - 2.0, h - 2.0);
            }
        });
    }
}
