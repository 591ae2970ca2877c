//! `GridView`: the WebAssembly entry point.
//!
//! Owns a [`Grid`] and a [`CanvasRenderer`] and forwards DOM-shaped input to
//! them. The host wires its own event listeners and calls `render()` when
//! any input method returns true.

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::GridConfig;
use crate::content::TextGrid;
use crate::grid::Grid;
use crate::render::CanvasRenderer;
use crate::types::{Modifiers, PointerButton, PointerEvent};

/// Round a logical-pixel coordinate from JS.
#[allow(clippy::cast_possible_truncation)]
fn px(v: f64) -> i32 {
    v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[wasm_bindgen]
pub struct GridView {
    grid: Grid,
    renderer: CanvasRenderer,
    config: GridConfig,
}

#[wasm_bindgen]
impl GridView {
    /// Create a view over a canvas. `config` is an optional object with the
    /// `GridConfig` fields (camelCase); missing fields take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: JsValue) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        config.validate()?;

        let (width, height) = (canvas.width(), canvas.height());
        let renderer = CanvasRenderer::new(canvas)?;
        let mut grid = Grid::with_config(&config);
        grid.set_client_size(
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
        tracing::debug!(width, height, "grid view created");
        Ok(Self {
            grid,
            renderer,
            config,
        })
    }

    /// Configuration the view was created with.
    #[wasm_bindgen(getter)]
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.config).map_err(Into::into)
    }

    /// Host canvas resized (logical pixels).
    pub fn resize(&mut self, width: f64, height: f64) {
        self.grid.set_client_size(px(width), px(height));
    }

    /// Set the data column/row counts.
    #[wasm_bindgen(js_name = "setDimensions")]
    pub fn set_dimensions(&mut self, cols: u32, rows: u32) -> bool {
        self.grid.resize(cols, rows)
    }

    /// Load a JSON text grid (`{"rows": [[...]], "columnTitles": [...]}`) as
    /// the content provider. The grid resizes to fit it.
    #[wasm_bindgen(js_name = "loadJson")]
    pub fn load_json(&mut self, json: &str) -> Result<(), JsValue> {
        let content = TextGrid::from_json(json)?;
        let (cols, rows) = content.size();
        tracing::debug!(cols, rows, "text grid loaded");
        self.grid.set_content(Some(Box::new(content)));
        Ok(())
    }

    #[wasm_bindgen(js_name = "setColumnWidth")]
    pub fn set_column_width(&mut self, col: u32, width: i32) -> bool {
        self.grid.set_col_width(col, width)
    }

    #[wasm_bindgen(js_name = "setRowHeight")]
    pub fn set_row_height(&mut self, row: u32, height: i32) -> bool {
        self.grid.set_row_height(row, height)
    }

    #[wasm_bindgen(js_name = "setFixed")]
    pub fn set_fixed(&mut self, cols: u32, rows: u32) {
        self.grid.set_fixed_cols(cols);
        self.grid.set_fixed_rows(rows);
    }

    #[wasm_bindgen(js_name = "setRowSelect")]
    pub fn set_row_select(&mut self, enabled: bool) {
        self.grid.set_row_select(enabled);
    }

    /// Select a data cell (data-relative coordinates).
    #[wasm_bindgen(js_name = "selectCell")]
    pub fn select_cell(&mut self, col: u32, row: u32) -> bool {
        let (hc, hr) = (self.grid.header_cols(), self.grid.header_rows());
        self.grid
            .select_cell(col.saturating_add(hc), row.saturating_add(hr), true)
    }

    /// Selected data cell as `[col, row]`, or undefined for an empty grid.
    #[wasm_bindgen(js_name = "getSelection")]
    pub fn get_selection(&self) -> Option<Vec<u32>> {
        self.grid.data_selection().map(|(c, r)| vec![c, r])
    }

    /// Scroll offsets as `[x, y]` (content pixels past the fixed bands).
    #[wasm_bindgen(js_name = "getScroll")]
    pub fn get_scroll(&self) -> Vec<i32> {
        vec![self.grid.scroll_x(), self.grid.scroll_y()]
    }

    #[wasm_bindgen(js_name = "setScroll")]
    pub fn set_scroll(&mut self, x: f64, y: f64) -> bool {
        self.grid.scroll_to(px(x), px(y))
    }

    /// `MouseEvent.button` / `detail` map onto the pointer model.
    pub fn on_mouse_down(&mut self, x: f64, y: f64, button: i16, click_count: u32) -> bool {
        self.grid.pointer_down(PointerEvent {
            x: px(x),
            y: px(y),
            button: PointerButton::from_dom(button),
            modifiers: Modifiers::NONE,
            click_count,
        })
    }

    pub fn on_mouse_move(&mut self, x: f64, y: f64) -> bool {
        self.grid.pointer_move(px(x), px(y))
    }

    pub fn on_mouse_up(&mut self) -> bool {
        self.grid.pointer_up()
    }

    /// Pointer capture lost (`pointercancel`, `lostpointercapture`).
    pub fn on_pointer_cancel(&mut self) -> bool {
        self.grid.pointer_cancel()
    }

    /// Wheel notches: the sign of `delta` picks the direction.
    pub fn on_wheel(&mut self, delta: f64, shift: bool) -> bool {
        let notches = if delta > 0.0 {
            1
        } else if delta < 0.0 {
            -1
        } else {
            0
        };
        let modifiers = Modifiers {
            shift,
            ..Modifiers::NONE
        };
        self.grid.wheel(notches, modifiers)
    }

    /// `KeyboardEvent.key` plus modifiers. True if the key was consumed.
    pub fn on_key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.grid.handle_key(
            key,
            Modifiers {
                ctrl,
                shift,
                alt: false,
            },
        )
    }

    /// CSS cursor for a pointer position.
    #[wasm_bindgen(js_name = "cursorAt")]
    pub fn cursor_at(&self, x: f64, y: f64) -> String {
        self.grid.cursor_at(px(x), px(y)).css().to_string()
    }

    /// `fn(col, row)` called when the selection changes.
    #[wasm_bindgen(js_name = "onCellSelected")]
    pub fn on_cell_selected(&mut self, callback: Option<Function>) {
        self.grid.set_on_cell_selected(callback.map(|f| {
            Box::new(move |_: &mut Grid, col: u32, row: u32| {
                let _ = f.call2(&JsValue::NULL, &col.into(), &row.into());
            }) as crate::grid::CellListener
        }));
    }

    /// `fn(col, row)` called on Enter or a double click.
    #[wasm_bindgen(js_name = "onCellActivated")]
    pub fn on_cell_activated(&mut self, callback: Option<Function>) {
        self.grid.set_on_cell_activated(callback.map(|f| {
            Box::new(move |_: &mut Grid, col: u32, row: u32| {
                let _ = f.call2(&JsValue::NULL, &col.into(), &row.into());
            }) as crate::grid::CellListener
        }));
    }

    /// `fn(x, y)` called when the scroll offsets change.
    #[wasm_bindgen(js_name = "onViewScrolled")]
    pub fn on_view_scrolled(&mut self, callback: Option<Function>) {
        self.grid.set_on_view_scrolled(callback.map(|f| {
            Box::new(move |_: &mut Grid, x: i32, y: i32| {
                let _ = f.call2(&JsValue::NULL, &x.into(), &y.into());
            }) as crate::grid::ScrollListener
        }));
    }

    /// Paint the visible cells. Returns the number of cells drawn.
    pub fn render(&mut self) -> u32 {
        self.renderer.clear();
        let count = self.grid.render(&mut self.renderer);
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}
