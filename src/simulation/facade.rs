//! Wasm facade - the boundary handed to browser hosts.
//!
//! Thin wrapper over `WorldCore`: the host drives `step` once per frame,
//! the input layer paints by catalog id, and the renderer copies the packed
//! color buffer. Errors cross the boundary as strings.

use wasm_bindgen::prelude::*;

use crate::domain::material::Color;

use super::WorldCore;

/// Initialize the engine (panic hook for readable browser errors).
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"pixelgarden engine initialized".into());
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
    colors: Vec<u32>,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            core: WorldCore::new(width, height),
            colors: vec![0; (width * height) as usize],
        }
    }

    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(width: u32, height: u32, seed: u32) -> Self {
        Self {
            core: WorldCore::with_seed(width, height, seed),
            colors: vec![0; (width * height) as usize],
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.core.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.core.height()
    }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 {
        self.core.tick()
    }

    /// Step the simulation forward by one tick.
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Place a material by catalog id.
    pub fn paint(&mut self, x: i32, y: i32, id: &str) -> Result<(), JsValue> {
        self.core.paint(x, y, id).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Brush: fill a disc with a material by catalog id.
    #[wasm_bindgen(js_name = paintRadius)]
    pub fn paint_radius(&mut self, cx: i32, cy: i32, radius: i32, id: &str) -> Result<(), JsValue> {
        self.core
            .paint_radius(cx, cy, radius, id)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Brush: erase a disc back to air.
    #[wasm_bindgen(js_name = eraseRadius)]
    pub fn erase_radius(&mut self, cx: i32, cy: i32, radius: i32) {
        self.core.erase_radius(cx, cy, radius);
    }

    /// Clear all cells.
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Palette description for UI generation.
    #[wasm_bindgen(js_name = manifestJson)]
    pub fn manifest_json(&self) -> String {
        self.core.registry().manifest_json()
    }

    /// Serialize the world to the versioned JSON format.
    pub fn save(&self) -> Result<String, JsValue> {
        self.core.save_json().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Load a world previously produced by `save`.
    pub fn load(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.load_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Refresh the color buffer and return a pointer into wasm memory.
    /// Layout is row-major ABGR (little-endian RGBA bytes) for direct
    /// canvas copies.
    #[wasm_bindgen(js_name = extractColors)]
    pub fn extract_colors(&mut self) -> *const u32 {
        let width = self.core.width() as i32;
        let height = self.core.height() as i32;
        for y in 0..height {
            for x in 0..width {
                let idx = (y * width + x) as usize;
                self.colors[idx] = rgb_to_abgr(self.core.color_at(x, y));
            }
        }
        self.colors.as_ptr()
    }

    #[wasm_bindgen(js_name = colorsLen)]
    pub fn colors_len(&self) -> usize {
        self.colors.len()
    }
}

fn rgb_to_abgr(color: Color) -> u32 {
    let r = (color >> 16) & 0xFF;
    let g = (color >> 8) & 0xFF;
    let b = color & 0xFF;
    0xFF00_0000 | (b << 16) | (g << 8) | r
}
