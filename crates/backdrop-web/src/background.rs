//! Hero background wrapper
//!
//! WASM-bindgen wrapper around `LatticeRenderer` on the wgpu backend.

use std::fmt::Display;

use backdrop_engine::{LatticeRenderer, RendererConfig, WgpuContext};
use wasm_bindgen::prelude::*;

type Renderer = LatticeRenderer<WgpuContext, web_sys::HtmlCanvasElement>;

/// WASM-bindgen wrapper for the hero renderer
#[wasm_bindgen]
pub struct HeroBackground {
    renderer: Option<Renderer>,
}

#[wasm_bindgen]
impl HeroBackground {
    /// Create an uninitialized background
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { renderer: None }
    }

    /// Bind to `canvas` and build the pipeline
    ///
    /// `config_json` is an optional JSON object with any of `gridSpacing`,
    /// `nodeColor`, `glowColor`, `backgroundColor`; invalid configuration
    /// is logged and replaced by the defaults. Rejects if no GPU context
    /// could be acquired or the programs failed to build. The instance then
    /// stays inert: every other method is a safe no-op.
    #[wasm_bindgen]
    pub async fn init(
        &mut self,
        canvas: web_sys::HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<(), JsValue> {
        if let Some(mut previous) = self.renderer.take() {
            log::warn!("[backdrop] init called again, releasing previous renderer");
            previous.destroy();
        }

        let config = parse_config(config_json.as_deref());
        let mut renderer = Renderer::new(canvas.clone(), config);

        let result = match WgpuContext::acquire(canvas).await {
            Ok(ctx) => {
                log::info!("[backdrop] using {} backend", ctx.backend());
                renderer.initialize(ctx)
            }
            Err(e) => {
                log::error!("[backdrop] {}", e);
                Err(e)
            }
        };

        self.renderer = Some(renderer);
        result.map_err(to_js)
    }

    /// Whether the pipeline is ready to draw
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.renderer.as_ref().is_some_and(|r| r.is_ready())
    }

    /// Advance the animation by `dt` seconds
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32) {
        if let Some(renderer) = &mut self.renderer {
            renderer.update(dt);
        }
    }

    /// Draw one frame; `time` is the page clock in seconds
    #[wasm_bindgen]
    pub fn render(&mut self, time: f64) {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(time);
        }
    }

    /// Re-sync the canvas backing store after a layout change
    #[wasm_bindgen]
    pub fn resize(&mut self) {
        if let Some(renderer) = &mut self.renderer {
            renderer.resize();
        }
    }

    /// Forward a pointer position in client (CSS) pixels
    #[wasm_bindgen]
    pub fn update_mouse(&mut self, client_x: f64, client_y: f64, dt: f32) {
        if let Some(renderer) = &mut self.renderer {
            renderer.update_mouse(client_x, client_y, dt);
        }
    }

    #[wasm_bindgen]
    pub fn deactivate_mouse(&mut self) {
        if let Some(renderer) = &mut self.renderer {
            renderer.deactivate_mouse();
        }
    }

    /// Release all GPU resources
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        if let Some(renderer) = &mut self.renderer {
            renderer.destroy();
        }
    }

    /// Frames rendered during the last full second
    #[wasm_bindgen]
    pub fn get_fps(&self) -> u32 {
        self.renderer.as_ref().map_or(0, |r| r.fps())
    }

    /// Current lattice layout as JSON
    /// Returns: { "columns": 65, "rows": 37, "nodeCount": 2405, ... } or "null"
    #[wasm_bindgen]
    pub fn get_grid_json(&self) -> String {
        let Some(renderer) = &self.renderer else {
            return "null".to_string();
        };
        let field = renderer.field();
        let dims = field.grid_dimensions();
        let (width, height) = field.size();
        serde_json::json!({
            "columns": dims.columns,
            "rows": dims.rows,
            "nodeCount": field.nodes().len(),
            "spacing": field.spacing(),
            "width": width,
            "height": height,
            "time": field.time(),
            "state": format!("{:?}", renderer.state()),
        })
        .to_string()
    }
}

impl Default for HeroBackground {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse host configuration, falling back to defaults on any error
fn parse_config(json: Option<&str>) -> RendererConfig {
    let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
        return RendererConfig::default();
    };
    match RendererConfig::from_json(json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[backdrop] {}; using default configuration", e);
            RendererConfig::default()
        }
    }
}

fn to_js(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        assert_eq!(parse_config(None), RendererConfig::default());
        assert_eq!(parse_config(Some("  ")), RendererConfig::default());
    }

    #[test]
    fn test_partial_config_overrides_fields() {
        let config = parse_config(Some(r#"{"gridSpacing": 40}"#));
        assert_eq!(config.grid_spacing, 40.0);
        assert_eq!(config.node_color, RendererConfig::default().node_color);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        assert_eq!(
            parse_config(Some(r#"{"gridSpacing": -5}"#)),
            RendererConfig::default()
        );
        assert_eq!(parse_config(Some("not json")), RendererConfig::default());
    }

    #[test]
    fn test_uninitialized_background_is_inert() {
        let mut bg = HeroBackground::new();
        bg.update(0.016);
        bg.render(0.016);
        bg.resize();
        bg.update_mouse(1.0, 2.0, 0.016);
        bg.deactivate_mouse();
        bg.destroy();
        assert!(!bg.is_initialized());
        assert_eq!(bg.get_fps(), 0);
        assert_eq!(bg.get_grid_json(), "null");
    }
}
