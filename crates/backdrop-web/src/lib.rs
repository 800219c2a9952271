//! Browser bindings for the hero backdrop
//!
//! Exposes [`HeroBackground`] to JavaScript. The page owns the animation
//! loop and calls `update` then `render` from its `requestAnimationFrame`
//! callback; nothing here schedules itself.

mod background;

pub use background::HeroBackground;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Install the panic hook and route `log` records to the browser console
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Errs only when a logger is already installed
    console_log::init_with_level(log::Level::Info).ok();
    log::debug!("[backdrop] bindings loaded");
}
