#![cfg(target_arch = "wasm32")]

use backdrop_web::HeroBackground;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> web_sys::HtmlCanvasElement {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("document")
        .create_element("canvas")
        .expect("create canvas")
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .expect("canvas element")
}

#[wasm_bindgen_test(async)]
async fn init_then_frame_never_throws() {
    let mut bg = HeroBackground::new();

    // Headless browsers may have no GPU; either outcome must leave a usable
    // instance behind.
    let ready = bg.init(canvas(), None).await.is_ok();
    assert_eq!(bg.is_initialized(), ready);

    bg.update(1.0 / 60.0);
    bg.render(0.016);
    bg.resize();
    assert_ne!(bg.get_grid_json(), "null");

    bg.destroy();
    assert!(!bg.is_initialized());
}

#[wasm_bindgen_test(async)]
async fn bad_config_falls_back_to_defaults() {
    let mut bg = HeroBackground::new();
    let _ = bg
        .init(canvas(), Some(r#"{"gridSpacing": 0}"#.to_string()))
        .await;

    let grid: serde_json::Value = serde_json::from_str(&bg.get_grid_json()).expect("json");
    assert_eq!(grid["spacing"], 30.0);
    bg.destroy();
}
