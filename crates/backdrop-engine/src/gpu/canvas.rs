//! Drawable surface and backing-store sizing

/// Canvas-like element with a CSS layout size and a device-pixel backing store
pub trait CanvasSurface {
    /// Layout size in CSS pixels
    fn client_size(&self) -> (f64, f64);
    fn device_pixel_ratio(&self) -> f64;
    /// Backing-store size in device pixels
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);
}

/// Device-pixel size for a CSS size at the given pixel ratio
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let scale = |v: f64| (v.max(0.0) * dpr).floor() as u32;
    (scale(css_width), scale(css_height))
}

/// Match the backing store to the layout size × device pixel ratio
///
/// Returns `true` only if the dimensions changed, so callers can skip
/// rebuilding size-dependent resources.
pub fn resize_canvas<S: CanvasSurface + ?Sized>(canvas: &mut S) -> bool {
    let (css_w, css_h) = canvas.client_size();
    let (width, height) = backing_size(css_w, css_h, canvas.device_pixel_ratio());
    if canvas.size() == (width, height) {
        return false;
    }
    canvas.set_size(width, height);
    true
}

#[cfg(feature = "wasm")]
impl CanvasSurface for web_sys::HtmlCanvasElement {
    fn client_size(&self) -> (f64, f64) {
        (self.client_width() as f64, self.client_height() as f64)
    }

    fn device_pixel_ratio(&self) -> f64 {
        web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
    }

    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeCanvas {
        css: (f64, f64),
        dpr: f64,
        size: (u32, u32),
    }

    impl CanvasSurface for FakeCanvas {
        fn client_size(&self) -> (f64, f64) {
            self.css
        }
        fn device_pixel_ratio(&self) -> f64 {
            self.dpr
        }
        fn size(&self) -> (u32, u32) {
            self.size
        }
        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    #[test]
    fn test_backing_size_scales_by_dpr() {
        assert_eq!(backing_size(800.0, 600.0, 2.0), (1600, 1200));
        assert_eq!(backing_size(100.5, 50.0, 1.5), (150, 75));
    }

    #[test]
    fn test_backing_size_bad_dpr_falls_back_to_one() {
        assert_eq!(backing_size(320.0, 240.0, 0.0), (320, 240));
        assert_eq!(backing_size(320.0, 240.0, f64::NAN), (320, 240));
    }

    #[test]
    fn test_resize_canvas_reports_change_once() {
        let mut canvas = FakeCanvas {
            css: (400.0, 300.0),
            dpr: 2.0,
            size: (300, 150),
        };
        assert!(resize_canvas(&mut canvas));
        assert_eq!(canvas.size, (800, 600));
        assert!(!resize_canvas(&mut canvas));
    }

    #[test]
    fn test_resize_canvas_tracks_dpr_change() {
        let mut canvas = FakeCanvas {
            css: (400.0, 300.0),
            dpr: 1.0,
            size: (400, 300),
        };
        assert!(!resize_canvas(&mut canvas));
        canvas.dpr = 3.0;
        assert!(resize_canvas(&mut canvas));
        assert_eq!(canvas.size, (1200, 900));
    }
}
