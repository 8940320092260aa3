use starfield::{Bounds, ElementProbe};
use web_sys as web;

pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Window inner size in CSS pixels plus the raw device-pixel ratio.
pub fn viewport_metrics(window: &web::Window) -> (f32, f32, f32) {
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    let dpr = window.device_pixel_ratio();
    (
        px(window.inner_width()),
        px(window.inner_height()),
        if dpr > 0.0 { dpr as f32 } else { 1.0 },
    )
}

/// The `(pointer: coarse)` media query, when the browser supports it.
pub fn coarse_pointer_query(window: &web::Window) -> Option<web::MediaQueryList> {
    window.match_media(COARSE_POINTER_QUERY).ok().flatten()
}

/// Flag the page so stylesheets can drop their own expensive effects.
pub fn mark_low_perf() {
    if let Some(root) = window_document().and_then(|d| d.document_element()) {
        let _ = root.set_attribute("data-low-perf", "true");
    }
}

/// Live client rect of a DOM element.
pub struct DomElementProbe {
    element: web::Element,
}

impl DomElementProbe {
    pub fn new(element: web::Element) -> Self {
        Self { element }
    }
}

impl ElementProbe for DomElementProbe {
    fn bounds(&self) -> Option<Bounds> {
        if !self.element.is_connected() {
            return None;
        }
        let rect = self.element.get_bounding_client_rect();
        Some(Bounds::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }
}
