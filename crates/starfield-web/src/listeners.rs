//! DOM listeners that feed the scene's input queue.
//!
//! Every listener is kept in a [`ListenerRegistry`] and removed again when
//! the registry drops, so an unmounted scene leaves nothing behind.

use starfield::InputEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

type Handler = Closure<dyn FnMut(web::Event)>;

#[derive(Default)]
pub struct ListenerRegistry {
    entries: Vec<(web::EventTarget, &'static str, Handler)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, target: &web::EventTarget, event: &'static str, handler: impl FnMut(web::Event) + 'static) {
        let closure: Handler = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_ok()
        {
            self.entries.push((target.clone(), event, closure));
        } else {
            log::warn!("listeners: could not attach '{}'", event);
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Drop for ListenerRegistry {
    fn drop(&mut self) {
        for (target, event, closure) in self.entries.drain(..) {
            let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

fn first_touch(ev: &web::Event) -> Option<(f32, f32)> {
    let touch = ev.dyn_ref::<web::TouchEvent>()?.touches().get(0)?;
    Some((touch.client_x() as f32, touch.client_y() as f32))
}

fn client_pos(ev: &web::Event) -> Option<(f32, f32)> {
    let mouse = ev.dyn_ref::<web::MouseEvent>()?;
    Some((mouse.client_x() as f32, mouse.client_y() as f32))
}

/// Attach every scene listener. `push` receives each translated event.
pub fn install(window: &web::Window, coarse_query: Option<&web::MediaQueryList>, push: fn(InputEvent)) -> ListenerRegistry {
    let mut reg = ListenerRegistry::new();
    let win: &web::EventTarget = window.as_ref();

    reg.listen(win, "pointermove", move |ev| {
        if let Some((x, y)) = client_pos(&ev) {
            push(InputEvent::PointerMove { x, y });
        }
    });
    reg.listen(win, "pointerdown", move |ev| {
        let Some(pe) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        // Capture keeps touch drags flowing to us; not every target allows it.
        if let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) {
            let _ = el.set_pointer_capture(pe.pointer_id());
        }
    });
    if let Some(root) = dom::window_document().and_then(|d| d.document_element()) {
        reg.listen(root.as_ref(), "pointerleave", move |_| push(InputEvent::PointerLeave));
    }
    reg.listen(win, "blur", move |_| push(InputEvent::PointerLeave));

    reg.listen(win, "touchstart", move |ev| {
        if let Some((x, y)) = first_touch(&ev) {
            push(InputEvent::TouchStart { x, y });
        }
    });
    reg.listen(win, "touchmove", move |ev| {
        if let Some((x, y)) = first_touch(&ev) {
            push(InputEvent::TouchMove { x, y });
        }
    });
    reg.listen(win, "touchend", move |_| push(InputEvent::TouchEnd));
    reg.listen(win, "touchcancel", move |_| push(InputEvent::TouchEnd));

    reg.listen(win, "resize", move |_| {
        if let Some(w) = web::window() {
            let (width, height, device_pixel_ratio) = dom::viewport_metrics(&w);
            push(InputEvent::Resize { width, height, device_pixel_ratio });
        }
    });
    reg.listen(win, "scroll", move |_| push(InputEvent::Scroll));

    if let Some(query) = coarse_query {
        let q = query.clone();
        reg.listen(query.as_ref(), "change", move |_| push(InputEvent::PointerMode { coarse: q.matches() }));
    }

    log::debug!("listeners: {} attached", reg.len());
    reg
}
