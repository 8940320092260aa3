//! `requestAnimationFrame` loop that can be cancelled.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct FrameLoop {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Call `on_frame` with the frame timestamp (ms) once per display frame
    /// until [`cancel`](Self::cancel) or drop.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let tick_next = tick.clone();
        let pending_next = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
            on_frame(now_ms);
            pending_next.set(request(&tick_next));
        }) as Box<dyn FnMut(f64)>));

        pending.set(request(&tick));
        Self { tick, pending }
    }

    /// Cancel the pending frame and release the callback.
    pub fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Breaks the closure's reference to itself.
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request(tick: &Tick) -> Option<i32> {
    let window = web::window()?;
    let borrow = tick.borrow();
    let closure = borrow.as_ref()?;
    window.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}
