/// Input event types the scene understands.
/// Coordinates are viewport (client) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse or pen moved over the page.
    PointerMove { x: f32, y: f32 },
    /// The pointer left the page or the window lost focus.
    PointerLeave,
    /// A finger touched down.
    TouchStart { x: f32, y: f32 },
    /// A finger moved.
    TouchMove { x: f32, y: f32 },
    /// Touch ended or was cancelled.
    TouchEnd,
    /// The `(pointer: coarse)` capability query changed.
    PointerMode { coarse: bool },
    /// The viewport was resized.
    Resize { width: f32, height: f32, device_pixel_ratio: f32 },
    /// The page scrolled; element anchors may have moved.
    Scroll,
}

/// A queue of input events.
/// DOM handlers push into the queue; the next frame drains it.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
