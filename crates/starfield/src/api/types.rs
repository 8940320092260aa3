use glam::Vec2;

/// Drawable area in CSS pixels plus the effective device-pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Already capped by the performance mode.
    pub dpr: f32,
}

impl Viewport {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).floor().max(0.0) as u32,
            (self.height * self.dpr).floor().max(0.0) as u32,
        )
    }
}

/// Axis-aligned rectangle in viewport coordinates (client rect).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Collapsed elements (display: none, detached) report a zero rect.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// A locale-switch request from the host. `id` distinguishes a fresh
/// request from the same request delivered again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocaleBurst {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl LocaleBurst {
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Live view of a host element's client rect.
///
/// Implemented by the host over a DOM element. `None` means the element
/// is gone; callers keep whatever anchor they last resolved.
pub trait ElementProbe {
    fn bounds(&self) -> Option<Bounds>;
}

/// Fixed rectangle, for hosts without a live layout and for tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticBounds(pub Option<Bounds>);

impl ElementProbe for StaticBounds {
    fn bounds(&self) -> Option<Bounds> {
        self.0
    }
}
