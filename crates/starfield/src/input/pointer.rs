//! Pointer tracker: one authoritative pointer position and a smoothed
//! intensity signal, fed by mouse, pen and touch events, with an
//! autonomous idle path on coarse-pointer devices.

use glam::Vec2;

use crate::api::config::PointerConfig;
use crate::api::types::Viewport;

/// Input device class reported by the `(pointer: coarse)` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMode {
    #[default]
    Fine,
    Coarse,
}

impl PointerMode {
    pub fn from_coarse(coarse: bool) -> Self {
        if coarse {
            PointerMode::Coarse
        } else {
            PointerMode::Fine
        }
    }

    pub fn is_coarse(self) -> bool {
        self == PointerMode::Coarse
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    /// True while a device is hovering or pressed.
    pub active: bool,
    /// Eases toward 1 when active, toward the idle floor otherwise.
    pub intensity: f32,
    pub mode: PointerMode,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            active: false,
            intensity: 0.0,
            mode: PointerMode::Fine,
        }
    }
}

impl PointerState {
    /// Pointer or touch moved to `pos`.
    pub fn move_to(&mut self, pos: Vec2) {
        self.position = pos;
        self.active = true;
    }

    /// Pointer left, touch ended, or the window blurred. Intensity is not
    /// touched here; it eases down over the next frames.
    pub fn release(&mut self) {
        self.active = false;
    }

    /// Intensity the signal is currently easing toward.
    pub fn target_intensity(&self, config: &PointerConfig) -> f32 {
        if self.active {
            1.0
        } else if self.mode.is_coarse() {
            config.coarse_idle_intensity
        } else {
            0.0
        }
    }

    pub fn ease_intensity(&mut self, delta: f32, config: &PointerConfig) {
        let target = self.target_intensity(config);
        self.intensity += (target - self.intensity) * config.intensity_ease * delta;
    }

    /// Whether the idle path drives the pointer this frame.
    pub fn is_idle_driven(&self) -> bool {
        !self.active && self.mode.is_coarse()
    }

    /// Ease toward the idle path. Returns true when the path was applied.
    pub fn follow_idle_path(
        &mut self,
        now_ms: f64,
        viewport: &Viewport,
        delta: f32,
        config: &PointerConfig,
    ) -> bool {
        if !self.is_idle_driven() {
            return false;
        }
        let target = idle_path(now_ms, viewport, config);
        let rate = (config.idle_ease * delta).min(1.0);
        self.position += (target - self.position) * rate;
        true
    }
}

/// Slow Lissajous loop around the viewport centre used when a touch device
/// has no finger down.
pub fn idle_path(now_ms: f64, viewport: &Viewport, config: &PointerConfig) -> Vec2 {
    let center = viewport.center();
    let cos = (now_ms * config.idle_freq_x as f64).cos() as f32;
    let sin = (now_ms * config.idle_freq_y as f64).sin() as f32;
    Vec2::new(
        center.x + cos * viewport.width * config.idle_span_x,
        center.y + sin * viewport.height * config.idle_span_y,
    )
}
