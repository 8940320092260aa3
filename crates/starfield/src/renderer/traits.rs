//! Drawing backend contract.
//!
//! The engine never touches a graphics API. Each frame it fills a
//! [`RenderBuffer`]; a `Surface` replays that buffer onto whatever the
//! host has (Canvas 2D in the browser, nothing at all in tests).

use super::instance::RenderBuffer;
use crate::api::types::Viewport;

pub trait Surface {
    /// Backend identifier (e.g. "canvas2d", "headless").
    fn backend(&self) -> &'static str;

    /// Resize the backing store to the viewport at its effective DPR.
    fn resize(&mut self, viewport: &Viewport);

    /// Clear and draw one frame.
    fn draw(&mut self, frame: &RenderBuffer, viewport: &Viewport);
}

/// Surface that draws nothing and keeps counters. Used by tests and by
/// hosts that only read the instance buffer.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub frames: u64,
    pub last_star_count: usize,
    pub last_command_count: usize,
    /// Backing size in device pixels after the last resize.
    pub backing: (u32, u32),
}

impl Surface for HeadlessSurface {
    fn backend(&self) -> &'static str {
        "headless"
    }

    fn resize(&mut self, viewport: &Viewport) {
        self.backing = viewport.backing_size();
    }

    fn draw(&mut self, frame: &RenderBuffer, _viewport: &Viewport) {
        self.frames += 1;
        self.last_star_count = frame.stars.len();
        self.last_command_count = frame.background.len() + frame.overlay.len();
    }
}
