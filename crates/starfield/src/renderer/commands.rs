//! Vector draw commands for everything that is not a star: full-screen
//! washes, constellation lines and radial glows.

use glam::Vec2;

/// Straight-alpha colour. Channels are 0-255, alpha is 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string with alpha clamped to [0, 1].
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a.clamp(0.0, 1.0))
    }
}

// ── Palette ─────────────────────────────────────────────────────────

pub const DIM: Rgba = Rgba::new(0, 0, 0, 0.45);
pub const WARP_TINT: Rgba = Rgba::new(112, 192, 255, 1.0);
pub const STAR: Rgba = Rgba::new(214, 237, 255, 1.0);
pub const STAR_CLAIMED: Rgba = Rgba::new(160, 240, 255, 1.0);
pub const STREAK: Rgba = Rgba::new(202, 232, 255, 1.0);
pub const GLOW: Rgba = Rgba::new(138, 228, 255, 1.0);
pub const LINK: Rgba = Rgba::new(165, 235, 255, 1.0);
pub const BURST_CORE: Rgba = Rgba::new(180, 241, 255, 1.0);
pub const BURST_MID: Rgba = Rgba::new(146, 210, 255, 1.0);
pub const BURST_EDGE: Rgba = Rgba::new(130, 170, 255, 0.0);
pub const HALO_PRIMARY: Rgba = Rgba::new(120, 210, 255, 1.0);
pub const HALO_TRAIL: Rgba = Rgba::new(150, 170, 255, 1.0);

pub const LINK_WIDTH: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the radius in [0, 1].
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole viewport.
    Wash { color: Rgba },
    Line { from: Vec2, to: Vec2, width: f32, color: Rgba },
    /// Disc filled with a radial gradient from `center` out to `radius`.
    RadialGlow { center: Vec2, radius: f32, stops: Vec<GradientStop> },
}

impl DrawCommand {
    /// Burst halo: bright core fading to transparent blue at the rim.
    pub fn burst_glow(center: Vec2, radius: f32, opacity: f32) -> Self {
        DrawCommand::RadialGlow {
            center,
            radius,
            stops: vec![
                GradientStop::new(0.0, BURST_CORE.with_alpha(opacity)),
                GradientStop::new(0.4, BURST_MID.with_alpha(opacity * 0.55)),
                GradientStop::new(1.0, BURST_EDGE),
            ],
        }
    }

    /// Soft pointer halo in `color`, transparent at the rim.
    pub fn halo(center: Vec2, radius: f32, opacity: f32, color: Rgba) -> Self {
        DrawCommand::RadialGlow {
            center,
            radius,
            stops: vec![
                GradientStop::new(0.0, color.with_alpha(opacity * 0.22)),
                GradientStop::new(0.55, color.with_alpha(opacity * 0.08)),
                GradientStop::new(1.0, color.with_alpha(0.0)),
            ],
        }
    }
}
