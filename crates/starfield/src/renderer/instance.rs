use bytemuck::{Pod, Zeroable};

use super::commands::DrawCommand;

/// Per-star render data. 16 floats = 64 bytes stride, so a JS or GPU
/// renderer can read the buffer straight out of linear memory.
///
/// All alphas are final (twinkle, claim boost and warp already applied).
/// A zero `streak_alpha` or `glow_alpha` means "skip that pass".
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarInstance {
    pub x: f32,
    pub y: f32,
    /// Disc radius in CSS pixels.
    pub radius: f32,
    /// Disc alpha.
    pub alpha: f32,
    pub glow_radius: f32,
    pub glow_alpha: f32,
    pub streak_from_x: f32,
    pub streak_from_y: f32,
    pub streak_to_x: f32,
    pub streak_to_y: f32,
    pub streak_alpha: f32,
    pub streak_width: f32,
    /// 1.0 when the star belongs to a formation.
    pub claimed: f32,
    pub depth: f32,
    pub _pad: [f32; 2],
}

impl StarInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn is_claimed(&self) -> bool {
        self.claimed > 0.5
    }

    pub fn has_streak(&self) -> bool {
        self.streak_alpha > 0.0
    }

    pub fn has_glow(&self) -> bool {
        self.glow_alpha > 0.0
    }
}

/// Everything one frame draws, in paint order: background washes, stars,
/// then overlays.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    pub background: Vec<DrawCommand>,
    pub stars: Vec<StarInstance>,
    pub overlay: Vec<DrawCommand>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            background: Vec::with_capacity(2),
            stars: Vec::with_capacity(320),
            overlay: Vec::with_capacity(16),
        }
    }

    pub fn clear(&mut self) {
        self.background.clear();
        self.stars.clear();
        self.overlay.clear();
    }

    pub fn push_star(&mut self, instance: StarInstance) {
        self.stars.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.stars.len() as u32
    }

    /// Raw pointer to star data for zero-copy reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.stars.as_ptr() as *const f32
    }

    /// Star data as a flat float slice.
    pub fn instance_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.stars)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_instance_is_16_floats() {
        assert_eq!(std::mem::size_of::<StarInstance>(), 64);
        assert_eq!(StarInstance::STRIDE_BYTES, 64);
    }

    #[test]
    fn flat_view_matches_layout() {
        let mut buf = RenderBuffer::new();
        buf.push_star(StarInstance { x: 3.0, y: 4.0, claimed: 1.0, ..Default::default() });
        buf.push_star(StarInstance { x: 5.0, ..Default::default() });
        assert_eq!(buf.instance_count(), 2);
        let floats = buf.instance_floats();
        assert_eq!(floats.len(), 32);
        assert_eq!(floats[0], 3.0);
        assert_eq!(floats[1], 4.0);
        assert_eq!(floats[12], 1.0);
        assert_eq!(floats[16], 5.0);
        assert!(buf.stars[0].is_claimed());
    }

    #[test]
    fn clear_empties_every_layer() {
        let mut buf = RenderBuffer::new();
        buf.push_star(StarInstance::default());
        buf.background.push(DrawCommand::Wash { color: crate::renderer::commands::DIM });
        buf.clear();
        assert!(buf.stars.is_empty() && buf.background.is_empty() && buf.overlay.is_empty());
    }
}
