//! Star particles and field generation.

use glam::Vec2;

use crate::api::config::DensityBand;
use crate::core::rng::Rng;

/// One star in the field.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    /// Rest position the homing force pulls toward.
    pub home: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
    /// Twinkle oscillation speed.
    pub twinkle: f32,
    /// Phase offset shared by twinkle and drift.
    pub phase: f32,
    depth: f32,
}

impl Particle {
    pub const MIN_DEPTH: f32 = 0.55;
    pub const DEPTH_SPAN: f32 = 1.1;

    /// Star at rest at `position`. Depth is fixed for the particle's life.
    pub fn new(position: Vec2, radius: f32, opacity: f32, twinkle: f32, phase: f32, depth: f32) -> Self {
        Particle {
            position,
            home: position,
            velocity: Vec2::ZERO,
            radius,
            opacity,
            twinkle,
            phase,
            depth,
        }
    }

    /// Random star somewhere inside `width` x `height`.
    pub fn random(width: f32, height: f32, rng: &mut Rng) -> Self {
        let position = Vec2::new(rng.next_f32() * width, rng.next_f32() * height);
        let depth = rng.range(Self::MIN_DEPTH, Self::DEPTH_SPAN);
        let radius = rng.range(0.5, 1.8);
        let opacity = rng.range(0.28, 0.62);
        let twinkle = rng.range(0.5, 1.4);
        let phase = rng.next_f32() * std::f32::consts::TAU;
        Particle::new(position, radius, opacity, twinkle, phase, depth)
    }

    /// Force sensitivity and visual weight. Closer stars react harder.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Twinkle multiplier in [0.44, 1.0] at `now_ms`.
    pub fn twinkle_factor(&self, now_ms: f64) -> f32 {
        let angle = now_ms * 0.001 * self.twinkle as f64 + self.phase as f64;
        0.72 + angle.sin() as f32 * 0.28
    }
}

/// Number of stars for a viewport area under the given band.
pub fn particle_count(area: f32, band: &DensityBand) -> usize {
    let raw = (area.max(0.0) / band.density).floor() as usize;
    raw.clamp(band.min, band.max)
}

/// Build a fresh field. Old particles are discarded by the caller, never migrated.
pub fn spawn_field(width: f32, height: f32, band: &DensityBand, rng: &mut Rng) -> Vec<Particle> {
    let count = particle_count(width * height, band);
    (0..count).map(|_| Particle::random(width, height, rng)).collect()
}
