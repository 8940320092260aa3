//! Per-frame force integrator.
//!
//! Every force is a velocity impulse scaled by the frame `delta`, applied
//! in a fixed order: homing, drift, warp, burst, pointer. Damping and
//! position integration come last.

use glam::Vec2;

use crate::api::config::{BurstConfig, ForceConfig};
use crate::core::rng::Rng;
use crate::systems::burst::BurstPhase;
use crate::systems::particle::Particle;

/// Pointer intensity below which repulsion is skipped.
const MIN_POINTER_INTENSITY: f32 = 0.001;

/// Frame-wide inputs shared by every particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceContext {
    pub now_ms: f64,
    pub delta: f32,
    /// Viewport centre; warp pushes away from it.
    pub center: Vec2,
    pub warp: f32,
    pub burst_phase: BurstPhase,
    pub burst_origin: Vec2,
    /// Progress through the explode phase in [0, 1].
    pub explode_progress: f32,
    pub pointer: Vec2,
    pub pointer_intensity: f32,
}

impl ForceContext {
    pub fn repulse_radius(&self, forces: &ForceConfig) -> f32 {
        forces.repulse_radius + self.pointer_intensity * forces.repulse_radius_bonus
    }

    /// Pointer force multiplier: full strength at rest, muted during a burst.
    pub fn pointer_scale(&self, forces: &ForceConfig) -> f32 {
        if self.burst_phase == BurstPhase::Idle {
            1.0
        } else {
            forces.repulse_burst_scale
        }
    }

    pub fn damping(&self, forces: &ForceConfig) -> f32 {
        if self.burst_phase == BurstPhase::Idle {
            forces.damping_idle
        } else {
            forces.damping_burst
        }
    }
}

/// Unit vector from `from` to `to`, or zero when they coincide.
#[inline]
fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Spring toward the home position, or toward a formation target.
pub fn homing(p: &mut Particle, target: Option<Vec2>, ctx: &ForceContext, forces: &ForceConfig) {
    let depth = p.depth();
    let (goal, strength) = match target {
        Some(t) => (t, forces.formation_homing_base + depth * forces.formation_homing_depth),
        None => (p.home, forces.homing_base + depth * forces.homing_depth),
    };
    p.velocity += (goal - p.position) * strength * ctx.delta;
}

pub fn drift(p: &mut Particle, ctx: &ForceContext, forces: &ForceConfig) {
    // Phases stay in f64: host clocks run to 1e8 ms and beyond.
    let (t, depth) = (ctx.now_ms, p.depth() as f64);
    let ax = t * (forces.drift_freq_x as f64) * depth + p.phase as f64;
    let ay = t * (forces.drift_freq_y as f64) * depth + (p.phase * forces.drift_phase_y) as f64;
    let dx = ax.cos() as f32 * forces.drift_amplitude;
    let dy = ay.sin() as f32 * forces.drift_amplitude;
    p.velocity += Vec2::new(dx, dy) * ctx.delta;
}

/// Radial push away from the viewport centre while warp energy lasts.
pub fn warp(p: &mut Particle, ctx: &ForceContext, forces: &ForceConfig) {
    if ctx.warp <= forces.warp_threshold {
        return;
    }
    let dir = direction(ctx.center, p.position);
    let strength = (forces.warp_base + p.depth() * forces.warp_depth) * ctx.warp * ctx.delta * forces.warp_gain;
    p.velocity += dir * strength;
}

/// Implode pull or fading explode push around the burst origin.
pub fn burst(p: &mut Particle, ctx: &ForceContext, cfg: &BurstConfig) {
    let depth = p.depth();
    match ctx.burst_phase {
        BurstPhase::Idle => {}
        BurstPhase::Implode => {
            let pull = (cfg.implode_base + depth * cfg.implode_depth) * ctx.delta * cfg.implode_gain;
            p.velocity += direction(p.position, ctx.burst_origin) * pull;
        }
        BurstPhase::Explode => {
            let push = (1.0 - ctx.explode_progress)
                * (cfg.explode_base + depth * cfg.explode_depth)
                * ctx.delta
                * cfg.explode_gain;
            p.velocity += direction(ctx.burst_origin, p.position) * push;
        }
    }
}

/// Push away from the pointer inside the repulsion radius. Claimed stars
/// only feel a fraction so they hold their shape under the cursor.
pub fn repulse(p: &mut Particle, claimed: bool, ctx: &ForceContext, forces: &ForceConfig) {
    if ctx.pointer_intensity <= MIN_POINTER_INTENSITY {
        return;
    }
    let offset = p.position - ctx.pointer;
    let mut distance = offset.length();
    if distance == 0.0 {
        distance = 1.0;
    }
    let radius = ctx.repulse_radius(forces);
    if distance >= radius {
        return;
    }
    let claim_scale = if claimed { forces.repulse_claimed_scale } else { 1.0 };
    let influence = (1.0 - distance / radius)
        * (forces.repulse_base + p.depth() * forces.repulse_depth)
        * ctx.pointer_intensity;
    p.velocity += offset / distance
        * influence
        * forces.repulse_gain
        * ctx.delta
        * ctx.pointer_scale(forces)
        * claim_scale;
}

/// Damp velocity and move.
pub fn integrate(p: &mut Particle, ctx: &ForceContext, forces: &ForceConfig) {
    p.velocity *= ctx.damping(forces);
    p.position += p.velocity * ctx.delta;
}

/// Run the whole force chain on one particle.
pub fn step_particle(
    p: &mut Particle,
    target: Option<Vec2>,
    claimed: bool,
    ctx: &ForceContext,
    forces: &ForceConfig,
    burst_cfg: &BurstConfig,
) {
    homing(p, target, ctx, forces);
    drift(p, ctx, forces);
    warp(p, ctx, forces);
    burst(p, ctx, burst_cfg);
    repulse(p, claimed, ctx, forces);
    integrate(p, ctx, forces);
}

/// One-shot outward kick applied when a burst flips from implode to
/// explode. Direction is jittered so the shell does not look perfectly
/// radial.
pub fn explosion_impulse(p: &mut Particle, origin: Vec2, cfg: &BurstConfig, rng: &mut Rng) {
    let outward = p.position - origin + Vec2::new(rng.jitter(cfg.impulse_jitter), rng.jitter(cfg.impulse_jitter));
    let speed = rng.range(cfg.impulse_speed_min, cfg.impulse_speed_spread);
    let dir = outward.normalize_or_zero();
    p.velocity += dir * speed * (cfg.impulse_base + p.depth() * cfg.impulse_depth);
}
