//! Spring-followed pointer halos.
//!
//! Two soft light blobs chase the pointer at different stiffnesses so the
//! trailing one lags behind; a third spring eases their shared presence.

use glam::Vec2;

use crate::api::config::{HaloConfig, SpringParams};

/// Longest integration step. Larger frame times are split into substeps.
const MAX_SUBSTEP: f32 = 1.0 / 120.0;

/// Scalar mass-spring-damper, integrated with semi-implicit Euler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
    params: SpringParams,
}

impl Spring {
    pub fn new(value: f32, params: SpringParams) -> Self {
        Self { value, velocity: 0.0, target: value, params }
    }

    /// Jump to `value` with no residual motion.
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn step(&mut self, dt: f32) {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            let force = self.params.stiffness * (self.target - self.value) - self.params.damping * self.velocity;
            self.velocity += force / self.params.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
    }

    #[cfg(test)]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.target - self.value).abs() < epsilon && self.velocity.abs() < epsilon
    }
}

/// 2D follower built from a pair of scalar springs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring2 {
    x: Spring,
    y: Spring,
}

impl Spring2 {
    pub fn new(at: Vec2, params: SpringParams) -> Self {
        Self { x: Spring::new(at.x, params), y: Spring::new(at.y, params) }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.x.target = target.x;
        self.y.target = target.y;
    }

    pub fn snap(&mut self, at: Vec2) {
        self.x.snap(at.x);
        self.y.snap(at.y);
    }

    pub fn step(&mut self, dt: f32) {
        self.x.step(dt);
        self.y.step(dt);
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x.value, self.y.value)
    }
}

/// One halo ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloSprite {
    pub center: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerHalo {
    primary: Spring2,
    trail: Spring2,
    presence: Spring,
    primary_radius: f32,
    trail_radius: f32,
}

impl PointerHalo {
    pub fn new(at: Vec2, config: &HaloConfig) -> Self {
        Self {
            primary: Spring2::new(at, config.primary),
            trail: Spring2::new(at, config.trail),
            presence: Spring::new(0.0, config.presence),
            primary_radius: config.primary_radius,
            trail_radius: config.trail_radius,
        }
    }

    /// Point both followers at the pointer.
    pub fn set_target(&mut self, target: Vec2) {
        self.primary.set_target(target);
        self.trail.set_target(target);
    }

    pub fn set_presence(&mut self, presence: f32) {
        self.presence.target = presence;
    }

    /// Move both followers to `at` immediately (used when the scene first
    /// gets a viewport).
    pub fn snap_to(&mut self, at: Vec2) {
        self.primary.snap(at);
        self.trail.snap(at);
    }

    pub fn step(&mut self, dt_secs: f32) {
        self.primary.step(dt_secs);
        self.trail.step(dt_secs);
        self.presence.step(dt_secs);
    }

    pub fn presence(&self) -> f32 {
        self.presence.value
    }

    pub fn primary(&self) -> HaloSprite {
        HaloSprite {
            center: self.primary.position(),
            radius: self.primary_radius,
            opacity: (0.2 + self.presence() * 0.56).clamp(0.0, 1.0),
        }
    }

    pub fn trail(&self) -> HaloSprite {
        HaloSprite {
            center: self.trail.position(),
            radius: self.trail_radius,
            opacity: (0.08 + self.presence() * 0.45).clamp(0.0, 1.0),
        }
    }
}
