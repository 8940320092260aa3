//! Locale-switch burst: a three-phase `idle -> implode -> explode -> idle`
//! cycle around an origin point.

use glam::Vec2;

use crate::api::config::BurstConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BurstPhase {
    #[default]
    Idle,
    Implode,
    Explode,
}

/// Phase change produced by [`BurstState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstTransition {
    /// Implosion finished; the caller applies the outward impulse now.
    Exploded,
    /// Explosion faded out.
    Settled,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BurstState {
    pub phase: BurstPhase,
    pub origin: Vec2,
    /// Seconds spent in the current phase.
    pub elapsed: f32,
}

impl BurstState {
    /// Start (or restart) a burst at `origin`. Whatever was in flight is dropped.
    pub fn trigger(&mut self, origin: Vec2) {
        self.phase = BurstPhase::Implode;
        self.origin = origin;
        self.elapsed = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.phase != BurstPhase::Idle
    }

    /// Advance phase time by `seconds`. At most one transition per call;
    /// overshoot past a boundary is discarded.
    pub fn advance(&mut self, seconds: f32, config: &BurstConfig) -> Option<BurstTransition> {
        if self.phase == BurstPhase::Idle {
            return None;
        }
        self.elapsed += seconds;
        match self.phase {
            BurstPhase::Implode if self.elapsed >= config.implode_secs => {
                self.phase = BurstPhase::Explode;
                self.elapsed = 0.0;
                log::debug!("burst: implode -> explode at ({:.0}, {:.0})", self.origin.x, self.origin.y);
                Some(BurstTransition::Exploded)
            }
            BurstPhase::Explode if self.elapsed >= config.explode_secs => {
                self.phase = BurstPhase::Idle;
                self.elapsed = 0.0;
                log::debug!("burst: explode -> idle");
                Some(BurstTransition::Settled)
            }
            _ => None,
        }
    }

    /// Progress through the current phase in [0, 1].
    pub fn progress(&self, config: &BurstConfig) -> f32 {
        match self.phase {
            BurstPhase::Idle => 0.0,
            BurstPhase::Implode => (self.elapsed / config.implode_secs).min(1.0),
            BurstPhase::Explode => (self.elapsed / config.explode_secs).min(1.0),
        }
    }

    /// Radius and peak opacity of the halo drawn at the origin, if any.
    /// Shrinks while imploding, expands and fades while exploding.
    pub fn halo(&self, config: &BurstConfig, viewport_extent: f32) -> Option<(f32, f32)> {
        let p = self.progress(config);
        match self.phase {
            BurstPhase::Idle => None,
            BurstPhase::Implode => Some((90.0 * (1.0 - p) + 18.0, 0.35 * (1.0 - p * 0.65))),
            BurstPhase::Explode => Some((22.0 + p * viewport_extent * 0.35, 0.28 * (1.0 - p))),
        }
    }
}
