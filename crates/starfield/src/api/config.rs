use serde::{Deserialize, Serialize};

use crate::api::error::SceneError;

/// Particle count band for one pointer class.
///
/// Count is `clamp(floor(area / density), min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityBand {
    pub min: usize,
    pub max: usize,
    /// Square pixels of viewport per particle.
    pub density: f32,
}

/// Coefficients for the per-frame force integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Homing strength toward the home position: `base + depth * depth_scale`.
    pub homing_base: f32,
    pub homing_depth: f32,
    /// Homing strength toward a formation target.
    pub formation_homing_base: f32,
    pub formation_homing_depth: f32,
    /// Ambient drift amplitude per axis.
    pub drift_amplitude: f32,
    pub drift_freq_x: f32,
    pub drift_freq_y: f32,
    pub drift_phase_y: f32,
    /// Radial warp force: `(base + depth * depth_scale) * warp * gain`.
    pub warp_base: f32,
    pub warp_depth: f32,
    pub warp_gain: f32,
    /// Warp energy is ignored by the integrator below this value.
    pub warp_threshold: f32,
    /// Per-frame warp decay: `warp * decay - drain * delta`.
    pub warp_decay: f32,
    pub warp_drain: f32,
    /// Warp floor applied on touch start.
    pub touch_warp: f32,
    /// Pointer repulsion radius: `base + intensity * bonus`.
    pub repulse_radius: f32,
    pub repulse_radius_bonus: f32,
    pub repulse_base: f32,
    pub repulse_depth: f32,
    pub repulse_gain: f32,
    /// Pointer force multiplier while a burst is in flight.
    pub repulse_burst_scale: f32,
    /// Pointer force multiplier for particles held by a formation.
    pub repulse_claimed_scale: f32,
    pub damping_idle: f32,
    pub damping_burst: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            homing_base: 0.0038,
            homing_depth: 0.0018,
            formation_homing_base: 0.045,
            formation_homing_depth: 0.02,
            drift_amplitude: 0.025,
            drift_freq_x: 0.00015,
            drift_freq_y: 0.0002,
            drift_phase_y: 1.2,
            warp_base: 0.12,
            warp_depth: 0.08,
            warp_gain: 4.2,
            warp_threshold: 0.001,
            warp_decay: 0.9,
            warp_drain: 0.002,
            touch_warp: 0.72,
            repulse_radius: 160.0,
            repulse_radius_bonus: 120.0,
            repulse_base: 0.68,
            repulse_depth: 0.5,
            repulse_gain: 2.1,
            repulse_burst_scale: 0.25,
            repulse_claimed_scale: 0.1,
            damping_idle: 0.92,
            damping_burst: 0.9,
        }
    }
}

/// Locale-switch burst timings and strengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Seconds spent pulling inward before the explosion.
    pub implode_secs: f32,
    /// Seconds the outward push takes to fade.
    pub explode_secs: f32,
    pub implode_base: f32,
    pub implode_depth: f32,
    pub implode_gain: f32,
    pub explode_base: f32,
    pub explode_depth: f32,
    pub explode_gain: f32,
    /// Explosion impulse: speed in `[min, min + spread)`, direction jittered.
    pub impulse_speed_min: f32,
    pub impulse_speed_spread: f32,
    pub impulse_jitter: f32,
    pub impulse_base: f32,
    pub impulse_depth: f32,
    /// Warp floor applied when the explosion starts.
    pub explode_warp: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            implode_secs: 0.46,
            explode_secs: 0.72,
            implode_base: 0.52,
            implode_depth: 0.36,
            implode_gain: 2.6,
            explode_base: 0.16,
            explode_depth: 0.08,
            explode_gain: 2.2,
            impulse_speed_min: 8.0,
            impulse_speed_spread: 12.0,
            impulse_jitter: 26.0,
            impulse_base: 0.7,
            impulse_depth: 0.42,
            explode_warp: 1.08,
        }
    }
}

/// Pointer tracking and idle-drift tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Per-frame easing rate of the intensity signal.
    pub intensity_ease: f32,
    /// Intensity floor for an idle coarse pointer.
    pub coarse_idle_intensity: f32,
    /// Halo presence for an idle coarse pointer.
    pub coarse_idle_presence: f32,
    /// Per-frame easing rate toward the idle path.
    pub idle_ease: f32,
    pub idle_freq_x: f32,
    pub idle_freq_y: f32,
    /// Idle path half-extent as a fraction of the viewport.
    pub idle_span_x: f32,
    pub idle_span_y: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            intensity_ease: 0.075,
            coarse_idle_intensity: 0.42,
            coarse_idle_presence: 0.58,
            idle_ease: 0.042,
            idle_freq_x: 0.00023,
            idle_freq_y: 0.00029,
            idle_span_x: 0.2,
            idle_span_y: 0.16,
        }
    }
}

/// Constellation formation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// Particles assigned per shape point.
    pub fan_out: usize,
    /// Full width of the per-frame target jitter.
    pub jitter: f32,
    /// Viewports narrower than this use the compact layout.
    pub narrow_breakpoint: f32,
    pub narrow_shape_scale: f32,
    pub wide_shape_scale: f32,
    /// Reactor anchor as viewport fractions.
    pub reactor_x_narrow: f32,
    pub reactor_x_wide: f32,
    pub reactor_y: f32,
    /// Outline padding around a hovered project card.
    pub project_margin: f32,
    /// Subdivisions per outline edge.
    pub project_steps: usize,
    /// Constellation lines are skipped beyond this distance.
    pub max_link_distance: f32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            fan_out: 6,
            jitter: 6.0,
            narrow_breakpoint: 768.0,
            narrow_shape_scale: 0.65,
            wide_shape_scale: 1.1,
            reactor_x_narrow: 0.5,
            reactor_x_wide: 0.28,
            reactor_y: 0.72,
            project_margin: 16.0,
            project_steps: 6,
            max_link_distance: 320.0,
        }
    }
}

/// Frame budget watchdog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfConfig {
    /// Samples collected before the mean is checked.
    pub window: usize,
    /// Mean frame time (ms) above which low-performance mode latches.
    pub budget_ms: f32,
    pub max_dpr: f32,
    pub low_perf_max_dpr: f32,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            window: 60,
            budget_ms: 30.0,
            max_dpr: 1.5,
            low_perf_max_dpr: 1.0,
        }
    }
}

/// Spring parameters for one halo follower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

/// Pointer halo followers drawn over the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaloConfig {
    pub primary: SpringParams,
    pub trail: SpringParams,
    pub presence: SpringParams,
    pub primary_radius: f32,
    pub trail_radius: f32,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            primary: SpringParams { stiffness: 86.0, damping: 20.0, mass: 0.8 },
            trail: SpringParams { stiffness: 58.0, damping: 20.0, mass: 1.1 },
            presence: SpringParams { stiffness: 90.0, damping: 24.0, mass: 0.7 },
            primary_radius: 210.0,
            trail_radius: 130.0,
        }
    }
}

/// Complete scene tuning. Every field has a default, so a JSON override
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub fine_density: DensityBand,
    pub coarse_density: DensityBand,
    pub forces: ForceConfig,
    pub burst: BurstConfig,
    pub pointer: PointerConfig,
    pub formation: FormationConfig,
    pub perf: PerfConfig,
    pub halo: HaloConfig,
    /// Frame duration (ms) that maps to a delta of 1.0.
    pub baseline_frame_ms: f32,
    /// Upper bound on the normalized frame delta.
    pub max_delta: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fine_density: DensityBand { min: 140, max: 320, density: 6200.0 },
            coarse_density: DensityBand { min: 90, max: 220, density: 7800.0 },
            forces: ForceConfig::default(),
            burst: BurstConfig::default(),
            pointer: PointerConfig::default(),
            formation: FormationConfig::default(),
            perf: PerfConfig::default(),
            halo: HaloConfig::default(),
            baseline_frame_ms: 16.666,
            max_delta: 2.2,
        }
    }
}

impl SceneConfig {
    /// Parse a (possibly partial) config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the integrator cannot work with.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (name, band) in [("fine_density", &self.fine_density), ("coarse_density", &self.coarse_density)] {
            if band.min > band.max {
                return Err(SceneError::InvalidConfig(format!(
                    "{name}: min {} exceeds max {}",
                    band.min, band.max
                )));
            }
            if band.density <= 0.0 {
                return Err(SceneError::InvalidConfig(format!("{name}: density must be positive")));
            }
        }
        if self.burst.implode_secs <= 0.0 || self.burst.explode_secs <= 0.0 {
            return Err(SceneError::InvalidConfig("burst phase durations must be positive".into()));
        }
        if self.formation.fan_out == 0 {
            return Err(SceneError::InvalidConfig("formation.fan_out must be at least 1".into()));
        }
        if self.formation.project_steps == 0 {
            return Err(SceneError::InvalidConfig("formation.project_steps must be at least 1".into()));
        }
        if self.perf.window == 0 {
            return Err(SceneError::InvalidConfig("perf.window must be at least 1".into()));
        }
        if self.baseline_frame_ms <= 0.0 || self.max_delta <= 0.0 {
            return Err(SceneError::InvalidConfig("frame timing must be positive".into()));
        }
        Ok(())
    }

    /// Density band for the given pointer class / performance state.
    pub fn density_band(&self, constrained: bool) -> DensityBand {
        if constrained {
            self.coarse_density
        } else {
            self.fine_density
        }
    }
}
