use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::types::{ElementProbe, LocaleBurst, Viewport};
use crate::core::rng::Rng;
use crate::core::time::{FrameClock, FrameTime};
use crate::input::pointer::{PointerMode, PointerState};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::RenderBuffer;
use crate::systems::burst::{BurstState, BurstTransition};
use crate::systems::forces::{self, ForceContext};
use crate::systems::formation::{self, Formation, ShapeTable};
use crate::systems::halo::PointerHalo;
use crate::systems::particle::{spawn_field, Particle};
use crate::systems::perf::PerfMonitor;
use crate::systems::render;

/// The whole star-field simulation.
///
/// Owned by whoever drives the frame loop. Host handlers either push into an
/// [`InputQueue`] or call the prop setters; [`SceneState::step`] advances one
/// frame and [`SceneState::render`] fills a [`RenderBuffer`].
pub struct SceneState {
    config: SceneConfig,
    shapes: ShapeTable,
    rng: Rng,
    clock: FrameClock,
    last_frame: FrameTime,

    viewport: Viewport,
    /// DPR reported by the host, before the performance cap.
    device_pixel_ratio: f32,

    particles: Vec<Particle>,
    pointer: PointerState,
    halo: PointerHalo,
    burst: BurstState,
    perf: PerfMonitor,
    warp: f32,
    /// Warp this frame integrates and draws with. An explosion spike lands
    /// in `warp` and shows from the next frame.
    frame_warp: f32,

    formation: Formation,
    hovered_skill: Option<String>,
    project_probe: Option<Box<dyn ElementProbe>>,
    project_anchor: Option<Vec2>,
    target_probe: Option<Box<dyn ElementProbe>>,
    target_anchor: Option<Vec2>,

    active_section: Option<String>,
    last_burst_id: Option<u64>,
}

impl SceneState {
    /// Empty scene. Nothing is spawned until the first [`resize`](Self::resize).
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        let clock = FrameClock::new(config.baseline_frame_ms, config.max_delta);
        let halo = PointerHalo::new(Vec2::ZERO, &config.halo);
        Self {
            shapes: ShapeTable::default(),
            rng: Rng::new(seed),
            clock,
            last_frame: FrameTime::default(),
            viewport: Viewport::default(),
            device_pixel_ratio: 1.0,
            particles: Vec::new(),
            pointer: PointerState::default(),
            halo,
            burst: BurstState::default(),
            perf: PerfMonitor::new(),
            warp: 0.0,
            frame_warp: 0.0,
            formation: Formation::inactive(),
            hovered_skill: None,
            project_probe: None,
            project_anchor: None,
            target_probe: None,
            target_anchor: None,
            active_section: None,
            last_burst_id: None,
            config,
        }
    }

    /// Replace the built-in skill shape table.
    pub fn with_shapes(mut self, shapes: ShapeTable) -> Self {
        self.shapes = shapes;
        self.rebuild_formation();
        self
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn halo(&self) -> &PointerHalo {
        &self.halo
    }

    pub fn burst(&self) -> &BurstState {
        &self.burst
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn warp_energy(&self) -> f32 {
        self.warp
    }

    pub fn frame_warp(&self) -> f32 {
        self.frame_warp
    }

    pub fn is_low_perf(&self) -> bool {
        self.perf.is_low_perf()
    }

    pub fn last_frame(&self) -> FrameTime {
        self.last_frame
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn target_anchor(&self) -> Option<Vec2> {
        self.target_anchor
    }

    pub fn project_anchor(&self) -> Option<Vec2> {
        self.project_anchor
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Adopt a new viewport. The particle field is regenerated from scratch;
    /// pointer, burst and formation state carry over.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        let first_layout = self.viewport.is_empty();
        self.device_pixel_ratio = if device_pixel_ratio > 0.0 { device_pixel_ratio } else { 1.0 };
        let dpr = self.device_pixel_ratio.min(self.perf.dpr_cap(&self.config.perf));
        self.viewport = Viewport { width: width.max(0.0), height: height.max(0.0), dpr };

        let constrained = self.pointer.mode.is_coarse() || self.perf.is_low_perf();
        if self.viewport.is_empty() {
            self.particles.clear();
        } else {
            let band = self.config.density_band(constrained);
            self.particles = spawn_field(self.viewport.width, self.viewport.height, &band, &mut self.rng);
        }

        let center = self.viewport.center();
        self.pointer.position = center;
        if first_layout {
            self.halo.snap_to(center);
        }
        self.halo.set_target(center);

        self.refresh_target_anchor();
        self.rebuild_formation();

        log::info!(
            "scene: resized to {}x{} @{:.2} ({} stars{})",
            self.viewport.width,
            self.viewport.height,
            dpr,
            self.particles.len(),
            if constrained { ", constrained" } else { "" }
        );
    }

    /// Apply every queued host event in arrival order.
    pub fn handle_input(&mut self, queue: &mut InputQueue) {
        for event in queue.drain() {
            self.apply_input(event);
        }
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { x, y } => {
                self.track_pointer(Vec2::new(x, y));
            }
            InputEvent::TouchStart { x, y } => {
                self.track_pointer(Vec2::new(x, y));
                self.warp = self.warp.max(self.config.forces.touch_warp);
            }
            InputEvent::PointerLeave | InputEvent::TouchEnd => {
                self.pointer.release();
                self.halo.set_presence(self.idle_presence());
            }
            InputEvent::PointerMode { coarse } => self.set_pointer_mode(coarse),
            InputEvent::Resize { width, height, device_pixel_ratio } => {
                self.resize(width, height, device_pixel_ratio);
            }
            InputEvent::Scroll => self.refresh_target_anchor(),
        }
    }

    fn track_pointer(&mut self, pos: Vec2) {
        self.pointer.move_to(pos);
        self.halo.set_target(pos);
        self.halo.set_presence(1.0);
    }

    fn idle_presence(&self) -> f32 {
        if self.pointer.mode.is_coarse() {
            self.config.pointer.coarse_idle_presence
        } else {
            0.0
        }
    }

    /// Switch between fine and coarse pointer handling. Density follows on
    /// the next resize.
    pub fn set_pointer_mode(&mut self, coarse: bool) {
        self.pointer.mode = PointerMode::from_coarse(coarse);
        if coarse {
            self.halo.set_presence(self.config.pointer.coarse_idle_presence);
        }
    }

    // ── Props ───────────────────────────────────────────────────────

    /// Start a burst for a fresh token. Returns false when `burst.id` was
    /// already seen (the same request delivered again).
    pub fn trigger_locale_burst(&mut self, burst: &LocaleBurst) -> bool {
        if self.last_burst_id == Some(burst.id) {
            return false;
        }
        self.last_burst_id = Some(burst.id);

        let origin = burst.origin();
        self.burst.trigger(origin);

        if !self.viewport.is_empty() {
            let (w, h) = (self.viewport.width, self.viewport.height);
            for p in &mut self.particles {
                p.home = Vec2::new(self.rng.next_f32() * w, self.rng.next_f32() * h);
            }
        }

        self.pointer.position = origin;
        self.pointer.intensity = 1.0;
        self.halo.set_target(origin);
        self.halo.set_presence(1.0);
        log::debug!("burst {} at ({:.0}, {:.0})", burst.id, origin.x, origin.y);
        true
    }

    pub fn set_hovered_skill(&mut self, skill: Option<&str>) {
        let skill = skill.map(str::to_owned);
        if skill == self.hovered_skill {
            return;
        }
        self.hovered_skill = skill;
        self.rebuild_formation();
    }

    /// Element whose live rect anchors the project outline. Probed every frame.
    pub fn set_project_element(&mut self, probe: Option<Box<dyn ElementProbe>>) {
        self.project_anchor = probe.as_ref().and_then(|p| p.bounds()).map(|b| b.center());
        self.project_probe = probe;
        self.rebuild_formation();
    }

    /// Element that anchors skill shapes instead of the fixed reactor point.
    pub fn set_target_element(&mut self, probe: Option<Box<dyn ElementProbe>>) {
        self.target_probe = probe;
        if self.target_probe.is_none() {
            self.target_anchor = None;
        }
        self.refresh_target_anchor();
    }

    /// Informational only; recorded for hosts that query it.
    pub fn set_active_section(&mut self, section: Option<&str>) {
        if self.active_section.as_deref() != section {
            log::debug!("active section: {:?}", section);
            self.active_section = section.map(str::to_owned);
        }
    }

    /// Re-read the target element centre. A missing or collapsed element
    /// leaves the previous anchor in place.
    fn refresh_target_anchor(&mut self) {
        if let Some(bounds) = self.target_probe.as_ref().and_then(|p| p.bounds()) {
            if bounds.has_area() {
                self.target_anchor = Some(bounds.center());
            }
        }
    }

    /// Skill hover wins over project hover.
    fn rebuild_formation(&mut self) {
        let fcfg = &self.config.formation;
        self.formation = if self.viewport.is_empty() {
            Formation::inactive()
        } else if let Some(skill) = &self.hovered_skill {
            formation::skill_formation(skill, &self.shapes, &self.viewport, fcfg)
        } else if let Some(rect) = self.project_probe.as_ref().and_then(|p| p.bounds()) {
            formation::project_formation(&rect, fcfg)
        } else {
            Formation::inactive()
        };
        log::debug!(
            "formation: {:?} with {} points",
            self.formation.source,
            self.formation.points.len()
        );
    }

    // ── Frame ───────────────────────────────────────────────────────

    /// Advance the simulation to host time `now_ms`.
    pub fn step(&mut self, now_ms: f64) -> FrameTime {
        let frame = self.clock.tick(now_ms);
        self.last_frame = frame;

        if self.perf.record(frame.elapsed_ms, &self.config.perf) {
            let Viewport { width, height, .. } = self.viewport;
            self.resize(width, height, self.device_pixel_ratio);
        }

        let delta = frame.delta;
        if self.pointer.follow_idle_path(now_ms, &self.viewport, delta, &self.config.pointer) {
            self.halo.set_target(self.pointer.position);
            self.halo.set_presence(self.config.pointer.coarse_idle_presence);
        }
        self.pointer.ease_intensity(delta, &self.config.pointer);

        let fc = &self.config.forces;
        self.warp = (self.warp * fc.warp_decay - fc.warp_drain * delta).max(0.0);
        self.frame_warp = self.warp;

        if let Some(BurstTransition::Exploded) = self.burst.advance(frame.seconds, &self.config.burst) {
            self.warp = self.warp.max(self.config.burst.explode_warp);
            for p in &mut self.particles {
                forces::explosion_impulse(p, self.burst.origin, &self.config.burst, &mut self.rng);
            }
        }

        self.track_project_element();
        self.integrate(now_ms, delta);
        self.halo.step(frame.seconds);
        frame
    }

    /// Follow the hovered card as it scrolls. If the outline could not be
    /// built when the card was set, try again now.
    fn track_project_element(&mut self) {
        let Some(bounds) = self.project_probe.as_ref().and_then(|p| p.bounds()) else {
            return;
        };
        self.project_anchor = Some(bounds.center());
        if self.hovered_skill.is_none() && !self.formation.is_active() {
            self.rebuild_formation();
        }
    }

    /// Anchor for the active formation, if it can be resolved.
    fn formation_anchor(&self) -> Option<Vec2> {
        if self.formation.is_skill() {
            Some(
                self.target_anchor
                    .unwrap_or_else(|| formation::reactor_anchor(&self.viewport, &self.config.formation)),
            )
        } else {
            self.project_anchor
        }
    }

    fn integrate(&mut self, now_ms: f64, delta: f32) {
        let ctx = ForceContext {
            now_ms,
            delta,
            center: self.viewport.center(),
            warp: self.frame_warp,
            burst_phase: self.burst.phase,
            burst_origin: self.burst.origin,
            explode_progress: self.burst.progress(&self.config.burst),
            pointer: self.pointer.position,
            pointer_intensity: self.pointer.intensity,
        };
        let anchor = self.formation_anchor();
        let jitter = self.config.formation.jitter;

        for (i, p) in self.particles.iter_mut().enumerate() {
            let offset = self.formation.claimed_target(i);
            let target = match (offset, anchor) {
                (Some(offset), Some(anchor)) => {
                    Some(anchor + offset + Vec2::new(self.rng.jitter(jitter), self.rng.jitter(jitter)))
                }
                _ => None,
            };
            forces::step_particle(p, target, offset.is_some(), &ctx, &self.config.forces, &self.config.burst);
        }
    }

    /// Fill `buffer` with this frame's draw data.
    pub fn render(&self, buffer: &mut RenderBuffer) {
        render::build_render_buffer(self, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Bounds, StaticBounds};
    use crate::systems::burst::BurstPhase;
    use std::cell::Cell;
    use std::rc::Rc;

    const FRAME_MS: f64 = 16.666;

    fn scene(seed: u64) -> SceneState {
        let mut scene = SceneState::new(SceneConfig::default(), seed);
        scene.resize(1280.0, 800.0, 1.0);
        scene
    }

    /// Probe whose rect the test can change (or remove) between frames.
    struct SharedProbe(Rc<Cell<Option<Bounds>>>);

    impl ElementProbe for SharedProbe {
        fn bounds(&self) -> Option<Bounds> {
            self.0.get()
        }
    }

    fn run(scene: &mut SceneState, from: usize, frames: usize) {
        for f in from..from + frames {
            scene.step(f as f64 * FRAME_MS);
        }
    }

    #[test]
    fn reference_viewport_spawns_165_stars() {
        let scene = scene(1);
        assert_eq!(scene.particles().len(), 165);
        assert_eq!(scene.viewport().dpr, 1.0);
    }

    #[test]
    fn dpr_is_capped() {
        let mut scene = SceneState::new(SceneConfig::default(), 1);
        scene.resize(1280.0, 800.0, 3.0);
        assert_eq!(scene.viewport().dpr, 1.5);
        scene.resize(1280.0, 800.0, 0.0);
        assert_eq!(scene.viewport().dpr, 1.0);
    }

    #[test]
    fn pointer_repels_nearby_stars() {
        let center = Vec2::new(640.0, 400.0);
        let mut baseline = scene(7);
        let mut pushed = scene(7);

        let band: Vec<usize> = pushed
            .particles()
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let d = p.position.distance(center);
                (160.0..280.0).contains(&d)
            })
            .map(|(i, _)| i)
            .collect();
        assert!(!band.is_empty());

        pushed.apply_input(InputEvent::PointerMove { x: 640.0, y: 400.0 });
        for f in 0..40 {
            let t = f as f64 * FRAME_MS;
            baseline.step(t);
            pushed.step(t);
        }
        assert!(pushed.pointer().intensity > 0.9);

        let mean = |s: &SceneState| {
            band.iter().map(|&i| s.particles()[i].position.distance(center)).sum::<f32>() / band.len() as f32
        };
        let (with_pointer, without) = (mean(&pushed), mean(&baseline));
        assert!(with_pointer > without + 5.0, "pointer {with_pointer} baseline {without}");
    }

    #[test]
    fn locale_burst_scenario() {
        let mut scene = scene(3);
        scene.step(0.0);
        assert!(scene.trigger_locale_burst(&LocaleBurst { id: 1, x: 100.0, y: 100.0 }));
        assert_eq!(scene.burst().phase, BurstPhase::Implode);
        assert_eq!(scene.pointer().position, Vec2::new(100.0, 100.0));
        assert_eq!(scene.pointer().intensity, 1.0);

        let mut t = 0.0;
        while t < 500.0 {
            t += FRAME_MS;
            scene.step(t);
        }
        assert_eq!(scene.burst().phase, BurstPhase::Explode);
        assert!(scene.warp_energy() > 0.0);

        while t < 1300.0 {
            t += FRAME_MS;
            scene.step(t);
        }
        assert_eq!(scene.burst().phase, BurstPhase::Idle);
        assert_eq!(scene.burst().elapsed, 0.0);
    }

    #[test]
    fn burst_rehomes_stars() {
        let mut scene = scene(3);
        let homes: Vec<Vec2> = scene.particles().iter().map(|p| p.home).collect();
        scene.trigger_locale_burst(&LocaleBurst { id: 9, x: 10.0, y: 10.0 });
        let moved = scene.particles().iter().zip(&homes).filter(|(p, h)| p.home != **h).count();
        assert_eq!(moved, homes.len());
        for p in scene.particles() {
            assert!(p.home.x >= 0.0 && p.home.x < 1280.0 && p.home.y >= 0.0 && p.home.y < 800.0);
        }
    }

    #[test]
    fn same_burst_token_is_ignored() {
        let mut scene = scene(3);
        let burst = LocaleBurst { id: 42, x: 300.0, y: 200.0 };
        assert!(scene.trigger_locale_burst(&burst));
        run(&mut scene, 0, 40);
        assert_eq!(scene.burst().phase, BurstPhase::Explode);
        assert!(!scene.trigger_locale_burst(&burst));
        assert_eq!(scene.burst().phase, BurstPhase::Explode);
    }

    #[test]
    fn new_burst_overwrites_one_in_flight() {
        let mut scene = scene(3);
        scene.trigger_locale_burst(&LocaleBurst { id: 1, x: 100.0, y: 100.0 });
        run(&mut scene, 0, 40);
        assert_eq!(scene.burst().phase, BurstPhase::Explode);
        scene.trigger_locale_burst(&LocaleBurst { id: 2, x: 900.0, y: 500.0 });
        assert_eq!(scene.burst().phase, BurstPhase::Implode);
        assert_eq!(scene.burst().origin, Vec2::new(900.0, 500.0));
        assert_eq!(scene.burst().elapsed, 0.0);
    }

    #[test]
    fn depth_is_stable_under_arbitrary_input() {
        let mut scene = scene(11);
        let depths: Vec<f32> = scene.particles().iter().map(Particle::depth).collect();
        scene.set_hovered_skill(Some("React 19"));
        scene.apply_input(InputEvent::TouchStart { x: 500.0, y: 300.0 });
        scene.trigger_locale_burst(&LocaleBurst { id: 5, x: 640.0, y: 400.0 });
        for f in 0..300 {
            if f % 13 == 0 {
                scene.apply_input(InputEvent::PointerMove { x: (f * 7 % 1280) as f32, y: (f * 3 % 800) as f32 });
            }
            if f == 150 {
                scene.apply_input(InputEvent::TouchEnd);
            }
            scene.step(f as f64 * FRAME_MS);
        }
        let after: Vec<f32> = scene.particles().iter().map(Particle::depth).collect();
        assert_eq!(depths, after);
    }

    #[test]
    fn slow_frames_ratchet_into_low_perf() {
        let mut scene = SceneState::new(SceneConfig::default(), 2);
        scene.resize(1280.0, 800.0, 2.0);
        assert_eq!(scene.particles().len(), 165);
        assert_eq!(scene.viewport().dpr, 1.5);

        for f in 0..60 {
            scene.step(f as f64 * 50.0);
        }
        assert!(scene.is_low_perf());
        assert_eq!(scene.viewport().dpr, 1.0);
        assert_eq!(scene.particles().len(), 131);

        let t0 = 60.0 * 50.0;
        for f in 0..600 {
            scene.step(t0 + f as f64 * 1.0);
        }
        assert!(scene.is_low_perf());

        scene.resize(1280.0, 800.0, 2.0);
        assert_eq!(scene.viewport().dpr, 1.0, "cap survives later resizes");
    }

    #[test]
    fn coarse_pointer_uses_sparser_field_and_idle_path() {
        let mut scene = SceneState::new(SceneConfig::default(), 4);
        scene.apply_input(InputEvent::PointerMode { coarse: true });
        scene.resize(1280.0, 800.0, 1.0);
        assert_eq!(scene.particles().len(), 131);

        run(&mut scene, 0, 400);
        let p = scene.pointer();
        assert!(!p.active);
        assert!((p.intensity - 0.42).abs() < 0.02);
        assert!((p.position.x - 640.0).abs() <= 256.0 + 0.01);
        assert!((p.position.y - 400.0).abs() <= 128.0 + 0.01);
    }

    #[test]
    fn touch_start_spikes_warp() {
        let mut scene = scene(5);
        scene.apply_input(InputEvent::TouchStart { x: 10.0, y: 10.0 });
        assert!(scene.warp_energy() >= 0.72);
        scene.step(0.0);
        scene.step(FRAME_MS);
        assert!(scene.warp_energy() < 0.72);
    }

    #[test]
    fn skill_formation_gathers_stars_at_target() {
        let mut scene = scene(8);
        let target = Bounds::new(200.0, 300.0, 100.0, 40.0);
        scene.set_target_element(Some(Box::new(StaticBounds(Some(target)))));
        assert_eq!(scene.target_anchor(), Some(Vec2::new(250.0, 320.0)));

        scene.set_hovered_skill(Some("Sharp"));
        assert!(scene.formation().is_skill());
        assert_eq!(scene.formation().claimed_count(), 24);

        run(&mut scene, 0, 400);
        let first_point = Vec2::new(250.0, 320.0) + Vec2::new(0.0, -140.0) * 1.1;
        for i in 0..6 {
            let d = scene.particles()[i].position.distance(first_point);
            assert!(d < 12.0, "star {i} is {d}px from its point");
        }

        scene.set_hovered_skill(None);
        assert!(!scene.formation().is_active());
    }

    #[test]
    fn unmapped_skill_falls_back_to_default_shape() {
        let mut scene = scene(8);
        scene.set_hovered_skill(Some("COBOL"));
        assert_eq!(scene.formation().points.len(), 6);
    }

    #[test]
    fn skill_without_target_uses_reactor_anchor() {
        let mut scene = scene(8);
        scene.set_hovered_skill(Some("Vercel"));
        let reactor = formation::reactor_anchor(&scene.viewport(), &scene.config().formation);
        assert_eq!(scene.formation_anchor(), Some(reactor));
    }

    #[test]
    fn missing_element_keeps_last_anchor() {
        let mut scene = scene(9);
        let rect = Rc::new(Cell::new(Some(Bounds::new(100.0, 100.0, 200.0, 100.0))));
        scene.set_project_element(Some(Box::new(SharedProbe(rect.clone()))));
        assert_eq!(scene.formation().points.len(), 24);
        scene.step(0.0);
        assert_eq!(scene.project_anchor(), Some(Vec2::new(200.0, 150.0)));

        rect.set(Some(Bounds::new(100.0, 40.0, 200.0, 100.0)));
        scene.step(FRAME_MS);
        assert_eq!(scene.project_anchor(), Some(Vec2::new(200.0, 90.0)));

        rect.set(None);
        scene.step(2.0 * FRAME_MS);
        assert_eq!(scene.project_anchor(), Some(Vec2::new(200.0, 90.0)));
    }

    #[test]
    fn collapsed_target_keeps_last_anchor() {
        let mut scene = scene(9);
        let rect = Rc::new(Cell::new(Some(Bounds::new(0.0, 0.0, 50.0, 50.0))));
        scene.set_target_element(Some(Box::new(SharedProbe(rect.clone()))));
        rect.set(Some(Bounds::new(500.0, 500.0, 0.0, 0.0)));
        scene.apply_input(InputEvent::Scroll);
        assert_eq!(scene.target_anchor(), Some(Vec2::new(25.0, 25.0)));
        rect.set(Some(Bounds::new(100.0, 0.0, 50.0, 50.0)));
        scene.apply_input(InputEvent::Scroll);
        assert_eq!(scene.target_anchor(), Some(Vec2::new(125.0, 25.0)));
    }

    #[test]
    fn unresolved_project_element_leaves_stars_home() {
        let mut scene = scene(9);
        scene.set_project_element(Some(Box::new(StaticBounds(None))));
        assert!(!scene.formation().is_active());
        assert_eq!(scene.project_anchor(), None);
        run(&mut scene, 0, 10);
        assert!(!scene.formation().is_active());
    }

    #[test]
    fn skill_hover_takes_priority_over_project() {
        let mut scene = scene(9);
        scene.set_project_element(Some(Box::new(StaticBounds(Some(Bounds::new(0.0, 0.0, 80.0, 80.0))))));
        scene.set_hovered_skill(Some("Vercel"));
        assert!(scene.formation().is_skill());
        scene.set_hovered_skill(None);
        assert_eq!(scene.formation().points.len(), 24);
    }

    #[test]
    fn resize_regenerates_field_but_keeps_burst() {
        let mut scene = scene(12);
        scene.trigger_locale_burst(&LocaleBurst { id: 1, x: 50.0, y: 50.0 });
        run(&mut scene, 0, 5);
        scene.set_hovered_skill(Some("Next.js"));
        scene.resize(600.0, 900.0, 1.0);
        assert_eq!(scene.particles().len(), 140);
        assert_eq!(scene.burst().phase, BurstPhase::Implode);
        assert_eq!(scene.pointer().position, Vec2::new(300.0, 450.0));
        // Narrow layout shrinks the shape.
        assert_eq!(scene.formation().points[0], Vec2::new(-90.0, 120.0) * 0.65);
    }

    #[test]
    fn empty_viewport_has_no_stars() {
        let mut scene = SceneState::new(SceneConfig::default(), 1);
        scene.resize(0.0, 0.0, 1.0);
        assert!(scene.particles().is_empty());
        scene.set_hovered_skill(Some("Sharp"));
        assert!(!scene.formation().is_active());
        run(&mut scene, 0, 3);
    }

    #[test]
    fn same_seed_replays_exactly() {
        let mut a = scene(77);
        let mut b = scene(77);
        for s in [&mut a, &mut b] {
            s.apply_input(InputEvent::PointerMove { x: 200.0, y: 200.0 });
            s.trigger_locale_burst(&LocaleBurst { id: 3, x: 640.0, y: 400.0 });
            s.set_hovered_skill(Some("UI/UX"));
            run(s, 0, 120);
        }
        let pa: Vec<Vec2> = a.particles().iter().map(|p| p.position).collect();
        let pb: Vec<Vec2> = b.particles().iter().map(|p| p.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn queue_is_drained_in_order() {
        let mut scene = scene(1);
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerMove { x: 1.0, y: 2.0 });
        queue.push(InputEvent::PointerLeave);
        queue.push(InputEvent::Resize { width: 800.0, height: 600.0, device_pixel_ratio: 1.0 });
        scene.handle_input(&mut queue);
        assert!(queue.is_empty());
        assert!(!scene.pointer().active);
        assert_eq!(scene.viewport().width, 800.0);
        assert_eq!(scene.pointer().position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn active_section_is_recorded() {
        let mut scene = scene(1);
        assert_eq!(scene.active_section(), None);
        scene.set_active_section(Some("projects"));
        assert_eq!(scene.active_section(), Some("projects"));
        scene.set_active_section(None);
        assert_eq!(scene.active_section(), None);
    }

    #[test]
    fn halo_starts_at_viewport_centre() {
        let mut scene = scene(1);
        let center = Vec2::new(640.0, 400.0);
        assert_eq!(scene.halo().primary().center, center);
        assert_eq!(scene.halo().trail().center, center);

        run(&mut scene, 0, 6);
        assert!(scene.halo().primary().center.distance(center) < 1e-3);
        assert!(scene.halo().trail().center.distance(center) < 1e-3);

        // Later layouts glide toward the new centre instead of jumping.
        scene.resize(1000.0, 600.0, 1.0);
        assert_eq!(scene.halo().primary().center, center);
        scene.step(6.0 * FRAME_MS);
        let moved = scene.halo().primary().center;
        assert!(moved.x < 640.0 && moved.x > 500.0, "{moved}");
    }

    #[test]
    fn custom_shape_table_drives_skill_formation() {
        let json = r#"{
            "fallback": "dot",
            "shapes": {
                "dot": [[0, 0], [10, 0]],
                "tri": [[0, -50], [50, 50], [-50, 50]]
            }
        }"#;
        let shapes = ShapeTable::from_json(json).unwrap();
        let mut scene = SceneState::new(SceneConfig::default(), 1).with_shapes(shapes);
        scene.resize(1280.0, 800.0, 1.0);

        scene.set_hovered_skill(Some("tri"));
        let scale = scene.config().formation.wide_shape_scale;
        let expected: Vec<Vec2> = [(0.0, -50.0), (50.0, 50.0), (-50.0, 50.0)]
            .iter()
            .map(|&(x, y)| Vec2::new(x, y) * scale)
            .collect();
        assert_eq!(scene.formation().points, expected);
        assert_eq!(scene.formation().claimed_count(), 18);

        // Built-in names are unknown to this table.
        scene.set_hovered_skill(Some("React 19"));
        assert_eq!(scene.formation().points, vec![Vec2::ZERO, Vec2::new(10.0, 0.0) * scale]);
    }

    #[test]
    fn every_star_gets_one_explosion_kick() {
        let mut config = SceneConfig::default();
        config.burst.impulse_speed_min = 1000.0;
        config.burst.impulse_speed_spread = 0.0;
        config.burst.impulse_jitter = 0.0;
        let mut scene = SceneState::new(config, 8);
        scene.resize(1280.0, 800.0, 1.0);
        scene.step(0.0);

        let origin = Vec2::new(640.0, 400.0);
        scene.trigger_locale_burst(&LocaleBurst { id: 1, x: origin.x, y: origin.y });

        let mut kicks = vec![0usize; scene.particles().len()];
        let mut explode_frame = None;
        for f in 1..=90 {
            let before: Vec<(Vec2, Vec2)> = scene.particles().iter().map(|p| (p.position, p.velocity)).collect();
            let was_imploding = scene.burst().phase == BurstPhase::Implode;
            scene.step(f as f64 * FRAME_MS);
            if was_imploding && scene.burst().phase == BurstPhase::Explode {
                explode_frame = Some(f);
            }
            for (i, p) in scene.particles().iter().enumerate() {
                let (pos, vel) = before[i];
                let dv = p.velocity - vel;
                if dv.length() > 500.0 {
                    kicks[i] += 1;
                    assert_eq!(explode_frame, Some(f), "star {i} kicked on frame {f}");
                    assert!(dv.dot(pos - origin) > 0.0, "star {i} kicked inward");
                }
            }
        }
        assert!(explode_frame.is_some());
        assert!(kicks.iter().all(|&k| k == 1), "{kicks:?}");
    }

    #[test]
    fn explosion_warp_shows_from_the_next_frame() {
        let mut scene = scene(3);
        scene.step(0.0);
        scene.trigger_locale_burst(&LocaleBurst { id: 1, x: 640.0, y: 400.0 });

        let mut t = 0.0;
        for _ in 0..60 {
            t += FRAME_MS;
            scene.step(t);
            if scene.burst().phase == BurstPhase::Explode {
                break;
            }
        }
        assert_eq!(scene.burst().phase, BurstPhase::Explode);
        assert!(scene.warp_energy() >= 1.08);
        assert!(scene.frame_warp() < 0.05);

        let mut buffer = RenderBuffer::new();
        scene.render(&mut buffer);
        assert!(buffer.stars.iter().all(|s| !s.has_streak()));

        t += FRAME_MS;
        scene.step(t);
        assert!(scene.frame_warp() > 0.9);
        scene.render(&mut buffer);
        assert!(buffer.stars.iter().any(|s| s.has_streak()));
    }
}
