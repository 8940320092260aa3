use glam::Vec2;

use crate::core::scene::SceneState;
use crate::renderer::commands::{self, DrawCommand};
use crate::renderer::instance::{RenderBuffer, StarInstance};
use crate::systems::particle::Particle;

/// Warp energy above which the blue tint wash is drawn.
const WARP_TINT_THRESHOLD: f32 = 0.02;
/// Warp energy above which stars leave motion streaks.
const STREAK_THRESHOLD: f32 = 0.05;
/// Pointer intensity above which stars near it glow.
const GLOW_THRESHOLD: f32 = 0.01;

/// Frame-wide values that shape each star's appearance.
#[derive(Debug, Clone, Copy)]
pub struct StarStyle {
    pub now_ms: f64,
    pub warp: f32,
    pub low_perf: bool,
    pub center: Vec2,
    pub pointer: Vec2,
    pub pointer_intensity: f32,
    pub repulse_radius: f32,
    pub pointer_scale: f32,
}

/// Resolve one particle into its render instance.
pub fn star_instance(p: &Particle, claimed: bool, style: &StarStyle) -> StarInstance {
    let alpha = p.opacity * p.twinkle_factor(style.now_ms) * if claimed { 1.5 } else { 1.0 };
    let size = p.radius * if claimed { 2.2 } else { 1.0 };

    let mut inst = StarInstance {
        x: p.position.x,
        y: p.position.y,
        radius: size,
        alpha: if claimed { alpha * 1.2 } else { alpha },
        claimed: if claimed { 1.0 } else { 0.0 },
        depth: p.depth(),
        ..Default::default()
    };

    if !style.low_perf && style.warp > STREAK_THRESHOLD {
        let dir = (p.position - style.center).normalize_or_zero();
        let len = (6.0 + style.warp * 28.0) * (0.55 + p.depth() * 0.5);
        let from = p.position - dir * len;
        let to = p.position + dir * len * 0.24;
        inst.streak_from_x = from.x;
        inst.streak_from_y = from.y;
        inst.streak_to_x = to.x;
        inst.streak_to_y = to.y;
        inst.streak_alpha = alpha * 0.42 * style.warp;
        inst.streak_width = if claimed { size * 0.4 } else { p.radius * 0.72 };
    }

    if !style.low_perf && (style.pointer_intensity > GLOW_THRESHOLD || claimed) {
        let distance = p.position.distance(style.pointer);
        let glow_radius = if claimed { size * 5.2 } else { style.repulse_radius * 0.7 };
        if claimed || distance < glow_radius {
            let glow = if claimed {
                0.6
            } else {
                (1.0 - distance / glow_radius) * 0.7 * style.pointer_intensity * style.pointer_scale
            };
            inst.glow_alpha = glow * if claimed { 0.15 } else { 0.35 };
            inst.glow_radius = size * if claimed { 4.0 } else { 4.8 };
        }
    }

    inst
}

/// Lines between the first stars of consecutive skill-shape points.
fn constellation_links(scene: &SceneState, max_distance: f32, out: &mut Vec<DrawCommand>) {
    let particles = scene.particles();
    for (a, b) in scene.formation().ring_links() {
        let (Some(from), Some(to)) = (particles.get(a), particles.get(b)) else {
            continue;
        };
        let d = from.position.distance(to.position);
        if d < max_distance {
            out.push(DrawCommand::Line {
                from: from.position,
                to: to.position,
                width: commands::LINK_WIDTH,
                color: commands::LINK.with_alpha(0.72 * (1.0 - d / max_distance)),
            });
        }
    }
}

/// Build the full frame: washes, stars, then lines and glows on top.
pub fn build_render_buffer(scene: &SceneState, buffer: &mut RenderBuffer) {
    buffer.clear();

    let config = scene.config();
    let viewport = scene.viewport();
    let formation = scene.formation();
    let warp = scene.frame_warp();

    if formation.is_skill() {
        buffer.background.push(DrawCommand::Wash { color: commands::DIM });
    }
    if warp > WARP_TINT_THRESHOLD {
        buffer.background.push(DrawCommand::Wash { color: commands::WARP_TINT.with_alpha(warp * 0.08) });
    }

    let pointer = scene.pointer();
    let burst_active = scene.burst().is_active();
    let style = StarStyle {
        now_ms: scene.last_frame().now_ms,
        warp,
        low_perf: scene.is_low_perf(),
        center: viewport.center(),
        pointer: pointer.position,
        pointer_intensity: pointer.intensity,
        repulse_radius: config.forces.repulse_radius + pointer.intensity * config.forces.repulse_radius_bonus,
        pointer_scale: if burst_active { config.forces.repulse_burst_scale } else { 1.0 },
    };
    for (i, p) in scene.particles().iter().enumerate() {
        buffer.push_star(star_instance(p, formation.claims(i), &style));
    }

    constellation_links(scene, config.formation.max_link_distance, &mut buffer.overlay);

    let extent = viewport.width.max(viewport.height);
    if let Some((radius, opacity)) = scene.burst().halo(&config.burst, extent) {
        buffer.overlay.push(DrawCommand::burst_glow(scene.burst().origin, radius, opacity));
    }

    let halo = scene.halo();
    for (sprite, color) in [(halo.trail(), commands::HALO_TRAIL), (halo.primary(), commands::HALO_PRIMARY)] {
        buffer.overlay.push(DrawCommand::halo(sprite.center, sprite.radius, sprite.opacity, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SceneConfig;
    use crate::api::types::LocaleBurst;
    use crate::input::queue::InputEvent;

    fn style() -> StarStyle {
        StarStyle {
            now_ms: 0.0,
            warp: 0.0,
            low_perf: false,
            center: Vec2::new(640.0, 400.0),
            pointer: Vec2::new(-5000.0, -5000.0),
            pointer_intensity: 0.0,
            repulse_radius: 160.0,
            pointer_scale: 1.0,
        }
    }

    fn star(x: f32, y: f32) -> Particle {
        // phase pi/2 at t=0 puts the twinkle at its peak (factor 1.0).
        Particle::new(Vec2::new(x, y), 1.0, 0.5, 1.0, std::f32::consts::FRAC_PI_2, 1.0)
    }

    #[test]
    fn plain_star_has_no_extras() {
        let inst = star_instance(&star(100.0, 100.0), false, &style());
        assert!((inst.alpha - 0.5).abs() < 1e-5);
        assert_eq!(inst.radius, 1.0);
        assert!(!inst.has_streak());
        assert!(!inst.has_glow());
        assert!(!inst.is_claimed());
    }

    #[test]
    fn claimed_star_is_bigger_brighter_and_glows() {
        let inst = star_instance(&star(100.0, 100.0), true, &style());
        assert!((inst.radius - 2.2).abs() < 1e-5);
        assert!((inst.alpha - 0.5 * 1.5 * 1.2).abs() < 1e-5);
        assert!((inst.glow_alpha - 0.09).abs() < 1e-5);
        assert!((inst.glow_radius - 8.8).abs() < 1e-5);
    }

    #[test]
    fn streak_points_away_from_centre() {
        let s = StarStyle { warp: 1.0, ..style() };
        let inst = star_instance(&star(740.0, 400.0), false, &s);
        assert!(inst.has_streak());
        assert!(inst.streak_from_x < 740.0 && inst.streak_to_x > 740.0);
        let len = (6.0 + 28.0) * (0.55 + 0.5);
        assert!((740.0 - inst.streak_from_x - len).abs() < 1e-3);
    }

    #[test]
    fn low_perf_drops_streaks_and_glows() {
        let s = StarStyle { warp: 1.0, low_perf: true, pointer: Vec2::new(100.0, 100.0), pointer_intensity: 1.0, ..style() };
        let inst = star_instance(&star(110.0, 100.0), true, &s);
        assert!(!inst.has_streak());
        assert!(!inst.has_glow());
        assert!(inst.alpha > 0.0);
    }

    #[test]
    fn pointer_glow_fades_with_distance() {
        let s = StarStyle { pointer: Vec2::new(0.0, 0.0), pointer_intensity: 1.0, repulse_radius: 280.0, ..style() };
        let near = star_instance(&star(20.0, 0.0), false, &s);
        let far = star_instance(&star(150.0, 0.0), false, &s);
        let outside = star_instance(&star(250.0, 0.0), false, &s);
        assert!(near.glow_alpha > far.glow_alpha);
        assert!(far.has_glow());
        assert!(!outside.has_glow());
    }

    #[test]
    fn frame_layers() {
        let mut scene = SceneState::new(SceneConfig::default(), 21);
        scene.resize(1280.0, 800.0, 1.0);
        scene.step(0.0);
        let mut buffer = RenderBuffer::new();
        scene.render(&mut buffer);
        assert_eq!(buffer.stars.len(), 165);
        assert!(buffer.background.is_empty());
        // Two pointer halos, nothing else.
        assert_eq!(buffer.overlay.len(), 2);

        scene.set_hovered_skill(Some("Sharp"));
        scene.apply_input(InputEvent::TouchStart { x: 640.0, y: 400.0 });
        scene.trigger_locale_burst(&LocaleBurst { id: 1, x: 640.0, y: 400.0 });
        scene.step(16.666);
        scene.render(&mut buffer);
        assert_eq!(buffer.background.len(), 2);
        assert_eq!(buffer.background[0], DrawCommand::Wash { color: commands::DIM });
        assert_eq!(buffer.stars.iter().filter(|s| s.is_claimed()).count(), 24);
        assert!(buffer
            .overlay
            .iter()
            .any(|c| matches!(c, DrawCommand::RadialGlow { center, .. } if *center == Vec2::new(640.0, 400.0))));
    }

    #[test]
    fn far_apart_ring_points_are_not_linked() {
        let mut scene = SceneState::new(SceneConfig::default(), 21);
        scene.resize(1280.0, 800.0, 1.0);
        scene.set_hovered_skill(Some("Vercel"));
        scene.step(0.0);
        let mut buffer = RenderBuffer::new();
        scene.render(&mut buffer);
        let lines = buffer.overlay.iter().filter(|c| matches!(c, DrawCommand::Line { .. })).count();
        let expected = scene
            .formation()
            .ring_links()
            .filter(|&(a, b)| scene.particles()[a].position.distance(scene.particles()[b].position) < 320.0)
            .count();
        assert_eq!(lines, expected);
    }
}
