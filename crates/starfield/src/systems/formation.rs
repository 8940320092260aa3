//! Constellation formations: a subset of stars is pulled onto the points
//! of a shape anchored next to a hovered skill tag or project card.
//!
//! Claiming is purely positional. With `P` shape points and fan-out `F`,
//! star `i` is claimed iff `i < P * F`, and it targets point `i / F`.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::config::FormationConfig;
use crate::api::error::SceneError;
use crate::api::types::{Bounds, Viewport};

/// What the formation is tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationSource {
    /// Named shape from the shape table, drawn with connecting lines.
    Skill,
    /// Outline of a hovered project card.
    Project,
}

/// Active shape and the stars it claims.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Formation {
    pub source: Option<FormationSource>,
    /// Offsets relative to the anchor, in ring order.
    pub points: Vec<Vec2>,
    fan_out: usize,
}

impl Formation {
    pub fn new(source: FormationSource, points: Vec<Vec2>, fan_out: usize) -> Self {
        Self {
            source: Some(source),
            points,
            fan_out: fan_out.max(1),
        }
    }

    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some() && !self.points.is_empty()
    }

    pub fn is_skill(&self) -> bool {
        self.is_active() && self.source == Some(FormationSource::Skill)
    }

    /// Number of stars held by this formation.
    pub fn claimed_count(&self) -> usize {
        if self.is_active() {
            self.points.len() * self.fan_out
        } else {
            0
        }
    }

    pub fn claims(&self, index: usize) -> bool {
        index < self.claimed_count()
    }

    /// Shape point index targeted by star `index`, if claimed.
    pub fn point_index(&self, index: usize) -> Option<usize> {
        self.claims(index).then(|| index / self.fan_out)
    }

    /// Offset (relative to the anchor) targeted by star `index`, if claimed.
    pub fn claimed_target(&self, index: usize) -> Option<Vec2> {
        self.point_index(index).map(|pt| self.points[pt])
    }

    /// Ring links for skill constellations: the first star of each point
    /// paired with the first star of the next point.
    pub fn ring_links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let count = if self.is_skill() { self.points.len() } else { 0 };
        let fan_out = self.fan_out;
        (0..count).map(move |pt| (pt * fan_out, ((pt + 1) % count) * fan_out))
    }
}

/// Named offset-point shapes for skill formations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTable {
    /// Shape used when a key has no entry.
    pub fallback: String,
    pub shapes: HashMap<String, Vec<[f32; 2]>>,
}

impl ShapeTable {
    /// Parse a table from JSON. The fallback key must exist.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let table: ShapeTable = serde_json::from_str(json)?;
        match table.shapes.get(&table.fallback) {
            Some(points) if !points.is_empty() => Ok(table),
            _ => Err(SceneError::InvalidConfig(format!(
                "shape table fallback '{}' has no points",
                table.fallback
            ))),
        }
    }

    /// Raw points for `name`, or the fallback shape.
    pub fn lookup(&self, name: &str) -> &[[f32; 2]] {
        self.shapes
            .get(name)
            .or_else(|| self.shapes.get(&self.fallback))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        let entries: [(&str, &[[f32; 2]]); 10] = [
            ("Next.js", &[[-90.0, 120.0], [-90.0, -120.0], [90.0, 120.0], [90.0, -120.0]]),
            (
                "React 19",
                &[[0.0, -130.0], [120.0, -45.0], [120.0, 45.0], [0.0, 130.0], [-120.0, 45.0], [-120.0, -45.0], [0.0, 0.0]],
            ),
            (
                "Tailwind v4",
                &[[-140.0, 30.0], [-90.0, -50.0], [-30.0, 50.0], [30.0, -50.0], [90.0, 50.0], [140.0, -30.0]],
            ),
            (
                "Framer Motion",
                &[[-130.0, 80.0], [-70.0, -20.0], [-10.0, -90.0], [60.0, -110.0], [120.0, -70.0], [130.0, 10.0]],
            ),
            (
                "TypeScript",
                &[[-50.0, -120.0], [-130.0, 0.0], [-50.0, 120.0], [50.0, -120.0], [130.0, 0.0], [50.0, 120.0]],
            ),
            (
                "Node.js",
                &[[0.0, -140.0], [100.0, -80.0], [100.0, 60.0], [0.0, 130.0], [-100.0, 60.0], [-100.0, -80.0]],
            ),
            ("Sharp", &[[0.0, -140.0], [60.0, -20.0], [0.0, 140.0], [-60.0, -20.0]]),
            (
                "UI/UX",
                &[
                    [0.0, -10.0], [50.0, -60.0], [120.0, -30.0], [130.0, 60.0],
                    [60.0, 110.0], [-40.0, 90.0], [-110.0, 20.0], [-100.0, -70.0],
                ],
            ),
            ("Vercel", &[[0.0, -130.0], [120.0, 100.0], [-120.0, 100.0]]),
            ("SVGO", &[[-130.0, 80.0], [-80.0, -100.0], [0.0, 40.0], [80.0, -100.0], [130.0, 80.0]]),
        ];
        Self {
            fallback: "Node.js".to_string(),
            shapes: entries
                .iter()
                .map(|(name, pts)| (name.to_string(), pts.to_vec()))
                .collect(),
        }
    }
}

fn is_narrow(viewport: &Viewport, config: &FormationConfig) -> bool {
    viewport.width < config.narrow_breakpoint
}

/// Skill formation for `name`, scaled for the viewport width.
pub fn skill_formation(name: &str, table: &ShapeTable, viewport: &Viewport, config: &FormationConfig) -> Formation {
    let scale = if is_narrow(viewport, config) {
        config.narrow_shape_scale
    } else {
        config.wide_shape_scale
    };
    let points = table
        .lookup(name)
        .iter()
        .map(|&[x, y]| Vec2::new(x, y) * scale)
        .collect();
    Formation::new(FormationSource::Skill, points, config.fan_out)
}

/// Outline around a card: the rect plus a margin, each edge split into
/// `project_steps` segments, clockwise from the top-left corner.
/// Points are relative to the rect centre.
pub fn project_outline(rect: &Bounds, config: &FormationConfig) -> Vec<Vec2> {
    let w = rect.width + config.project_margin * 2.0;
    let h = rect.height + config.project_margin * 2.0;
    let ox = -w / 2.0;
    let oy = -h / 2.0;
    let steps = config.project_steps;
    let s = steps as f32;

    let mut points = Vec::with_capacity(steps * 4);
    for i in 0..=steps {
        points.push(Vec2::new(ox + w * i as f32 / s, oy));
    }
    for i in 1..=steps {
        points.push(Vec2::new(ox + w, oy + h * i as f32 / s));
    }
    for i in 1..=steps {
        points.push(Vec2::new(ox + w - w * i as f32 / s, oy + h));
    }
    for i in 1..steps {
        points.push(Vec2::new(ox, oy + h - h * i as f32 / s));
    }
    points
}

pub fn project_formation(rect: &Bounds, config: &FormationConfig) -> Formation {
    Formation::new(FormationSource::Project, project_outline(rect, config), config.fan_out)
}

/// Fixed on-screen anchor for skill shapes when no target element is known.
pub fn reactor_anchor(viewport: &Viewport, config: &FormationConfig) -> Vec2 {
    let fx = if is_narrow(viewport, config) {
        config.reactor_x_narrow
    } else {
        config.reactor_x_wide
    };
    Vec2::new(viewport.width * fx, viewport.height * config.reactor_y)
}
