//! Canvas 2D backend for the scene.

use std::f64::consts::TAU;

use starfield::{DrawCommand, RenderBuffer, SceneError, StarInstance, Surface, Viewport};
use starfield::renderer::commands::{GLOW, STAR, STAR_CLAIMED, STREAK};
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Canvas2dSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// Acquire a transparent 2D context on `canvas`.
    pub fn new(canvas: web::HtmlCanvasElement) -> Result<Self, SceneError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SceneError::SurfaceUnavailable(format!("getContext threw: {:?}", e)))?
            .ok_or_else(|| SceneError::SurfaceUnavailable("2d context not supported".into()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| SceneError::SurfaceUnavailable("context is not a CanvasRenderingContext2d".into()))?;
        Ok(Self { canvas, ctx })
    }

    fn disc(&self, x: f32, y: f32, radius: f32, style: &str) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(style);
        if self.ctx.arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn line(&self, from: (f32, f32), to: (f32, f32), width: f32, style: &str) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(style);
        self.ctx.set_line_width(width as f64);
        self.ctx.move_to(from.0 as f64, from.1 as f64);
        self.ctx.line_to(to.0 as f64, to.1 as f64);
        self.ctx.stroke();
    }

    fn star(&self, s: &StarInstance) {
        if s.has_streak() {
            self.line(
                (s.streak_from_x, s.streak_from_y),
                (s.streak_to_x, s.streak_to_y),
                s.streak_width,
                &STREAK.with_alpha(s.streak_alpha).css(),
            );
        }
        let body = if s.is_claimed() { STAR_CLAIMED } else { STAR };
        self.disc(s.x, s.y, s.radius, &body.with_alpha(s.alpha).css());
        if s.has_glow() {
            self.disc(s.x, s.y, s.glow_radius, &GLOW.with_alpha(s.glow_alpha).css());
        }
    }

    fn command(&self, cmd: &DrawCommand, viewport: &Viewport) {
        match cmd {
            DrawCommand::Wash { color } => {
                self.ctx.set_fill_style_str(&color.css());
                self.ctx.fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
            }
            DrawCommand::Line { from, to, width, color } => {
                self.line((from.x, from.y), (to.x, to.y), *width, &color.css());
            }
            DrawCommand::RadialGlow { center, radius, stops } => {
                let (x, y, r) = (center.x as f64, center.y as f64, radius.max(0.0) as f64);
                let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
                    return;
                };
                for stop in stops {
                    let _ = gradient.add_color_stop(stop.offset, &stop.color.css());
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
                self.ctx.begin_path();
                if self.ctx.arc(x, y, r, 0.0, TAU).is_ok() {
                    self.ctx.fill();
                }
            }
        }
    }
}

impl Surface for Canvas2dSurface {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn resize(&mut self, viewport: &Viewport) {
        let (w, h) = viewport.backing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));
        let dpr = viewport.dpr as f64;
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn draw(&mut self, frame: &RenderBuffer, viewport: &Viewport) {
        self.ctx.clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
        for cmd in &frame.background {
            self.command(cmd, viewport);
        }
        for star in &frame.stars {
            self.star(star);
        }
        for cmd in &frame.overlay {
            self.command(cmd, viewport);
        }
    }
}
