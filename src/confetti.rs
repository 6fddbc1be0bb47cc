use crate::constants::CONFETTI_CANVAS_ID;
use crate::dom;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rose_core::color::hex_to_css;
use rose_core::confetti::{ConfettiField, ConfettiOptions, Glyph, PetalRain};
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys as web;

const STAR_SPIKES: usize = 5;

/// Full-window 2D canvas that hosts click bursts and the petal rain.
pub struct ConfettiLayer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: ConfettiField,
    rain: PetalRain,
    rng: StdRng,
}

impl ConfettiLayer {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = dom::by_id(document, CONFETTI_CANVAS_ID)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let layer = Self {
            canvas,
            ctx,
            field: ConfettiField::new(),
            rain: PetalRain::new(),
            rng: StdRng::from_entropy(),
        };
        layer.fit_viewport();
        Ok(layer)
    }

    fn fit_viewport(&self) -> Vec2 {
        let (w, h) = dom::viewport_css();
        let (w, h) = (w.max(1.0) as u32, h.max(1.0) as u32);
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
        Vec2::new(w as f32, h as f32)
    }

    pub fn burst(&mut self, opts: &ConfettiOptions) {
        let viewport = self.fit_viewport();
        self.field.fire(opts, viewport, &mut self.rng);
    }

    /// Begin the petal rain at `now`; later calls are ignored.
    pub fn start_rain(&mut self, now: f32) {
        self.rain.start(now);
    }

    pub fn rain_started(&self) -> bool {
        self.rain.is_started()
    }

    /// Schedule rain bursts, step particles and redraw.
    pub fn frame(&mut self, now: f32, dt: f32) {
        for opts in self.rain.tick(now, &mut self.rng) {
            self.burst(&opts);
        }
        let steps = self.field.advance(dt, &mut self.rng);
        if steps > 0 || !self.field.is_empty() {
            self.draw();
        }
    }

    fn draw(&self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
        for p in self.field.particles() {
            self.ctx.set_global_alpha(p.alpha() as f64);
            self.ctx.set_fill_style_str(&hex_to_css(p.color));
            self.ctx.begin_path();
            trace(&self.ctx, p.glyph());
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
    }
}

fn trace(ctx: &web::CanvasRenderingContext2d, glyph: Glyph) {
    match glyph {
        Glyph::Quad(corners) => {
            let [first, rest @ ..] = corners;
            ctx.move_to(first.x.floor() as f64, first.y.floor() as f64);
            for c in rest {
                ctx.line_to(c.x.floor() as f64, c.y.floor() as f64);
            }
            ctx.close_path();
        }
        Glyph::Ellipse {
            center,
            radii,
            rotation,
        } => {
            _ = ctx.ellipse(
                center.x as f64,
                center.y as f64,
                radii.x as f64,
                radii.y as f64,
                rotation as f64,
                0.0,
                2.0 * PI,
            );
        }
        Glyph::Star {
            center,
            inner,
            outer,
        } => {
            let (cx, cy) = (center.x as f64, center.y as f64);
            let step = PI / STAR_SPIKES as f64;
            let mut rot = PI / 2.0 * 3.0;
            ctx.move_to(cx, cy - outer as f64);
            for _ in 0..STAR_SPIKES {
                ctx.line_to(cx + rot.cos() * outer as f64, cy + rot.sin() * outer as f64);
                rot += step;
                ctx.line_to(cx + rot.cos() * inner as f64, cy + rot.sin() * inner as f64);
                rot += step;
            }
            ctx.close_path();
        }
    }
}
