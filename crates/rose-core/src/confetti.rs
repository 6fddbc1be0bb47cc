//! Confetti bursts: launch parameters, particle physics and the timed petal
//! rain that closes the greeting.
//!
//! Positions are in canvas pixels with y pointing down. The simulation steps
//! at a fixed 60 Hz regardless of display refresh rate; the web side draws
//! whatever [`Particle::glyph`] reports after each step.

use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::PI;

/// Seconds per simulation tick.
pub const TICK: f32 = 1.0 / 60.0;

// Multiplier applied to the user-facing gravity option
const GRAVITY_SCALE: f32 = 3.0;
const OVAL_SCALAR: f32 = 0.6;
const TILT_STEP: f32 = 0.1;
const WOBBLE_RADIUS: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Square,
    Circle,
    Star,
}

/// Everything needed to launch one burst.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiOptions {
    pub particle_count: f32,
    /// Launch direction in degrees, 90 is straight up.
    pub angle: f32,
    /// Cone width in degrees.
    pub spread: f32,
    pub start_velocity: f32,
    pub decay: f32,
    pub gravity: f32,
    pub drift: f32,
    pub ticks: u32,
    /// Launch point as a fraction of the viewport.
    pub origin: Vec2,
    pub colors: Vec<u32>,
    pub shapes: Vec<Shape>,
    pub scalar: f32,
    pub flat: bool,
}

impl Default for ConfettiOptions {
    fn default() -> Self {
        Self {
            particle_count: 50.0,
            angle: 90.0,
            spread: 45.0,
            start_velocity: 45.0,
            decay: 0.9,
            gravity: 1.0,
            drift: 0.0,
            ticks: 200,
            origin: Vec2::new(0.5, 0.5),
            colors: vec![
                0x26ccff, 0xa25afd, 0xff5e7e, 0x88ff5a, 0xfcff42, 0xffa62d, 0xff36ff,
            ],
            shapes: vec![Shape::Square, Shape::Circle],
            scalar: 1.0,
            flat: false,
        }
    }
}

impl ConfettiOptions {
    /// Small golden star burst at a click, `origin` already normalised.
    pub fn click_burst(origin: Vec2) -> Self {
        Self {
            particle_count: 15.0,
            spread: 60.0,
            origin,
            colors: vec![0xFFD700, 0xFFA500, 0xFDFBF7],
            shapes: vec![Shape::Star],
            gravity: 1.2,
            scalar: 0.7,
            drift: 0.0,
            ticks: 40,
            ..Self::default()
        }
    }

    /// One side of the petal rain.
    pub fn rain_burst(particle_count: f32, origin: Vec2, drift: f32) -> Self {
        Self {
            particle_count,
            start_velocity: 30.0,
            spread: 360.0,
            ticks: 60,
            origin,
            colors: vec![0xff0000, 0xffccd5, 0xff99ac],
            shapes: vec![Shape::Circle],
            gravity: 0.6,
            scalar: 0.8,
            drift,
            ..Self::default()
        }
    }

    /// Whole particles this burst will spawn.
    pub fn count(&self) -> usize {
        if self.particle_count.is_finite() && self.particle_count > 0.0 {
            self.particle_count.floor() as usize
        } else {
            0
        }
    }
}

/// What to draw for a particle, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Glyph {
    Quad([Vec2; 4]),
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
    },
    Star {
        center: Vec2,
        inner: f32,
        outer: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: f32,
    /// Heading in radians, canvas orientation.
    pub heading: f32,
    pub wobble: f32,
    pub wobble_speed: f32,
    pub tilt: f32,
    pub color: u32,
    pub shape: Shape,
    pub tick: u32,
    pub total_ticks: u32,
    pub decay: f32,
    pub drift: f32,
    pub gravity: f32,
    pub scalar: f32,
    pub flat: bool,
    jitter: f32,
}

impl Particle {
    fn spawn<R: Rng + ?Sized>(opts: &ConfettiOptions, at: Vec2, rng: &mut R) -> Self {
        let angle = opts.angle.to_radians();
        let spread = opts.spread.to_radians();
        let color = if opts.colors.is_empty() {
            0xffffff
        } else {
            opts.colors[rng.gen_range(0..opts.colors.len())]
        };
        let shape = if opts.shapes.is_empty() {
            Shape::Square
        } else {
            opts.shapes[rng.gen_range(0..opts.shapes.len())]
        };
        Self {
            position: at,
            velocity: opts.start_velocity * 0.5 + rng.gen::<f32>() * opts.start_velocity,
            heading: -angle + (0.5 * spread - rng.gen::<f32>() * spread),
            wobble: rng.gen::<f32>() * 10.0,
            wobble_speed: (rng.gen::<f32>() * 0.1 + 0.05).min(0.11),
            tilt: (rng.gen::<f32>() * 0.5 + 0.25) * PI,
            color,
            shape,
            tick: 0,
            total_ticks: opts.ticks.max(1),
            decay: opts.decay,
            drift: opts.drift,
            gravity: opts.gravity * GRAVITY_SCALE,
            scalar: opts.scalar,
            flat: opts.flat,
            jitter: rng.gen::<f32>() + 2.0,
        }
    }

    /// One physics step. Returns `false` once the particle has used its ticks.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let (sin_h, cos_h) = self.heading.sin_cos();
        self.position.x += cos_h * self.velocity + self.drift;
        self.position.y += sin_h * self.velocity + self.gravity;
        self.velocity *= self.decay;
        if self.flat {
            self.wobble = 0.0;
            self.jitter = 1.0;
        } else {
            self.wobble += self.wobble_speed;
            self.tilt += TILT_STEP;
            self.jitter = rng.gen::<f32>() + 2.0;
        }
        self.tick += 1;
        self.tick < self.total_ticks
    }

    pub fn alpha(&self) -> f32 {
        (1.0 - self.tick as f32 / self.total_ticks as f32).max(0.0)
    }

    pub fn is_alive(&self) -> bool {
        self.tick < self.total_ticks
    }

    pub fn glyph(&self) -> Glyph {
        let p = self.position;
        let (wobble_pt, tilt) = if self.flat {
            (p + Vec2::splat(WOBBLE_RADIUS * self.scalar), Vec2::ZERO)
        } else {
            let (ws, wc) = self.wobble.sin_cos();
            let (ts, tc) = self.tilt.sin_cos();
            (
                p + Vec2::new(wc, ws) * WOBBLE_RADIUS * self.scalar,
                Vec2::new(tc, ts),
            )
        };
        let a = p + tilt * self.jitter;
        let b = wobble_pt + tilt * self.jitter;
        match self.shape {
            Shape::Square => Glyph::Quad([
                p,
                Vec2::new(wobble_pt.x, a.y),
                b,
                Vec2::new(a.x, wobble_pt.y),
            ]),
            Shape::Circle => Glyph::Ellipse {
                center: p,
                radii: (b - a).abs() * OVAL_SCALAR,
                rotation: PI / 10.0 * self.wobble,
            },
            Shape::Star => Glyph::Star {
                center: p,
                inner: 4.0 * self.scalar,
                outer: 8.0 * self.scalar,
            },
        }
    }
}

/// All live particles on the confetti canvas.
#[derive(Debug, Default)]
pub struct ConfettiField {
    particles: Vec<Particle>,
    carry: f32,
}

impl ConfettiField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one burst into a `viewport`-sized canvas.
    pub fn fire<R: Rng + ?Sized>(&mut self, opts: &ConfettiOptions, viewport: Vec2, rng: &mut R) {
        let at = opts.origin * viewport;
        let n = opts.count();
        self.particles.reserve(n);
        for _ in 0..n {
            self.particles.push(Particle::spawn(opts, at, rng));
        }
    }

    /// Run exactly one simulation step and drop spent particles.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.particles.retain_mut(|p| p.step(rng));
    }

    /// Advance by wall-clock `dt` seconds in whole ticks; returns how many ran.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        // Cap catch-up after a stalled tab
        self.carry = (self.carry + dt).min(TICK * 4.0);
        let mut steps = 0;
        while self.carry >= TICK {
            self.carry -= TICK;
            self.tick(rng);
            steps += 1;
        }
        steps
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

pub const RAIN_DURATION: f32 = 5.0;
pub const RAIN_INTERVAL: f32 = 0.25;
const RAIN_PEAK_COUNT: f32 = 50.0;
// Both sides drift toward the centre
const RAIN_DRIFT: f32 = 0.5;

/// Two-sided shower of petals that tapers off over [`RAIN_DURATION`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PetalRain {
    started_at: Option<f32>,
    next_emit: f32,
    finished: bool,
}

impl PetalRain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the shower at `now`. Only the first call has any effect.
    pub fn start(&mut self, now: f32) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        log::info!("[confetti] petal rain started");
        self.started_at = Some(now);
        self.next_emit = now + RAIN_INTERVAL;
        true
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some() && !self.finished
    }

    /// Bursts due at `now`. At most one interval's pair is emitted per call;
    /// missed intervals are skipped rather than replayed.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) -> SmallVec<[ConfettiOptions; 2]> {
        let mut out = SmallVec::new();
        let Some(start) = self.started_at else {
            return out;
        };
        if self.finished || !now.is_finite() || now < self.next_emit {
            return out;
        }
        let time_left = start + RAIN_DURATION - now;
        if time_left <= 0.0 {
            self.finished = true;
            return out;
        }
        let missed = ((now - self.next_emit) / RAIN_INTERVAL).floor() + 1.0;
        self.next_emit += missed * RAIN_INTERVAL;
        let count = RAIN_PEAK_COUNT * (time_left / RAIN_DURATION);
        out.push(ConfettiOptions::rain_burst(
            count,
            Vec2::new(rng.gen_range(0.1..0.3), rng.gen::<f32>() - 0.2),
            RAIN_DRIFT,
        ));
        out.push(ConfettiOptions::rain_burst(
            count,
            Vec2::new(rng.gen_range(0.7..0.9), rng.gen::<f32>() - 0.2),
            -RAIN_DRIFT,
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn click_burst_overrides_defaults() {
        let o = ConfettiOptions::click_burst(Vec2::new(0.2, 0.4));
        assert_eq!(o.count(), 15);
        assert_eq!(o.ticks, 40);
        assert_eq!(o.angle, 90.0);
        assert_eq!(o.decay, 0.9);
        assert_eq!(o.shapes, vec![Shape::Star]);
    }

    #[test]
    fn fractional_counts_floor() {
        let o = ConfettiOptions {
            particle_count: 2.9,
            ..ConfettiOptions::default()
        };
        assert_eq!(o.count(), 2);
        let o = ConfettiOptions {
            particle_count: f32::NAN,
            ..ConfettiOptions::default()
        };
        assert_eq!(o.count(), 0);
    }

    #[test]
    fn flat_particles_do_not_wobble() {
        let mut rng = StdRng::seed_from_u64(1);
        let opts = ConfettiOptions {
            flat: true,
            particle_count: 1.0,
            ..ConfettiOptions::default()
        };
        let mut field = ConfettiField::new();
        field.fire(&opts, Vec2::new(100.0, 100.0), &mut rng);
        field.tick(&mut rng);
        assert_eq!(field.particles()[0].wobble, 0.0);
    }

    #[test]
    fn rain_after_a_long_stall_finishes_without_catching_up() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut rain = PetalRain::new();
        rain.start(10.0);
        assert!(rain.tick(1.0e7, &mut rng).is_empty());
        assert!(!rain.is_active());
        assert!(rain.tick(1.0e7 + 1.0, &mut rng).is_empty());
    }

    #[test]
    fn missed_slots_are_skipped_in_one_step() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut rain = PetalRain::new();
        rain.start(0.0);
        assert_eq!(rain.tick(1.1, &mut rng).len(), 2);
        // Next slot is 1.25, not one of the skipped earlier ones
        assert!(rain.tick(1.2, &mut rng).is_empty());
        assert_eq!(rain.tick(1.25, &mut rng).len(), 2);
    }
}
