//! Background particle field: a fixed pool of soft blobs that drift upwards
//! and get recycled once they expire or leave the screen.

use rand::Rng;

/// Margin a particle may drift past the sides before it is recycled.
const SIDE_MARGIN: f64 = 80.0;
/// Margin above the top edge, measured from the particle's bottom.
const TOP_MARGIN: f64 = 40.0;
/// Respawned particles start this far below the bottom edge, plus up to `SPAWN_SPREAD`.
const SPAWN_OFFSET: f64 = 40.0;
const SPAWN_SPREAD: f64 = 80.0;
/// Upper bound of the per-frame upward acceleration.
const DRIFT_ACCEL: f64 = 0.00002;

pub const RADIUS_MIN: f64 = 3.0;
pub const RADIUS_SPAN: f64 = 24.0;
pub const LIFE_MIN: i32 = 40;
pub const LIFE_MAX: i32 = 260;
pub const ALPHA_MIN: f64 = 0.06;
pub const ALPHA_SPAN: f64 = 0.14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

pub const PALETTE: [Rgba; 3] = [
    Rgba::new(79, 211, 255, 0.12),
    Rgba::new(107, 140, 255, 0.08),
    Rgba::new(255, 255, 255, 0.06),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub vx: f64,
    pub vy: f64,
    pub color: Rgba,
    /// Frames left before the particle is recycled.
    pub life: i32,
    pub alpha: f64,
}

impl Particle {
    fn random<R: Rng>(rng: &mut R, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            r: RADIUS_MIN + rng.gen::<f64>() * RADIUS_SPAN,
            vx: (rng.gen::<f64>() - 0.5) * 0.2,
            vy: -0.05 - rng.gen::<f64>() * 0.25,
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
            life: rng.gen_range(LIFE_MIN..LIFE_MAX),
            alpha: ALPHA_MIN + rng.gen::<f64>() * ALPHA_SPAN,
        }
    }

    fn is_spent(&self, width: f64) -> bool {
        self.y + self.r < -TOP_MARGIN
            || self.x < -SIDE_MARGIN
            || self.x > width + SIDE_MARGIN
            || self.life < 0
    }
}

/// Number of particles for a viewport at the given density.
pub fn particle_count(width: f64, height: f64, density: f64) -> usize {
    if density <= 0.0 || width <= 0.0 || height <= 0.0 {
        return 0;
    }
    (width * height / density).round() as usize
}

pub struct ParticleField<R> {
    rng: R,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
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

    /// Sets new bounds and repopulates the whole field for `density`.
    pub fn resize(&mut self, width: f64, height: f64, density: f64) {
        self.width = width;
        self.height = height;
        let count = particle_count(width, height, density);
        self.populate(count);
    }

    /// Replaces every particle with `count` fresh ones scattered over the viewport.
    pub fn populate(&mut self, count: usize) {
        let (width, height) = (self.width, self.height);
        let rng = &mut self.rng;
        self.particles.clear();
        self.particles.extend((0..count).map(|_| {
            let x = rng.gen::<f64>() * width;
            let y = rng.gen::<f64>() * height;
            Particle::random(&mut *rng, x, y)
        }));
    }

    /// Advances every particle by one frame, recycling the spent ones in place.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in self.particles.iter_mut() {
            p.x += p.vx;
            p.y += p.vy;
            p.vy -= DRIFT_ACCEL * self.rng.gen::<f64>();
            p.life -= 1;
            if p.is_spent(width) {
                let x = self.rng.gen::<f64>() * width;
                let y = height + SPAWN_OFFSET + self.rng.gen::<f64>() * SPAWN_SPREAD;
                *p = Particle::random(&mut self.rng, x, y);
            }
        }
    }
}
