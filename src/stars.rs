//! Falling background stars, in normalized surface coordinates.
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Fall speed in surface heights per second.
    pub speed: f32,
    pub radius: f32,
}

impl Star {
    fn fresh<R: Rng>(rng: &mut R) -> Self {
        Star {
            x: rng.gen(),
            y: rng.gen(),
            speed: 0.06 + rng.gen::<f32>() * 0.28,
            radius: 1.0 + rng.gen::<f32>() * 2.8,
        }
    }
}

pub struct StarField {
    stars: Vec<Star>,
    rng: StdRng,
}

impl StarField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..count).map(|_| Star::fresh(&mut rng)).collect();
        StarField { stars, rng }
    }

    /// Moves every star down; stars that leave the bottom come back above
    /// the top with new column, speed and size.
    pub fn update(&mut self, dt: f32) {
        for star in &mut self.stars {
            star.y += star.speed * dt;
            if star.y > 1.1 {
                *star = Star { y: -0.1, ..Star::fresh(&mut self.rng) };
            }
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}
