use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::math::Vec3;

/// Floats per star in the particle buffer: position(3) + size(1) + alpha(1) + color(3)
pub const FLOATS_PER_STAR: usize = 8;

const STAR_SIZE: f32 = 0.7;
const STAR_ALPHA: f32 = 0.6;

/// Static background of point stars scattered through a cube
#[derive(Debug, Clone)]
pub struct StarField {
    positions: Vec<Vec3>,
}

impl StarField {
    /// `count` stars uniformly placed in a cube of side `extent` around the origin
    pub fn new(count: usize, extent: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let half = extent / 2.0;

        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                )
            })
            .collect();

        Self { positions }
    }

    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// Interleaved buffer for the particle program
    pub fn particle_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.positions.len() * FLOATS_PER_STAR);

        for p in &self.positions {
            data.extend_from_slice(&[p.x, p.y, p.z, STAR_SIZE, STAR_ALPHA, 1.0, 1.0, 1.0]);
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_layout() {
        let stars = StarField::new(3000, 2500.0, 1);
        assert_eq!(stars.count(), 3000);
        assert_eq!(stars.particle_data().len(), 3000 * FLOATS_PER_STAR);
    }

    #[test]
    fn test_stars_inside_cube() {
        let stars = StarField::new(500, 2500.0, 2);
        for p in &stars.positions {
            assert!(p.x.abs() <= 1250.0 && p.y.abs() <= 1250.0 && p.z.abs() <= 1250.0);
        }
    }

    #[test]
    fn test_seeded() {
        let a = StarField::new(50, 100.0, 9).particle_data();
        let b = StarField::new(50, 100.0, 9).particle_data();
        assert_eq!(a, b);
    }
}
