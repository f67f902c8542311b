//! The needle particles: each one has a chaos home and a tree home and is
//! drawn at their blend by the shared progress value.

use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::vec3::{mix_rgb, Vec3};

pub const CHAOS_RADIUS: f32 = 20.0;
pub const TREE_HEIGHT:  f32 = 22.0;
pub const TREE_RADIUS:  f32 = 7.5;
/// Turns of the spiral garland strand.
const SPIRAL_TURNS: f32 = 10.0;

const GOLD:       u32 = 0xFFD700;
const GOLD_LIGHT: u32 = 0xFDE047;
const GREEN:      u32 = 0x059669;
const GREEN_LIGHT: u32 = 0x6EE7B7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub chaos: Vec3,
    pub tree:  Vec3,
    pub color: u32,
    pub size:  f32,
    /// Gold sparkle rather than green needle.
    pub sparkle: bool,
}

pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..count).map(|_| Self::particle(&mut rng)).collect();
        ParticleField { particles }
    }

    fn particle(rng: &mut StdRng) -> Particle {
        // Uniform in the ball: cube-root radius, arccos polar angle.
        let theta = 2.0 * PI * rng.gen::<f32>();
        let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
        let r_chaos = rng.gen::<f32>().cbrt() * CHAOS_RADIUS;
        let chaos = Vec3::new(
            r_chaos * phi.sin() * theta.cos(),
            r_chaos * phi.sin() * theta.sin(),
            r_chaos * phi.cos(),
        );

        let spiral = rng.gen::<f32>() > 0.7;
        let t = if spiral { 1.0 - rng.gen::<f32>().sqrt() } else { 1.0 - rng.gen::<f32>().cbrt() };
        let height = t * TREE_HEIGHT - TREE_HEIGHT * 0.5;
        let max_r = (1.0 - t) * TREE_RADIUS;
        let (angle, r) = if spiral {
            (t * PI * 2.0 * SPIRAL_TURNS + (rng.gen::<f32>() - 0.5) * 1.5,
             max_r * (0.9 + rng.gen::<f32>() * 0.2))
        } else {
            (rng.gen::<f32>() * PI * 2.0,
             max_r * (0.2 + 0.8 * rng.gen::<f32>()).sqrt())
        };
        let tree = Vec3::new(angle.cos() * r, height, angle.sin() * r);

        let sparkle = rng.gen::<f32>() > 0.96;
        let (color, size) = if sparkle {
            (mix_rgb(GOLD, GOLD_LIGHT, rng.gen()), rng.gen::<f32>() * 4.0 + 2.0)
        } else {
            (mix_rgb(GREEN, GREEN_LIGHT, rng.gen()), rng.gen::<f32>() * 3.0 + 1.0)
        };

        Particle { chaos, tree, color, size, sparkle }
    }

    /// Write blended positions into `out`, reusing its allocation.
    pub fn blend(&self, progress: f32, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| p.chaos + (p.tree - p.chaos) * progress));
    }

    pub fn particles(&self) -> &[Particle] { &self.particles }
    pub fn len(&self) -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool { self.particles.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::generate(200, 7);
        let b = ParticleField::generate(200, 7);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn homes_within_bounds() {
        let field = ParticleField::generate(2000, 1);
        for p in field.particles() {
            assert!(p.chaos.length() <= CHAOS_RADIUS + 1e-3);
            assert!(p.tree.y >= -11.0 - 1e-3 && p.tree.y <= 11.0 + 1e-3);
            let r = (p.tree.x * p.tree.x + p.tree.z * p.tree.z).sqrt();
            // Spiral strand may sit up to 10 % outside the cone surface.
            assert!(r <= TREE_RADIUS * 1.1 + 1e-3);
        }
    }

    #[test]
    fn sparkles_are_rare() {
        let field = ParticleField::generate(5000, 3);
        let n = field.particles().iter().filter(|p| p.sparkle).count();
        assert!(n > 50 && n < 400, "{} sparkles", n);
    }

    #[test]
    fn blend_endpoints() {
        let field = ParticleField::generate(50, 11);
        let mut out = Vec::new();
        field.blend(0.0, &mut out);
        assert_eq!(out[7], field.particles()[7].chaos);
        field.blend(1.0, &mut out);
        let d = out[7].distance(field.particles()[7].tree);
        assert!(d < 1e-4);
        assert_eq!(out.len(), 50);
    }

    proptest! {
        #[test]
        fn blend_stays_on_segment(progress in 0.0f32..=1.0, seed in 0u64..1000) {
            let field = ParticleField::generate(16, seed);
            let mut out = Vec::new();
            field.blend(progress, &mut out);
            for (p, pt) in field.particles().iter().zip(&out) {
                let span = p.chaos.distance(p.tree);
                let along = p.chaos.distance(*pt) + pt.distance(p.tree);
                prop_assert!((along - span).abs() < 1e-3);
            }
        }
    }
}
