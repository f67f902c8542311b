//! Baubles and glass cubes hung on the tree.
//!
//! Ornaments follow the shared progress with their own lag so they settle a
//! beat after the needles.

use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::vec3::Vec3;

pub const DEFAULT_SPHERES: usize = 300;
pub const DEFAULT_CUBES:   usize = 200;

/// Lag rate in 1/s.
const LAG_RATE: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrnamentKind {
    Sphere,
    Cube,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ornament {
    pub kind:  OrnamentKind,
    pub chaos: Vec3,
    pub tree:  Vec3,
    pub color: u32,
    pub scale: f32,
}

/// One drawable ornament instance for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentPose {
    pub kind:     OrnamentKind,
    pub position: Vec3,
    /// Euler spin `(x, y, z)` in radians.
    pub spin:     (f32, f32, f32),
    pub scale:    f32,
    pub color:    u32,
}

pub struct OrnamentSet {
    ornaments: Vec<Ornament>,
    lagged:    f32,
}

impl OrnamentSet {
    pub fn generate(spheres: usize, cubes: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ornaments = Vec::with_capacity(spheres + cubes);

        for i in 0..spheres {
            let u = i as f32 / spheres as f32;
            let t = 1.0 - (1.0 - u).sqrt();
            let angle = t * PI * 18.0 + rng.gen::<f32>();
            let radius = (1.0 - t) * 7.5;
            let chaos = Vec3::from_spherical(rng.gen::<f32>() * 20.0, rng.gen::<f32>() * PI, rng.gen::<f32>() * PI * 2.0);
            let color = if rng.gen::<f32>() > 0.5 { 0xFFD700 } else { 0xC41E3A };
            ornaments.push(Ornament {
                kind: OrnamentKind::Sphere,
                chaos,
                tree: Vec3::new(angle.cos() * radius, t * 20.0 - 10.0, angle.sin() * radius),
                color,
                scale: rng.gen::<f32>() * 0.3 + 0.2,
            });
        }

        for _ in 0..cubes {
            let t = 1.0 - rng.gen::<f32>().sqrt();
            let angle = rng.gen::<f32>() * PI * 20.0;
            let radius = (1.0 - t) * 7.0;
            let chaos = Vec3::from_spherical(rng.gen::<f32>() * 15.0, rng.gen::<f32>() * PI, rng.gen::<f32>() * PI * 2.0);
            let color = if rng.gen::<f32>() > 0.7 { 0xFFD700 } else { 0xE0F2FE };
            ornaments.push(Ornament {
                kind: OrnamentKind::Cube,
                chaos,
                tree: Vec3::new(angle.cos() * radius, t * 20.0 - 10.0, angle.sin() * radius),
                color,
                scale: rng.gen::<f32>() * 0.25 + 0.15,
            });
        }

        OrnamentSet { ornaments, lagged: 0.0 }
    }

    /// Advance the lagged progress by `dt` seconds.
    pub fn tick(&mut self, progress: f32, dt: f32) -> f32 {
        self.lagged += (progress - self.lagged) * (LAG_RATE * dt).min(1.0);
        self.lagged
    }

    /// Instance poses at `elapsed` seconds since start.
    pub fn poses(&self, elapsed: f32) -> impl Iterator<Item = OrnamentPose> + '_ {
        let p = self.lagged;
        self.ornaments.iter().enumerate().map(move |(i, o)| {
            let fi = i as f32;
            let spin = match o.kind {
                OrnamentKind::Sphere => (elapsed * 0.2 + fi, elapsed * 0.1, 0.0),
                OrnamentKind::Cube   => (elapsed * 0.5 + fi, elapsed * 0.5 + fi, fi),
            };
            OrnamentPose {
                kind:     o.kind,
                position: o.chaos.lerp(o.tree, p),
                spin,
                scale:    o.scale,
                color:    o.color,
            }
        })
    }

    pub fn lagged_progress(&self) -> f32 { self.lagged }
    pub fn ornaments(&self) -> &[Ornament] { &self.ornaments }
}
