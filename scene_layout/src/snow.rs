//! Falling snow around the whole scene.
//!
//! Flakes live in world space inside a cube centred on the origin and wrap
//! from the floor back to the ceiling.  They take no part in the mode state:
//! the same fall runs in every mode.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::vec3::{mix_rgb, Vec3};

pub const DEFAULT_FLAKES: usize = 1500;

/// Edge length of the snow cube.
pub const AREA: f32 = 45.0;

const COLD: u32 = 0xE0F2FE;
const WARM: u32 = 0xFFF7ED;

/// View distances between which flakes fade out.
const FADE_NEAR: f32 = 30.0;
const FADE_FAR:  f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flake {
    /// Position at `elapsed == 0`.
    pub origin: Vec3,
    pub color:  u32,
    pub scale:  f32,
    /// Fall speed in units per second.
    pub speed:  f32,
    /// Per-flake phase in `[0, 1)`.
    pub phase:  f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlakePose {
    pub position: Vec3,
    pub color:    u32,
    pub scale:    f32,
    /// Additive intensity in `[0, 1]`: distance fade times twinkle.
    pub alpha:    f32,
}

pub struct SnowField {
    flakes: Vec<Flake>,
}

impl SnowField {
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let flakes = (0..count)
            .map(|_| {
                let mut axis = || (rng.gen::<f32>() - 0.5) * AREA;
                let origin = Vec3::new(axis(), axis(), axis());
                Flake {
                    origin,
                    color: mix_rgb(COLD, WARM, rng.gen::<f32>()),
                    scale: rng.gen::<f32>() * 3.0 + 1.0,
                    speed: 1.0 + rng.gen::<f32>() * 2.0,
                    phase: rng.gen::<f32>(),
                }
            })
            .collect();
        SnowField { flakes }
    }

    /// Flake poses at `elapsed` seconds, faded by distance from `eye`.
    pub fn poses(&self, elapsed: f32, eye: Vec3) -> impl Iterator<Item = FlakePose> + '_ {
        self.flakes.iter().map(move |f| {
            let position = fall(f, elapsed);
            let fade = smoothstep(FADE_FAR, FADE_NEAR, position.distance(eye));
            let twinkle = 0.8 + 0.2 * (elapsed * 3.0 + f.phase * 10.0).sin();
            FlakePose { position, color: f.color, scale: f.scale, alpha: fade * twinkle }
        })
    }

    pub fn flakes(&self) -> &[Flake] { &self.flakes }
}

fn fall(f: &Flake, t: f32) -> Vec3 {
    let half = AREA * 0.5;
    let y = (f.origin.y - t * f.speed + half).rem_euclid(AREA) - half;
    let r = f.phase * 10.0;
    Vec3::new(
        f.origin.x + (t * 0.5 + y * 0.2 + r).sin(),
        y,
        f.origin.z + (t * 0.3 + y * 0.15 + r).cos(),
    )
}

/// Hermite step; `edge0 > edge1` gives a falling ramp.
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
