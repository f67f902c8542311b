//! # scene_layout
//!
//! Where every visual element of the tree scene should be this frame.
//!
//! Each component reads the shared [`InteractionMode`] and the continuous
//! progress / scroll values and produces plain poses; drawing them is left to
//! the renderer.
//!
//! | Component | Tree | Unleashed | Carousel | Focus |
//! |---|---|---|---|---|
//! | [`ParticleField`] | cone, spiral garland | ball of radius 20 | (progress blend) | (progress blend) |
//! | [`OrnamentSet`] | cone | spherical cloud | (lagged blend) | (lagged blend) |
//! | [`PolaroidLayout`] | 4-turn helix | drifting cloud | arc around the camera | selected photo at the camera |
//! | [`Star`] | tree top | orbiting | (progress blend) | (progress blend) |
//! | [`LetterProp`] | hung on the tree | floating aside | on the tree | at the camera when focused |
//!
//! All layout coordinates are local to the scene group, which sits at
//! [`SCENE_ORIGIN`] in world space.  [`SnowField`] is the exception: the
//! snow falls in world space and ignores the mode.
//!
//! [`InteractionMode`]: scene_mode::InteractionMode

pub mod vec3;
pub mod camera;
pub mod foliage;
pub mod ornaments;
pub mod polaroid;
pub mod star;
pub mod letter;
pub mod snow;

pub use vec3::{mix_rgb, Vec3};
pub use camera::{Camera, Projected};
pub use foliage::{Particle, ParticleField};
pub use ornaments::{Ornament, OrnamentKind, OrnamentPose, OrnamentSet};
pub use polaroid::{PolaroidFrame, PolaroidLayout, PolaroidPose};
pub use star::{Star, StarPose};
pub use letter::{LetterPose, LetterProp};
pub use snow::{Flake, FlakePose, SnowField};

use std::f32::consts::{PI, TAU};

/// World position of the scene group.
pub const SCENE_ORIGIN: Vec3 = Vec3::new(0.0, -2.0, 0.0);

pub fn to_local(world: Vec3) -> Vec3 { world - SCENE_ORIGIN }

pub fn to_world(local: Vec3) -> Vec3 { local + SCENE_ORIGIN }

/// Step an angle a fraction `k` of the way toward `target` along the
/// shorter arc.
pub fn turn_toward(current: f32, target: f32, k: f32) -> f32 {
    let mut diff = (target - current) % TAU;
    if diff > PI {
        diff -= TAU;
    } else if diff < -PI {
        diff += TAU;
    }
    current + diff * k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_takes_short_way_round() {
        let next = turn_toward(0.1, TAU - 0.1, 0.5);
        assert!((next - 0.0).abs() < 1e-5);
        let next = turn_toward(0.0, 1.0, 1.0);
        assert!((next - 1.0).abs() < 1e-6);
    }

    #[test]
    fn local_world_inverse() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(to_local(to_world(p)), p);
    }
}
