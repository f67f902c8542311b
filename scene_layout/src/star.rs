//! The star on top of the tree.

use crate::vec3::Vec3;

pub const TREE_TOP_Y: f32 = 11.5;
pub const OUTER_RADIUS: f32 = 1.0;
pub const INNER_RADIUS: f32 = 0.4;
pub const POINTS: usize = 5;

/// Spin added per frame around the vertical axis.
const SPIN_STEP: f32 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPose {
    pub position: Vec3,
    pub spin:     f32,
    pub wobble:   f32,
    /// Light intensity; fades out with the tree.
    pub glow:     f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Star {
    spin: f32,
}

impl Star {
    pub fn new() -> Self { Star::default() }

    pub fn update(&mut self, progress: f32, elapsed: f32) -> StarPose {
        self.spin += SPIN_STEP;
        let chaos = Vec3::new(elapsed.sin() * 5.0, 15.0 + (elapsed * 0.5).cos() * 5.0, elapsed.cos() * 5.0);
        let breath = (elapsed * 1.5).sin() * 0.5 + 0.5;
        let shimmer = (elapsed * 5.0 + (elapsed * 1.5).cos()).sin() * 0.15;

        StarPose {
            position: chaos.lerp(Vec3::new(0.0, TREE_TOP_Y, 0.0), progress),
            spin:     self.spin,
            wobble:   (elapsed * 2.0).sin() * 0.05,
            glow:     (1.5 + breath * 1.5 + shimmer) * 2.5 * progress,
        }
    }
}

/// Outline of the five-pointed star in its own plane, alternating outer and
/// inner vertices.
pub fn outline() -> [(f32, f32); POINTS * 2] {
    let mut pts = [(0.0, 0.0); POINTS * 2];
    for (i, p) in pts.iter_mut().enumerate() {
        let angle = i as f32 * std::f32::consts::PI / POINTS as f32;
        let r = if i % 2 == 0 { OUTER_RADIUS } else { INNER_RADIUS };
        *p = (angle.cos() * r, angle.sin() * r);
    }
    pts
}
