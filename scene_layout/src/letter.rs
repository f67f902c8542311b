//! The letter envelope.  It hangs on the tree, floats in the cloud when the
//! tree is scattered, and comes up to the camera with its flap open while
//! focused.

use std::f32::consts::PI;

use scene_mode::{InteractionMode, Smoothing};

use crate::camera::Camera;
use crate::polaroid::PolaroidPose;
use crate::vec3::Vec3;
use crate::{to_local, turn_toward};

pub const ENVELOPE_WIDTH:  f32 = 3.4;
pub const ENVELOPE_HEIGHT: f32 = 2.4;

const TREE_ANGLE:  f32 = PI * 0.78;
const TREE_RADIUS: f32 = 4.6;
const TREE_HEIGHT: f32 = 4.2;

const FOCUS_DISTANCE: f32 = 9.2;
const FOCUS_DROP:     f32 = 5.2;
const FOCUS_SCALE:    f32 = 2.1;
const REST_SCALE:     f32 = 0.7;

const POSE_FACTOR:  f32 = 0.12;
const PARTS_FACTOR: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LetterPose {
    pub body: PolaroidPose,
    /// Flap hinge angle, 0 closed, about -π open.
    pub flap: f32,
    /// Sheet slide out of the envelope `(y, z)`.
    pub sheet: (f32, f32),
}

pub struct LetterProp {
    smoothing: Smoothing,
    pose:      LetterPose,
}

impl LetterProp {
    pub fn new(smoothing: Smoothing) -> Self {
        let body = PolaroidPose { scale: REST_SCALE, ..tree_anchor(0.0) };
        LetterProp {
            smoothing,
            pose: LetterPose { body, flap: 0.0, sheet: (0.0, 0.04) },
        }
    }

    pub fn update(
        &mut self,
        mode:    InteractionMode,
        focused: bool,
        camera:  &Camera,
        elapsed: f32,
        dt:      f32,
    ) -> LetterPose {
        let cam_local = to_local(camera.position());
        let (target, flap, sheet) = if focused {
            let fwd = camera.forward();
            let body = PolaroidPose {
                position: to_local(camera.point_ahead(FOCUS_DISTANCE, FOCUS_DROP)),
                yaw:      (-fwd.x).atan2(-fwd.z),
                scale:    FOCUS_SCALE,
            };
            (body, -PI * 0.98, (ENVELOPE_HEIGHT * 0.85, 0.6))
        } else if mode == InteractionMode::Unleashed {
            let p = Vec3::new(8.0, 7.0 + (elapsed * 0.5).sin() * 1.5, 5.0);
            let yaw = (cam_local.x - p.x).atan2(cam_local.z - p.z);
            (PolaroidPose { position: p, yaw, scale: REST_SCALE }, 0.0, (0.0, 0.04))
        } else {
            (PolaroidPose { scale: REST_SCALE, ..tree_anchor(elapsed) }, 0.0, (0.0, 0.04))
        };

        let k = self.smoothing.factor(POSE_FACTOR, dt);
        let j = self.smoothing.factor(PARTS_FACTOR, dt);
        let p = &mut self.pose;
        p.body.position = p.body.position.lerp(target.position, k);
        p.body.yaw      = turn_toward(p.body.yaw, target.yaw, k);
        p.body.scale   += (target.scale - p.body.scale) * k;
        p.flap         += (flap - p.flap) * j;
        p.sheet.0      += (sheet.0 - p.sheet.0) * j;
        p.sheet.1      += (sheet.1 - p.sheet.1) * j;
        *p
    }

    pub fn pose(&self) -> LetterPose { self.pose }
}

/// Resting spot on the tree, bobbing slightly, facing out.
fn tree_anchor(elapsed: f32) -> PolaroidPose {
    let position = Vec3::new(
        TREE_ANGLE.cos() * TREE_RADIUS,
        TREE_HEIGHT + (elapsed * 1.2).sin() * 0.15,
        TREE_ANGLE.sin() * TREE_RADIUS,
    );
    PolaroidPose { position, yaw: position.x.atan2(position.z), scale: 1.0 }
}
