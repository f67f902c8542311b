//! Photo polaroids.  Each photo has a slot on the tree helix, a drifting home
//! in the chaos cloud, a place on the carousel arc, and a focus pose.  The
//! drawn pose chases the current mode's target every frame.

use std::f32::consts::{PI, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_mode::{InteractionMode, Smoothing};

use crate::camera::Camera;
use crate::vec3::Vec3;
use crate::{to_local, turn_toward};

pub const POLAROID_WIDTH:  f32 = 2.0;
pub const POLAROID_HEIGHT: f32 = 2.4;

pub const ARC_RADIUS:      f32 = 22.0;
pub const ANGLE_SPACING:   f32 = 0.45;
pub const CENTER_Y_BOOST:  f32 = 1.5;
pub const GALLERY_Z_OFFSET: f32 = 8.0;

const HELIX_TOP:    f32 = 4.5;
const HELIX_BOTTOM: f32 = -6.5;
const HELIX_TURNS:  f32 = 4.0;
const CONE_TOP:     f32 = 11.0;
const CONE_HEIGHT:  f32 = 22.0;
const CONE_RADIUS:  f32 = 7.5;
const HELIX_FLARE:  f32 = 1.3;

const FOCUS_DISTANCE: f32 = 10.0;
const FOCUS_DROP:     f32 = 2.5;
const FOCUS_SCALE:    f32 = 4.2;
const BACKDROP_SCALE: f32 = 0.2;

const FOCUS_FACTOR: f32 = 0.15;
const MOVE_FACTOR:  f32 = 0.08;

/// Where and how a polaroid is drawn.  `yaw` orients the card's face
/// normal as `(sin yaw, 0, cos yaw)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolaroidPose {
    pub position: Vec3,
    pub yaw:      f32,
    pub scale:    f32,
}

impl Default for PolaroidPose {
    fn default() -> Self { PolaroidPose { position: Vec3::ZERO, yaw: 0.0, scale: 1.0 } }
}

#[derive(Clone, Copy, Debug)]
struct CloudHome {
    pos:         Vec3,
    drift_speed: f32,
    drift_phase: f32,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    id:    u64,
    cloud: CloudHome,
    pose:  PolaroidPose,
}

/// Everything a polaroid target depends on this frame.
#[derive(Clone, Copy, Debug)]
pub struct PolaroidFrame<'a> {
    pub mode:      InteractionMode,
    pub scroll:    f32,
    pub selection: Option<usize>,
    pub camera:    &'a Camera,
    pub elapsed:   f32,
    pub dt:        f32,
}

pub struct PolaroidLayout {
    rng:       StdRng,
    smoothing: Smoothing,
    slots:     Vec<Slot>,
    base_yaw:  f32,
    last_mode: Option<InteractionMode>,
}

impl PolaroidLayout {
    pub fn new(seed: u64, smoothing: Smoothing) -> Self {
        PolaroidLayout {
            rng: StdRng::seed_from_u64(seed),
            smoothing,
            slots: Vec::new(),
            base_yaw: 0.0,
            last_mode: None,
        }
    }

    /// Match slots to the photo list, newest first.  Known ids keep their
    /// cloud home and current pose; new ids start at the origin.
    pub fn sync(&mut self, ids: &[u64]) {
        let mut old = std::mem::take(&mut self.slots);
        for &id in ids {
            let slot = match old.iter().position(|s| s.id == id) {
                Some(i) => old.swap_remove(i),
                None => Slot { id, cloud: self.cloud_home(), pose: PolaroidPose::default() },
            };
            self.slots.push(slot);
        }
    }

    fn cloud_home(&mut self) -> CloudHome {
        let r = &mut self.rng;
        CloudHome {
            pos: Vec3::new(
                (r.gen::<f32>() - 0.5) * 28.0,
                (r.gen::<f32>() - 0.5) * 18.0,
                (r.gen::<f32>() - 0.5) * 12.0,
            ),
            drift_speed: r.gen::<f32>() * 0.3 + 0.1,
            drift_phase: r.gen::<f32>() * TAU,
        }
    }

    pub fn update(&mut self, f: &PolaroidFrame<'_>) {
        if self.last_mode != Some(f.mode) {
            if f.mode != InteractionMode::Tree {
                self.base_yaw = f.camera.heading();
            }
            self.last_mode = Some(f.mode);
        }

        let base = if f.mode == InteractionMode::Focus { FOCUS_FACTOR } else { MOVE_FACTOR };
        let k = self.smoothing.factor(base, f.dt);
        let total = self.slots.len();

        for i in 0..total {
            let target = self.target(i, total, f);
            let pose = &mut self.slots[i].pose;
            pose.position = pose.position.lerp(target.position, k);
            pose.yaw      = turn_toward(pose.yaw, target.yaw, k);
            pose.scale   += (target.scale - pose.scale) * k;
        }
    }

    /// The pose photo `index` of `total` is heading for.
    pub fn target(&self, index: usize, total: usize, f: &PolaroidFrame<'_>) -> PolaroidPose {
        let cam_local = to_local(f.camera.position());
        let facing = |p: Vec3| (cam_local.x - p.x).atan2(cam_local.z - p.z);
        let cloud = self.slots.get(index).map(|s| s.cloud);

        match f.mode {
            InteractionMode::Tree | InteractionMode::Letter => helix_slot(index, total),
            InteractionMode::Unleashed => {
                let Some(c) = cloud else { return PolaroidPose::default() };
                let mut p = c.pos;
                p.y += (f.elapsed * c.drift_speed + c.drift_phase).sin() * 1.5;
                PolaroidPose { position: p, yaw: facing(p), scale: 1.0 }
            }
            InteractionMode::Carousel => carousel_slot(index as f32 - f.scroll, self.base_yaw),
            InteractionMode::Focus if f.selection == Some(index) => {
                let fwd = f.camera.forward();
                PolaroidPose {
                    position: to_local(f.camera.point_ahead(FOCUS_DISTANCE, FOCUS_DROP)),
                    yaw:      (-fwd.x).atan2(-fwd.z),
                    scale:    FOCUS_SCALE,
                }
            }
            InteractionMode::Focus => {
                let Some(c) = cloud else { return PolaroidPose::default() };
                let mut p = c.pos * 2.0;
                p.z -= 50.0;
                PolaroidPose { position: p, yaw: facing(p), scale: BACKDROP_SCALE }
            }
        }
    }

    pub fn poses(&self) -> impl Iterator<Item = (u64, PolaroidPose)> + '_ {
        self.slots.iter().map(|s| (s.id, s.pose))
    }

    pub fn len(&self) -> usize { self.slots.len() }
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }
    pub fn base_yaw(&self) -> f32 { self.base_yaw }
}

/// Slot `index` of `total` on the helix wound around the tree, facing out.
pub fn helix_slot(index: usize, total: usize) -> PolaroidPose {
    let t = if total > 1 { index as f32 / (total - 1) as f32 } else { 0.0 };
    let h = HELIX_TOP - t * (HELIX_TOP - HELIX_BOTTOM);
    let r = ((CONE_TOP - h) / CONE_HEIGHT) * CONE_RADIUS * HELIX_FLARE;
    let a = t * PI * 2.0 * HELIX_TURNS;
    let position = Vec3::new(a.cos() * r, h, a.sin() * r);
    PolaroidPose { position, yaw: position.x.atan2(position.z), scale: 1.0 }
}

/// Carousel placement for a photo `delta` slots from the scroll centre.
pub fn carousel_slot(delta: f32, base_yaw: f32) -> PolaroidPose {
    let angle = delta * ANGLE_SPACING;
    let rel_x = angle.sin() * ARC_RADIUS;
    let rel_z = (angle.cos() - 1.0) * ARC_RADIUS + GALLERY_Z_OFFSET;
    let (sin_y, cos_y) = base_yaw.sin_cos();
    let proximity = proximity(delta);

    PolaroidPose {
        position: Vec3::new(
            rel_x * cos_y + rel_z * sin_y,
            proximity * CENTER_Y_BOOST,
            -rel_x * sin_y + rel_z * cos_y,
        ),
        yaw:   base_yaw + angle * 0.8 + PI,
        scale: 1.0 + proximity * 1.8,
    }
}

/// Gaussian emphasis of the photo nearest the scroll centre.
pub fn proximity(delta: f32) -> f32 {
    (-delta * delta * 3.0).exp()
}
