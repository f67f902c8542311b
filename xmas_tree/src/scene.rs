//! Everything drawn in the window, advanced once per render frame from the
//! session's mode and continuous values.

use scene_layout::{
    letter::ENVELOPE_WIDTH, to_world, Camera, LetterPose, LetterProp, OrnamentSet, ParticleField,
    PolaroidFrame, PolaroidLayout, SnowField, Star, StarPose, Vec3,
};
use scene_layout::ornaments::{DEFAULT_CUBES, DEFAULT_SPHERES};
use scene_layout::snow::DEFAULT_FLAKES;
use scene_mode::{InteractionSession, Smoothing};

/// Invisible click target around the tree.
const HIT_CONE_RADIUS: f32 = 8.0;
const HIT_CONE_HALF_HEIGHT: f32 = 11.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    Letter,
    Tree,
}

pub struct Scene {
    pub camera: Camera,
    foliage:    ParticleField,
    ornaments:  OrnamentSet,
    polaroids:  PolaroidLayout,
    star:       Star,
    letter:     LetterProp,
    snow:       SnowField,
    star_pose:  StarPose,
    letter_pose: LetterPose,
    /// Blended foliage positions, local space.
    needles:    Vec<Vec3>,
    elapsed:    f32,
}

impl Scene {
    pub fn new(particles: usize, seed: u64, smoothing: Smoothing) -> Self {
        let mut star = Star::new();
        let letter = LetterProp::new(smoothing);
        let star_pose = star.update(1.0, 0.0);
        let letter_pose = letter.pose();
        Scene {
            camera:    Camera::default(),
            foliage:   ParticleField::generate(particles, seed),
            ornaments: OrnamentSet::generate(DEFAULT_SPHERES, DEFAULT_CUBES, seed.wrapping_add(1)),
            polaroids: PolaroidLayout::new(seed.wrapping_add(2), smoothing),
            star,
            letter,
            snow:      SnowField::generate(DEFAULT_FLAKES, seed.wrapping_add(3)),
            star_pose,
            letter_pose,
            needles:   Vec::with_capacity(particles),
            elapsed:   0.0,
        }
    }

    pub fn sync_photos(&mut self, ids: &[u64]) {
        self.polaroids.sync(ids);
    }

    pub fn tick(&mut self, session: &InteractionSession, dt: f32) {
        self.elapsed += dt;
        let mode = session.mode();
        let progress = session.progress();

        self.camera.auto_rotate(mode, dt);
        self.foliage.blend(progress, &mut self.needles);
        self.ornaments.tick(progress, dt);
        self.polaroids.update(&PolaroidFrame {
            mode,
            scroll:    session.scroll_offset(),
            selection: session.selection(),
            camera:    &self.camera,
            elapsed:   self.elapsed,
            dt,
        });
        self.star_pose = self.star.update(progress, self.elapsed);
        self.letter_pose = self.letter.update(mode, session.letter_focused(), &self.camera, self.elapsed, dt);
    }

    /// What a click at screen `(x, y)` lands on.  The letter sits in front
    /// of the tree, so it is tested first.
    pub fn pick(&self, x: f32, y: f32, width: usize, height: usize) -> Option<Pick> {
        let lp = self.letter_pose.body;
        if let Some(p) = self.camera.project(to_world(lp.position), width, height) {
            let r = ENVELOPE_WIDTH * 0.5 * lp.scale * p.scale;
            if (x - p.x).hypot(y - p.y) <= r {
                return Some(Pick::Letter);
            }
        }

        let apex = self.camera.project(to_world(Vec3::new(0.0, HIT_CONE_HALF_HEIGHT, 0.0)), width, height)?;
        let base = self.camera.project(to_world(Vec3::new(0.0, -HIT_CONE_HALF_HEIGHT, 0.0)), width, height)?;
        if base.y <= apex.y || y < apex.y || y > base.y {
            return None;
        }
        let t = (y - apex.y) / (base.y - apex.y);
        let cx = apex.x + (base.x - apex.x) * t;
        let half = HIT_CONE_RADIUS * base.scale * t;
        if (x - cx).abs() <= half { Some(Pick::Tree) } else { None }
    }

    pub fn needles(&self)      -> &[Vec3]          { &self.needles }
    pub fn foliage(&self)      -> &ParticleField   { &self.foliage }
    pub fn ornaments(&self)    -> &OrnamentSet     { &self.ornaments }
    pub fn polaroids(&self)    -> &PolaroidLayout  { &self.polaroids }
    pub fn star(&self)         -> StarPose         { self.star_pose }
    pub fn letter(&self)       -> LetterPose       { self.letter_pose }
    pub fn snow(&self)         -> &SnowField       { &self.snow }
    pub fn elapsed(&self)      -> f32              { self.elapsed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use scene_mode::InteractionMode;

    const W: usize = 1000;
    const H: usize = 700;

    fn scene() -> Scene { Scene::new(500, 42, Smoothing::PerFrame) }

    #[test]
    fn centre_of_screen_hits_tree() {
        let s = scene();
        assert_eq!(s.pick(W as f32 / 2.0, H as f32 * 0.6, W, H), Some(Pick::Tree));
    }

    #[test]
    fn snow_falls_and_some_is_visible() {
        let mut s = scene();
        let session = InteractionSession::default();
        assert_eq!(s.snow().flakes().len(), DEFAULT_FLAKES);
        let eye = s.camera.position();
        let before: Vec<f32> = s.snow().poses(s.elapsed(), eye).map(|p| p.position.y).collect();
        s.tick(&session, 0.1);
        let after: Vec<f32> = s.snow().poses(s.elapsed(), eye).map(|p| p.position.y).collect();
        assert!(before.iter().zip(&after).filter(|(b, a)| a < b).count() > DEFAULT_FLAKES / 2);
        assert!(s.snow().poses(s.elapsed(), eye).any(|p| p.alpha > 0.0
            && s.camera.project(p.position, W, H).is_some()));
    }

    #[test]
    fn corners_miss() {
        let s = scene();
        assert_eq!(s.pick(5.0, 5.0, W, H), None);
        assert_eq!(s.pick(W as f32 - 5.0, H as f32 - 5.0, W, H), None);
    }

    #[test]
    fn letter_is_clickable_where_it_is_drawn() {
        let s = scene();
        let lp = s.letter().body;
        let p = s.camera.project(to_world(lp.position), W, H).unwrap();
        assert_eq!(s.pick(p.x, p.y, W, H), Some(Pick::Letter));
    }

    #[test]
    fn tick_follows_session_progress() {
        let mut s = scene();
        let mut session = InteractionSession::default();
        session.click_tree(Instant::now()).unwrap();
        assert_eq!(session.mode(), InteractionMode::Unleashed);
        for _ in 0..300 {
            session.render_tick(1.0 / 60.0);
            s.tick(&session, 1.0 / 60.0);
        }
        let p = &s.foliage().particles()[3];
        assert!(s.needles()[3].distance(p.chaos) < 1e-2);
        assert_eq!(s.needles().len(), 500);
    }

    #[test]
    fn camera_turns_only_in_tree() {
        let mut s = scene();
        let session = InteractionSession::default();
        s.tick(&session, 1.0);
        assert!(s.camera.yaw > 0.0);
    }
}
