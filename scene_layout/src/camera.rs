//! Orbit camera looking at the world origin.

use scene_mode::InteractionMode;

use crate::vec3::Vec3;

pub const DEFAULT_DISTANCE: f32 = 35.0;
pub const DEFAULT_FOV_Y:    f32 = 50.0 * std::f32::consts::PI / 180.0;
/// Radians per second while the tree is on display.
pub const AUTO_ROTATE_SPEED: f32 = std::f32::consts::TAU / 120.0;
const NEAR: f32 = 0.1;
const MAX_PITCH: f32 = 1.3;

/// A point mapped to the framebuffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x:     f32,
    pub y:     f32,
    /// Distance along the view axis.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub yaw:      f32,
    pub pitch:    f32,
    pub fov_y:    f32,
}

impl Default for Camera {
    fn default() -> Self {
        Camera { distance: DEFAULT_DISTANCE, yaw: 0.0, pitch: 0.0, fov_y: DEFAULT_FOV_Y }
    }
}

impl Camera {
    pub fn position(&self) -> Vec3 {
        let c = self.pitch.cos() * self.distance;
        Vec3::new(c * self.yaw.sin(), self.pitch.sin() * self.distance, c * self.yaw.cos())
    }

    pub fn forward(&self) -> Vec3 { (-self.position()).normalized() }

    pub fn right(&self) -> Vec3 { self.forward().cross(Vec3::UP).normalized() }

    pub fn up(&self) -> Vec3 { self.right().cross(self.forward()) }

    /// Horizontal heading of the view direction, `atan2(fwd.x, fwd.z)`.
    pub fn heading(&self) -> f32 {
        let f = self.forward();
        f.x.atan2(f.z)
    }

    /// World point `ahead` units along the view axis and `below` units down
    /// in camera space.
    pub fn point_ahead(&self, ahead: f32, below: f32) -> Vec3 {
        self.position() + self.forward() * ahead - self.up() * below
    }

    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Slow turntable while the tree is formed.
    pub fn auto_rotate(&mut self, mode: InteractionMode, dt: f32) {
        if mode == InteractionMode::Tree {
            self.yaw += AUTO_ROTATE_SPEED * dt;
        }
    }

    pub fn project(&self, p: Vec3, width: usize, height: usize) -> Option<Projected> {
        let rel = p - self.position();
        let depth = rel.dot(self.forward());
        if depth <= NEAR || width == 0 || height == 0 {
            return None;
        }
        let f = 1.0 / (self.fov_y * 0.5).tan();
        let aspect = width as f32 / height as f32;
        let ndc_x = rel.dot(self.right()) * f / (depth * aspect);
        let ndc_y = rel.dot(self.up()) * f / depth;
        Some(Projected {
            x:     (ndc_x + 1.0) * 0.5 * width as f32,
            y:     (1.0 - ndc_y) * 0.5 * height as f32,
            depth,
            scale: f * height as f32 * 0.5 / depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_looks_down_negative_z() {
        let cam = Camera::default();
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 35.0));
        let f = cam.forward();
        assert!((f.z + 1.0).abs() < 1e-6);
        assert!((cam.up().y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn origin_projects_to_centre() {
        let p = Camera::default().project(Vec3::ZERO, 800, 600).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
        assert!((p.depth - 35.0).abs() < 1e-4);
    }

    #[test]
    fn behind_camera_is_culled() {
        assert!(Camera::default().project(Vec3::new(0.0, 0.0, 40.0), 800, 600).is_none());
    }

    #[test]
    fn up_is_up_on_screen() {
        let cam = Camera::default();
        let hi = cam.project(Vec3::new(0.0, 5.0, 0.0), 800, 600).unwrap();
        assert!(hi.y < 300.0);
    }

    #[test]
    fn auto_rotates_only_in_tree() {
        let mut cam = Camera::default();
        cam.auto_rotate(InteractionMode::Carousel, 1.0);
        assert_eq!(cam.yaw, 0.0);
        cam.auto_rotate(InteractionMode::Tree, 1.0);
        assert!(cam.yaw > 0.0);
    }

    #[test]
    fn point_ahead_sits_on_view_axis() {
        let cam = Camera::default();
        let p = cam.point_ahead(10.0, 2.5);
        assert!((p.z - 25.0).abs() < 1e-4);
        assert!((p.y + 2.5).abs() < 1e-4);
    }
}
