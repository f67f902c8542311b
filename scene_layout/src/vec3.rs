use std::ops::{Add, AddAssign, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UP:   Vec3 = Vec3::new(0.0, 1.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self { Vec3 { x, y, z } }

    /// Point from spherical coordinates: `phi` from +y, `theta` around y
    /// starting at +z.
    pub fn from_spherical(radius: f32, phi: f32, theta: f32) -> Self {
        let s = phi.sin() * radius;
        Vec3::new(s * theta.sin(), phi.cos() * radius, s * theta.cos())
    }

    pub fn length(self) -> f32 { self.dot(self).sqrt() }

    pub fn dot(self, o: Vec3) -> f32 { self.x * o.x + self.y * o.y + self.z * o.z }

    pub fn cross(self, o: Vec3) -> Vec3 {
        Vec3::new(
            self.y * o.z - self.z * o.y,
            self.z * o.x - self.x * o.z,
            self.x * o.y - self.y * o.x,
        )
    }

    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len > f32::EPSILON { self * (1.0 / len) } else { Vec3::ZERO }
    }

    pub fn lerp(self, to: Vec3, t: f32) -> Vec3 {
        self + (to - self) * t
    }

    pub fn distance(self, o: Vec3) -> f32 { (self - o).length() }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, o: Vec3) -> Vec3 { Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z) }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, o: Vec3) { *self = *self + o; }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, o: Vec3) -> Vec3 { Vec3::new(self.x - o.x, self.y - o.y, self.z - o.z) }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 { Vec3::new(self.x * s, self.y * s, self.z * s) }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 { Vec3::new(-self.x, -self.y, -self.z) }
}

/// Linear blend of two `0xRRGGBB` colors.
pub fn mix_rgb(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let ch = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t).round() as u32) << shift
    };
    ch(16) | ch(8) | ch(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-1.0, 0.0, 5.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(0.0, 1.0, 4.0));
    }

    #[test]
    fn spherical_radius() {
        let p = Vec3::from_spherical(7.0, 1.1, 2.3);
        assert!((p.length() - 7.0).abs() < 1e-4);
    }

    #[test]
    fn mix_rgb_channels() {
        assert_eq!(mix_rgb(0x000000, 0xFFFFFF, 0.0), 0x000000);
        assert_eq!(mix_rgb(0x000000, 0xFFFFFF, 1.0), 0xFFFFFF);
        assert_eq!(mix_rgb(0xFF0000, 0x0000FF, 0.5), 0x800080);
    }
}
