use crate::sampler::Sampler;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub};

/// A 3-component vector used for positions and directions throughout the
/// ray tracer. All core geometry runs in single precision, per the data
/// model: BVH traversal, intersection math, and shading all operate on
/// `f32`.
///
/// Implements the standard arithmetic operations via operator overloading,
/// plus the geometric utilities (dot, cross, reflect, refract) needed for
/// physically-based light transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct V3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl V3 {
    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    #[inline(always)]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline(always)]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector. Debug-asserts on (near-)zero-length input
    /// rather than silently returning garbage — normalizing a zero vector
    /// is a programmer error, not a recoverable numerical edge case.
    #[inline(always)]
    pub fn normalized(self) -> Self {
        let len = self.length();
        debug_assert!(len > 1e-12, "attempted to normalize a zero-length vector");
        self / len
    }

    #[inline(always)]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline(always)]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Componentwise (Hadamard) product.
    #[inline(always)]
    pub fn hadamard(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }

    /// Specular reflection of `self` about surface normal `n`: I - 2*dot(I,N)*N.
    #[inline(always)]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * 2.0 * self.dot(normal)
    }

    /// Snell's-law refraction. `eta_ratio` is n_incident / n_transmitted.
    /// Returns `None` on total internal reflection (negative discriminant).
    #[inline]
    pub fn refract(self, normal: Self, eta_ratio: f32) -> Option<Self> {
        let cos_theta = (-self).dot(normal).min(1.0);
        let r_perp = (self + normal * cos_theta) * eta_ratio;
        let discriminant = 1.0 - r_perp.length_squared();
        if discriminant < 0.0 {
            return None;
        }
        let r_parallel = normal * -(discriminant.sqrt());
        Some(r_perp + r_parallel)
    }

    /// True when every component's magnitude is below 1e-8 — used to catch
    /// degenerate Lambertian scatter directions before they propagate NaNs.
    #[inline(always)]
    pub fn near_zero(self) -> bool {
        const EPS: f32 = 1e-8;
        self.x.abs() < EPS && self.y.abs() < EPS && self.z.abs() < EPS
    }

    /// Uniformly distributed point inside the unit sphere, via rejection
    /// sampling in the enclosing cube.
    pub fn random_in_unit_sphere(sampler: &mut Sampler) -> Self {
        loop {
            let v = Self::new(
                sampler.range(-1.0, 1.0),
                sampler.range(-1.0, 1.0),
                sampler.range(-1.0, 1.0),
            );
            if v.length_squared() <= 1.0 {
                return v;
            }
        }
    }

    pub fn random_unit_vector(sampler: &mut Sampler) -> Self {
        Self::random_in_unit_sphere(sampler).normalized()
    }

    /// Uniformly distributed point on the unit disk (z = 0), via rejection
    /// sampling — used by the camera to jitter the lens for depth of field.
    pub fn random_in_unit_disk(sampler: &mut Sampler) -> Self {
        loop {
            let v = Self::new(sampler.range(-1.0, 1.0), sampler.range(-1.0, 1.0), 0.0);
            if v.x * v.x + v.y * v.y <= 1.0 {
                return v;
            }
        }
    }
}

impl fmt::Display for V3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl Neg for V3 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for V3 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for V3 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for V3 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for V3 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, t: f32) -> Self {
        Self::new(self.x * t, self.y * t, self.z * t)
    }
}

impl Mul<V3> for f32 {
    type Output = V3;
    #[inline(always)]
    fn mul(self, v: V3) -> V3 {
        v * self
    }
}

impl MulAssign<f32> for V3 {
    #[inline(always)]
    fn mul_assign(&mut self, t: f32) {
        self.x *= t;
        self.y *= t;
        self.z *= t;
    }
}

impl Div<f32> for V3 {
    type Output = Self;
    #[inline(always)]
    fn div(self, t: f32) -> Self {
        let inv = 1.0 / t;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl DivAssign<f32> for V3 {
    #[inline(always)]
    fn div_assign(&mut self, t: f32) {
        let inv = 1.0 / t;
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
    }
}

impl Index<usize> for V3 {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("V3 index out of bounds: {i}"),
        }
    }
}

// ─── Color ──────────────────────────────────────────────────────────────────

/// A 4-component (r, g, b, a) color. Kept distinct from `V3` because
/// attenuation and radiance carry an alpha channel that geometry never
/// needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct V4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl V4 {
    #[inline(always)]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline(always)]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Componentwise (Hadamard) product — color modulation by attenuation.
    #[inline(always)]
    pub fn hadamard(self, rhs: Self) -> Self {
        Self::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
            self.a * rhs.a,
        )
    }

    /// Componentwise linear interpolation: self*(1-t) + other*t.
    #[inline(always)]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }

    #[inline(always)]
    pub fn saturate(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Applies the gamma-2 curve (sqrt per channel) described in §6/GLOSSARY.
    #[inline(always)]
    pub fn gamma_correct(self) -> Self {
        Self::new(
            self.r.max(0.0).sqrt(),
            self.g.max(0.0).sqrt(),
            self.b.max(0.0).sqrt(),
            self.a,
        )
    }

    /// Quantizes a saturated color to 8-bit per channel.
    #[inline(always)]
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.saturate();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }
}

impl Add for V4 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

impl AddAssign for V4 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
        self.a += rhs.a;
    }
}

impl Mul<f32> for V4 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, t: f32) -> Self {
        Self::new(self.r * t, self.g * t, self.b * t, self.a * t)
    }
}

impl Div<f32> for V4 {
    type Output = Self;
    #[inline(always)]
    fn div(self, t: f32) -> Self {
        self * (1.0 / t)
    }
}

// ─── Ray ────────────────────────────────────────────────────────────────────

/// A parametric ray R(t) = origin + t*direction. The constructor normalizes
/// `direction`, so every `Ray` in the system satisfies the invariant
/// `|length(dir) - 1| < 1e-5` by construction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: V3,
    pub direction: V3,
}

impl Ray {
    #[inline]
    pub fn new(origin: V3, direction: V3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    #[inline(always)]
    pub fn at(self, t: f32) -> V3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Sampler;

    #[test]
    fn ray_direction_is_normalized() {
        let ray = Ray::new(V3::zero(), V3::new(3.0, 4.0, 0.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn reflect_is_involutive() {
        let n = V3::unit_y();
        let d = V3::new(1.0, -1.0, 0.0).normalized();
        let once = d.reflect(n);
        let twice = once.reflect(n);
        assert!((twice - d).length() < 1e-5);
    }

    #[test]
    fn hadamard_product_is_componentwise() {
        let a = V4::new(0.5, 0.25, 1.0, 1.0);
        let b = V4::new(2.0, 4.0, 0.0, 1.0);
        let c = a.hadamard(b);
        assert_eq!(c, V4::new(1.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn near_zero_detects_degenerate_vectors() {
        assert!(V3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!V3::new(0.1, 0.0, 0.0).near_zero());
    }

    #[test]
    fn random_in_unit_disk_stays_within_radius() {
        let mut sampler = Sampler::seeded(42);
        for _ in 0..256 {
            let p = V3::random_in_unit_disk(&mut sampler);
            assert_eq!(p.z, 0.0);
            assert!(p.x * p.x + p.y * p.y <= 1.0);
        }
    }
}
