use crate::math::{Ray, V3};

/// Distance along a ray below which an intersection is rejected. Prevents
/// "shadow acne" self-intersection on rays scattered from a surface.
pub const T_MIN: f32 = 0.001;

/// A sphere primitive: center + radius.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub center: V3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: V3, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        Self { center, radius }
    }

    pub fn bounding_box(&self) -> Aabb {
        let r = V3::new(self.radius, self.radius, self.radius);
        Aabb::new(self.center - r, self.center + r)
    }
}

/// An infinite plane: unit normal + offset, satisfying `dot(p, normal) = offset`
/// for every point `p` on the plane.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub normal: V3,
    pub offset: f32,
}

impl Plane {
    pub fn new(normal: V3, offset: f32) -> Self {
        Self {
            normal: normal.normalized(),
            offset,
        }
    }
}

/// Analytic sphere intersection: solves `|o + t*d - c|^2 = r^2` for the
/// normalized ray direction (so `a = 1`). Returns the nearest forward root
/// greater than `t_min`, or `None`.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere, t_min: f32, t_max: f32) -> Option<f32> {
    let oc = ray.origin - sphere.center;
    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.length_squared() - sphere.radius * sphere.radius;
    let discriminant = b * b - 4.0 * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = (-b - sqrt_d) / 2.0;
    if near > t_min && near < t_max {
        return Some(near);
    }
    let far = (-b + sqrt_d) / 2.0;
    if far > t_min && far < t_max {
        return Some(far);
    }
    None
}

/// Linear plane intersection: `t = (d - dot(n, o)) / dot(dir, n)`. A
/// denominator of zero means the ray is parallel to the plane.
pub fn intersect_plane(ray: &Ray, plane: &Plane, t_min: f32, t_max: f32) -> Option<f32> {
    let denom = ray.direction.dot(plane.normal);
    if denom.abs() < 1e-8 {
        return None;
    }
    let t = (plane.offset - plane.normal.dot(ray.origin)) / denom;
    if t > t_min && t < t_max {
        Some(t)
    } else {
        None
    }
}

/// An axis-aligned bounding box, represented by its min/max corners (the
/// spec's center+half-extent form is an equivalent representation — see
/// `center`/`half_extents` below).
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: V3,
    pub max: V3,
}

impl Aabb {
    pub const fn new(min: V3, max: V3) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> V3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> V3 {
        (self.max - self.min) * 0.5
    }

    /// Slab-method ray-AABB intersection. Returns `true` if the ray hits the
    /// box within `[t_min, t_max]`. Division by a zero direction component
    /// yields `+-inf`, which the min/max/swap sequence handles correctly
    /// without a special case.
    pub fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> bool {
        let mut t_min = t_min;
        let mut t_max = t_max;
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t0.max(t_min);
            t_max = t1.min(t_max);
            if t_max <= t_min {
                return false;
            }
        }
        t_max > 0.0
    }

    /// The union of two AABBs: per-axis max of the upper bounds, per-axis
    /// min of the lower bounds. (The original C++ source's `bounding_box`
    /// helper has a copy-paste bug that reads `rect2.top()` for both
    /// operands; this is the corrected version per spec Design Note §9.)
    pub fn union(a: &Aabb, b: &Aabb) -> Aabb {
        let min = V3::new(
            a.min.x.min(b.min.x),
            a.min.y.min(b.min.y),
            a.min.z.min(b.min.z),
        );
        let max = V3::new(
            a.max.x.max(b.max.x),
            a.max.y.max(b.max.y),
            a.max.z.max(b.max.z),
        );
        Aabb::new(min, max)
    }

    pub fn longest_axis(&self) -> usize {
        let d = self.max - self.min;
        if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        }
    }
}
