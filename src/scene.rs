use crate::error::WorldError;
use crate::geometry::{Aabb, Plane, Sphere};
use crate::material::Material;
use crate::math::V3;

/// Minimum sphere-list capacity guaranteed by the data model (§3).
pub const DEFAULT_SPHERE_CAPACITY: usize = 4192;
/// Minimum plane-list capacity guaranteed by the data model (§3).
pub const DEFAULT_PLANE_CAPACITY: usize = 64;

/// Opaque handle to a sphere added to a `World`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphereHandle(pub usize);

/// Opaque handle to a plane added to a `World`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneHandle(pub usize);

/// A sphere plus a linear velocity and material. Position at time `t` is
/// `sphere.center + velocity * t` — used for motion blur: a leaf's bounding
/// box is the time-swept box over `[startTime, endTime]`.
#[derive(Debug, Clone, Copy)]
pub struct SphereObject {
    pub sphere: Sphere,
    pub velocity: V3,
    pub material: Material,
}

impl SphereObject {
    /// The sphere's position at the given render time.
    pub fn sphere_at(&self, time: f32) -> Sphere {
        Sphere {
            center: self.sphere.center + self.velocity * time,
            radius: self.sphere.radius,
        }
    }

    /// The AABB enclosing the sphere's positions across `[start, end]`.
    pub fn bounding_box(&self, start: f32, end: f32) -> Aabb {
        if self.velocity.length_squared() == 0.0 {
            return self.sphere.bounding_box();
        }
        Aabb::union(
            &self.sphere_at(start).bounding_box(),
            &self.sphere_at(end).bounding_box(),
        )
    }
}

/// A static plane plus its material. Planes are never placed in the BVH —
/// they are tested with a linear scan alongside BVH traversal (§4.6).
#[derive(Debug, Clone, Copy)]
pub struct PlaneObject {
    pub plane: Plane,
    pub material: Material,
}

/// The scene container: an ordered, append-only list of moving spheres, an
/// ordered list of static planes, and the shutter interval used for motion
/// blur. Read-only once the BVH has been built for a render.
#[derive(Debug, Clone)]
pub struct World {
    spheres: Vec<SphereObject>,
    planes: Vec<PlaneObject>,
    sphere_capacity: usize,
    plane_capacity: usize,
    start_time: f32,
    end_time: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SPHERE_CAPACITY, DEFAULT_PLANE_CAPACITY)
    }

    pub fn with_capacity(sphere_capacity: usize, plane_capacity: usize) -> Self {
        Self {
            spheres: Vec::with_capacity(sphere_capacity),
            planes: Vec::with_capacity(plane_capacity),
            sphere_capacity,
            plane_capacity,
            start_time: 0.0,
            end_time: 0.0,
        }
    }

    /// Adds a moving (or static, with `velocity = V3::zero()`) sphere.
    pub fn add_sphere(
        &mut self,
        center: V3,
        radius: f32,
        material: Material,
        velocity: V3,
    ) -> Result<SphereHandle, WorldError> {
        if radius <= 0.0 {
            return Err(WorldError::NonPositiveRadius { radius });
        }
        if let Material::Dielectric { ior } = material {
            if ior <= 0.0 {
                return Err(WorldError::NonPositiveIor { ior });
            }
        }
        if self.spheres.len() >= self.sphere_capacity {
            return Err(WorldError::SphereCapacityExceeded {
                capacity: self.sphere_capacity,
            });
        }
        let handle = SphereHandle(self.spheres.len());
        self.spheres.push(SphereObject {
            sphere: Sphere::new(center, radius),
            velocity,
            material,
        });
        Ok(handle)
    }

    /// Adds a static plane satisfying `dot(normal, p) = offset`.
    pub fn add_plane(
        &mut self,
        normal: V3,
        offset: f32,
        material: Material,
    ) -> Result<PlaneHandle, WorldError> {
        if self.planes.len() >= self.plane_capacity {
            return Err(WorldError::PlaneCapacityExceeded {
                capacity: self.plane_capacity,
            });
        }
        let handle = PlaneHandle(self.planes.len());
        self.planes.push(PlaneObject {
            plane: Plane::new(normal, offset),
            material,
        });
        Ok(handle)
    }

    /// Sets the shutter interval `[start, end]` across which moving
    /// spheres are sampled.
    pub fn set_shutter(&mut self, start: f32, end: f32) -> Result<(), WorldError> {
        if start > end {
            return Err(WorldError::InvalidShutter { start, end });
        }
        self.start_time = start;
        self.end_time = end;
        Ok(())
    }

    pub fn spheres(&self) -> &[SphereObject] {
        &self.spheres
    }

    pub fn planes(&self) -> &[PlaneObject] {
        &self.planes
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn end_time(&self) -> f32 {
        self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::V4;

    #[test]
    fn add_sphere_rejects_non_positive_radius() {
        let mut world = World::new();
        let err = world
            .add_sphere(V3::zero(), 0.0, Material::diffuse(V4::white()), V3::zero())
            .unwrap_err();
        assert_eq!(err, WorldError::NonPositiveRadius { radius: 0.0 });
    }

    #[test]
    fn add_sphere_enforces_capacity() {
        let mut world = World::with_capacity(2, DEFAULT_PLANE_CAPACITY);
        let mat = Material::diffuse(V4::white());
        world.add_sphere(V3::zero(), 1.0, mat, V3::zero()).unwrap();
        world.add_sphere(V3::zero(), 1.0, mat, V3::zero()).unwrap();
        let err = world
            .add_sphere(V3::zero(), 1.0, mat, V3::zero())
            .unwrap_err();
        assert_eq!(err, WorldError::SphereCapacityExceeded { capacity: 2 });
    }

    #[test]
    fn set_shutter_rejects_inverted_interval() {
        let mut world = World::new();
        let err = world.set_shutter(1.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            WorldError::InvalidShutter {
                start: 1.0,
                end: 0.0
            }
        );
    }

    #[test]
    fn moving_sphere_bounding_box_sweeps_both_endpoints() {
        let object = SphereObject {
            sphere: Sphere::new(V3::zero(), 1.0),
            velocity: V3::new(10.0, 0.0, 0.0),
            material: Material::diffuse(V4::white()),
        };
        let bbox = object.bounding_box(0.0, 1.0);
        assert!(bbox.max.x >= 11.0 - 1e-4);
        assert!(bbox.min.x <= -1.0 + 1e-4);
    }
}
