use crate::math::{Ray, V3};
use crate::sampler::Sampler;

/// A thin-lens camera with a top-left-origin image plane: pixel `(0, 0)` is
/// the top-left corner, `u` grows right and `v` grows down, matching the
/// framebuffer's row-major, top-to-bottom pixel order (§4.5/§6).
///
/// Depth of field is simulated by jittering the ray origin across a disk of
/// radius `aperture / 2` centered at the camera position while keeping the
/// point on the focal plane fixed, exactly as the teacher's lens-radius
/// model does, generalized to the top-left basis.
pub struct Camera {
    pub position: V3,
    pub forward: V3,
    pub right: V3,
    pub up: V3,
    pub fov_deg: f32,
    pub aspect: f32,
    pub aperture: f32,
    pub focus_distance: f32,
}

impl Camera {
    /// Builds the camera's orthonormal basis from a look-at point:
    ///   forward = normalize(look_at - pos)
    ///   right   = normalize(forward x vup)
    ///   up      = right x forward
    pub fn new(position: V3, look_at: V3, vup: V3, fov_deg: f32, aspect: f32) -> Self {
        let forward = (look_at - position).normalized();
        let right = forward.cross(vup).normalized();
        let up = right.cross(forward);
        Self {
            position,
            forward,
            right,
            up,
            fov_deg,
            aspect,
            aperture: 0.0,
            focus_distance: (look_at - position).length(),
        }
    }

    /// Re-aims the camera at a new target point, keeping position and lens
    /// settings fixed and rebuilding the orthonormal basis.
    pub fn set_target(&mut self, target: V3) {
        let vup = self.up;
        self.forward = (target - self.position).normalized();
        self.right = self.forward.cross(vup).normalized();
        self.up = self.right.cross(self.forward);
    }

    pub fn set_lens(&mut self, aperture: f32, focus_distance: f32) {
        self.aperture = aperture;
        self.focus_distance = focus_distance;
    }

    fn half_height(&self) -> f32 {
        (self.fov_deg.to_radians() / 2.0).tan() * self.focus_distance
    }

    /// Generates a primary ray through normalized image-plane coordinates
    /// `(u, v)` in `[0, 1]x[0, 1]`, `(0, 0)` at the top-left corner.
    pub fn get_ray(&self, u: f32, v: f32, sampler: &mut Sampler) -> Ray {
        let half_height = self.half_height();
        let half_width = self.aspect * half_height;

        let top_left = self.position + self.forward * self.focus_distance
            - self.right * half_width
            + self.up * half_height;
        let target =
            top_left + self.right * (u * 2.0 * half_width) - self.up * (v * 2.0 * half_height);

        let lens = sampler.in_unit_disk() * (self.aperture / 2.0);
        let offset = self.right * lens.x + self.up * lens.y;
        let origin = self.position + offset;
        Ray::new(origin, target - origin)
    }
}
