use crate::math::{Ray, V3, V4};
use crate::sampler::Sampler;

/// The BRDF model: a closed three-case sum type rather than dynamic
/// dispatch, per spec Design Note §9 ("the faithful rewrite is a sum type
/// ... virtual dispatch is neither required nor desirable on the hot
/// path"). Emission and procedural texturing (the teacher's `Emissive` and
/// `Checkerboard` cases) are out of scope — Non-goals exclude both area
/// lights and texturing.
#[derive(Debug, Clone, Copy)]
pub enum Material {
    Diffuse { attenuation: V4 },
    Metal { attenuation: V4, roughness: f32 },
    Dielectric { ior: f32 },
}

impl Material {
    pub const fn diffuse(color: V4) -> Self {
        Material::Diffuse { attenuation: color }
    }

    pub fn metal(color: V4, roughness: f32) -> Self {
        Material::Metal {
            attenuation: color,
            roughness: roughness.max(0.0),
        }
    }

    pub const fn dielectric(ior: f32) -> Self {
        Material::Dielectric { ior }
    }
}

/// Schlick's approximation to the Fresnel reflectance.
fn schlick_reflectance(cosine: f32, eta_ratio: f32) -> f32 {
    let r0 = ((1.0 - eta_ratio) / (1.0 + eta_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Scatters an incoming ray off a surface hit. Returns `(attenuation,
/// scattered ray)`, or `None` when the material absorbs the ray entirely
/// (a metal reflection that points back into the surface).
///
/// `normal` is the raw geometric normal the intersector produced — outward
/// for spheres, the plane's stored normal for planes. Materials that need
/// to know whether the ray is entering or exiting a volume (only
/// `Dielectric` does) determine that from the sign of `dot(ray.dir,
/// normal)` themselves, rather than relying on a pre-flipped normal.
pub fn scatter(
    material: &Material,
    ray: &Ray,
    point: V3,
    normal: V3,
    sampler: &mut Sampler,
) -> Option<(V4, Ray)> {
    match *material {
        Material::Diffuse { attenuation } => {
            let mut scatter_dir = normal + sampler.unit_vector();
            if scatter_dir.near_zero() {
                scatter_dir = normal;
            }
            Some((attenuation, Ray::new(point, scatter_dir)))
        }
        Material::Metal {
            attenuation,
            roughness,
        } => {
            let reflected = ray.direction.reflect(normal);
            let scattered = reflected + sampler.in_unit_sphere() * roughness;
            if scattered.dot(normal) > 0.0 {
                Some((attenuation, Ray::new(point, scattered)))
            } else {
                None
            }
        }
        Material::Dielectric { ior } => {
            let entering = ray.direction.dot(normal) < 0.0;
            let eta_ratio = if entering { 1.0 / ior } else { ior };

            let cos_theta = (-ray.direction).dot(normal).min(1.0);
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

            let cannot_refract = eta_ratio * sin_theta > 1.0;
            let direction = if cannot_refract
                || schlick_reflectance(cos_theta, eta_ratio) > sampler.uniform01()
            {
                ray.direction.reflect(normal)
            } else {
                ray.direction
                    .refract(normal, eta_ratio)
                    .unwrap_or_else(|| ray.direction.reflect(normal))
            };

            Some((V4::white(), Ray::new(point, direction)))
        }
    }
}
