use rand::Rng;

use crate::camera::Camera;
use crate::integrator::RenderSettings;
use crate::material::Material;
use crate::math::{V3, V4};
use crate::palette;
use crate::scene::World;

/// A complete scene description bundling geometry, camera, and render
/// settings — enough to hand straight to the scheduler.
pub struct SceneDescription {
    pub name: &'static str,
    pub world: World,
    pub camera: Camera,
    pub settings: RenderSettings,
}

/// Available built-in scene presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ScenePreset {
    /// A ground plane with three hero spheres (diffuse, metal, glass) and a
    /// field of small random spheres — the classic showcase arrangement.
    Showcase,
    /// A floor-and-ceiling box with colored walls approximated by planes.
    TwoPlane,
    /// Spheres with velocity, rendered over a wide shutter interval to
    /// exercise motion blur and the BVH's time-swept bounding boxes.
    MotionBlur,
}

impl ScenePreset {
    pub fn build(self) -> Result<SceneDescription, crate::error::WorldError> {
        match self {
            ScenePreset::Showcase => build_showcase(),
            ScenePreset::TwoPlane => build_box(),
            ScenePreset::MotionBlur => build_motion_blur(),
        }
    }
}

fn build_showcase() -> Result<SceneDescription, crate::error::WorldError> {
    let mut world = World::new();
    let mut rng = rand::thread_rng();

    world.add_plane(V3::unit_y(), 0.0, Material::diffuse(palette::GREY))?;

    world.add_sphere(
        V3::new(0.0, 1.0, 0.0),
        1.0,
        Material::dielectric(1.5),
        V3::zero(),
    )?;
    world.add_sphere(
        V3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::diffuse(palette::RED),
        V3::zero(),
    )?;
    world.add_sphere(
        V3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(V4::rgb(0.85, 0.85, 0.9), 0.0),
        V3::zero(),
    )?;

    for a in -6..6 {
        for b in -6..6 {
            let center = V3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );
            if (center - V3::new(4.0, 0.2, 0.0)).length() < 0.9
                || (center - V3::new(-4.0, 0.2, 0.0)).length() < 0.9
                || (center - V3::new(0.0, 0.2, 0.0)).length() < 0.9
            {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            let material = if choose_mat < 0.7 {
                let albedo = V4::rgb(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                Material::diffuse(albedo)
            } else if choose_mat < 0.9 {
                let albedo = V4::rgb(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                );
                Material::metal(albedo, rng.gen_range(0.0..0.3))
            } else {
                Material::dielectric(1.5)
            };
            world.add_sphere(center, 0.2, material, V3::zero())?;
        }
    }

    let mut camera = Camera::new(
        V3::new(13.0, 2.0, 3.0),
        V3::new(0.0, 0.5, 0.0),
        V3::unit_y(),
        20.0,
        2.0,
    );
    camera.set_lens(0.1, 10.0);

    Ok(SceneDescription {
        name: "Showcase",
        world,
        camera,
        settings: RenderSettings {
            image_width: 640,
            image_height: 320,
            ..Default::default()
        },
    })
}

fn build_box() -> Result<SceneDescription, crate::error::WorldError> {
    let mut world = World::new();

    world.add_plane(V3::unit_y(), 0.0, Material::diffuse(palette::SILVER))?;
    world.add_plane(V3::new(0.0, -1.0, 0.0), -4.0, Material::diffuse(palette::SILVER))?;
    world.add_plane(V3::unit_x(), -2.0, Material::diffuse(palette::RED))?;
    world.add_plane(V3::new(-1.0, 0.0, 0.0), -2.0, Material::diffuse(palette::GREEN))?;
    world.add_plane(V3::unit_z(), -4.0, Material::diffuse(palette::WHITE))?;

    world.add_sphere(
        V3::new(-0.7, 0.6, -2.2),
        0.6,
        Material::metal(V4::rgb(0.9, 0.9, 0.95), 0.02),
        V3::zero(),
    )?;
    world.add_sphere(
        V3::new(0.7, 0.45, -1.5),
        0.45,
        Material::dielectric(1.5),
        V3::zero(),
    )?;

    let camera = Camera::new(
        V3::new(0.0, 2.0, 3.5),
        V3::new(0.0, 1.5, -2.0),
        V3::unit_y(),
        50.0,
        1.0,
    );

    Ok(SceneDescription {
        name: "Box",
        world,
        camera,
        settings: RenderSettings {
            image_width: 480,
            image_height: 480,
            ..Default::default()
        },
    })
}

fn build_motion_blur() -> Result<SceneDescription, crate::error::WorldError> {
    let mut world = World::new();
    let mut rng = rand::thread_rng();

    world.add_plane(V3::unit_y(), 0.0, Material::diffuse(palette::GREY))?;
    world.set_shutter(0.0, 1.0)?;

    for a in -4..4 {
        for b in -4..4 {
            let center = V3::new(a as f32 * 1.3, 0.2, b as f32 * 1.3);
            let velocity = V3::new(0.0, rng.gen_range(0.0..1.5), 0.0);
            let albedo = V4::rgb(rng.gen(), rng.gen(), rng.gen());
            world.add_sphere(center, 0.2, Material::diffuse(albedo), velocity)?;
        }
    }

    let camera = Camera::new(
        V3::new(8.0, 3.0, 8.0),
        V3::zero(),
        V3::unit_y(),
        30.0,
        1.5,
    );

    Ok(SceneDescription {
        name: "Motion Blur",
        world,
        camera,
        settings: RenderSettings {
            image_width: 480,
            image_height: 320,
            ..Default::default()
        },
    })
}
