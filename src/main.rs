//! photon-trace — a multi-threaded Monte Carlo path tracer.
//!
//! Renders a scene to an uncompressed 32-bit BGRA bitmap:
//! BVH-accelerated sphere intersection, linear-scan plane intersection,
//! a three-material (diffuse/metal/dielectric) shading model, and a
//! tile-parallel scheduler spread across a scoped thread pool.

use std::process::ExitCode;

use clap::Parser;
use log::info;

use photon_trace::bmp;
use photon_trace::bvh::Bvh;
use photon_trace::error::CliError;
use photon_trace::presets::ScenePreset;
use photon_trace::sampler::Sampler;
use photon_trace::scheduler;

/// Renders a built-in scene preset to a BMP file.
#[derive(Parser, Debug)]
#[command(
    name = "photon-trace",
    version,
    about = "A multi-threaded Monte Carlo path tracer",
    after_help = "EXAMPLES:\n  \
                  photon-trace out.bmp\n  \
                  photon-trace --scene motion-blur --spp 256 --bounces 16 blur.bmp\n  \
                  photon-trace --scene two-plane --width 800 --height 800 box"
)]
struct Cli {
    /// Output file path. A `.bmp` extension is appended if missing.
    output: Option<String>,

    /// Scene preset to render.
    #[arg(short, long, value_enum, default_value_t = ScenePreset::Showcase)]
    scene: ScenePreset,

    /// Image width in pixels. Defaults to the preset's own resolution.
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Image height in pixels. Defaults to the preset's own resolution.
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Samples per pixel — higher values reduce noise at the cost of time.
    #[arg(long)]
    spp: Option<u32>,

    /// Maximum ray bounce depth.
    #[arg(long)]
    bounces: Option<u32>,

    /// Number of worker threads. Defaults to the available parallelism.
    #[arg(short = 'j', long)]
    workers: Option<usize>,
}

fn run() -> Result<(), CliError> {
    env_logger::init();

    let cli = Cli::parse();
    let Some(output) = cli.output else {
        return Err(CliError::MissingOutputPath);
    };
    let output = if output.ends_with(".bmp") {
        output
    } else {
        format!("{output}.bmp")
    };

    let description = cli
        .scene
        .build()
        .unwrap_or_else(|e| panic!("built-in scene preset failed to build: {e}"));
    let mut settings = description.settings;
    if let Some(w) = cli.width {
        settings.image_width = w;
    }
    if let Some(h) = cli.height {
        settings.image_height = h;
    }
    if let Some(spp) = cli.spp {
        settings.samples_per_pixel = spp;
    }
    if let Some(bounces) = cli.bounces {
        settings.max_bounces = bounces;
    }
    if let Some(workers) = cli.workers {
        settings.worker_count = workers;
    }

    info!(
        "rendering \"{}\" at {}x{}, {} spp, {} bounces, {} workers",
        description.name,
        settings.image_width,
        settings.image_height,
        settings.samples_per_pixel,
        settings.max_bounces,
        settings.worker_count
    );

    let mut bvh_sampler = Sampler::from_entropy();
    let bvh = Bvh::build(
        description.world.spheres(),
        description.world.start_time(),
        description.world.end_time(),
        &mut bvh_sampler,
    );

    let t0 = std::time::Instant::now();
    let framebuffer = scheduler::render(&description.world, &bvh, &description.camera, &settings);
    let elapsed = t0.elapsed();
    info!("render finished in {:.2}s", elapsed.as_secs_f64());

    bmp::write_bgra32(&output, &framebuffer)
        .unwrap_or_else(|e| panic!("failed to write \"{output}\": {e}"));
    info!("wrote {output}");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
