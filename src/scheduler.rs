use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::bvh::Bvh;
use crate::camera::Camera;
use crate::integrator::{render_pixel, RenderSettings};
use crate::math::V4;
use crate::sampler::Sampler;
use crate::scene::World;

/// The output image: a flat, row-major pixel buffer written top-to-bottom,
/// left-to-right to match the BMP encoder's expected layout.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<V4>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![V4::zero(); (width * height) as usize],
        }
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: V4) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> V4 {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// A rectangular, half-open pixel region `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

fn partition_tiles(width: u32, height: u32, tile_size: u32) -> VecDeque<Tile> {
    let mut tiles = VecDeque::new();
    let mut y0 = 0;
    while y0 < height {
        let y1 = (y0 + tile_size).min(height);
        let mut x0 = 0;
        while x0 < width {
            let x1 = (x0 + tile_size).min(width);
            tiles.push_back(Tile { x0, y0, x1, y1 });
            x0 = x1;
        }
        y0 = y1;
    }
    tiles
}

/// A progress bar reporting render throughput to stderr, adapted from the
/// single-threaded renderer's design for a tile-parallel worker pool: ticks
/// are driven by a shared atomic counter instead of a single owning loop.
struct ProgressBar {
    total: u32,
    last_pct: u32,
    start: std::time::Instant,
}

impl ProgressBar {
    fn new(total: u32) -> Self {
        Self {
            total,
            last_pct: 0,
            start: std::time::Instant::now(),
        }
    }

    fn report(&mut self, done: u32) {
        if self.total == 0 {
            return;
        }
        let pct = done * 100 / self.total;
        if pct != self.last_pct {
            let elapsed = self.start.elapsed().as_secs_f64();
            let bar_width = 24;
            let filled = (pct as usize * bar_width) / 100;
            let empty = bar_width - filled;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(empty));
            eprint!("\r  Rendering: │{bar}│ {pct:3}%  {:.1}s   ", elapsed);
            self.last_pct = pct;
        }
    }

    fn finish(&self) {
        let elapsed = self.start.elapsed().as_secs_f64();
        let bar = "█".repeat(24);
        eprintln!("\r  Rendering: │{bar}│ 100%  {:.2}s       ", elapsed);
    }
}

/// Renders the whole image by partitioning it into tiles and handing them
/// out from a shared queue to a scoped pool of worker threads. Each worker
/// owns its own `Sampler` (seeded independently) and writes into a
/// thread-local buffer, blitting into the shared framebuffer only while
/// holding a brief lock — tiles never overlap, so the lock only protects
/// the blit, not the render work itself.
pub fn render(
    world: &World,
    bvh: &Bvh,
    camera: &Camera,
    settings: &RenderSettings,
) -> Framebuffer {
    let framebuffer = Mutex::new(Framebuffer::new(settings.image_width, settings.image_height));
    let tiles = Mutex::new(partition_tiles(
        settings.image_width,
        settings.image_height,
        settings.tile_size,
    ));
    let tile_count = tiles.lock().unwrap().len() as u32;
    let completed = AtomicU32::new(0);
    let progress = Mutex::new(ProgressBar::new(tile_count));

    log::debug!(
        "dispatching {} tiles across {} workers",
        tile_count,
        settings.worker_count.max(1)
    );

    std::thread::scope(|scope| {
        for worker in 0..settings.worker_count.max(1) {
            let tiles = &tiles;
            let framebuffer = &framebuffer;
            let completed = &completed;
            let progress = &progress;
            scope.spawn(move || {
                let mut sampler = Sampler::seeded(0x9E3779B97F4A7C15 ^ worker as u64);
                loop {
                    let tile = match tiles.lock().unwrap().pop_front() {
                        Some(tile) => tile,
                        None => break,
                    };
                    let width = tile.x1 - tile.x0;
                    let height = tile.y1 - tile.y0;
                    let mut local = vec![V4::zero(); (width * height) as usize];
                    for y in tile.y0..tile.y1 {
                        for x in tile.x0..tile.x1 {
                            let color =
                                render_pixel(x, y, camera, world, bvh, settings, &mut sampler);
                            local[((y - tile.y0) * width + (x - tile.x0)) as usize] = color;
                        }
                    }

                    let mut fb = framebuffer.lock().unwrap();
                    for y in tile.y0..tile.y1 {
                        for x in tile.x0..tile.x1 {
                            fb.set(
                                x,
                                y,
                                local[((y - tile.y0) * width + (x - tile.x0)) as usize],
                            );
                        }
                    }
                    drop(fb);

                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    log::trace!(
                        "worker {} finished tile ({}, {})-({}, {})",
                        worker,
                        tile.x0,
                        tile.y0,
                        tile.x1,
                        tile.y1
                    );
                    progress.lock().unwrap().report(done);
                }
            });
        }
    });

    progress.lock().unwrap().finish();
    log::debug!("all {} tiles complete", tile_count);
    framebuffer.into_inner().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_tiles_covers_every_pixel_exactly_once() {
        let tiles = partition_tiles(70, 50, 32);
        let mut covered = vec![0u32; (70 * 50) as usize];
        for tile in &tiles {
            for y in tile.y0..tile.y1 {
                for x in tile.x0..tile.x1 {
                    covered[(y * 70 + x) as usize] += 1;
                }
            }
        }
        assert!(covered.iter().all(|&c| c == 1));
    }

    #[test]
    fn partition_tiles_handles_exact_multiples() {
        let tiles = partition_tiles(64, 64, 32);
        assert_eq!(tiles.len(), 4);
    }

    #[test]
    fn render_produces_full_image_with_no_gaps() {
        let world = World::new();
        let bvh = Bvh::build(world.spheres(), 0.0, 0.0, &mut Sampler::seeded(1));
        let camera = Camera::new(
            crate::math::V3::new(0.0, 0.0, 3.0),
            crate::math::V3::zero(),
            crate::math::V3::unit_y(),
            40.0,
            1.0,
        );
        let settings = RenderSettings {
            image_width: 16,
            image_height: 16,
            samples_per_pixel: 2,
            max_bounces: 2,
            tile_size: 7,
            worker_count: 3,
        };
        let fb = render(&world, &bvh, &camera, &settings);
        assert_eq!(fb.pixels.len(), 256);
        // Empty-world sky should never leave a pixel at default-initialized black.
        assert!(fb.get(8, 8) != V4::zero());
    }
}
