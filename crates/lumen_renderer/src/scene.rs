//! Scene aggregate and the parallel render loop.
//!
//! A `Scene` owns its primitives, a camera and the render settings. It is
//! built once, then rendered from shared references: workers only touch
//! their own band of the output buffer and the atomic progress counter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::band::{generate_bands, render_band, rows_per_band};
use crate::renderer::ray_color;
use crate::{Camera, Color, HitRecord, Hittable, HittableList, Ray, RenderConfig, RenderError};
use lumen_math::Interval;

/// Snapshot of render progress in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Completion as a fraction in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f32 / self.total as f32
        }
    }
}

/// A renderable scene.
pub struct Scene {
    objects: HittableList,
    camera: Camera,
    config: RenderConfig,
    pixels_done: AtomicUsize,
}

impl Scene {
    /// Create an empty scene with a default camera for the given resolution.
    pub fn new(width: u32, height: u32, max_depth: u32, samples_per_pixel: u32) -> Self {
        Self::with_config(RenderConfig::new(width, height, max_depth, samples_per_pixel))
    }

    /// Create an empty scene from a full render configuration.
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            objects: HittableList::new(),
            camera: Camera::new(config.width, config.height),
            config,
            pixels_done: AtomicUsize::new(0),
        }
    }

    /// Set the base seed for the per-worker random generators.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the number of parallel workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = Some(workers);
        self
    }

    /// Replace the default camera.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// Add a primitive. Insertion order decides which object wins exact ties.
    pub fn add<H: Hittable + 'static>(&mut self, object: H) {
        self.objects.add(Box::new(object));
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Pixels finished by the current (or last) render.
    pub fn pixels_done(&self) -> usize {
        self.pixels_done.load(Ordering::Relaxed)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            done: self.pixels_done(),
            total: self.config.pixel_count(),
        }
    }

    /// Color seen along `ray` with `depth` bounces left.
    pub fn ray_color(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        ray_color(ray, self, depth, rng)
    }

    /// Render the image.
    ///
    /// Returns `width * height` linear colors, row-major, top row first.
    /// The output is reproducible for a given seed and worker count.
    pub fn render(&self) -> Result<Vec<Color>, RenderError> {
        self.render_with_progress(|_| {})
    }

    /// Render the image, calling `on_progress` after every finished row.
    pub fn render_with_progress<P>(&self, on_progress: P) -> Result<Vec<Color>, RenderError>
    where
        P: Fn(Progress) + Sync,
    {
        let seed = self.config.seed;
        self.render_with(
            |worker| StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
            on_progress,
        )
    }

    /// Render with a caller-supplied random source per worker.
    ///
    /// `make_rng(k)` builds the generator for band `k`; bands are assigned
    /// statically, so output depends only on the generators, never on
    /// thread timing.
    pub fn render_with<R, F, P>(&self, make_rng: F, on_progress: P) -> Result<Vec<Color>, RenderError>
    where
        R: RngCore,
        F: Fn(usize) -> R + Sync,
        P: Fn(Progress) + Sync,
    {
        self.config.validate()?;

        let workers = self.config.worker_count();
        let width = self.config.width;
        let height = self.config.height;
        let total = self.config.pixel_count();

        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
        let bands = generate_bands(height, workers);
        let band_len = rows_per_band(height, workers) as usize * width as usize;
        log::debug!("Split {} rows into {} bands", height, bands.len());

        let mut pixels = vec![Color::ZERO; total];
        self.pixels_done.store(0, Ordering::Relaxed);

        log::info!(
            "Rendering {}x{} @ {} spp, depth {}, with {} threads",
            width,
            height,
            self.config.samples_per_pixel,
            self.config.max_depth,
            workers
        );
        let start = Instant::now();

        pool.install(|| {
            bands
                .par_iter()
                .zip(pixels.par_chunks_mut(band_len))
                .for_each(|(band, out)| {
                    let mut rng = make_rng(band.index);
                    render_band(band, &self.camera, self, &self.config, &mut rng, out, |row_pixels| {
                        let done = self.pixels_done.fetch_add(row_pixels, Ordering::Relaxed) + row_pixels;
                        on_progress(Progress { done, total });
                    });
                });
        });

        log::info!("Render time: {:.2?}", start.elapsed());
        Ok(pixels)
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        self.objects.hit(ray, ray_t)
    }
}
