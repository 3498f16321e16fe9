//! Row-band partitioning for parallel rendering.
//!
//! Divides the image into contiguous bands of rows, one per worker, that
//! can be rendered independently. Bands never overlap, so each one writes
//! its own slice of the output buffer.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, RenderConfig};
use rand::RngCore;

/// A contiguous run of full image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row of the band (row 0 is the top of the image)
    pub y: u32,
    /// Number of rows in the band
    pub height: u32,
    /// Index of this band, also the worker index that seeds its RNG
    pub index: usize,
}

impl RowBand {
    /// Create a new band.
    pub fn new(y: u32, height: u32, index: usize) -> Self {
        Self { y, height, index }
    }

    /// Get the total number of pixels in this band.
    pub fn pixel_count(&self, width: u32) -> usize {
        width as usize * self.height as usize
    }
}

/// Rows per band for a static schedule over `workers` workers.
pub fn rows_per_band(height: u32, workers: usize) -> u32 {
    let workers = workers.max(1) as u32;
    height.div_ceil(workers).max(1)
}

/// Split `height` rows into contiguous bands for `workers` workers.
///
/// Every band except possibly the last has `rows_per_band` rows. When there
/// are more workers than rows, fewer bands than workers are produced.
pub fn generate_bands(height: u32, workers: usize) -> Vec<RowBand> {
    let rows = rows_per_band(height, workers);
    let mut bands = Vec::new();

    let mut y = 0;
    while y < height {
        let band_height = rows.min(height - y);
        bands.push(RowBand::new(y, band_height, bands.len()));
        y += rows;
    }

    bands
}

/// Render a band into `out`, which holds exactly the band's pixels in
/// row-major order.
///
/// `on_row` is called with the pixel count of each finished row.
pub fn render_band(
    band: &RowBand,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    out: &mut [Color],
    mut on_row: impl FnMut(usize),
) {
    debug_assert_eq!(out.len(), band.pixel_count(config.width));

    let width = config.width as usize;
    for (local_y, row) in out.chunks_mut(width).enumerate() {
        let y = band.y + local_y as u32;
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = render_pixel(camera, world, x as u32, y, config, rng);
        }
        on_row(row.len());
    }
}
