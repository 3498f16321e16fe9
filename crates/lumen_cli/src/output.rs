//! Image serialization for rendered pixel buffers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{ensure, Context, Result};
use lumen_renderer::{color_to_rgb8, Color};

/// Save a row-major, top-to-bottom pixel buffer.
///
/// The format follows the extension: `.png` goes through the `image` crate,
/// everything else is written as ASCII PPM.
pub fn save_image(path: &Path, width: u32, height: u32, pixels: &[Color]) -> Result<()> {
    ensure!(
        pixels.len() == width as usize * height as usize,
        "Pixel buffer holds {} colors, expected {}x{}",
        pixels.len(),
        width,
        height
    );

    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        save_png(path, width, height, pixels)
    } else {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_ppm(&mut writer, width, height, pixels)?;
        writer.flush()?;
        Ok(())
    }
}

/// Write ASCII PPM (P3).
pub fn write_ppm<W: Write>(writer: &mut W, width: u32, height: u32, pixels: &[Color]) -> Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for color in pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

fn save_png(path: &Path, width: u32, height: u32, pixels: &[Color]) -> Result<()> {
    let bytes: Vec<u8> = pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect();
    let buffer = image::RgbImage::from_raw(width, height, bytes)
        .context("Pixel buffer does not match image size")?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
