use std::path::PathBuf;

use clap::Parser;

/// Render a scene of spheres and planes with a CPU path tracer.
#[derive(Debug, Parser)]
#[command(name = "lumen", version, about)]
pub struct Args {
    /// JSON scene description (built-in demo scene when omitted)
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output image; `.png` writes PNG, anything else ASCII PPM
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of render threads
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}
