use thiserror::Error;

/// Errors that prevent a render from starting.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image must be at least 2x2 pixels, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Worker count must be at least 1")]
    ZeroWorkers,

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
