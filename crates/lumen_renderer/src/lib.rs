//! Lumen renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for scenes of spheres and planes with a
//! roughness-blended diffuse/mirror material. Rendering splits the image
//! into row bands that run in parallel on a rayon thread pool, each band
//! with its own seeded random generator.
//!
//! ```ignore
//! use lumen_renderer::{Color, Glossy, Plane, Scene, Sphere, Vec3};
//!
//! let mut scene = Scene::new(320, 180, 5, 64);
//! scene.add(Sphere::new(Vec3::new(0.0, 0.5, -1.0), 0.5, Glossy::diffuse(Color::splat(0.5))));
//! scene.add(Plane::new(Vec3::ZERO, Vec3::Y, Glossy::default()));
//! let pixels = scene.render()?;
//! ```

mod band;
mod camera;
mod error;
mod hittable;
mod material;
mod plane;
mod renderer;
mod scene;
mod sphere;

pub use band::{generate_bands, render_band, RowBand};
pub use camera::{Camera, DEFAULT_FOCAL_LENGTH, DEFAULT_ORIGIN};
pub use error::RenderError;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{random_unit_vector, Glossy, Material, ScatterResult};
pub use plane::Plane;
pub use renderer::{color_to_rgb8, linear_to_gamma, ray_color, render_pixel, sky_gradient, RenderConfig};
pub use scene::{Progress, Scene};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Color, Interval, Point3, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform float in [0, 1).
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}
