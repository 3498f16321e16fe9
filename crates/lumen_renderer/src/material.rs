//! Material trait for surface scattering.

use crate::{gen_f32, hittable::HitRecord, Ray};
use lumen_math::{mix, reflect, Color, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

/// Outgoing ray and color weight produced by a scatter event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and the scattered ray, or `None` if the ray
    /// is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

/// Surface that blends a mirror and a diffuse lobe by roughness.
///
/// - `roughness <= 0`: perfect mirror
/// - `roughness >= 1`: Lambertian-style diffuse
/// - anything between: the mirror and diffuse directions are lerped by
///   roughness and renormalized
///
/// Attenuation is always the albedo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glossy {
    pub albedo: Color,
    pub roughness: f32,
}

impl Glossy {
    /// Create a new material with the given albedo and roughness.
    ///
    /// Roughness is not clamped; values outside [0, 1] select the nearest
    /// pure lobe.
    pub fn new(albedo: Color, roughness: f32) -> Self {
        Self { albedo, roughness }
    }

    /// Fully diffuse surface.
    pub fn diffuse(albedo: Color) -> Self {
        Self::new(albedo, 1.0)
    }

    /// Perfect mirror.
    pub fn mirror(albedo: Color) -> Self {
        Self::new(albedo, 0.0)
    }
}

impl Default for Glossy {
    fn default() -> Self {
        Self::diffuse(Color::ONE)
    }
}

impl Material for Glossy {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);

        let scatter_direction = if self.roughness <= 0.0 {
            reflected
        } else if self.roughness >= 1.0 {
            diffuse_direction(rec.normal, rng)
        } else {
            mix(reflected, diffuse_direction(rec.normal, rng), self.roughness).normalize()
        };

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Normal plus a random unit vector, falling back to the normal when the sum
/// nearly cancels out.
#[inline]
fn diffuse_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let direction = normal + random_unit_vector(rng);
    if direction.length_squared() < 0.001 {
        normal
    } else {
        direction
    }
}

/// Generate a uniformly distributed unit vector on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let z = gen_f32(rng) * 2.0 - 1.0;
    let a = gen_f32(rng) * 2.0 * PI;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * a.cos(), r * a.sin(), z)
}
