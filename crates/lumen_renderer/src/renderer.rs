//! Core path tracing routines.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounded bounce budget
//! - Sky gradient background
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction for 8-bit output

use crate::{gen_f32, Camera, Color, Hittable, Ray, RenderError};
use lumen_math::{mix, Interval};
use rand::RngCore;

/// Offset applied to `t_min` so secondary rays do not re-hit their origin.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Base seed; worker `k` draws from `seed + k`
    pub seed: u64,
    /// Worker count, `None` to use the rayon default
    pub workers: Option<usize>,
}

impl RenderConfig {
    pub fn new(width: u32, height: u32, max_depth: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            max_depth,
            samples_per_pixel,
            ..Default::default()
        }
    }

    /// Check the settings before any work is scheduled.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width < 2 || self.height < 2 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if self.workers == Some(0) {
            return Err(RenderError::ZeroWorkers);
        }
        Ok(())
    }

    /// Number of parallel workers the render will use.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(rayon::current_num_threads)
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            max_depth: 5,
            samples_per_pixel: 1000,
            seed: 42,
            workers: None,
        }
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in each albedo.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth - 1, rng)
        }
        // Ray was absorbed
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
///
/// Depends only on the vertical component of the direction.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    mix(white, blue, a)
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are image coordinates with row 0 at the top. Returns the
/// averaged linear color.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let u_scale = (config.width - 1) as f32;
    let v_scale = (config.height - 1) as f32;
    let row_from_bottom = (config.height - 1 - y) as f32;

    for _ in 0..config.samples_per_pixel {
        let u = (x as f32 + gen_f32(rng)) / u_scale;
        let v = (row_from_bottom + gen_f32(rng)) / v_scale;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit sRGB-ish values.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let channel = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Glossy, HittableList, Material, Plane, ScatterResult, Sphere, HitRecord};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Swallows every ray.
    struct Absorber;

    impl Material for Absorber {
        fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
            None
        }
    }

    fn gray_sphere_world() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Glossy::diffuse(Color::new(0.5, 0.5, 0.5)),
        )));
        world.add(Box::new(Plane::new(Vec3::new(0.0, -0.5, 0.0), Vec3::Y, Glossy::default())));
        world
    }

    #[test]
    fn test_sky_gradient() {
        // Ray pointing up should be more blue (less red than white)
        let up_ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let up_color = sky_gradient(&up_ray);

        // Ray pointing down should be white
        let down_ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        let down_color = sky_gradient(&down_ray);

        assert!((up_color - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down_color - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_sky_gradient_ignores_horizontal_direction() {
        let a = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)));
        let b = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, -1.0)));
        assert!((a - b).length() < 1e-6);
    }

    #[test]
    fn test_background_bounds() {
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..1000 {
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if direction.length_squared() < 1e-4 {
                continue;
            }
            let ray = Ray::new(Vec3::ZERO, direction);
            let color = ray_color(&ray, &world, 5, &mut rng);

            // Convex combination of white and (0.5, 0.7, 1.0)
            assert!((0.5 - 1e-6..=1.0 + 1e-6).contains(&color.x));
            assert!((0.7 - 1e-6..=1.0 + 1e-6).contains(&color.y));
            assert!((color.z - 1.0).abs() < 1e-6);
            // Both channels move together along the same blend factor
            assert!(((1.0 - color.x) * 0.6 - (1.0 - color.y)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_depth_zero_is_black() {
        let world = gray_sphere_world();
        let mut rng = StdRng::seed_from_u64(1);

        let hitting = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let missing = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(ray_color(&hitting, &world, 0, &mut rng), Color::ZERO);
        assert_eq!(ray_color(&missing, &world, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_depth_one_hit_is_black() {
        // One bounce budget: the scattered ray has nothing left to gather
        let world = gray_sphere_world();
        let mut rng = StdRng::seed_from_u64(2);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_absorbed_ray_is_black() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, Absorber)));

        let mut rng = StdRng::seed_from_u64(3);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&ray, &world, 10, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_mirror_bounce_sees_attenuated_sky() {
        // Straight down onto a mirror floor, straight back up into the sky
        let tint = Color::new(0.8, 0.6, 0.4);
        let mut world = HittableList::new();
        world.add(Box::new(Plane::new(Vec3::ZERO, Vec3::Y, Glossy::mirror(tint))));

        let mut rng = StdRng::seed_from_u64(4);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let color = ray_color(&ray, &world, 2, &mut rng);

        let expected = tint * Color::new(0.5, 0.7, 1.0);
        assert!((color - expected).length() < 1e-5);
    }

    #[test]
    fn test_radiance_is_finite_and_non_negative() {
        let world = gray_sphere_world();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..500 {
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..0.5),
                rng.gen_range(-1.0..-0.1),
            );
            let ray = Ray::new(Vec3::new(0.0, 0.2, 1.0), direction);
            let color = ray_color(&ray, &world, 50, &mut rng);
            for c in color.to_array() {
                assert!(c.is_finite() && c >= 0.0, "bad channel {c}");
            }
        }
    }

    #[test]
    fn test_render_pixel() {
        let world = gray_sphere_world();
        let config = RenderConfig::new(10, 10, 5, 4);
        let camera = Camera::looking_from(10, 10, Vec3::ZERO, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel should hit the sphere and gather some light
        let color = render_pixel(&camera, &world, 5, 5, &config, &mut rng);
        assert!(color.length() > 0.0);
        assert!(color.max_element() <= 1.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::new(4, 4, 1, 1).validate().is_ok());
        assert!(matches!(
            RenderConfig::new(1, 4, 1, 1).validate(),
            Err(RenderError::InvalidResolution { width: 1, height: 4 })
        ));
        assert!(matches!(
            RenderConfig::new(4, 4, 1, 0).validate(),
            Err(RenderError::ZeroSamples)
        ));

        let config = RenderConfig {
            workers: Some(0),
            ..RenderConfig::new(4, 4, 1, 1)
        };
        assert!(matches!(config.validate(), Err(RenderError::ZeroWorkers)));
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb8(Color::new(4.0, -1.0, 0.25)), [255, 0, 128]);
        assert_eq!(color_to_rgb8(Color::new(f32::NAN, 0.0, 0.0))[0], 0);
    }
}
