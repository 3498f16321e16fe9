//! Camera for ray generation.

use crate::Ray;
use lumen_math::{Point3, Vec3};

/// Height of the viewport in world units.
pub const VIEWPORT_HEIGHT: f32 = 2.0;

/// Default eye position.
pub const DEFAULT_ORIGIN: Point3 = Vec3::new(0.0, 1.2, 4.0);

/// Default distance from the eye to the image plane.
pub const DEFAULT_FOCAL_LENGTH: f32 = 3.0;

/// Pinhole camera looking down -Z.
///
/// The view basis is derived once from the image aspect ratio and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a camera for a `width` x `height` image at the default position.
    pub fn new(width: u32, height: u32) -> Self {
        Self::looking_from(width, height, DEFAULT_ORIGIN, DEFAULT_FOCAL_LENGTH)
    }

    /// Create a camera at `origin` with the image plane `focal_length` units
    /// down -Z.
    pub fn looking_from(width: u32, height: u32, origin: Point3, focal_length: f32) -> Self {
        let aspect_ratio = width as f32 / height as f32;
        let viewport_width = aspect_ratio * VIEWPORT_HEIGHT;

        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, VIEWPORT_HEIGHT, 0.0);
        let lower_left_corner =
            origin - horizontal * 0.5 - vertical * 0.5 - Vec3::new(0.0, 0.0, focal_length);

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Generate a ray through normalized image-plane coordinates.
    ///
    /// `(0, 0)` is the lower left corner and `(1, 1)` the upper right.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + self.horizontal * u + self.vertical * v - self.origin,
        )
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }
}
