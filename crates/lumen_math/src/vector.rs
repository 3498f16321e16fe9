//! Vector helpers shared by the renderer.
//!
//! `glam::Vec3` already carries the arithmetic, `dot`, `cross`, `length`,
//! `length_squared` and `normalize`. Normalizing a zero-length vector is a
//! caller error and is not checked here.

use crate::Vec3;

/// RGB color, linear and unbounded while accumulating.
pub type Color = Vec3;

/// A point in world space.
pub type Point3 = Vec3;

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * 2.0 * v.dot(n)
}

/// Refract a vector through a surface with Snell's law.
///
/// `ni_over_nt` is the ratio of refractive indices. When the discriminant is
/// not positive the ray cannot refract and the reflection of `v` is returned
/// instead.
#[inline]
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Vec3 {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        (uv - n * dt) * ni_over_nt - n * discriminant.sqrt()
    } else {
        reflect(v, n)
    }
}

/// Linear interpolation: `a` at `t = 0`, `b` at `t = 1`.
#[inline]
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}
