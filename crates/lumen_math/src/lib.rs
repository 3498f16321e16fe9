// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{mix, reflect, refract, Color, Point3};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_color_is_componentwise() {
        let albedo = Color::new(0.5, 0.25, 1.0);
        let light = Color::new(0.8, 0.8, 0.4);
        assert_eq!(albedo * light, Color::new(0.4, 0.2, 0.4));
        assert_eq!(albedo / 2.0, Color::new(0.25, 0.125, 0.5));
    }
}
