//! Infinite plane primitive for ray tracing.
//!
//! A plane is represented by a point on it and a unit surface normal,
//! satisfying dot(normal, P - point) = 0.

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;
use glam::Vec3A;

/// Infinite plane defined by a point, an outward normal, and a material.
#[derive(Debug, Clone)]
pub struct Plane {
    /// A point lying on the plane.
    pub point: Vec3A,

    /// Outward surface normal (normalized in the constructor).
    pub normal: Vec3A,

    /// Material properties determining light interaction.
    pub material: MaterialType,
}

impl Plane {
    /// Create a new plane through `point` with the given normal.
    ///
    /// The normal is normalized; callers may pass any non-zero vector.
    pub fn new(point: Vec3A, normal: Vec3A, material: MaterialType) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let denom = self.normal.dot(r.direction);

        // Near-zero denominator means the ray runs parallel to the plane
        if denom.abs() < 1e-8 {
            return false;
        }

        let t = (self.point - r.origin).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return false;
        }

        rec.t = t;
        rec.p = r.at(t);
        rec.material = self.material;
        rec.set_face_normal(r, self.normal);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> MaterialType {
        MaterialType::Lambertian {
            albedo: Vec3A::splat(0.5),
        }
    }

    #[test]
    fn vertical_ray_hits_ground_plane() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), gray());
        let r = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(plane.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 5.0).abs() < 1e-5);
        assert!(rec.p.length() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3A::new(0.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn parallel_ray_misses() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), gray());
        let r = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(1.0, 0.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(!plane.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn constructor_normalizes_normal() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::new(0.0, 2.0, 0.0), gray());
        assert!((plane.normal.length() - 1.0).abs() < 1e-6);

        let r = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        let mut rec = HitRecord::default();
        assert!(plane.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn hit_beyond_interval_rejected() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), gray());
        let r = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(!plane.hit(&r, Interval::new(0.001, 4.0), &mut rec));
    }
}
