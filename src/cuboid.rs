//! Axis-aligned box primitive for ray tracing.
//!
//! Intersection uses the slab method: for each axis, compute the parametric
//! entering and exiting t values and narrow the running interval across all
//! three axes. The box is closed: points on the boundary count as inside.
//! The normal is determined from which axis produced the final entering t.

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;
use glam::Vec3A;

/// Direction components below this magnitude are treated as parallel slabs.
const PARALLEL_EPS: f32 = 1e-15;

/// Tolerance for matching the hit point to a box face when picking a normal.
const FACE_EPS: f32 = 1e-8;

/// Axis-aligned box defined by its minimum and maximum corners.
#[derive(Debug, Clone)]
pub struct Cuboid {
    /// Corner with the smallest coordinate on every axis.
    pub min_corner: Vec3A,

    /// Corner with the largest coordinate on every axis.
    pub max_corner: Vec3A,

    /// Material properties determining light interaction.
    pub material: MaterialType,
}

impl Cuboid {
    /// Create a new box from two opposite corners.
    ///
    /// Corner coordinates are re-ordered componentwise, so the corners may
    /// be given in any order.
    pub fn new(a: Vec3A, b: Vec3A, material: MaterialType) -> Self {
        Self {
            min_corner: a.min(b),
            max_corner: a.max(b),
            material,
        }
    }

    /// Create a cube from its center point and a uniform edge length.
    pub fn from_center_size(center: Vec3A, extent: f32, material: MaterialType) -> Self {
        let h = Vec3A::splat(extent * 0.5);
        Self {
            min_corner: center - h,
            max_corner: center + h,
            material,
        }
    }

    /// Outward normal on the entering axis, matched to the nearest face.
    ///
    /// Falls back to the sign of the ray direction component when the hit
    /// point sits on neither face within tolerance.
    fn entering_face_normal(&self, axis: usize, p: Vec3A, dir_component: f32) -> Vec3A {
        let sign = if (p[axis] - self.min_corner[axis]).abs() < FACE_EPS {
            -1.0
        } else if (p[axis] - self.max_corner[axis]).abs() < FACE_EPS {
            1.0
        } else if dir_component > 0.0 {
            -1.0
        } else {
            1.0
        };
        axis_normal(axis, sign)
    }

    /// Outward normal when no axis advanced the entering time.
    ///
    /// The ray started inside the box with every refining axis parallel;
    /// pick the axis with the least penetration depth and whichever face on
    /// that axis is closer.
    fn nearest_face_normal(&self, p: Vec3A) -> Vec3A {
        let dx = (p.x - self.min_corner.x).abs().min((self.max_corner.x - p.x).abs());
        let dy = (p.y - self.min_corner.y).abs().min((self.max_corner.y - p.y).abs());
        let dz = (p.z - self.min_corner.z).abs().min((self.max_corner.z - p.z).abs());

        let axis = if dx <= dy && dx <= dz {
            0
        } else if dy <= dz {
            1
        } else {
            2
        };
        let sign = if (p[axis] - self.min_corner[axis]).abs() < (self.max_corner[axis] - p[axis]).abs() {
            -1.0
        } else {
            1.0
        };
        axis_normal(axis, sign)
    }
}

fn axis_normal(axis: usize, sign: f32) -> Vec3A {
    match axis {
        0 => Vec3A::new(sign, 0.0, 0.0),
        1 => Vec3A::new(0.0, sign, 0.0),
        _ => Vec3A::new(0.0, 0.0, sign),
    }
}

impl Hittable for Cuboid {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let mut t_enter = ray_t.min;
        let mut t_exit = ray_t.max;

        // Axis that most recently advanced t_enter, for normal selection
        let mut enter_axis: Option<usize> = None;

        for axis in 0..3 {
            let origin = r.origin[axis];
            let direction = r.direction[axis];

            if direction.abs() < PARALLEL_EPS {
                // Ray parallel to this slab: must already lie within its
                // bounds or the whole ray misses.
                if origin < self.min_corner[axis] || origin > self.max_corner[axis] {
                    return false;
                }
                // No interval refinement from this axis.
                continue;
            }

            let inv_dir = 1.0 / direction;
            let mut t0 = (self.min_corner[axis] - origin) * inv_dir;
            let mut t1 = (self.max_corner[axis] - origin) * inv_dir;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if t0 > t_enter {
                t_enter = t0;
                enter_axis = Some(axis);
            }
            t_exit = t_exit.min(t1);

            if t_enter > t_exit {
                return false; // Slabs do not overlap
            }
        }

        rec.t = if ray_t.surrounds(t_enter) {
            t_enter
        } else if ray_t.surrounds(t_exit) {
            // Entering time is out of range: the ray started inside the box,
            // so treat the exit time as the hit.
            t_exit
        } else {
            return false;
        };
        rec.p = r.at(rec.t);
        rec.material = self.material;

        let outward_normal = match enter_axis {
            Some(axis) => self.entering_face_normal(axis, rec.p, r.direction[axis]),
            None => self.nearest_face_normal(rec.p),
        };
        rec.set_face_normal(r, outward_normal);

        true
    }
}
