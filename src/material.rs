//! Material system for ray tracing.
//!
//! Implements three material types: Lambertian (diffuse), Metal (specular),
//! and Dielectric (transparent). Materials are stateless beyond their
//! construction parameters and shared read-only by every render thread.

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use glam::Vec3A;

/// RGB color type backed by Vec3A.
pub type Color = Vec3A;

/// Closed set of surface materials.
///
/// A tagged enum rather than a trait object: scattering dispatches through
/// an exhaustive match, so adding a material variant is a compile error at
/// every site that forgets to handle it.
#[derive(Debug, Clone, Copy)]
pub enum MaterialType {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond).
        refraction_index: f32,
    },
}

impl MaterialType {
    /// Compute ray scattering for this material.
    ///
    /// Returns true if the ray scatters, false if it is absorbed and
    /// contributes no further light. Sets the attenuation color and the
    /// scattered ray on success.
    pub fn scatter(
        &self,
        r_in: &Ray,
        rec: &HitRecord,
        attenuation: &mut Color,
        scattered: &mut Ray,
    ) -> bool {
        match *self {
            MaterialType::Lambertian { albedo } => {
                let mut scatter_direction = rec.normal + random::random_unit_vector();

                // Catch degenerate scatter direction (very close to zero)
                if scatter_direction.length_squared() < 1e-8 {
                    scatter_direction = rec.normal;
                }

                *scattered = Ray::new(rec.p, scatter_direction);
                *attenuation = albedo;
                true
            }

            MaterialType::Metal { albedo, fuzz } => {
                let reflected = reflect(r_in.direction.normalize(), rec.normal);
                let direction = reflected + fuzz.min(1.0) * random::random_unit_vector();

                *scattered = Ray::new(rec.p, direction);
                *attenuation = albedo;

                // A fuzzed reflection pointing into the surface is absorbed
                scattered.direction.dot(rec.normal) > 0.0
            }

            MaterialType::Dielectric { refraction_index } => {
                *attenuation = Color::ONE; // Glass doesn't attenuate light

                let ri = if rec.front_face {
                    1.0 / refraction_index
                } else {
                    refraction_index
                };

                let unit_direction = r_in.direction.normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = ri * sin_theta > 1.0;

                let direction = if cannot_refract
                    || reflectance(cos_theta, ri) > random::random_f32()
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, ri)
                };

                *scattered = Ray::new(rec.p, direction);
                true
            }
        }
    }
}

/// Reflect a vector off a surface using the law of reflection.
fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through an interface using Snell's law.
fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute Fresnel reflectance using Schlick's approximation.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(p: Vec3A, normal: Vec3A, front_face: bool) -> HitRecord {
        HitRecord {
            p,
            normal,
            t: 1.0,
            front_face,
            material: MaterialType::Lambertian { albedo: Vec3A::ZERO },
        }
    }

    #[test]
    fn schlick_at_normal_incidence_for_glass() {
        assert!((reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
    }

    #[test]
    fn straight_on_refraction_passes_through() {
        let refracted = refract(
            Vec3A::new(0.0, -1.0, 0.0),
            Vec3A::new(0.0, 1.0, 0.0),
            1.0 / 1.5,
        );
        assert!((refracted - Vec3A::new(0.0, -1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn mirror_reflection() {
        let v = Vec3A::new(1.0, -1.0, 0.0).normalize();
        let n = Vec3A::new(0.0, 1.0, 0.0);
        let r = reflect(v, n);
        assert!((r - Vec3A::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn lambertian_always_scatters_with_albedo_attenuation() {
        let material = MaterialType::Lambertian {
            albedo: Vec3A::new(0.8, 0.2, 0.1),
        };
        let rec = record(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), true);
        let r_in = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));

        for _ in 0..100 {
            let mut attenuation = Color::ZERO;
            let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
            assert!(material.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
            assert_eq!(attenuation, Vec3A::new(0.8, 0.2, 0.1));
            assert!(scattered.direction.length_squared() > 0.0);
        }
    }

    #[test]
    fn polished_metal_reflects_exactly() {
        let material = MaterialType::Metal {
            albedo: Vec3A::ONE,
            fuzz: 0.0,
        };
        let rec = record(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), true);
        let r_in = Ray::new(Vec3A::new(-1.0, 1.0, 0.0), Vec3A::new(1.0, -1.0, 0.0));

        let mut attenuation = Color::ZERO;
        let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert!(material.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
        let expected = Vec3A::new(1.0, 1.0, 0.0).normalize();
        assert!((scattered.direction - expected).length() < 1e-6);
    }

    #[test]
    fn metal_absorbs_reflection_into_surface() {
        let material = MaterialType::Metal {
            albedo: Vec3A::ONE,
            fuzz: 0.0,
        };
        // Normal pointing along the incident direction: the mirror reflection
        // lands below the surface and must be absorbed.
        let rec = record(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), false);
        let r_in = Ray::new(Vec3A::new(0.0, -1.0, 0.0), Vec3A::new(0.0, 1.0, 0.0));

        let mut attenuation = Color::ZERO;
        let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert!(!material.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
    }

    #[test]
    fn dielectric_total_internal_reflection() {
        let material = MaterialType::Dielectric {
            refraction_index: 1.5,
        };
        // Grazing exit from inside the glass: sin_theta * 1.5 > 1, so the
        // ray must reflect regardless of the stochastic Schlick draw.
        let direction = Vec3A::new(1.0, -0.2, 0.0).normalize();
        let rec = record(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), false);
        let r_in = Ray::new(Vec3A::new(-1.0, 0.2, 0.0), direction);

        let mut attenuation = Color::ZERO;
        let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert!(material.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
        assert_eq!(attenuation, Color::ONE);

        let expected = reflect(direction, rec.normal);
        assert!((scattered.direction - expected).length() < 1e-6);
    }

    #[test]
    fn dielectric_never_absorbs() {
        let material = MaterialType::Dielectric {
            refraction_index: 1.5,
        };
        let rec = record(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), true);
        let r_in = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(0.3, -1.0, 0.0));

        for _ in 0..100 {
            let mut attenuation = Color::ZERO;
            let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
            assert!(material.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
            assert_eq!(attenuation, Color::ONE);
        }
    }
}
