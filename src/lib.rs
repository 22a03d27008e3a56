//! LumenPath CPU path tracer
//!
//! A Monte Carlo path tracer rendering spheres, planes and axis-aligned boxes
//! with diffuse, metallic and dielectric materials. Rendering is spread over
//! worker threads that claim image rows from a shared atomic cursor, and the
//! finished framebuffer is tone mapped and written as a plain-text PPM (or
//! 8-bit PNG) raster.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ray;
pub mod sphere;
pub mod plane;
pub mod cuboid;
pub mod hittable;
pub mod interval;
pub mod camera;
pub mod random;
pub mod material;
pub mod output;
