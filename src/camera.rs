//! Camera for ray generation and scene rendering.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use glam::Vec3A;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::output;
use crate::random;
use crate::ray::Ray;

/// RGB color type backed by Vec3A.
type Color = Vec3A;

/// How often the monitor thread polls the completed-pixel counter.
const PROGRESS_POLL: Duration = Duration::from_millis(25);

/// Pinhole camera and multithreaded render loop.
///
/// Configure the public fields once, then call [`Camera::render`]. Derived
/// viewport state is computed by `initialize()` and read-only while worker
/// threads are rendering.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces (recursion depth limit)
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Point the camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point the camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Worker thread count; 0 means one per hardware thread (fallback 4)
    pub threads: usize,
    /// Destination image file (`.png` is encoded as PNG, anything else as P3 PPM)
    pub output_path: String,

    /// Rendered image height in pixel count, derived from width and aspect
    image_height: u32,
    /// Camera position in world space (same as lookfrom)
    center: Vec3A,
    /// World position of the top-left pixel's sample center
    pixel00_loc: Vec3A,
    /// Offset vector from pixel to pixel horizontally
    pixel_delta_u: Vec3A,
    /// Offset vector from pixel to pixel vertically (points down)
    pixel_delta_v: Vec3A,
    /// Color scale factor for a sum of pixel samples (1 / samples_per_pixel)
    pixel_samples_scale: f32,
    /// Whether derived state has been computed
    initialized: bool,
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: 100px wide square image, 50 samples per pixel, 90° FOV,
    /// placed at the origin looking down -z.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 50,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            threads: 0,
            output_path: "output.ppm".to_string(),
            image_height: 0,
            center: Vec3A::ZERO,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            pixel_samples_scale: 0.0,
            initialized: false,
        }
    }

    /// Render the scene and write the image to `output_path`.
    ///
    /// The only failure mode is image emission: intersection and scattering
    /// outcomes are ordinary booleans, but an unwritable destination
    /// surfaces here as an error.
    pub fn render(&mut self, world: &dyn Hittable) -> io::Result<()> {
        let framebuffer = self.render_framebuffer(world);

        if self.output_path.ends_with(".png") {
            output::save_png(&framebuffer, self.image_width, self.image_height, &self.output_path)
        } else {
            output::save_ppm(&framebuffer, self.image_width, self.image_height, &self.output_path)
        }
    }

    /// Render the scene into a linear framebuffer, one color per pixel in
    /// row-major order.
    ///
    /// Worker threads claim rows through a shared atomic cursor, so rows of
    /// uneven cost balance dynamically; every pixel is produced start to
    /// finish by exactly one worker. A monitor thread polls a relaxed
    /// completed-pixel counter to drive the progress bar without
    /// synchronizing with the workers.
    pub fn render_framebuffer(&mut self, world: &dyn Hittable) -> Vec<Color> {
        self.initialize();

        let width = self.image_width as usize;
        let height = self.image_height as usize;
        let total_pixels = width * height;

        let thread_count = if self.threads > 0 {
            self.threads
        } else {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
        };

        info!(
            "Rendering {}x{} at {} spp on {} worker threads...",
            width, height, self.samples_per_pixel, thread_count
        );
        let generation_start = std::time::Instant::now();

        let pb = ProgressBar::new(total_pixels as u64);
        pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}").unwrap());

        let next_row = AtomicUsize::new(0);
        let pixels_done = AtomicUsize::new(0);
        let workers_finished = AtomicBool::new(false);

        let mut framebuffer = vec![Color::ZERO; total_pixels];
        let camera: &Camera = self;

        thread::scope(|s| {
            // Monitor thread: polls the counter and updates the bar until
            // the workers are done, then flushes the final count.
            s.spawn(|| {
                while !workers_finished.load(Ordering::Acquire) {
                    pb.set_position(pixels_done.load(Ordering::Relaxed) as u64);
                    thread::sleep(PROGRESS_POLL);
                }
                pb.set_position(pixels_done.load(Ordering::Relaxed) as u64);
                pb.finish();
            });

            let mut handles = Vec::with_capacity(thread_count);
            for _ in 0..thread_count {
                handles.push(s.spawn(|| {
                    // Rows rendered by this worker, stitched in after join.
                    let mut rows: Vec<(usize, Vec<Color>)> = Vec::new();

                    loop {
                        let row = next_row.fetch_add(1, Ordering::Relaxed);
                        if row >= height {
                            break;
                        }

                        let mut row_pixels = vec![Color::ZERO; width];
                        for (col, pixel) in row_pixels.iter_mut().enumerate() {
                            let mut pixel_color = Color::ZERO;
                            for _ in 0..camera.samples_per_pixel {
                                let r = camera.get_ray(row as u32, col as u32);
                                pixel_color += camera.ray_color(&r, world, camera.max_depth);
                            }
                            *pixel = pixel_color * camera.pixel_samples_scale;
                            pixels_done.fetch_add(1, Ordering::Relaxed);
                        }
                        rows.push((row, row_pixels));
                    }

                    rows
                }));
            }

            for handle in handles {
                for (row, row_pixels) in handle.join().unwrap() {
                    framebuffer[row * width..(row + 1) * width].copy_from_slice(&row_pixels);
                }
            }
            workers_finished.store(true, Ordering::Release);
        });

        info!("Image generated in {:.2?}", generation_start.elapsed());

        framebuffer
    }

    /// Compute the derived viewport state from the public configuration.
    ///
    /// Idempotent; automatically called by `render_framebuffer()`.
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        // A pathological aspect ratio must not produce a zero-height image
        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);

        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;
        self.center = self.lookfrom;

        // Viewport dimensions for a focal length of 1
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal camera basis: w opposes the view direction
        let w = (self.lookfrom - self.lookat).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;

        self.pixel_delta_u = horizontal / self.image_width as f32;
        self.pixel_delta_v = -vertical / self.image_height as f32;

        // Upper-left pixel sits half a pixel delta in from the viewport corner
        let viewport_upper_left = self.center - w - horizontal / 2.0 + vertical / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        self.initialized = true;
    }

    /// Generate a ray through the given pixel with random sub-pixel jitter
    /// (box-filter antialiasing).
    fn get_ray(&self, row: u32, col: u32) -> Ray {
        let offset = sample_square();
        let pixel_sample = self.pixel00_loc
            + ((col as f32 + offset.x) * self.pixel_delta_u)
            + ((row as f32 + offset.y) * self.pixel_delta_v);

        Ray::new(self.center, pixel_sample - self.center)
    }

    /// Trace a ray and compute its color contribution.
    ///
    /// Recursively follows ray bounces through the scene, multiplying in
    /// each material's attenuation. A miss returns the sky gradient; an
    /// absorbed ray or an exhausted bounce budget returns black.
    fn ray_color(&self, r: &Ray, world: &dyn Hittable, depth: u32) -> Color {
        // Bounce limit reached: no more light is gathered
        if depth == 0 {
            return Color::ZERO;
        }

        let mut rec = HitRecord::default();

        // The 0.001 lower bound avoids shadow acne from self-intersection
        if world.hit(r, Interval::new(0.001, f32::INFINITY), &mut rec) {
            let mut attenuation = Color::ZERO;
            let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);

            if rec.material.scatter(r, &rec, &mut attenuation, &mut scattered) {
                return attenuation * self.ray_color(&scattered, world, depth - 1);
            }
            return Color::ZERO;
        }

        // No hit: blend white to sky blue on the ray's vertical direction
        let unit_direction = r.direction.normalize();
        let a = 0.5 * (unit_direction.y + 1.0);
        (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Random offset within [-0.5, 0.5]² for pixel sampling.
fn sample_square() -> Vec3A {
    Vec3A::new(random::random_f32() - 0.5, random::random_f32() - 0.5, 0.0)
}
