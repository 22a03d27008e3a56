use clap::Parser;
use glam::Vec3A;
use log::{error, info};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use lumenpath::camera::Camera;
use lumenpath::cuboid::Cuboid;
use lumenpath::hittable::HittableList;
use lumenpath::material::MaterialType;
use lumenpath::sphere::Sphere;

/// Build the demo scene: a glass sphere front and center, a mirror to its
/// left, a small red diffuse sphere behind, a huge ground sphere, and a red
/// box backdrop off to the right.
fn create_scene() -> HittableList {
    let material_ground = MaterialType::Lambertian {
        albedo: Vec3A::new(0.11, 0.14, 0.22),
    };
    let material_center = MaterialType::Lambertian {
        albedo: Vec3A::new(0.9, 0.1, 0.1),
    };
    let material_side = MaterialType::Metal {
        albedo: Vec3A::new(1.0, 1.0, 1.0),
        fuzz: 0.0,
    };
    let material_glass = MaterialType::Dielectric {
        refraction_index: 1.5,
    };

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Vec3A::new(0.0, 0.0, -1.0), 0.5, material_glass)));
    world.add(Box::new(Sphere::new(Vec3A::new(-1.0, 0.0, -1.0), 0.5, material_side)));
    world.add(Box::new(Sphere::new(Vec3A::new(0.0, -0.25, -2.0), 0.25, material_center)));
    world.add(Box::new(Sphere::new(Vec3A::new(0.0, -100.5, -1.0), 100.0, material_ground)));
    world.add(Box::new(Cuboid::new(
        Vec3A::new(0.5, -0.25, -3.5),
        Vec3A::new(5.0, 0.35, -2.9),
        material_center,
    )));

    world
}

/// Configure the camera from the parsed command line arguments.
fn create_camera(args: &Args) -> Camera {
    let mut camera = Camera::new();
    camera.aspect_ratio = 16.0 / 9.0;
    camera.image_width = args.width;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.threads = args.threads;
    camera.vfov = 90.0;
    camera.lookfrom = Vec3A::new(0.0, 0.0, 0.0);
    camera.lookat = Vec3A::new(0.0, 0.0, -1.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.output_path = args.output.clone();
    camera
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("LumenPath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Image width: {}, samples per pixel: {}, max depth: {}",
        args.width, args.samples_per_pixel, args.max_depth
    );

    let world = create_scene();
    let mut camera = create_camera(&args);

    if let Err(e) = camera.render(&world) {
        error!("Failed to write image to {}: {}", camera.output_path, e);
        std::process::exit(1);
    }

    info!("Image rendered to {}", camera.output_path);
}
