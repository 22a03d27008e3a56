//! Tone mapping and image serialization.
//!
//! Converts the linear framebuffer produced by the render loop into 8-bit
//! raster output. The primary format is plain-text PPM (the `P3` variant);
//! a PNG writer with the same tone mapping is available for `.png` paths.
//!
//! Tone mapping applies gamma 2.0 (square root), clamps each channel into
//! [0, 0.999], and scales to an integer in [0, 255].

use std::fs::File;
use std::io::{self, BufWriter, Write};

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use log::info;

use crate::interval::Interval;

/// RGB color type backed by Vec3A.
type Color = Vec3A;

/// Apply gamma 2.0 correction to a linear channel value.
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Tone-map a linear color to its 8-bit output triple.
pub fn color_to_bytes(c: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);

    let r = intensity.clamp(linear_to_gamma(c.x));
    let g = intensity.clamp(linear_to_gamma(c.y));
    let b = intensity.clamp(linear_to_gamma(c.z));

    [(256.0 * r) as u8, (256.0 * g) as u8, (256.0 * b) as u8]
}

/// Write the framebuffer as a plain-text PPM (`P3`) file.
///
/// Header lines `P3`, `<width> <height>`, `255`, then one space-separated
/// `R G B` triple per pixel in row-major order, top row first.
pub fn save_ppm(framebuffer: &[Color], width: u32, height: u32, output_path: &str) -> io::Result<()> {
    let file = File::create(output_path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "P3")?;
    writeln!(out, "{} {}", width, height)?;
    writeln!(out, "255")?;
    for color in framebuffer {
        let [r, g, b] = color_to_bytes(*color);
        writeln!(out, "{} {} {}", r, g, b)?;
    }
    out.flush()?;

    info!("Image saved as {}", output_path);
    Ok(())
}

/// Write the framebuffer as an 8-bit PNG with the same tone mapping.
pub fn save_png(framebuffer: &[Color], width: u32, height: u32, output_path: &str) -> io::Result<()> {
    let image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb(color_to_bytes(framebuffer[(y * width + x) as usize]))
    });

    image.save(output_path).map_err(io::Error::other)?;

    info!("Image saved as {}", output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_mapping_known_values() {
        // sqrt(0.25) = 0.5 exactly
        assert_eq!(color_to_bytes(Vec3A::new(0.0, 0.25, 1.0)), [0, 128, 255]);
        // Non-positive channels clamp to zero, overbright clamp to 255
        assert_eq!(color_to_bytes(Vec3A::new(-1.0, 2.0, 0.5)), [0, 255, 181]);
    }

    #[test]
    fn ppm_bytes_match_hand_computed_gradient() {
        let framebuffer = vec![
            Vec3A::new(0.0, 0.25, 1.0),
            Vec3A::new(1.0, 0.0, 0.0),
            Vec3A::new(0.5, 0.5, 0.5),
            Vec3A::new(-1.0, 2.0, 0.0401),
        ];
        let path = std::env::temp_dir().join("lumenpath_ppm_test.ppm");
        save_ppm(&framebuffer, 2, 2, path.to_str().unwrap()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "P3\n2 2\n255\n0 128 255\n255 0 0\n181 181 181\n0 255 51\n"
        );
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let framebuffer = vec![Vec3A::ZERO];
        let result = save_ppm(&framebuffer, 1, 1, "/lumenpath-no-such-dir/out.ppm");
        assert!(result.is_err());
    }

    #[test]
    fn png_writer_roundtrips_dimensions() {
        let framebuffer = vec![Vec3A::splat(0.25); 6];
        let path = std::env::temp_dir().join("lumenpath_png_test.png");
        save_png(&framebuffer, 3, 2, path.to_str().unwrap()).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([128, 128, 128]));
    }
}
