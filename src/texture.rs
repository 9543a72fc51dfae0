use std::path::Path;

use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::error::ResourceResult;

/// Chance that any given texel gets a divot in `bump_map`.
const DIVOT_PROBABILITY: f64 = 0.1;

/// Decodes a PNG or JPEG file into RGBA texels.
pub fn load_image(path: impl AsRef<Path>) -> ResourceResult<RgbaImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    log::debug!("read {} bytes of image data from {}", bytes.len(), path.display());
    load_image_from_memory(&bytes)
}

pub fn load_image_from_memory(bytes: &[u8]) -> ResourceResult<RgbaImage> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// A `size` x `size` black and white checkerboard with `checks` squares
/// along each side.
pub fn checkerboard(size: u32, checks: u32) -> RgbaImage {
    let check_size = size as f32 / checks.max(1) as f32;
    RgbaImage::from_fn(size, size, |x, y| {
        let check_x = (y as f32 / check_size) as u32 % 2;
        let check_y = (x as f32 / check_size) as u32 % 2;
        let c = if check_x != check_y { 255 } else { 0 };
        Rgba([c, c, c, 255])
    })
}

/// A normal map of randomly placed divots.
///
/// Each divot is three texels deep in the middle and shallow at the sides.
/// The displacement is differentiated along both axes and the resulting
/// normal `(du, dv, 1) / |(du, dv, 1)|` is stored in RGB as `(n + 1) * 127.5`.
/// Alpha is left at 0.
pub fn bump_map<R: Rng + ?Sized>(size: u32, rng: &mut R) -> RgbaImage {
    let n = size as usize;
    let mut depth = vec![0.0f32; n * n];
    for i in 1..n {
        for j in 1..n {
            if rng.random_bool(DIVOT_PROBABILITY) {
                let off = i * n + j;
                depth[off - 1] = 0.1;
                // May spill into the first texel of the next row, like a flat buffer would
                if off + 1 < depth.len() {
                    depth[off + 1] = 0.1;
                }
                depth[off] = 0.2;
            }
        }
    }

    let mut du = vec![0.0f32; n * n];
    let mut dv = vec![0.0f32; n * n];
    for i in 1..n {
        for j in 1..n {
            let off = i * n + j;
            du[off] = depth[off] - depth[off - n];
            dv[off] = depth[off] - depth[off - 1];
        }
    }

    let encode = |v: f32| ((v + 1.0) * 127.5).round().clamp(0.0, 255.0) as u8;
    RgbaImage::from_fn(size, size, |x, y| {
        let off = y as usize * n + x as usize;
        let norm = (du[off] * du[off] + dv[off] * dv[off] + 1.0).sqrt();
        Rgba([
            encode(du[off] / norm),
            encode(dv[off] / norm),
            encode(1.0 / norm),
            0,
        ])
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::error::ResourceError;

    #[test]
    fn test_load_image_decodes_png() {
        let img = checkerboard(8, 2);
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png).unwrap();

        let loaded = load_image_from_memory(&png).unwrap();
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_load_image_errors() {
        let missing = load_image("no/such/texture.png");
        assert!(matches!(missing, Err(ResourceError::Io(_))), "{missing:?}");

        let garbage = load_image_from_memory(b"definitely not an image");
        assert!(matches!(garbage, Err(ResourceError::Image(_))), "{garbage:?}");
    }

    #[test]
    fn test_checkerboard_corners() {
        let img = checkerboard(64, 2);
        assert_eq!(img.dimensions(), (64, 64));
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(40, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(0, 40), &Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(63, 63), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_checkerboard_square_count() {
        let img = checkerboard(16, 4);
        let row: Vec<u8> = (0..16).map(|x| img.get_pixel(x, 0)[0]).collect();
        let flips = row.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(flips, 3);
    }

    #[test]
    fn test_flat_bump_map_points_straight_up() {
        struct Never;
        impl rand::RngCore for Never {
            fn next_u32(&mut self) -> u32 {
                u32::MAX
            }
            fn next_u64(&mut self) -> u64 {
                u64::MAX
            }
            fn fill_bytes(&mut self, dst: &mut [u8]) {
                dst.fill(0xff);
            }
        }

        let img = bump_map(8, &mut Never);
        for px in img.pixels() {
            assert_eq!(px, &Rgba([128, 128, 255, 0]));
        }
    }

    #[test]
    fn test_bump_map_is_seeded() {
        let a = bump_map(32, &mut StdRng::seed_from_u64(7));
        let b = bump_map(32, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.pixels().all(|p| p[3] == 0));
        // roughly a tenth of the texels start a divot, so some normals tilt
        assert!(a.pixels().any(|p| p[2] < 255));
    }
}
