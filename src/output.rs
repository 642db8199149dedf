//! Image persistence for color buffers.
//!
//! Buffers are row-major with row 0 at the *bottom* of the picture: the
//! projection maps world +y to increasing row index, so BMP's bottom-up
//! row order (positive height) shows the scene upright.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::Error;
use crate::vec3::Vec3;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const BYTES_PER_PIXEL: u32 = 4;

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Bmp,
    Png,
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Bmp
    }
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Png => "png",
        }
    }
}

/// Unit-range channel to a byte.
#[inline]
pub fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn to_rgb(color: Vec3<f64>) -> [u8; 3] {
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Uncompressed 32-bit BMP with a BITMAPINFOHEADER; pixels are BGRA with
/// opaque alpha, rows bottom-up.
///
/// Fails if `colors` does not hold `width * height` pixels or the image is
/// too large for the header fields.
pub fn encode_bmp(colors: &[Vec3<f64>], width: usize, height: usize) -> Result<Vec<u8>, Error> {
    let too_large = || Error::Encode(format!("{}x{} image is too large for a BMP", width, height));

    let offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
    let pixels = width.checked_mul(height).ok_or_else(too_large)?;
    let pixel_data_size = u32::try_from(pixels)
        .ok()
        .and_then(|p| p.checked_mul(BYTES_PER_PIXEL))
        .filter(|size| size.checked_add(offset).is_some())
        .ok_or_else(too_large)?;
    let width_field = i32::try_from(width).map_err(|_| too_large())?;
    let height_field = i32::try_from(height).map_err(|_| too_large())?;

    if colors.len() != pixels {
        return Err(Error::Encode(format!(
            "{} colors for a {}x{} image",
            colors.len(),
            width,
            height
        )));
    }

    let mut out = Vec::with_capacity((offset + pixel_data_size) as usize);

    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + pixel_data_size).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&offset.to_le_bytes());

    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&width_field.to_le_bytes());
    out.extend_from_slice(&height_field.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&(8 * BYTES_PER_PIXEL as u16).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    for _ in 0..4 {
        out.extend_from_slice(&0u32.to_le_bytes());
    }

    for &color in colors {
        let [r, g, b] = to_rgb(color);
        out.extend_from_slice(&[b, g, r, 255]);
    }

    Ok(out)
}

pub fn write_bmp<P: AsRef<Path>>(path: P, colors: &[Vec3<f64>], width: usize, height: usize) -> Result<(), Error> {
    let bytes = encode_bmp(colors, width, height)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Same orientation as the BMP output: buffer row 0 becomes the bottom row.
pub fn to_rgb_image(colors: &[Vec3<f64>], width: usize, height: usize) -> RgbImage {
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let row = height - 1 - y as usize;
        Rgb(to_rgb(colors[row * width + x as usize]))
    })
}

pub fn save<P: AsRef<Path>>(
    path: P,
    colors: &[Vec3<f64>],
    width: usize,
    height: usize,
    format: ImageFormat,
) -> Result<(), Error> {
    match format {
        ImageFormat::Bmp => write_bmp(path, colors, width, height)?,
        ImageFormat::Png => to_rgb_image(colors, width, height).save_with_format(path, image::ImageFormat::Png)?,
    }

    Ok(())
}

/// Maps unit normals into visible colors; pixels without a normal stay
/// black.
pub fn normals_to_colors(normals: &[Vec3<f64>]) -> Vec<Vec3<f64>> {
    normals
        .iter()
        .map(|&n| {
            if n == Vec3::ZERO {
                Vec3::ZERO
            } else {
                n.scale(0.5) + Vec3::splat(0.5)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    #[test]
    fn byte_conversion_rounds_and_clamps() {
        assert_eq!(0, to_byte(-0.5));
        assert_eq!(255, to_byte(1.5));
        assert_eq!(128, to_byte(0.5));
        assert_eq!(51, to_byte(0.2));
    }

    #[test]
    fn bmp_layout() {
        let colors = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.2, 0.4, 0.6),
            Vec3::ZERO,
            Vec3::splat(1.0),
        ];
        let bytes = encode_bmp(&colors, 3, 2).unwrap();

        assert_eq!(54 + 24, bytes.len());
        assert_eq!(b"BM", &bytes[0..2]);
        assert_eq!(78, u32_at(&bytes, 2));
        assert_eq!(54, u32_at(&bytes, 10));
        assert_eq!(40, u32_at(&bytes, 14));
        assert_eq!(3, u32_at(&bytes, 18));
        assert_eq!(2, u32_at(&bytes, 22));
        assert_eq!(&[1u8, 0, 32, 0], &bytes[26..30]);
        assert_eq!(0, u32_at(&bytes, 30));
        assert_eq!(24, u32_at(&bytes, 34));

        assert_eq!(&[0u8, 0, 255, 255], &bytes[54..58]);
        assert_eq!(&[0u8, 255, 0, 255], &bytes[58..62]);
        assert_eq!(&[255u8, 0, 0, 255], &bytes[62..66]);
        assert_eq!(&[153u8, 102, 51, 255], &bytes[66..70]);
    }

    #[test]
    fn bmp_rejects_mismatched_or_oversized_images() {
        let colors = vec![Vec3::ZERO; 5];
        assert!(matches!(encode_bmp(&colors, 3, 2), Err(Error::Encode(_))));

        for (width, height) in &[(1 << 16, 1 << 15), (usize::MAX, 2), (1 << 31, 1)] {
            let err = encode_bmp(&[], *width, *height).unwrap_err();
            assert!(err.to_string().contains("too large"), "{}", err);
        }
    }

    #[test]
    fn rgb_image_puts_first_row_at_bottom() {
        let colors = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)];
        let image = to_rgb_image(&colors, 1, 2);

        assert_eq!(&Rgb([0, 0, 255]), image.get_pixel(0, 0));
        assert_eq!(&Rgb([255, 0, 0]), image.get_pixel(0, 1));
    }

    #[test]
    fn normal_colors() {
        let colors = normals_to_colors(&[Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)]);
        assert_eq!(vec![Vec3::ZERO, Vec3::new(0.5, 0.5, 0.0)], colors);
    }

    #[test]
    fn write_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let colors = vec![Vec3::splat(0.5); 6];

        let bmp = dir.path().join("a.bmp");
        save(&bmp, &colors, 3, 2, ImageFormat::Bmp).unwrap();
        assert_eq!(encode_bmp(&colors, 3, 2).unwrap(), std::fs::read(&bmp).unwrap());

        let png = dir.path().join("a.png");
        save(&png, &colors, 3, 2, ImageFormat::Png).unwrap();
        assert!(std::fs::metadata(&png).unwrap().len() > 0);
    }
}
