//! Image decoders for the supported scan formats
//!
//! PNG is read through the `png` crate directly; JPEG and BMP go through
//! the `image` crate. Every decoder reduces its input to a single-channel
//! 8-bit luma [`Raster`].

mod bmp;
mod jpeg;
mod png;


use std::path::Path;

use crate::error::FilterError;
use crate::raster::Raster;

/// Decode an image from a file path, dispatching on the lowercased
/// file extension.
pub fn decode_raster<P: AsRef<Path>>(path: P) -> Result<Raster, FilterError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| FilterError::Decode("no file extension found".to_string()))?;

    match extension.as_str() {
        "png" => png::decode_png(path),
        "jpg" | "jpeg" => jpeg::decode_jpeg(path),
        "bmp" => bmp::decode_bmp(path),
        _ => Err(FilterError::Decode(format!(
            "unsupported file format: {}",
            extension
        ))),
    }
}

/// Reduce a decoded [`image::DynamicImage`] to a single-channel luma
/// raster. Grayscale sources are taken as-is; everything else goes
/// through BT.601.
pub(crate) fn dynamic_to_luma(img: image::DynamicImage) -> Result<Raster, FilterError> {
    let width = img.width();
    let height = img.height();

    let luma: Vec<u8> = match img {
        image::DynamicImage::ImageLuma8(gray) => gray.into_raw(),
        image::DynamicImage::ImageLuma16(gray) => gray
            .into_raw()
            .iter()
            .map(|&v| (v as f64 / 257.0).round() as u8)
            .collect(),
        image::DynamicImage::ImageLumaA8(gray) => {
            gray.into_raw().chunks_exact(2).map(|px| px[0]).collect()
        }
        other => other
            .into_rgb8()
            .into_raw()
            .chunks_exact(3)
            .map(|px| luma8(px[0], px[1], px[2]))
            .collect(),
    };

    Raster::from_vec(width, height, luma)
        .map_err(|e| FilterError::Decode(format!("decoded image has wrong size: {}", e)))
}

/// BT.601 luma from 8-bit RGB, rounded to the nearest integer.
pub(crate) fn luma8(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    y.round().min(255.0) as u8
}

/// BT.601 luma from 16-bit RGB, scaled down to 8 bits.
pub(crate) fn luma16(r: u16, g: u16, b: u16) -> u8 {
    let y = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    (y / 257.0).round().min(255.0) as u8
}
