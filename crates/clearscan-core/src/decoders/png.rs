//! PNG scan decoder

use std::path::Path;

use super::{luma16, luma8};
use crate::error::FilterError;
use crate::raster::Raster;

/// Decode a PNG file down to a single-channel luma raster.
pub(crate) fn decode_png<P: AsRef<Path>>(path: P) -> Result<Raster, FilterError> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path.as_ref())
        .map_err(|e| FilterError::Decode(format!("failed to open PNG file: {}", e)))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| FilterError::Decode(format!("failed to read PNG info: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| FilterError::Decode("failed to determine PNG buffer size".to_string()))?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| FilterError::Decode(format!("failed to read PNG frame: {}", e)))?;

    let bytes = &buf[..frame_info.buffer_size()];

    let luma = match (color_type, bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            decode_gray8(bytes, width, height)?
        }
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => {
            decode_gray16(bytes, width, height)?
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            decode_gray_alpha8(bytes, width, height)?
        }
        (png::ColorType::Rgb, png::BitDepth::Eight) => decode_rgb8(bytes, width, height, 3)?,
        (png::ColorType::Rgba, png::BitDepth::Eight) => decode_rgb8(bytes, width, height, 4)?,
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => decode_rgb16(bytes, width, height, 3)?,
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => decode_rgb16(bytes, width, height, 4)?,
        (png::ColorType::Indexed, _) => {
            return Err(FilterError::Decode("indexed PNG not supported".to_string()));
        }
        _ => {
            return Err(FilterError::Decode(format!(
                "unsupported PNG format: {:?} with bit depth {:?}",
                color_type, bit_depth
            )));
        }
    };

    Raster::from_vec(width, height, luma)
        .map_err(|e| FilterError::Decode(format!("decoded PNG has wrong size: {}", e)))
}

fn expect_len(bytes: &[u8], expected: usize) -> Result<(), FilterError> {
    if bytes.len() != expected {
        return Err(FilterError::Decode(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected,
            bytes.len()
        )));
    }
    Ok(())
}

/// 8-bit grayscale is already luma.
fn decode_gray8(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, FilterError> {
    expect_len(bytes, (width * height) as usize)?;
    Ok(bytes.to_vec())
}

/// 16-bit grayscale, big-endian per the PNG spec, scaled down to 8 bits.
fn decode_gray16(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, FilterError> {
    expect_len(bytes, (width * height * 2) as usize)?;
    let luma = bytes
        .chunks_exact(2)
        .map(|chunk| {
            let gray16 = u16::from_be_bytes([chunk[0], chunk[1]]);
            (gray16 as f64 / 257.0).round() as u8
        })
        .collect();
    Ok(luma)
}

/// 8-bit grayscale with alpha; the alpha byte is dropped.
fn decode_gray_alpha8(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, FilterError> {
    expect_len(bytes, (width * height * 2) as usize)?;
    Ok(bytes.chunks_exact(2).map(|pair| pair[0]).collect())
}

/// 8-bit RGB or RGBA reduced to luma; alpha (if present) is dropped.
fn decode_rgb8(
    bytes: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<Vec<u8>, FilterError> {
    expect_len(bytes, (width * height) as usize * channels)?;
    let luma = bytes
        .chunks_exact(channels)
        .map(|px| luma8(px[0], px[1], px[2]))
        .collect();
    Ok(luma)
}

/// 16-bit RGB or RGBA, big-endian, reduced to 8-bit luma.
fn decode_rgb16(
    bytes: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<Vec<u8>, FilterError> {
    expect_len(bytes, (width * height) as usize * channels * 2)?;
    let luma = bytes
        .chunks_exact(channels * 2)
        .map(|px| {
            let r = u16::from_be_bytes([px[0], px[1]]);
            let g = u16::from_be_bytes([px[2], px[3]]);
            let b = u16::from_be_bytes([px[4], px[5]]);
            luma16(r, g, b)
        })
        .collect();
    Ok(luma)
}
