//! BMP scan decoder

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::dynamic_to_luma;
use crate::error::FilterError;
use crate::raster::Raster;

/// Decode a BMP file down to a single-channel luma raster.
pub(crate) fn decode_bmp<P: AsRef<Path>>(path: P) -> Result<Raster, FilterError> {
    let file = File::open(path.as_ref())
        .map_err(|e| FilterError::Decode(format!("failed to open BMP file: {}", e)))?;
    let img = image::load(BufReader::new(file), image::ImageFormat::Bmp)
        .map_err(|e| FilterError::Decode(format!("failed to decode BMP: {}", e)))?;
    dynamic_to_luma(img)
}
