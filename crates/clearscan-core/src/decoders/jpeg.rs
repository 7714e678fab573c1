//! JPEG scan decoder

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::dynamic_to_luma;
use crate::error::FilterError;
use crate::raster::Raster;

/// Decode a JPEG file down to a single-channel luma raster.
pub(crate) fn decode_jpeg<P: AsRef<Path>>(path: P) -> Result<Raster, FilterError> {
    let file = File::open(path.as_ref())
        .map_err(|e| FilterError::Decode(format!("failed to open JPEG file: {}", e)))?;
    let img = image::load(BufReader::new(file), image::ImageFormat::Jpeg)
        .map_err(|e| FilterError::Decode(format!("failed to decode JPEG: {}", e)))?;
    dynamic_to_luma(img)
}
