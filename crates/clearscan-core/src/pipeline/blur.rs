//! Iterated local blur stages.
//!
//! Each pass feeds the next; N passes of the 3x3 kernel are exactly N
//! single passes in sequence. A non-positive count returns the input
//! untouched rather than running an identity convolution.

use crate::error::FilterError;
use crate::profile::BlurKernel;
use crate::raster::Raster;

use super::convolve::convolve;
use super::ensure_nonempty;

const WEIGHTED_CROSS: [f64; 9] = [
    0.0,
    1.0 / 16.0,
    0.0,
    1.0 / 16.0,
    12.0 / 16.0,
    1.0 / 16.0,
    0.0,
    1.0 / 16.0,
    0.0,
];

const PLAIN_CROSS: [f64; 9] = [
    0.0,
    1.0 / 5.0,
    0.0,
    1.0 / 5.0,
    1.0 / 5.0,
    1.0 / 5.0,
    0.0,
    1.0 / 5.0,
    0.0,
];

const GAUSSIAN_3X3: [f64; 9] = [
    1.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
    2.0 / 16.0,
    4.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
];

/// Apply the profile's 3x3 cross kernel `times` times in sequence.
/// `times <= 0` skips the stage.
pub fn local_blur(raster: Raster, times: i32, kernel: BlurKernel) -> Result<Raster, FilterError> {
    if times <= 0 {
        return Ok(raster);
    }
    ensure_nonempty(&raster)?;

    let weights: &[f64; 9] = match kernel {
        BlurKernel::WeightedCross => &WEIGHTED_CROSS,
        BlurKernel::PlainCross => &PLAIN_CROSS,
    };

    let mut out = raster;
    for _ in 0..times {
        out = convolve(&out, weights, 3);
    }
    Ok(out)
}

/// Apply the fixed 3x3 binomial gaussian kernel `times` times in sequence.
/// `times <= 0` skips the stage.
pub fn gaussian_blur(raster: Raster, times: i32) -> Result<Raster, FilterError> {
    if times <= 0 {
        return Ok(raster);
    }
    ensure_nonempty(&raster)?;

    let mut out = raster;
    for _ in 0..times {
        out = convolve(&out, &GAUSSIAN_3X3, 3);
    }
    Ok(out)
}
