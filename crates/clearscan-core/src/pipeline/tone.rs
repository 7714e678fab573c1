//! Gamma correction via 256-entry lookup tables.

use crate::raster::Raster;

fn build_lut(exponent: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let v = 255.0 * (i as f64 / 255.0).powf(exponent);
        *entry = v.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

fn apply_lut(mut raster: Raster, lut: &[u8; 256]) -> Raster {
    for px in raster.data_mut() {
        *px = lut[*px as usize];
    }
    raster
}

/// Integer-parameterized gamma correction.
///
/// `gamma_vol` in [-10, 10] means "no correction" and returns the raster
/// untouched. Otherwise the exponent is `gamma_vol / 10` when positive, or
/// its reciprocal magnitude when negative.
pub fn gamma_correct_int(raster: Raster, gamma_vol: i32) -> Raster {
    if (-10..=10).contains(&gamma_vol) {
        return raster;
    }
    let gamma = if gamma_vol < 0 {
        1.0 / (-(gamma_vol as f64) / 10.0)
    } else {
        gamma_vol as f64 / 10.0
    };
    apply_lut(raster, &build_lut(gamma))
}

/// Real-valued gamma correction: `LUT[i] = round(255 * (i/255)^(1/gamma))`.
/// Non-positive gamma disables the stage.
pub fn gamma_correct_real(raster: Raster, gamma: f64) -> Raster {
    if gamma <= 0.0 {
        return raster;
    }
    apply_lut(raster, &build_lut(1.0 / gamma))
}
