//! Sharpening stages: Laplacian edge subtraction and unsharp masking.

use crate::error::FilterError;
use crate::profile::UnsharpKernel;
use crate::raster::Raster;

use super::convolve::{convolve, convolve_f64};
use super::ensure_nonempty;

/// 1D convolution of two coefficient rows.
fn conv1d(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &av) in a.iter().enumerate() {
        for (j, &bv) in b.iter().enumerate() {
            out[i + j] += av * bv;
        }
    }
    out
}

/// Sobel-style separable kernel row of the given size and derivative order:
/// binomial smoothing convolved with `[1, -1]` once per derivative order.
fn sep_kernel(ksize: usize, order: usize) -> Vec<f64> {
    let mut row = vec![1.0];
    for _ in 0..ksize - 1 - order {
        row = conv1d(&row, &[1.0, 1.0]);
    }
    for _ in 0..order {
        row = conv1d(&row, &[1.0, -1.0]);
    }
    row
}

/// Square Laplacian kernel for an odd aperture: the sum of the second
/// derivative along each axis, smoothed along the other.
fn laplacian_kernel(ksize: usize) -> (Vec<f64>, usize) {
    // Aperture 1 means the unsmoothed 3x3 Laplacian
    if ksize == 1 {
        let kernel = vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0];
        return (kernel, 3);
    }

    let d2 = sep_kernel(ksize, 2);
    let smooth = sep_kernel(ksize, 0);
    let mut kernel = vec![0.0; ksize * ksize];
    for y in 0..ksize {
        for x in 0..ksize {
            kernel[y * ksize + x] = smooth[y] * d2[x] + d2[y] * smooth[x];
        }
    }
    (kernel, ksize)
}

/// Extract the Laplacian edge response and subtract it from the raster, so
/// edges become locally darker. An even or non-positive aperture skips the
/// stage entirely; it is not an error.
pub fn laplacian_subtract(raster: Raster, ksize: i32) -> Result<Raster, FilterError> {
    if ksize <= 0 || ksize % 2 == 0 {
        return Ok(raster);
    }
    ensure_nonempty(&raster)?;

    let (kernel, k) = laplacian_kernel(ksize as usize);
    let edges = convolve_f64(&raster, &kernel, k);

    let mut out = raster;
    for (px, response) in out.data_mut().iter_mut().zip(edges.iter()) {
        // Edge map renormalizes to 8-bit before the subtraction
        let edge = response.round().clamp(0.0, 255.0);
        *px = (*px as f64 - edge).clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}

/// Build the 3x3 unsharp kernel for strength `k`. At `k = 0` both variants
/// degenerate to the identity.
pub(crate) fn unsharp_kernel(k: f64, variant: UnsharpKernel) -> [f64; 9] {
    match variant {
        UnsharpKernel::Uniform => {
            let n = -k / 9.0;
            [n, n, n, n, 1.0 + 8.0 * k / 9.0, n, n, n, n]
        }
        UnsharpKernel::CrossWeighted => {
            let diag = -k / 16.0;
            let orth = -2.0 * k / 16.0;
            [
                diag,
                orth,
                diag,
                orth,
                1.0 + 12.0 * k / 16.0,
                orth,
                diag,
                orth,
                diag,
            ]
        }
    }
}

/// Single-pass unsharp masking. `k <= 0` skips the stage.
pub fn unsharp_masking(
    raster: Raster,
    k: f64,
    variant: UnsharpKernel,
) -> Result<Raster, FilterError> {
    if k <= 0.0 {
        return Ok(raster);
    }
    ensure_nonempty(&raster)?;
    Ok(convolve(&raster, &unsharp_kernel(k, variant), 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sep_kernel_matches_known_sobel_rows() {
        assert_eq!(sep_kernel(3, 0), vec![1.0, 2.0, 1.0]);
        assert_eq!(sep_kernel(3, 2), vec![1.0, -2.0, 1.0]);
        assert_eq!(sep_kernel(5, 0), vec![1.0, 4.0, 6.0, 4.0, 1.0]);
        assert_eq!(sep_kernel(5, 2), vec![1.0, 0.0, -2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_laplacian_kernel_sums_to_zero() {
        for ksize in [1usize, 3, 5, 7] {
            let (kernel, _) = laplacian_kernel(ksize);
            let sum: f64 = kernel.iter().sum();
            assert!(
                sum.abs() < 1e-9,
                "aperture {} kernel sums to {}",
                ksize,
                sum
            );
        }
    }

    #[test]
    fn test_even_aperture_skips_stage() {
        let raster = Raster::from_vec(3, 3, vec![10, 200, 10, 200, 10, 200, 10, 200, 10]).unwrap();
        let out = laplacian_subtract(raster.clone(), 4).unwrap();
        assert_eq!(out, raster);
    }

    #[test]
    fn test_nonpositive_aperture_skips_stage() {
        let raster = Raster::filled(4, 4, 99);
        assert_eq!(laplacian_subtract(raster.clone(), 0).unwrap(), raster);
        assert_eq!(laplacian_subtract(raster.clone(), -3).unwrap(), raster);
    }

    #[test]
    fn test_laplacian_uniform_raster_unchanged() {
        // Zero-sum kernel means zero response on a flat field
        let raster = Raster::filled(6, 6, 180);
        let out = laplacian_subtract(raster.clone(), 3).unwrap();
        assert_eq!(out, raster);
    }

    #[test]
    fn test_laplacian_darkens_edges() {
        // A bright impulse on a dark field puts the positive response on
        // the dark side of the edge, which the subtraction darkens further;
        // negative responses clip to zero and leave pixels alone.
        let mut data = vec![50u8; 25];
        data[12] = 255;
        let raster = Raster::from_vec(5, 5, data).unwrap();

        let out = laplacian_subtract(raster, 1).unwrap();

        assert_eq!(out.get(2, 2), 255); // impulse response is negative, clipped
        assert!(out.get(1, 2) < 50); // neighbor darkens
        assert_eq!(out.get(0, 0), 50); // far corner untouched
    }

    #[test]
    fn test_unsharp_kernel_degenerates_to_identity_at_zero() {
        for variant in [UnsharpKernel::Uniform, UnsharpKernel::CrossWeighted] {
            let kernel = unsharp_kernel(0.0, variant);
            assert_eq!(
                kernel,
                [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
                "{:?}",
                variant
            );
        }
    }

    #[test]
    fn test_unsharp_kernels_sum_to_one() {
        for variant in [UnsharpKernel::Uniform, UnsharpKernel::CrossWeighted] {
            let kernel = unsharp_kernel(1.5, variant);
            let sum: f64 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{:?} sums to {}", variant, sum);
        }
    }

    #[test]
    fn test_unsharp_nonpositive_strength_skips() {
        let raster = Raster::from_vec(2, 2, vec![5, 10, 15, 20]).unwrap();
        let out = unsharp_masking(raster.clone(), 0.0, UnsharpKernel::Uniform).unwrap();
        assert_eq!(out, raster);
        let out = unsharp_masking(raster.clone(), -2.0, UnsharpKernel::Uniform).unwrap();
        assert_eq!(out, raster);
    }

    #[test]
    fn test_unsharp_increases_local_contrast() {
        let mut data = vec![100u8; 25];
        data[12] = 140;
        let raster = Raster::from_vec(5, 5, data).unwrap();

        let out = unsharp_masking(raster, 1.5, UnsharpKernel::Uniform).unwrap();

        assert!(out.get(2, 2) > 140);
        assert!(out.get(1, 2) < 100);
    }
}
