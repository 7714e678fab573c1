//! Square-kernel convolution primitives with replicate borders.
//!
//! Accumulation happens in f64; results renormalize to 8-bit before the
//! next stage sees them. Large rasters convolve row-parallel.

use rayon::prelude::*;

use crate::raster::Raster;

/// Rasters with at least this many samples are processed row-parallel.
pub(crate) const PARALLEL_THRESHOLD: usize = 100_000;

#[inline]
fn clamp_coord(v: isize, len: usize) -> usize {
    v.clamp(0, len as isize - 1) as usize
}

#[inline]
fn convolve_at(
    src: &[u8],
    width: usize,
    height: usize,
    kernel: &[f64],
    ksize: usize,
    x: usize,
    y: usize,
) -> f64 {
    let radius = (ksize / 2) as isize;
    let mut acc = 0.0;
    for ky in 0..ksize {
        let sy = clamp_coord(y as isize + ky as isize - radius, height);
        let row = &src[sy * width..(sy + 1) * width];
        for kx in 0..ksize {
            let sx = clamp_coord(x as isize + kx as isize - radius, width);
            acc += kernel[ky * ksize + kx] * row[sx] as f64;
        }
    }
    acc
}

/// Convolve with an odd-sided square kernel, clamping and rounding the
/// result back to 8-bit.
pub(crate) fn convolve(raster: &Raster, kernel: &[f64], ksize: usize) -> Raster {
    debug_assert_eq!(kernel.len(), ksize * ksize);
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let src = raster.data();

    let mut out = vec![0u8; width * height];
    let fill_row = |y: usize, row: &mut [u8]| {
        for (x, px) in row.iter_mut().enumerate() {
            let acc = convolve_at(src, width, height, kernel, ksize, x, y);
            *px = acc.round().clamp(0.0, 255.0) as u8;
        }
    };

    if width * height >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    } else {
        for (y, row) in out.chunks_mut(width).enumerate() {
            fill_row(y, row);
        }
    }

    Raster::from_parts(raster.width(), raster.height(), out)
}

/// Convolve into a high-precision buffer without clamping, for stages that
/// post-process the raw response (Laplacian edge extraction).
pub(crate) fn convolve_f64(raster: &Raster, kernel: &[f64], ksize: usize) -> Vec<f64> {
    debug_assert_eq!(kernel.len(), ksize * ksize);
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let src = raster.data();

    let mut out = vec![0.0f64; width * height];
    let fill_row = |y: usize, row: &mut [f64]| {
        for (x, px) in row.iter_mut().enumerate() {
            *px = convolve_at(src, width, height, kernel, ksize, x, y);
        }
    };

    if width * height >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    } else {
        for (y, row) in out.chunks_mut(width).enumerate() {
            fill_row(y, row);
        }
    }

    out
}
