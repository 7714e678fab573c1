//! Denoising stages: median, bilateral, and non-local means.

use rayon::prelude::*;

use crate::error::FilterError;
use crate::raster::Raster;

use super::{ensure_nonempty, PARALLEL_THRESHOLD};

/// Even kernel sizes behave as the next odd size.
#[inline]
pub(crate) fn coerce_odd(ksize: i32) -> usize {
    let k = ksize as usize;
    if k % 2 == 0 {
        k + 1
    } else {
        k
    }
}

#[inline]
fn clamp_coord(v: isize, len: usize) -> usize {
    v.clamp(0, len as isize - 1) as usize
}

/// k x k median filter. `ksize <= 0` skips the stage.
pub fn median_filter(raster: Raster, ksize: i32) -> Result<Raster, FilterError> {
    if ksize <= 0 {
        return Ok(raster);
    }
    ensure_nonempty(&raster)?;

    let k = coerce_odd(ksize);
    let radius = (k / 2) as isize;
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let src = raster.data();

    let mut out = vec![0u8; width * height];
    let fill_row = |y: usize, row: &mut [u8]| {
        let mut window = Vec::with_capacity(k * k);
        for (x, px) in row.iter_mut().enumerate() {
            window.clear();
            for dy in -radius..=radius {
                let sy = clamp_coord(y as isize + dy, height);
                for dx in -radius..=radius {
                    let sx = clamp_coord(x as isize + dx, width);
                    window.push(src[sy * width + sx]);
                }
            }
            window.sort_unstable();
            *px = window[window.len() / 2];
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

    Ok(Raster::from_parts(raster.width(), raster.height(), out))
}

/// Iterated bilateral filter. `n <= 0` skips the stage.
///
/// Each iteration filters from an owned snapshot of the working raster into
/// a fresh buffer, so no pass ever reads samples it already wrote.
pub fn bilateral_filter(
    raster: Raster,
    n: i32,
    diameter: i32,
    sigma_color: f64,
    sigma_space: f64,
) -> Result<Raster, FilterError> {
    if n <= 0 {
        return Ok(raster);
    }
    ensure_nonempty(&raster)?;
    if diameter <= 0 {
        return Err(FilterError::Stage(format!(
            "bilateral diameter must be positive, got {}",
            diameter
        )));
    }
    if sigma_color <= 0.0 || sigma_space <= 0.0 {
        return Err(FilterError::Stage(format!(
            "bilateral sigmas must be positive, got color={} space={}",
            sigma_color, sigma_space
        )));
    }

    let mut work = raster;
    for _ in 0..n {
        let snapshot = work.clone();
        work = bilateral_once(&snapshot, diameter, sigma_color, sigma_space);
    }
    Ok(work)
}

fn bilateral_once(raster: &Raster, diameter: i32, sigma_color: f64, sigma_space: f64) -> Raster {
    let radius = (diameter / 2).max(1) as isize;
    let k = (radius * 2 + 1) as usize;
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let src = raster.data();

    // Spatial weights depend only on the offset; precompute the window.
    let space_denom = 2.0 * sigma_space * sigma_space;
    let mut space_weights = vec![0.0f64; k * k];
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = (dx * dx + dy * dy) as f64;
            let idx = ((dy + radius) as usize) * k + (dx + radius) as usize;
            space_weights[idx] = (-d2 / space_denom).exp();
        }
    }

    // Range weights over the 256 possible intensity differences.
    let color_denom = 2.0 * sigma_color * sigma_color;
    let mut range_weights = [0.0f64; 256];
    for (diff, w) in range_weights.iter_mut().enumerate() {
        *w = (-((diff * diff) as f64) / color_denom).exp();
    }

    let mut out = vec![0u8; width * height];
    let fill_row = |y: usize, row: &mut [u8]| {
        for (x, px) in row.iter_mut().enumerate() {
            let center = src[y * width + x] as f64;
            let mut acc = 0.0;
            let mut norm = 0.0;
            for dy in -radius..=radius {
                let sy = clamp_coord(y as isize + dy, height);
                for dx in -radius..=radius {
                    let sx = clamp_coord(x as isize + dx, width);
                    let sample = src[sy * width + sx] as f64;
                    let widx = ((dy + radius) as usize) * k + (dx + radius) as usize;
                    let diff = (sample - center).abs() as usize;
                    let weight = space_weights[widx] * range_weights[diff.min(255)];
                    acc += weight * sample;
                    norm += weight;
                }
            }
            *px = (acc / norm).round().clamp(0.0, 255.0) as u8;
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

/// Single non-local-means pass. `h <= 0` skips the stage.
///
/// Pixels are averaged weighted by patch similarity: for each candidate in
/// the search window, the mean squared difference of the surrounding
/// template patches sets the weight `exp(-d2 / h^2)`.
pub fn non_local_means(
    raster: Raster,
    h: f64,
    template_size: i32,
    search_size: i32,
) -> Result<Raster, FilterError> {
    if h <= 0.0 {
        return Ok(raster);
    }
    ensure_nonempty(&raster)?;
    if template_size <= 0 || search_size <= 0 {
        return Err(FilterError::Stage(format!(
            "non-local-means window sizes must be positive, got template={} search={}",
            template_size, search_size
        )));
    }

    let t_radius = (coerce_odd(template_size) / 2) as isize;
    let s_radius = (coerce_odd(search_size) / 2) as isize;
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let src = raster.data();
    let h2 = h * h;

    let patch_distance = |ax: usize, ay: usize, bx: usize, by: usize| -> f64 {
        let mut sum = 0.0;
        let mut count = 0u32;
        for dy in -t_radius..=t_radius {
            let ay_s = clamp_coord(ay as isize + dy, height);
            let by_s = clamp_coord(by as isize + dy, height);
            for dx in -t_radius..=t_radius {
                let ax_s = clamp_coord(ax as isize + dx, width);
                let bx_s = clamp_coord(bx as isize + dx, width);
                let diff = src[ay_s * width + ax_s] as f64 - src[by_s * width + bx_s] as f64;
                sum += diff * diff;
                count += 1;
            }
        }
        sum / count as f64
    };

    let mut out = vec![0u8; width * height];
    let fill_row = |y: usize, row: &mut [u8]| {
        for (x, px) in row.iter_mut().enumerate() {
            let mut acc = 0.0;
            let mut norm = 0.0;
            for dy in -s_radius..=s_radius {
                let sy = clamp_coord(y as isize + dy, height);
                for dx in -s_radius..=s_radius {
                    let sx = clamp_coord(x as isize + dx, width);
                    let d2 = patch_distance(x, y, sx, sy);
                    let weight = (-d2 / h2).exp();
                    acc += weight * src[sy * width + sx] as f64;
                    norm += weight;
                }
            }
            *px = (acc / norm).round().clamp(0.0, 255.0) as u8;
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

    Ok(Raster::from_parts(raster.width(), raster.height(), out))
}
