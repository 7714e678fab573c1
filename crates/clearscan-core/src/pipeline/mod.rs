//! The image filter pipeline.
//!
//! A single linear pass over the profile's enabled stages, in the fixed
//! order that profile declares. Stages own their input raster and return an
//! owned output; disabled stages hand the raster straight through. Any
//! stage failure aborts the invocation with no partial result.
//!
//! This module is organized into submodules:
//! - `blur`: iterated local and gaussian blur
//! - `denoise`: median, bilateral, and non-local-means filters
//! - `sharpen`: Laplacian edge subtraction and unsharp masking
//! - `tone`: gamma lookup tables
//! - `convolve`: shared convolution primitives

mod blur;
mod convolve;
mod denoise;
mod sharpen;
mod tone;


pub use blur::{gaussian_blur, local_blur};
pub use denoise::{bilateral_filter, median_filter, non_local_means};
pub use sharpen::{laplacian_subtract, unsharp_masking};
pub use tone::{gamma_correct_int, gamma_correct_real};

pub(crate) use convolve::PARALLEL_THRESHOLD;

use crate::error::FilterError;
use crate::profile::{GammaForm, PipelineProfile, Stage, StagePlan};
use crate::raster::Raster;
use crate::settings::FilterSettings;
use crate::verbose_println;

/// Counters describing one pipeline invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Stages that actually ran (disabled stages are not counted).
    pub stages_applied: u32,
    /// How many times the secondary blend path executed its tail.
    pub secondary_path_runs: u32,
}

/// Run the filter pipeline for one profile against a settings snapshot.
pub fn run_pipeline(
    raster: Raster,
    settings: &FilterSettings,
    profile: PipelineProfile,
) -> Result<Raster, FilterError> {
    run_pipeline_with_stats(raster, settings, profile).map(|(raster, _)| raster)
}

/// Like [`run_pipeline`], but also reports invocation counters. The
/// secondary-path counter is the instrumentation hook for verifying the
/// blend short-circuit.
pub fn run_pipeline_with_stats(
    raster: Raster,
    settings: &FilterSettings,
    profile: PipelineProfile,
) -> Result<(Raster, PipelineStats), FilterError> {
    ensure_nonempty(&raster)?;

    let plan = profile.plan();
    let mut stats = PipelineStats::default();

    // Shared head, up to the dual-path fork
    let mut primary = raster;
    for stage in &plan.stages[..plan.fork_index] {
        primary = apply_stage(primary, *stage, settings, &plan, false, &mut stats)?;
    }

    // The secondary variant only exists when blending is both supported
    // and requested; at alpha == 1.0 no clone is ever made.
    let alpha = settings.add_weighted_alpha.clamp(0.0, 1.0);
    let secondary_seed = if plan.blend_capable && alpha < 1.0 {
        Some(primary.clone())
    } else {
        None
    };

    for stage in &plan.stages[plan.fork_index..] {
        primary = apply_stage(primary, *stage, settings, &plan, false, &mut stats)?;
    }

    let output = match secondary_seed {
        Some(mut secondary) => {
            stats.secondary_path_runs += 1;
            for stage in &plan.stages[plan.fork_index..] {
                secondary = apply_stage(secondary, *stage, settings, &plan, true, &mut stats)?;
            }
            verbose_println!(
                "[clearscan] blending primary/secondary variants at alpha {:.3}",
                alpha
            );
            blend_weighted(&primary, &secondary, alpha)
        }
        None => primary,
    };

    Ok((output, stats))
}

/// Apply one stage slot. The enablement check lives here so a disabled
/// stage costs nothing, not even a copy; the stage functions keep their own
/// defensive checks for direct callers.
fn apply_stage(
    raster: Raster,
    stage: Stage,
    settings: &FilterSettings,
    plan: &StagePlan,
    swap_gamma: bool,
    stats: &mut PipelineStats,
) -> Result<Raster, FilterError> {
    let out = match stage {
        Stage::Median => {
            if settings.median_ksize <= 0 {
                return Ok(raster);
            }
            median_filter(raster, settings.median_ksize)?
        }
        Stage::LocalBlur => {
            if settings.blur_number_of_times <= 0 {
                return Ok(raster);
            }
            local_blur(raster, settings.blur_number_of_times, plan.blur_kernel)?
        }
        Stage::GaussianBlur => {
            if settings.gaussian_blur_n <= 0 {
                return Ok(raster);
            }
            gaussian_blur(raster, settings.gaussian_blur_n)?
        }
        Stage::Bilateral => {
            if settings.bilateral_filter_n <= 0 {
                return Ok(raster);
            }
            bilateral_filter(
                raster,
                settings.bilateral_filter_n,
                settings.bilateral_filter_d,
                settings.bilateral_filter_color,
                settings.bilateral_filter_space,
            )?
        }
        Stage::NonLocalMeans1 => {
            if settings.non_local_mean_h <= 0.0 {
                return Ok(raster);
            }
            non_local_means(
                raster,
                settings.non_local_mean_h,
                settings.non_local_mean_template_window_size,
                settings.non_local_mean_search_window_size,
            )?
        }
        Stage::NonLocalMeans2 => {
            if settings.non_local_mean_h2 <= 0.0 {
                return Ok(raster);
            }
            non_local_means(
                raster,
                settings.non_local_mean_h2,
                settings.non_local_mean_template_window_size,
                settings.non_local_mean_search_window_size,
            )?
        }
        Stage::Laplacian => {
            if settings.laplacian_ksize <= 0 || settings.laplacian_ksize % 2 == 0 {
                return Ok(raster);
            }
            laplacian_subtract(raster, settings.laplacian_ksize)?
        }
        Stage::Unsharp => {
            if settings.unsharp_masking_k <= 0.0 {
                return Ok(raster);
            }
            unsharp_masking(raster, settings.unsharp_masking_k, plan.unsharp_kernel)?
        }
        Stage::GammaPrimary | Stage::GammaSecondary => match plan.gamma_form {
            GammaForm::IntegerVol => {
                if (-10..=10).contains(&settings.gamma_vol) {
                    return Ok(raster);
                }
                gamma_correct_int(raster, settings.gamma_vol)
            }
            GammaForm::Real => {
                // On the secondary path the primary and secondary gamma
                // roles are swapped.
                let primary_role = matches!(stage, Stage::GammaPrimary) != swap_gamma;
                let gamma = if primary_role {
                    settings.gamma
                } else {
                    settings.gamma2
                };
                if gamma <= 0.0 {
                    return Ok(raster);
                }
                gamma_correct_real(raster, gamma)
            }
        },
    };

    stats.stages_applied += 1;
    if crate::config::is_verbose() {
        let (min, max, mean) = out.stats();
        verbose_println!(
            "[clearscan] after {:?} - min: {}, max: {}, mean: {:.2}",
            stage,
            min,
            max,
            mean
        );
    }
    Ok(out)
}

/// Per-pixel weighted sum of the two processed variants, clamped to 8-bit.
fn blend_weighted(primary: &Raster, secondary: &Raster, alpha: f64) -> Raster {
    let data = primary
        .data()
        .iter()
        .zip(secondary.data())
        .map(|(&p, &s)| {
            (alpha * p as f64 + (1.0 - alpha) * s as f64)
                .round()
                .clamp(0.0, 255.0) as u8
        })
        .collect();
    Raster::from_parts(primary.width(), primary.height(), data)
}

/// Denoising and sharpening stages fail fatally on an empty raster.
pub(crate) fn ensure_nonempty(raster: &Raster) -> Result<(), FilterError> {
    if raster.is_empty() {
        return Err(FilterError::Stage(
            "raster is empty or has zero dimensions".to_string(),
        ));
    }
    Ok(())
}
