//! Filter parameters and their persistence.

mod defaults;
mod store;

#[cfg(test)]
mod tests;

pub use store::{load_settings, resolve_settings_path, save_settings, settings_candidates};

use serde::{Deserialize, Serialize};

use defaults::{
    default_bilateral_d, default_bilateral_sigma, default_blend_alpha, default_blur_times,
    default_nlm_h, default_nlm_search, default_nlm_template, default_unsharp_k, default_zero_f64,
    default_zero_i32,
};

/// Parameters for one pipeline invocation.
///
/// Wire names match the persisted `setting.json` written by earlier
/// releases, so old files keep loading. Every field has a default and every
/// stage has a disabling sentinel, so a partially populated file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Iteration count for the fixed 3x3 local blur kernel. <= 0 disables.
    #[serde(rename = "BlurNumberOfTimes", default = "default_blur_times")]
    pub blur_number_of_times: i32,

    /// Median kernel size. Even values behave as the next odd value; <= 0 disables.
    #[serde(rename = "MedianKsize", default = "default_zero_i32")]
    pub median_ksize: i32,

    /// Iteration count for the fixed 3x3 gaussian kernel. <= 0 disables.
    #[serde(rename = "GaussianBlurN", default = "default_zero_i32")]
    pub gaussian_blur_n: i32,

    /// Bilateral filter iteration count. <= 0 disables.
    #[serde(rename = "BilateralFilterN", default = "default_zero_i32")]
    pub bilateral_filter_n: i32,

    /// Bilateral kernel diameter. Must be positive when the stage runs.
    #[serde(rename = "BilateralFilterD", default = "default_bilateral_d")]
    pub bilateral_filter_d: i32,

    /// Bilateral range (intensity) sigma.
    #[serde(rename = "BilateralFilterColor", default = "default_bilateral_sigma")]
    pub bilateral_filter_color: f64,

    /// Bilateral spatial sigma.
    #[serde(rename = "BilateralFilterSpace", default = "default_bilateral_sigma")]
    pub bilateral_filter_space: f64,

    /// Denoising strength for the first non-local-means pass. <= 0 disables.
    #[serde(rename = "NonLocalMeanH", default = "default_nlm_h")]
    pub non_local_mean_h: f64,

    /// Denoising strength for the second non-local-means pass. <= 0 disables.
    #[serde(rename = "NonLocalMeanH2", default = "default_zero_f64")]
    pub non_local_mean_h2: f64,

    /// Patch size for non-local-means similarity. Even values behave as odd.
    /// The alias covers the misspelled name earlier releases persisted.
    #[serde(
        rename = "NonLocalMeanTemplateWindowSize",
        alias = "NonLocalMeanTempateWindowSize",
        default = "default_nlm_template"
    )]
    pub non_local_mean_template_window_size: i32,

    /// Search window size for non-local-means. Even values behave as odd.
    #[serde(
        rename = "NonLocalMeanSearchWindowSize",
        default = "default_nlm_search"
    )]
    pub non_local_mean_search_window_size: i32,

    /// Laplacian aperture. Must be odd and positive; even or <= 0 skips the stage.
    #[serde(rename = "LaplacianKsize", default = "default_zero_i32")]
    pub laplacian_ksize: i32,

    /// Unsharp masking strength. <= 0 disables.
    #[serde(rename = "UnsharpMaskingK", default = "default_unsharp_k")]
    pub unsharp_masking_k: f64,

    /// Integer-parameterized gamma. Values in [-10, 10] mean "no correction".
    #[serde(rename = "GammaVol", default = "default_zero_i32")]
    pub gamma_vol: i32,

    /// Real-valued gamma for the primary path in dual-path profiles. <= 0 disables.
    #[serde(rename = "Gamma", default = "default_zero_f64")]
    pub gamma: f64,

    /// Real-valued gamma for the secondary path in dual-path profiles. <= 0 disables.
    #[serde(rename = "Gamma2", default = "default_zero_f64")]
    pub gamma2: f64,

    /// Blend ratio between the primary and secondary processed variants.
    /// 1.0 keeps only the primary path and skips all secondary work.
    #[serde(rename = "AddWeightedAlpha", default = "default_blend_alpha")]
    pub add_weighted_alpha: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            blur_number_of_times: default_blur_times(),
            median_ksize: default_zero_i32(),
            gaussian_blur_n: default_zero_i32(),
            bilateral_filter_n: default_zero_i32(),
            bilateral_filter_d: default_bilateral_d(),
            bilateral_filter_color: default_bilateral_sigma(),
            bilateral_filter_space: default_bilateral_sigma(),
            non_local_mean_h: default_nlm_h(),
            non_local_mean_h2: default_zero_f64(),
            non_local_mean_template_window_size: default_nlm_template(),
            non_local_mean_search_window_size: default_nlm_search(),
            laplacian_ksize: default_zero_i32(),
            unsharp_masking_k: default_unsharp_k(),
            gamma_vol: default_zero_i32(),
            gamma: default_zero_f64(),
            gamma2: default_zero_f64(),
            add_weighted_alpha: default_blend_alpha(),
        }
    }
}

/// Owning settings holder with explicit invalidation signaling.
///
/// Mutations mark the cell dirty; the orchestrator checks and clears the
/// flag when it decides to rerun the pipeline. Worker invocations take
/// owned snapshots, so a mutation mid-run never touches an in-flight
/// computation.
#[derive(Debug, Clone)]
pub struct SettingsCell {
    settings: FilterSettings,
    dirty: bool,
}

impl SettingsCell {
    /// Wrap settings that have not been processed yet (starts dirty).
    pub fn new(settings: FilterSettings) -> Self {
        Self {
            settings,
            dirty: true,
        }
    }

    pub fn get(&self) -> &FilterSettings {
        &self.settings
    }

    /// Apply a mutation and mark the last processed raster as invalidated.
    pub fn mutate<F: FnOnce(&mut FilterSettings)>(&mut self, f: F) {
        f(&mut self.settings);
        self.dirty = true;
    }

    /// Owned copy-on-read snapshot for a pipeline invocation.
    pub fn snapshot(&self) -> FilterSettings {
        self.settings.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag in one step.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
