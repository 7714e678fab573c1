//! Clearscan Core Library
//!
//! Core functionality for denoising and sharpening grayscale scans.

pub mod config;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod pipeline;
pub mod profile;
pub mod raster;
pub mod settings;

// Re-export commonly used types
pub use decoders::decode_raster;
pub use error::FilterError;
pub use exporters::{dated_output_path, export_png};
pub use pipeline::{run_pipeline, run_pipeline_with_stats, PipelineStats};
pub use profile::PipelineProfile;
pub use raster::{to_display_format, DisplayRaster, Raster};
pub use settings::{FilterSettings, SettingsCell};
