//! Error taxonomy for the filter pipeline and its I/O boundaries.

use thiserror::Error;

/// Errors surfaced by decoding, encoding, settings handling, and pipeline
/// stages. A stage error aborts the whole invocation; callers never see a
/// partially processed raster.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("settings error: {0}")]
    Config(String),
    #[error("stage error: {0}")]
    Stage(String),
}
