//! Parsing functions for CLI arguments.

use clearscan_core::PipelineProfile;

/// Parse a pipeline profile name.
///
/// Accepts "minimal", "classic", "revised", and "dual-path" (also
/// "dualpath" and "dual_path"), case-insensitively.
pub fn parse_profile(name: &str) -> Result<PipelineProfile, String> {
    match name.to_lowercase().as_str() {
        "minimal" => Ok(PipelineProfile::Minimal),
        "classic" => Ok(PipelineProfile::Classic),
        "revised" => Ok(PipelineProfile::Revised),
        "dual-path" | "dualpath" | "dual_path" => Ok(PipelineProfile::DualPath),
        other => Err(format!(
            "Unknown profile: {} (expected minimal, classic, revised, or dual-path)",
            other
        )),
    }
}
