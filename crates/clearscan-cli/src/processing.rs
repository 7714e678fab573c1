//! Input file handling and path utilities.

use std::path::{Path, PathBuf};

/// Supported image extensions for batch processing
pub const SUPPORTED_EXTENSIONS: &[&str] = &["bmp", "jpeg", "jpg", "png"];

/// Whether a path carries a supported image extension.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Determine the output path for a processed scan.
///
/// The result lands in a date-stamped subdirectory of `out` (or the
/// platform pictures directory when `out` is not given), named after the
/// input file with a `.png` extension.
pub fn determine_output_path(
    input: &Path,
    out: &Option<PathBuf>,
    date_tag: &str,
) -> Result<PathBuf, String> {
    let base_dir = match out {
        Some(dir) => dir.clone(),
        None => dirs::picture_dir().unwrap_or_else(|| PathBuf::from(".")),
    };

    clearscan_core::dated_output_path(input, &base_dir, date_tag).map_err(|e| e.to_string())
}

/// Expand a list of inputs (files and directories) into a list of image
/// files.
///
/// Directories are scanned for supported image files (.bmp, .jpg, .jpeg,
/// .png). Explicitly listed files are taken as-is so an unsupported one
/// fails at decode time with a clear error.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_images_from_dir(input, &mut files)?;
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(format!("Path not found: {}", input.display()));
        }
    }

    // Sort for consistent ordering
    files.sort();
    Ok(files)
}

fn collect_images_from_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();

        if path.is_file() && is_supported(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_supported_matches_case_insensitively() {
        assert!(is_supported(Path::new("scan.png")));
        assert!(is_supported(Path::new("scan.JPG")));
        assert!(is_supported(Path::new("scan.Jpeg")));
        assert!(is_supported(Path::new("scan.bmp")));
        assert!(!is_supported(Path::new("scan.tif")));
        assert!(!is_supported(Path::new("scan")));
    }

    #[test]
    fn test_expand_inputs_scans_directories_sorted() {
        let dir = tempdir().unwrap();
        for name in ["b.png", "a.jpg", "notes.txt", "c.bmp"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = expand_inputs(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.jpg", "b.png", "c.bmp"]);
    }

    #[test]
    fn test_expand_inputs_keeps_explicit_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("listing.txt");
        std::fs::write(&file, b"x").unwrap();

        let files = expand_inputs(&[file.clone()]).unwrap();
        assert_eq!(files, [file]);
    }

    #[test]
    fn test_expand_inputs_rejects_missing_path() {
        let dir = tempdir().unwrap();
        let err = expand_inputs(&[dir.path().join("absent.png")]).unwrap_err();
        assert!(err.contains("Path not found"));
    }

    #[test]
    fn test_determine_output_path_uses_date_subdir() {
        let dir = tempdir().unwrap();
        let out = Some(dir.path().to_path_buf());
        let path =
            determine_output_path(Path::new("/scans/page_01.jpg"), &out, "20260830").unwrap();
        assert_eq!(path, dir.path().join("20260830").join("page_01.png"));
    }
}
