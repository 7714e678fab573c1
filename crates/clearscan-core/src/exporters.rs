//! Image exporters for processed scans
//!
//! All results are written as 8-bit grayscale PNG regardless of the
//! input format.

use std::path::{Path, PathBuf};

use crate::error::FilterError;
use crate::raster::Raster;

/// Export a processed raster to an 8-bit grayscale PNG.
pub fn export_png<P: AsRef<Path>>(raster: &Raster, path: P) -> Result<(), FilterError> {
    use std::fs::File;
    use std::io::BufWriter;

    if raster.is_empty() {
        return Err(FilterError::Encode(
            "cannot export an empty raster".to_string(),
        ));
    }

    let file = File::create(path.as_ref())
        .map_err(|e| FilterError::Encode(format!("failed to create PNG file: {}", e)))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| FilterError::Encode(format!("failed to write PNG header: {}", e)))?;
    png_writer
        .write_image_data(raster.data())
        .map_err(|e| FilterError::Encode(format!("failed to write PNG data: {}", e)))?;

    Ok(())
}

/// Build the output path for a processed scan: a date-stamped directory
/// under `pictures_dir`, with the input's file stem and a `.png`
/// extension.
///
/// `date_tag` is expected in `YYYYMMDD` form; the directory is created
/// if it does not exist yet.
pub fn dated_output_path(
    input: &Path,
    pictures_dir: &Path,
    date_tag: &str,
) -> Result<PathBuf, FilterError> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            FilterError::Encode(format!("input path has no file stem: {}", input.display()))
        })?;

    let dir = pictures_dir.join(date_tag);
    std::fs::create_dir_all(&dir).map_err(|e| {
        FilterError::Encode(format!(
            "failed to create output directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    Ok(dir.join(format!("{}.png", stem)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::decode_raster;
    use tempfile::tempdir;

    fn gradient_raster(size: u32) -> Raster {
        let data = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                ((x * 13 + y * 29) % 256) as u8
            })
            .collect();
        Raster::from_vec(size, size, data).unwrap()
    }

    #[test]
    fn test_export_then_decode_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let raster = gradient_raster(16);

        export_png(&raster, &path).unwrap();
        let back = decode_raster(&path).unwrap();

        assert_eq!(back, raster);
    }

    #[test]
    fn test_export_empty_raster_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let err = export_png(&Raster::new(0, 0), &path).unwrap_err();
        assert!(matches!(err, FilterError::Encode(_)));
    }

    #[test]
    fn test_export_to_invalid_path_fails() {
        let raster = gradient_raster(4);
        let err = export_png(&raster, "/nonexistent-dir/deep/out.png").unwrap_err();
        assert!(matches!(err, FilterError::Encode(_)));
    }

    #[test]
    fn test_dated_output_path_layout() {
        let dir = tempdir().unwrap();
        let out = dated_output_path(
            Path::new("/scans/page_004.jpg"),
            dir.path(),
            "20260830",
        )
        .unwrap();

        assert_eq!(out, dir.path().join("20260830").join("page_004.png"));
        assert!(out.parent().unwrap().is_dir());
    }

    #[test]
    fn test_dated_output_path_rejects_stemless_input() {
        let dir = tempdir().unwrap();
        let err = dated_output_path(Path::new("/"), dir.path(), "20260830").unwrap_err();
        assert!(matches!(err, FilterError::Encode(_)));
    }
}
