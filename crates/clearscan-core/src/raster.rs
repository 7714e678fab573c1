//! Grayscale raster type and display-format conversion.

use crate::error::FilterError;

/// A 2D grid of single-channel 8-bit intensity samples.
///
/// Stages may lift the data to 64-bit float internally, but every stage
/// consumes and produces an 8-bit raster of identical dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Create a zero-filled raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Create a raster filled with a single intensity value.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Create a raster from row-major sample data, validating the length.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self, FilterError> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(FilterError::Stage(format!(
                "raster buffer size mismatch: expected {}, got {}",
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Internal constructor for buffers whose length is known to match.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// True when either dimension is zero or the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Sample at (x, y). Caller must stay in bounds.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Min, max, and mean intensity, for diagnostics.
    pub fn stats(&self) -> (u8, u8, f64) {
        if self.data.is_empty() {
            return (0, 0, 0.0);
        }
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        let mut sum = 0u64;
        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
            sum += v as u64;
        }
        (min, max, sum as f64 / self.data.len() as f64)
    }
}

/// Gray+alpha raster for overlay and clipboard use. Samples are interleaved
/// `[luma, alpha]` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRaster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl DisplayRaster {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Convert a processed raster to display format: alpha is `255 - luma`, so
/// bright paper becomes transparent and dark line work stays opaque.
pub fn to_display_format(raster: &Raster) -> DisplayRaster {
    let mut data = Vec::with_capacity(raster.data().len() * 2);
    for &luma in raster.data() {
        data.push(luma);
        data.push(255 - luma);
    }
    DisplayRaster {
        width: raster.width(),
        height: raster.height(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_validates_length() {
        let result = Raster::from_vec(4, 4, vec![0; 15]);
        assert!(result.is_err());

        let result = Raster::from_vec(4, 4, vec![0; 16]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_is_empty() {
        assert!(Raster::new(0, 10).is_empty());
        assert!(Raster::new(10, 0).is_empty());
        assert!(!Raster::filled(2, 2, 128).is_empty());
    }

    #[test]
    fn test_stats_uniform() {
        let raster = Raster::filled(8, 8, 100);
        let (min, max, mean) = raster.stats();
        assert_eq!(min, 100);
        assert_eq!(max, 100);
        assert!((mean - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_format_alpha_is_inverted_luma() {
        let raster = Raster::from_vec(2, 1, vec![0, 200]).unwrap();
        let display = to_display_format(&raster);

        assert_eq!(display.data(), &[0, 255, 200, 55]);
        assert_eq!(display.width(), 2);
        assert_eq!(display.height(), 1);
    }
}
