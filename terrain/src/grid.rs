//! Single-channel height grids.

use crate::TerrainError;
use log::debug;
use std::path::Path;

/// An immutable `width` x `height` grid of 8-bit height samples.
///
/// Sample `0` is the lowest elevation and `255` the highest; the
/// mapping to local units is decided by the mesh builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightGrid {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Row-major samples, `width * height` long.
    samples: Box<[u8]>,
}

impl HeightGrid {
    /// Returns a grid over row-major `samples`.
    pub fn new(
        width: usize,
        height: usize,
        samples: impl Into<Box<[u8]>>,
    ) -> Result<Self, TerrainError> {
        let samples = samples.into();
        if width == 0 || height == 0 {
            return Err(TerrainError::EmptyGrid);
        }
        let expected = width
            .checked_mul(height)
            .ok_or(TerrainError::TooLarge { width, height })?;
        if samples.len() != expected {
            return Err(TerrainError::GridLen {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Returns a grid decoded from the raster at `path`.
    ///
    /// Color rasters are converted to luminance.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TerrainError> {
        let path = path.as_ref();
        debug!("loading height grid {path:?}");
        let luma = image::open(path)
            .map_err(|source| TerrainError::Image {
                path: path.to_owned(),
                source,
            })?
            .into_luma8();
        let (width, height) = luma.dimensions();
        Self::new(width as usize, height as usize, luma.into_raw())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of samples in this grid.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns the sample at `(col, row)`, if inside the grid.
    pub fn get(&self, col: usize, row: usize) -> Option<u8> {
        if col < self.width && row < self.height {
            Some(self.get_unchecked(col, row))
        } else {
            None
        }
    }

    /// Returns the sample at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if `(col, row)` is outside the grid.
    pub fn get_unchecked(&self, col: usize, row: usize) -> u8 {
        self.samples[row * self.width + col]
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Returns the lowest sample in this grid.
    pub fn min_sample(&self) -> u8 {
        self.samples.iter().min().copied().unwrap_or_default()
    }

    /// Returns the highest sample in this grid.
    pub fn max_sample(&self) -> u8 {
        self.samples.iter().max().copied().unwrap_or_default()
    }
}
