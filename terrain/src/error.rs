use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("unable to decode {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("expected {expected} samples for a {width}x{height} grid, got {actual}")]
    GridLen {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("height grid has zero width or height")]
    EmptyGrid,

    #[error("{width}x{height} grid has too many vertices for u32 indices")]
    TooLarge { width: usize, height: usize },
}
