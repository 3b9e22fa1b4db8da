use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid GPX document: {0}")]
    Xml(#[from] xot::Error),

    #[error("invalid GPX document: no <{0}> element found")]
    MissingElement(&'static str),

    #[error("track contains no usable points")]
    Empty,
}
