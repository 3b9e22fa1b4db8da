//! # Recorded Tracks
//!
//! `track` reads GPX tracks and projects them into the local
//! Cartesian space shared by terrain meshes and trail traversal.
//!
//! ```no_run
//! # fn main() -> Result<(), track::TrackError> {
//! let raw = track::load("data/tracks/ridge_loop.gpx")?;
//! let local = track::Normalizer::default().normalize(&raw)?;
//! println!("{} points from {:?}", local.points().len(), local.origin());
//! # Ok(())
//! # }
//! ```

mod error;
mod gpx;
mod normalize;

pub use crate::{
    error::TrackError,
    gpx::{load, parse, RawTrackPoint},
    normalize::{Normalized, Normalizer, DEFAULT_HEIGHT_SCALE, DEFAULT_SCALE},
};
pub use geo;
pub use glam;
