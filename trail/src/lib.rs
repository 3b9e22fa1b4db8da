//! # Trail Traversal
//!
//! A [`Hiker`] walks a sequence of local-space points at a
//! controllable [`HikerSpeed`], one [`Hiker::update`] per frame, and
//! reports live [`HikeStats`].
//!
//! ```
//! use trail::{glam::Vec3, Hiker, HikerSpeed, Phase};
//!
//! let points = [Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)];
//! let mut hiker = Hiker::new(&points, HikerSpeed::new(5.0)).unwrap();
//! hiker.update(1.0);
//! assert_eq!(hiker.position(), Vec3::new(5.0, 0.0, 0.0));
//! assert_eq!(hiker.phase(), Phase::Traversing { segment: 0 });
//! assert_eq!(hiker.stats().completion_percentage, 50.0);
//! ```

mod error;
mod hiker;
mod speed;
mod stats;

pub use crate::{
    error::TrailError,
    hiker::{Hiker, Phase},
    speed::{CameraSpeed, HikerSpeed},
    stats::HikeStats,
};
pub use glam;
