//! Geographic to local-space projection.

use crate::{RawTrackPoint, TrackError};
use geo::{geometry::Coord, BoundingRect, LineString};
use glam::Vec3;
use log::{debug, warn};

/// Default horizontal scale in local units per degree.
pub const DEFAULT_SCALE: f64 = 10_000.0;

/// Default vertical scale in local units per meter of elevation.
pub const DEFAULT_HEIGHT_SCALE: f64 = 0.1;

/// Projects raw track points into the local space shared with the
/// terrain grid.
///
/// This is a flat equirectangular-style scaling, not a geodetic
/// projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    scale: f64,
    height_scale: f64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            height_scale: DEFAULT_HEIGHT_SCALE,
        }
    }
}

impl Normalizer {
    /// Horizontal scale in local units per degree (defaults to
    /// [`DEFAULT_SCALE`]).
    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Vertical scale in local units per meter (defaults to
    /// [`DEFAULT_HEIGHT_SCALE`]).
    #[must_use]
    pub fn height_scale(mut self, height_scale: f64) -> Self {
        self.height_scale = height_scale;
        self
    }

    /// Returns `raw` projected into local space.
    ///
    /// The origin is the minimum longitude and latitude over all
    /// accepted points, so the output's smallest `x` and `z` are both
    /// zero. Points without elevation, or with a non-finite component,
    /// are skipped.
    pub fn normalize(&self, raw: &[RawTrackPoint]) -> Result<Normalized, TrackError> {
        let accepted: Vec<(Coord<f64>, f64)> = raw
            .iter()
            .enumerate()
            .filter_map(|(idx, point)| match point.elevation {
                Some(elevation)
                    if elevation.is_finite()
                        && point.coord.x.is_finite()
                        && point.coord.y.is_finite() =>
                {
                    Some((point.coord, elevation))
                }
                Some(_) => {
                    warn!("raw point {idx} is not finite, skipping");
                    None
                }
                None => {
                    warn!("raw point {idx} has no elevation, skipping");
                    None
                }
            })
            .collect();

        let origin = accepted
            .iter()
            .map(|(coord, _)| *coord)
            .collect::<LineString<f64>>()
            .bounding_rect()
            .map(|rect| rect.min())
            .ok_or(TrackError::Empty)?;
        debug!("local origin lon: {}, lat: {}", origin.x, origin.y);

        let mut normalized = Normalized {
            origin,
            scale: self.scale,
            height_scale: self.height_scale,
            points: Vec::with_capacity(accepted.len()),
        };
        for (coord, elevation) in accepted {
            let point = normalized.project(coord, elevation);
            normalized.points.push(point);
        }
        Ok(normalized)
    }
}

/// A track in local space together with the origin it was projected
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Minimum longitude (`x`) and latitude (`y`) of the source track.
    origin: Coord<f64>,
    scale: f64,
    height_scale: f64,
    points: Vec<Vec3>,
}

impl Normalized {
    pub fn origin(&self) -> Coord<f64> {
        self.origin
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Vec3> {
        self.points
    }

    /// Returns `coord` (`x` = longitude, `y` = latitude) at
    /// `elevation` meters mapped into this track's local space.
    #[allow(clippy::cast_possible_truncation)]
    pub fn project(&self, coord: Coord<f64>, elevation: f64) -> Vec3 {
        Vec3::new(
            ((coord.x - self.origin.x) * self.scale) as f32,
            (elevation * self.height_scale) as f32,
            ((coord.y - self.origin.y) * self.scale) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Normalizer, RawTrackPoint};
    use crate::TrackError;
    use approx::assert_relative_eq;
    use geo::geometry::Coord;
    use glam::Vec3;

    fn hill() -> Vec<RawTrackPoint> {
        vec![
            RawTrackPoint::new(45.10, 7.30, Some(1200.0)),
            RawTrackPoint::new(45.08, 7.31, Some(1250.0)),
            RawTrackPoint::new(45.09, 7.28, Some(1300.0)),
            RawTrackPoint::new(45.11, 7.29, Some(1280.0)),
        ]
    }

    #[test]
    fn test_origin_is_min_lon_lat() {
        let normalized = Normalizer::default().normalize(&hill()).unwrap();
        assert_eq!(normalized.origin(), Coord { x: 7.28, y: 45.08 });

        let points = normalized.points();
        let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let min_z = points.iter().map(|p| p.z).fold(f32::INFINITY, f32::min);
        assert_eq!(min_x, 0.0);
        assert_eq!(min_z, 0.0);
        assert!(points.iter().all(|p| p.x >= 0.0 && p.z >= 0.0));
    }

    #[test]
    fn test_scales() {
        let normalized = Normalizer::default()
            .scale(100.0)
            .height_scale(0.5)
            .normalize(&hill())
            .unwrap();
        let first = normalized.points()[0];
        assert_relative_eq!(first.x, 2.0, epsilon = 1e-4);
        assert_relative_eq!(first.y, 600.0);
        assert_relative_eq!(first.z, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_idempotent() {
        let normalizer = Normalizer::default();
        let first = normalizer.normalize(&hill()).unwrap();

        // Normalizing an unrelated track in between must not leak its
        // origin into the next run.
        let other = vec![RawTrackPoint::new(-33.9, 18.4, Some(3.0))];
        normalizer.normalize(&other).unwrap();

        let second = normalizer.normalize(&hill()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_elevation_is_skipped() {
        let mut raw = hill();
        raw.push(RawTrackPoint::new(45.0, 7.0, None));
        let normalized = Normalizer::default().normalize(&raw).unwrap();
        assert_eq!(normalized.points().len(), 4);
        // The skipped point must not pull the origin.
        assert_eq!(normalized.origin(), Coord { x: 7.28, y: 45.08 });
    }

    #[test]
    fn test_non_finite_is_skipped() {
        let mut raw = hill();
        raw.push(RawTrackPoint::new(f64::NAN, 7.0, Some(1000.0)));
        raw.push(RawTrackPoint::new(45.0, 7.0, Some(f64::INFINITY)));
        raw.push(RawTrackPoint::new(45.0, f64::NEG_INFINITY, Some(1000.0)));
        let normalized = Normalizer::default().normalize(&raw).unwrap();
        assert_eq!(normalized.points().len(), 4);
        assert_eq!(normalized.origin(), Coord { x: 7.28, y: 45.08 });
        assert!(normalized.points().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            Normalizer::default().normalize(&[]),
            Err(TrackError::Empty)
        ));
        assert!(matches!(
            Normalizer::default().normalize(&[RawTrackPoint::new(1.0, 2.0, None)]),
            Err(TrackError::Empty)
        ));
    }

    #[test]
    fn test_project_matches_points() {
        let raw = hill();
        let normalized = Normalizer::default().normalize(&raw).unwrap();
        for (raw, local) in raw.iter().zip(normalized.points()) {
            let projected = normalized.project(raw.coord, raw.elevation.unwrap());
            assert_eq!(projected, *local);
        }
        assert_eq!(
            normalized.project(normalized.origin(), 0.0),
            Vec3::ZERO
        );
    }
}
