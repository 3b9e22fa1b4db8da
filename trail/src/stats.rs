use glam::Vec3;
use itertools::Itertools;
use serde::Serialize;

/// Live statistics for a hike in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HikeStats {
    /// Height of the hiker's current position.
    pub current_elevation: f32,
    /// Length of the whole trail.
    pub total_distance: f32,
    pub current_speed: f32,
    /// Distance traveled over elapsed time, or zero before any time
    /// has elapsed.
    pub average_speed: f32,
    pub max_height: f32,
    pub min_height: f32,
    pub total_points: usize,
    /// `0..=100`, or zero for zero-length trails.
    pub completion_percentage: f32,
    pub distance_traveled: f32,
    pub elapsed_time: f32,
    /// Sum of all height gains between consecutive points.
    pub total_ascent: f32,
    /// Sum of all height losses between consecutive points, positive.
    pub total_descent: f32,
}

/// Per-trail values that never change during a hike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Summary {
    pub(crate) total_distance: f32,
    pub(crate) max_height: f32,
    pub(crate) min_height: f32,
    pub(crate) total_ascent: f32,
    pub(crate) total_descent: f32,
}

impl Summary {
    pub(crate) fn new(points: &[Vec3]) -> Self {
        let (min_height, max_height) = points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| {
                (min.min(p.y), max.max(p.y))
            });

        let mut summary = Self {
            total_distance: 0.0,
            max_height,
            min_height,
            total_ascent: 0.0,
            total_descent: 0.0,
        };
        for (a, b) in points.iter().tuple_windows() {
            summary.total_distance += a.distance(*b);
            let rise = b.y - a.y;
            if rise > 0.0 {
                summary.total_ascent += rise;
            } else {
                summary.total_descent -= rise;
            }
        }
        summary
    }
}
