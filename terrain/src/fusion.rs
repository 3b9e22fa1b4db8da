//! Trail-to-terrain height fusion.

use glam::{Vec2, Vec3};
use std::collections::HashMap;

/// How to choose between several trail points inside the influence
/// radius of one terrain vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fusion {
    /// The point with the smallest planar distance wins. Equal
    /// distances go to the later point in trail order.
    #[default]
    Nearest,

    /// The latest point in trail order wins, regardless of distance.
    LastWins,
}

/// Trail points bucketed on a uniform XZ grid whose cells are one
/// influence radius wide, so a query only visits the 3x3 cells around
/// it.
pub(crate) struct TrailIndex<'a> {
    points: &'a [Vec3],
    radius: f32,
    buckets: HashMap<(i32, i32), Vec<usize>>,
}

impl<'a> TrailIndex<'a> {
    pub(crate) fn new(points: &'a [Vec3], radius: f32) -> Self {
        let mut buckets: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        if radius > 0.0 && radius.is_finite() {
            for (idx, point) in points.iter().enumerate() {
                buckets
                    .entry(cell(point.x, point.z, radius))
                    .or_default()
                    .push(idx);
            }
        }
        Self {
            points,
            radius,
            buckets,
        }
    }

    /// Returns the height of the winning trail point within the
    /// influence radius of `(x, z)`, if any.
    pub(crate) fn height_at(&self, x: f32, z: f32, fusion: Fusion) -> Option<f32> {
        if self.buckets.is_empty() {
            return None;
        }
        let here = Vec2::new(x, z);
        let (cx, cz) = cell(x, z, self.radius);

        let mut best: Option<(usize, f32)> = None;
        for dz in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = self
                    .buckets
                    .get(&(cx.saturating_add(dx), cz.saturating_add(dz)))
                else {
                    continue;
                };
                for &idx in bucket {
                    let point = self.points[idx];
                    let dist = here.distance(Vec2::new(point.x, point.z));
                    if dist.is_nan() || dist >= self.radius {
                        continue;
                    }
                    best = match best {
                        Some(current) if !wins((idx, dist), current, fusion) => Some(current),
                        _ => Some((idx, dist)),
                    };
                }
            }
        }
        best.map(|(idx, _)| self.points[idx].y)
    }
}

/// Returns true if `candidate` beats `current`; both are
/// `(trail index, planar distance)`.
fn wins(candidate: (usize, f32), current: (usize, f32), fusion: Fusion) -> bool {
    match fusion {
        Fusion::LastWins => candidate.0 > current.0,
        Fusion::Nearest => {
            candidate.1 < current.1 || (candidate.1 == current.1 && candidate.0 > current.0)
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn cell(x: f32, z: f32, size: f32) -> (i32, i32) {
    ((x / size).floor() as i32, (z / size).floor() as i32)
}
