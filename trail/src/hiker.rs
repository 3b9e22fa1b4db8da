use crate::{
    stats::{HikeStats, Summary},
    HikerSpeed, TrailError,
};
use glam::Vec3;
use log::debug;

/// Where a [`Hiker`] is in its walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The trail has a single point; there is nowhere to go.
    Idle,

    /// Walking from `points[segment]` toward `points[segment + 1]`.
    Traversing { segment: usize },

    /// Standing on the final point. Further updates do nothing.
    Completed,
}

/// A point walking along a fixed trail at a controllable speed.
///
/// Call [`Hiker::update`] once per frame with that frame's delta time.
#[derive(Debug, Clone)]
pub struct Hiker<'a> {
    points: &'a [Vec3],
    summary: Summary,
    phase: Phase,
    position: Vec3,
    distance_traveled: f32,
    elapsed: f32,
    speed: HikerSpeed,
}

impl<'a> Hiker<'a> {
    /// Returns a hiker standing on the first of `points`.
    pub fn new(points: &'a [Vec3], speed: HikerSpeed) -> Result<Self, TrailError> {
        let Some(&start) = points.first() else {
            return Err(TrailError::Empty);
        };
        let summary = Summary::new(points);
        let phase = if points.len() < 2 {
            Phase::Idle
        } else {
            Phase::Traversing { segment: 0 }
        };
        debug!(
            "new hiker; points: {}, total distance: {}, phase: {phase:?}",
            points.len(),
            summary.total_distance
        );
        Ok(Self {
            points,
            summary,
            phase,
            position: start,
            distance_traveled: 0.0,
            elapsed: 0.0,
            speed,
        })
    }

    /// Advances the hiker by `delta_time` seconds at its current speed,
    /// crossing as many segments as that distance covers.
    ///
    /// A `delta_time` that is not finite and positive is ignored.
    pub fn update(&mut self, delta_time: f32) {
        let Phase::Traversing { mut segment } = self.phase else {
            return;
        };
        if !delta_time.is_finite() || delta_time <= 0.0 {
            return;
        }
        self.elapsed += delta_time;

        let mut remaining = self.speed.get() * delta_time;
        if remaining.is_nan() || remaining <= 0.0 {
            return;
        }

        let last = self.points.len() - 1;
        loop {
            let end = self.points[segment + 1];
            let to_end = end - self.position;
            let distance_to_end = to_end.length();

            if remaining < distance_to_end {
                self.position += to_end.normalize_or_zero() * remaining;
                self.distance_traveled += remaining;
                self.phase = Phase::Traversing { segment };
                return;
            }

            remaining -= distance_to_end;
            self.distance_traveled += distance_to_end;
            self.position = end;
            segment += 1;

            if segment == last {
                self.position = self.points[last];
                self.distance_traveled = self.summary.total_distance;
                self.phase = Phase::Completed;
                debug!(
                    "completed trail; distance: {}, elapsed: {}s",
                    self.distance_traveled, self.elapsed
                );
                return;
            }
            debug!("reached point {segment} of {last}");
        }
    }

    /// Returns a snapshot of this hike's statistics.
    pub fn stats(&self) -> HikeStats {
        let Summary {
            total_distance,
            max_height,
            min_height,
            total_ascent,
            total_descent,
        } = self.summary;
        HikeStats {
            current_elevation: self.position.y,
            total_distance,
            current_speed: self.speed.get(),
            average_speed: if self.elapsed > 0.0 {
                self.distance_traveled / self.elapsed
            } else {
                0.0
            },
            max_height,
            min_height,
            total_points: self.points.len(),
            completion_percentage: if total_distance > 0.0 {
                self.distance_traveled / total_distance * 100.0
            } else {
                0.0
            },
            distance_traveled: self.distance_traveled,
            elapsed_time: self.elapsed,
            total_ascent,
            total_descent,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Returns the trail this hiker walks, e.g. for drawing it.
    pub fn points(&self) -> &'a [Vec3] {
        self.points
    }

    pub fn speed(&self) -> HikerSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: HikerSpeed) {
        self.speed = speed;
    }

    pub fn speed_mut(&mut self) -> &mut HikerSpeed {
        &mut self.speed
    }

    pub fn distance_traveled(&self) -> f32 {
        self.distance_traveled
    }

    /// Seconds spent traversing.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn total_distance(&self) -> f32 {
        self.summary.total_distance
    }
}
