//! Step-wise projectile interpolation and animation cancellation.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::target::Point;

/// Tuning for projectile animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileSettings {
    /// Number of equal steps between the two cell centres.
    pub steps: u32,
    /// Wall-clock time between two frames.
    pub step_period: Duration,
}

impl ProjectileSettings {
    pub const DEFAULT_STEPS: u32 = 50;
    pub const DEFAULT_STEP_PERIOD: Duration = Duration::from_millis(10);
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            steps: Self::DEFAULT_STEPS,
            step_period: Self::DEFAULT_STEP_PERIOD,
        }
    }
}

/// How an animation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed { steps: u32 },
    Cancelled { steps: u32 },
}

impl AnimationOutcome {
    pub fn steps(self) -> u32 {
        match self {
            AnimationOutcome::Completed { steps } | AnimationOutcome::Cancelled { steps } => steps,
        }
    }

    pub fn is_cancelled(self) -> bool {
        matches!(self, AnimationOutcome::Cancelled { .. })
    }
}

/// Frames of a projectile travelling between two points.
///
/// Always yields the start point first. Every further frame advances by a
/// fixed delta; the path ends once the remaining displacement on both axes is
/// no larger than one delta.
#[derive(Clone, Debug)]
pub struct ProjectilePath {
    position: Point,
    stop: Point,
    delta: Point,
    emitted: u32,
    limit: u32,
}

impl ProjectilePath {
    pub fn new(from: Point, to: Point, steps: u32) -> Self {
        let steps = steps.max(1);
        let delta = Point::new(
            (to.x - from.x) / steps as f32,
            (to.y - from.y) / steps as f32,
        );
        Self {
            position: from,
            stop: to,
            delta,
            emitted: 0,
            limit: steps,
        }
    }

    pub fn delta(&self) -> Point {
        self.delta
    }

    fn converged(&self) -> bool {
        (self.stop.x - self.position.x).abs() <= self.delta.x.abs()
            && (self.stop.y - self.position.y).abs() <= self.delta.y.abs()
    }
}

impl Iterator for ProjectilePath {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.emitted >= self.limit || (self.emitted > 0 && self.converged()) {
            return None;
        }
        let frame = self.position;
        self.position.x += self.delta.x;
        self.position.y += self.delta.y;
        self.emitted += 1;
        Some(frame)
    }
}

/// Cloneable handle that stops in-flight animations at the next step.
#[derive(Clone, Debug)]
pub struct AnimationCanceller {
    generation: Arc<watch::Sender<u64>>,
}

impl AnimationCanceller {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            generation: Arc::new(tx),
        }
    }

    /// Cancels every animation started before this call.
    pub fn cancel(&self) {
        self.generation.send_modify(|generation| {
            *generation = generation.wrapping_add(1);
        });
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_takes_at_least_one_step_for_identical_points() {
        let point = Point::new(10.0, 10.0);
        let frames: Vec<_> = ProjectilePath::new(point, point, 50).collect();
        assert_eq!(frames, vec![point]);
    }

    #[test]
    fn path_stops_within_one_delta_of_the_target() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(100.0, 50.0);
        let path = ProjectilePath::new(from, to, 50);
        let delta = path.delta();
        let frames: Vec<_> = path.collect();

        assert!(frames.len() > 1 && frames.len() <= 50);
        assert_eq!(frames[0], from);
        let last = *frames.last().unwrap();
        let remaining_x = (to.x - last.x).abs();
        let remaining_y = (to.y - last.y).abs();
        assert!(remaining_x <= 2.0 * delta.x.abs() + f32::EPSILON);
        assert!(remaining_y <= 2.0 * delta.y.abs() + f32::EPSILON);
    }

    #[test]
    fn horizontal_paths_converge_on_the_moving_axis() {
        let frames: Vec<_> =
            ProjectilePath::new(Point::new(0.0, 5.0), Point::new(-40.0, 5.0), 8).collect();
        assert!(frames.len() >= 7);
        assert!(frames.iter().all(|p| p.y == 5.0));
        assert!(frames.windows(2).all(|w| w[1].x < w[0].x));
    }

    #[test]
    fn zero_steps_is_treated_as_one() {
        let frames: Vec<_> =
            ProjectilePath::new(Point::new(0.0, 0.0), Point::new(9.0, 9.0), 0).collect();
        assert_eq!(frames.len(), 1);
    }
}
