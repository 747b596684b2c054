//! Smoothed pointer tracking for the ambient highlight.
//!
//! The highlight chases the pointer with an exponential approach: every
//! applied frame covers a fixed fraction (`flex`) of the remaining distance.
//! Positions are percentages of the container, so the same state renders
//! correctly at any size.

use crate::config::TrackerConfig;
use crate::layout::Rect;

/// Resting position (container center), in percent.
pub const CENTER: f32 = 50.0;

/// Current and desired highlight position, in percent of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPosition {
    /// Rendered X.
    pub current_x: f32,
    /// Rendered Y.
    pub current_y: f32,
    /// X the highlight is moving toward.
    pub desired_x: f32,
    /// Y the highlight is moving toward.
    pub desired_y: f32,
}

impl Default for TrackedPosition {
    fn default() -> Self {
        Self {
            current_x: CENTER,
            current_y: CENTER,
            desired_x: CENTER,
            desired_y: CENTER,
        }
    }
}

/// Exponential-approach tracker.
///
/// With reduced motion the tracker is inert: input is ignored and no frame
/// ever moves `current`.
#[derive(Debug, Clone)]
pub struct SmoothedPositionTracker {
    position: TrackedPosition,
    flex: f32,
    epsilon: f32,
    enabled: bool,
    frames_applied: u64,
}

impl SmoothedPositionTracker {
    /// Creates a tracker resting at the center.
    #[must_use]
    pub fn new(config: TrackerConfig, reduced_motion: bool) -> Self {
        Self {
            position: TrackedPosition::default(),
            flex: config.flex.clamp(f32::MIN_POSITIVE, 1.0),
            epsilon: config.epsilon,
            enabled: !reduced_motion,
            frames_applied: 0,
        }
    }

    /// Returns the tracked position.
    #[must_use]
    pub fn position(&self) -> TrackedPosition {
        self.position
    }

    /// Returns the rendered position.
    #[must_use]
    pub fn current(&self) -> (f32, f32) {
        (self.position.current_x, self.position.current_y)
    }

    /// Returns false when reduced motion disabled the tracker.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns how many frames actually moved the highlight.
    #[must_use]
    pub fn frames_applied(&self) -> u64 {
        self.frames_applied
    }

    /// Sets the desired position directly, in percent.
    pub fn set_desired(&mut self, x: f32, y: f32) {
        if !self.enabled {
            return;
        }
        self.position.desired_x = x;
        self.position.desired_y = y;
    }

    /// Sets the desired position from a pointer position and the container
    /// bounds. Degenerate bounds are ignored.
    pub fn set_desired_from_point(&mut self, container: Rect, x: f32, y: f32) {
        if container.is_degenerate() {
            return;
        }
        self.set_desired(
            (x - container.x) / container.width * 100.0,
            (y - container.y) / container.height * 100.0,
        );
    }

    /// Sends the highlight back toward the center.
    pub fn reset(&mut self) {
        self.set_desired(CENTER, CENTER);
    }

    /// Advances one frame.
    ///
    /// Returns true if `current` moved. Once a step would be no larger than
    /// epsilon on both axes, `current` snaps onto `desired` and later frames
    /// are no-ops.
    pub fn step(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        let p = &mut self.position;
        if p.current_x == p.desired_x && p.current_y == p.desired_y {
            return false;
        }
        let dx = (p.desired_x - p.current_x) * self.flex;
        let dy = (p.desired_y - p.current_y) * self.flex;

        if dx.abs() > self.epsilon || dy.abs() > self.epsilon {
            p.current_x += dx;
            p.current_y += dy;
        } else {
            p.current_x = p.desired_x;
            p.current_y = p.desired_y;
        }
        self.frames_applied += 1;
        true
    }

    /// Returns true when `current` has reached `desired`.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        let p = &self.position;
        !self.enabled || (p.current_x == p.desired_x && p.current_y == p.desired_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(flex: f32) -> SmoothedPositionTracker {
        SmoothedPositionTracker::new(
            TrackerConfig {
                flex,
                ..TrackerConfig::default()
            },
            false,
        )
    }

    #[test]
    fn test_converges_monotonically() {
        let mut t = tracker(0.1);
        t.set_desired(90.0, 10.0);

        let mut last_distance = f32::MAX;
        let mut frames = 0;
        while !t.is_settled() {
            assert!(t.step());
            frames += 1;
            let (x, y) = t.current();
            let distance = (90.0 - x).abs().max((10.0 - y).abs());
            assert!(distance < last_distance, "distance must shrink every frame");
            last_distance = distance;
            assert!(frames <= 60, "did not settle within 60 frames");
        }

        assert!(last_distance <= 0.1);
    }

    #[test]
    fn test_converges_within_point_one_in_bounded_frames() {
        let mut t = tracker(0.1);
        t.set_desired(100.0, 50.0);

        let mut frames = 0;
        while t.step() {
            frames += 1;
            assert!(frames <= 60, "still moving after 60 frames");
        }
        let (x, y) = t.current();
        assert!((100.0 - x).abs() <= 0.1);
        assert!((50.0 - y).abs() <= 0.1);
        assert_eq!(t.frames_applied(), frames);
        assert!(t.is_settled());
    }

    #[test]
    fn test_small_delta_snaps_once() {
        let mut t = tracker(0.08);
        t.set_desired(50.5, 50.0);

        assert!(t.step());
        assert_eq!(t.current(), (50.5, 50.0));
        assert_eq!(t.frames_applied(), 1);

        assert!(!t.step());
        assert_eq!(t.frames_applied(), 1);
    }

    #[test]
    fn test_reduced_motion_never_moves() {
        let mut t = SmoothedPositionTracker::new(TrackerConfig::default(), true);
        t.set_desired(0.0, 100.0);

        for _ in 0..100 {
            assert!(!t.step());
        }
        assert_eq!(t.current(), (CENTER, CENTER));
        assert_eq!(t.frames_applied(), 0);
        assert!(t.is_settled());
    }

    #[test]
    fn test_desired_from_point() {
        let mut t = tracker(0.08);
        t.set_desired_from_point(Rect::new(100.0, 100.0, 200.0, 100.0), 150.0, 175.0);

        let p = t.position();
        assert!((p.desired_x - 25.0).abs() < 1e-4);
        assert!((p.desired_y - 75.0).abs() < 1e-4);

        t.set_desired_from_point(Rect::ZERO, 0.0, 0.0);
        assert!((t.position().desired_x - 25.0).abs() < 1e-4);

        t.reset();
        assert_eq!(t.position().desired_x, CENTER);
    }
}
