//! Ambient specular highlight.
//!
//! A soft halo that follows the pointer across a glass surface. Its opacity
//! rises while the pointer is over the surface and its radius scales with the
//! surface size.

use crate::config::{LookConfig, TrackerConfig};
use crate::layout::Rect;
use crate::tracker::SmoothedPositionTracker;

/// Pointer position tracked outside the surface (for example a page-wide
/// cursor), plus an offset into the surface's coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlobalPointer {
    /// Pointer position.
    pub position: (f32, f32),
    /// Offset added to the position before tracking.
    pub offset: (f32, f32),
}

impl GlobalPointer {
    /// Returns the position with the offset applied.
    #[must_use]
    pub fn resolved(&self) -> (f32, f32) {
        (self.position.0 + self.offset.0, self.position.1 + self.offset.1)
    }
}

/// Opacity and radius of the halo plus the tracker that positions it.
#[derive(Debug, Clone)]
pub struct AmbientHighlight {
    tracker: SmoothedPositionTracker,
    look: LookConfig,
    mobile: bool,
    hovered: bool,
    radius: f32,
}

impl AmbientHighlight {
    /// Halo radius used until the surface has been measured.
    pub const DEFAULT_RADIUS: f32 = 600.0;
    /// Radius of the small bright core.
    pub const HOTSPOT_RADIUS: f32 = 160.0;

    /// Creates a resting highlight.
    #[must_use]
    pub fn new(look: LookConfig, tracker: TrackerConfig, reduced_motion: bool) -> Self {
        Self {
            tracker: SmoothedPositionTracker::new(tracker, reduced_motion),
            look,
            mobile: false,
            hovered: false,
            radius: Self::DEFAULT_RADIUS,
        }
    }

    /// Returns the tracker.
    #[must_use]
    pub fn tracker(&self) -> &SmoothedPositionTracker {
        &self.tracker
    }

    /// Returns true while the mobile look is active.
    #[must_use]
    pub const fn is_mobile(&self) -> bool {
        self.mobile
    }

    /// Resting opacity.
    #[must_use]
    pub fn base_opacity(&self) -> f32 {
        let factor = if self.mobile { 0.8 } else { 1.0 };
        (0.75 * self.look.intensity * factor).clamp(0.55, 1.0)
    }

    /// Opacity while hovered.
    #[must_use]
    pub fn hover_opacity(&self) -> f32 {
        let factor = if self.mobile { 0.9 } else { 1.0 };
        (self.look.intensity * factor).clamp(0.6, 1.0)
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        if self.hovered {
            self.hover_opacity()
        } else {
            self.base_opacity()
        }
    }

    /// Current halo radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Pointer entered the surface.
    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    /// Pointer left the surface: fade back and drift to the center.
    pub fn pointer_leave(&mut self) {
        self.hovered = false;
        self.tracker.reset();
    }

    /// Pointer moved to an absolute position.
    pub fn pointer_move(&mut self, surface: Rect, x: f32, y: f32) {
        self.tracker.set_desired_from_point(surface, x, y);
    }

    /// Re-measures after the surface or viewport changed size.
    pub fn resize(&mut self, surface: Rect, viewport_width: f32) {
        self.mobile = viewport_width <= self.look.mobile_breakpoint;
        if !surface.is_degenerate() {
            self.radius = (surface.width.max(surface.height) * 0.9).ceil();
        }
    }

    /// Advances the tracker by one frame. Returns true if it moved.
    pub fn frame(&mut self) -> bool {
        self.tracker.step()
    }
}
