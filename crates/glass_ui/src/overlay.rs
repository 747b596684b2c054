//! Magnifier overlay state and its controller.
//!
//! An overlay is driven by exactly one party. In self-managed mode the
//! controller owns the state and the event binding feeds it; in external mode
//! a parent owns a [`SharedOverlay`] and every self-managed handler is
//! switched off. The mode is fixed when the controller is built.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{GlassConfig, MagnifierConfig};
use crate::geometry::{GeometryResolver, OverlayRect};
use crate::layout::Rect;
use crate::tree::{ElementId, ElementTree};

/// Geometry plus visibility of one overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayState {
    /// Container-relative rectangle (center-anchored).
    pub rect: OverlayRect,
    /// Whether the overlay is shown.
    pub visible: bool,
}

impl OverlayState {
    /// Resting state: centered in the container, spanning its width minus
    /// the rest margin on both sides, hidden.
    #[must_use]
    pub fn resting(container: Rect, magnifier: &MagnifierConfig, min_height: f32) -> Self {
        Self {
            rect: OverlayRect::new(
                container.width * 0.5,
                container.height * 0.5,
                (container.width - magnifier.rest_margin * 2.0).max(0.0),
                min_height,
            ),
            visible: false,
        }
    }

    /// Returns a visible state at the given rectangle.
    #[must_use]
    pub const fn shown(rect: OverlayRect) -> Self {
        Self {
            rect,
            visible: true,
        }
    }
}

/// Partial overlay update. Absent fields keep their previous value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayPatch {
    /// New horizontal center.
    pub left: Option<f32>,
    /// New vertical center.
    pub top: Option<f32>,
    /// New width.
    pub width: Option<f32>,
    /// New height.
    pub height: Option<f32>,
    /// New visibility.
    pub visible: Option<bool>,
}

impl OverlayPatch {
    /// Applies the patch on top of `prev`.
    #[must_use]
    pub fn apply(&self, prev: OverlayState) -> OverlayState {
        OverlayState {
            rect: OverlayRect {
                left: self.left.unwrap_or(prev.rect.left),
                top: self.top.unwrap_or(prev.rect.top),
                width: self.width.unwrap_or(prev.rect.width),
                height: self.height.unwrap_or(prev.rect.height),
            },
            visible: self.visible.unwrap_or(prev.visible),
        }
    }
}

/// Overlay state owned by a parent and written by its children.
#[derive(Debug, Clone, Default)]
pub struct SharedOverlay(Arc<Mutex<OverlayState>>);

impl SharedOverlay {
    /// Returns a copy of the current state.
    #[must_use]
    pub fn get(&self) -> OverlayState {
        *self.0.lock()
    }

    /// Replaces the state.
    pub fn set(&self, state: OverlayState) {
        *self.0.lock() = state;
    }
}

/// Who drives an overlay.
#[derive(Debug, Clone)]
pub enum ControlMode {
    /// A parent drives the overlay through the shared handle.
    External(SharedOverlay),
    /// The controller computes geometry from its own events.
    SelfManaged,
}

/// Owns the visibility and rectangle of one overlay.
#[derive(Debug)]
pub struct HighlightOverlayController {
    container: ElementId,
    mode: ControlMode,
    internal: OverlayState,
    resolver: GeometryResolver,
    magnifier: MagnifierConfig,
    internal_writes: u64,
}

impl HighlightOverlayController {
    /// Creates a controller for `container`, resting at the container center.
    #[must_use]
    pub fn new(tree: &ElementTree, container: ElementId, mode: ControlMode, config: &GlassConfig) -> Self {
        let internal = OverlayState::resting(
            tree.bounding_rect(container),
            &config.magnifier,
            config.geometry.min_height,
        );
        Self {
            container,
            mode,
            internal,
            resolver: GeometryResolver::new(config.geometry),
            magnifier: config.magnifier,
            internal_writes: 0,
        }
    }

    /// Returns the container this overlay is positioned in.
    #[must_use]
    pub const fn container(&self) -> ElementId {
        self.container
    }

    /// Returns true while the container is attached and mounted as a glass
    /// surface. Widgets writing through this controller check it first.
    #[must_use]
    pub fn is_live(&self, tree: &ElementTree) -> bool {
        tree.is_attached(self.container) && tree.get(self.container).is_some_and(|el| el.is_glass_surface())
    }

    /// Returns true when a parent drives this overlay.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self.mode, ControlMode::External(_))
    }

    /// Returns the number of writes to the self-managed state.
    #[must_use]
    pub const fn internal_writes(&self) -> u64 {
        self.internal_writes
    }

    /// Returns the state that should be rendered.
    #[must_use]
    pub fn state(&self) -> OverlayState {
        match &self.mode {
            ControlMode::External(shared) => shared.get(),
            ControlMode::SelfManaged => self.internal,
        }
    }

    /// Moves the overlay onto `target` and shows it.
    ///
    /// Returns false (leaving the state untouched) when the target or the
    /// container cannot be resolved.
    pub fn update_for_target(&mut self, tree: &ElementTree, target: ElementId) -> bool {
        match self.resolver.resolve_clamped(tree, target, self.container) {
            Some(rect) => {
                self.write(OverlayState::shown(rect));
                true
            }
            None => {
                tracing::trace!("overlay update skipped: element {} not resolvable", target.raw());
                false
            }
        }
    }

    /// Shows the free-floating highlight centered on a raw pointer position.
    pub fn show_free(&mut self, tree: &ElementTree, x: f32, y: f32) -> bool {
        let container = tree.bounding_rect(self.container);
        if container.is_degenerate() {
            return false;
        }
        let rect = OverlayRect::new(
            x - container.x,
            y - container.y,
            self.magnifier.free_width,
            self.magnifier.free_height,
        );
        self.write(OverlayState::shown(self.resolver.clamp(rect, container.width)));
        true
    }

    /// Hides the overlay, keeping its last geometry so the next show starts
    /// from where it was.
    pub fn hide(&mut self) {
        let mut state = self.state();
        if state.visible {
            state.visible = false;
            self.write(state);
        }
    }

    /// Replaces rectangle and visibility.
    pub fn set_state(&mut self, rect: OverlayRect, visible: bool) {
        self.write(OverlayState { rect, visible });
    }

    /// Shows the overlay at a rectangle computed elsewhere.
    pub fn set_external(&mut self, rect: OverlayRect) {
        self.set_state(rect, true);
    }

    /// Applies a partial update on top of the current state.
    pub fn apply_patch(&mut self, patch: &OverlayPatch) {
        let next = patch.apply(self.state());
        self.write(next);
    }

    /// Re-centers the resting geometry after the container changed size.
    /// Has no effect while the overlay is visible.
    pub fn relayout(&mut self, tree: &ElementTree, min_height: f32) {
        if let ControlMode::SelfManaged = self.mode {
            if !self.internal.visible {
                let rest = OverlayState::resting(
                    tree.bounding_rect(self.container),
                    &self.magnifier,
                    min_height,
                );
                self.write(rest);
            }
        }
    }

    fn write(&mut self, state: OverlayState) {
        match &self.mode {
            ControlMode::External(shared) => shared.set(state),
            ControlMode::SelfManaged => {
                self.internal = state;
                self.internal_writes += 1;
            }
        }
    }
}
