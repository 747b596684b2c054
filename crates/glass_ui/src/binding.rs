//! Event binding between a container and its overlay.
//!
//! Per overlay the binding is a two-state machine: `Idle` until an
//! interactive descendant is hovered, focused or touched, `Targeted` until
//! the pointer, focus or finger leaves the container. Re-targeting while
//! `Targeted` is a self-loop.

use crate::event::GlassEvent;
use crate::overlay::HighlightOverlayController;
use crate::target::{resolve_at_point, resolve_target, ResolvedTarget};
use crate::tree::{ElementId, ElementTree};

/// Interaction state of one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingState {
    /// No element owns the highlight.
    #[default]
    Idle,
    /// An interactive element owns the highlight.
    Targeted(ResolvedTarget),
}

/// Listens on a container and drives a self-managed overlay.
#[derive(Debug)]
pub struct EventBinding {
    container: ElementId,
    state: BindingState,
    bound: bool,
}

impl EventBinding {
    /// Binds to `container`.
    #[must_use]
    pub fn bind(container: ElementId) -> Self {
        tracing::debug!("binding overlay events on element {}", container.raw());
        Self {
            container,
            state: BindingState::Idle,
            bound: true,
        }
    }

    /// Stops listening. Idempotent.
    pub fn unbind(&mut self) {
        if self.bound {
            tracing::debug!("unbinding overlay events on element {}", self.container.raw());
        }
        self.bound = false;
        self.state = BindingState::Idle;
    }

    /// Returns true while the binding listens.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.bound
    }

    /// Returns the bound container.
    #[must_use]
    pub const fn container(&self) -> ElementId {
        self.container
    }

    /// Returns the interaction state.
    #[must_use]
    pub const fn state(&self) -> BindingState {
        self.state
    }

    /// Returns the element that currently owns the highlight.
    #[must_use]
    pub const fn hovered(&self) -> Option<ElementId> {
        match self.state {
            BindingState::Targeted(target) => Some(target.id),
            BindingState::Idle => None,
        }
    }

    /// Handles one event. Returns true if the overlay state was written.
    ///
    /// Nothing happens while unbound or when the overlay is externally
    /// controlled, except for explicit patches which always apply.
    pub fn dispatch(
        &mut self,
        tree: &ElementTree,
        overlay: &mut HighlightOverlayController,
        event: &GlassEvent,
    ) -> bool {
        if !self.bound {
            return false;
        }
        if let GlassEvent::Patch(patch) = event {
            overlay.apply_patch(patch);
            return true;
        }
        if overlay.is_external() {
            tracing::trace!("{} ignored: overlay is externally controlled", event.name());
            return false;
        }

        match event {
            GlassEvent::PointerOver { target } | GlassEvent::FocusIn { target } => {
                match resolve_target(tree, *target, self.container) {
                    Some(resolved) => self.retarget(tree, overlay, resolved),
                    None => false,
                }
            }
            GlassEvent::PointerOut { related, .. } | GlassEvent::FocusOut { related, .. } => {
                let still_inside = related.is_some_and(|r| tree.contains(self.container, r));
                if still_inside {
                    false
                } else {
                    self.release(overlay)
                }
            }
            GlassEvent::PointerMove { x, y } => {
                if self.hovered().is_some() {
                    return false;
                }
                overlay.show_free(tree, *x, *y)
            }
            GlassEvent::TouchStart { target, .. } => {
                let resolved = resolve_target(tree, *target, self.container).or_else(|| {
                    event
                        .primary_touch()
                        .and_then(|t| resolve_at_point(tree, t.x, t.y, self.container))
                });
                match resolved {
                    Some(resolved) => self.retarget(tree, overlay, resolved),
                    None => false,
                }
            }
            GlassEvent::TouchMove { .. } => {
                let resolved = event
                    .primary_touch()
                    .and_then(|t| resolve_at_point(tree, t.x, t.y, self.container));
                match resolved {
                    Some(resolved) => self.retarget(tree, overlay, resolved),
                    None => false,
                }
            }
            GlassEvent::TouchEnd | GlassEvent::TouchCancel => self.release(overlay),
            GlassEvent::PointerEnter
            | GlassEvent::PointerLeave
            | GlassEvent::Resize { .. }
            | GlassEvent::Patch(_) => false,
        }
    }

    fn retarget(
        &mut self,
        tree: &ElementTree,
        overlay: &mut HighlightOverlayController,
        resolved: ResolvedTarget,
    ) -> bool {
        if self.hovered() != Some(resolved.id) {
            tracing::trace!("highlight target -> element {} ({:?})", resolved.id.raw(), resolved.kind);
        }
        self.state = BindingState::Targeted(resolved);
        overlay.update_for_target(tree, resolved.id)
    }

    fn release(&mut self, overlay: &mut HighlightOverlayController) -> bool {
        self.state = BindingState::Idle;
        let was_visible = overlay.state().visible;
        overlay.hide();
        was_visible
    }
}
