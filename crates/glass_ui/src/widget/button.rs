//! Button that lights up its parent's magnifier.

use crate::config::GeometryConfig;
use crate::geometry::GeometryResolver;
use crate::overlay::HighlightOverlayController;
use crate::tree::{ElementId, ElementTree};

/// A button reporting its geometry to the magnifier of the glass surface it
/// sits in.
///
/// Without a magnifier every handler is a no-op.
#[derive(Debug)]
pub struct MagnifiedButton {
    element: ElementId,
    magnifier: Option<HighlightOverlayController>,
    resolver: GeometryResolver,
}

impl MagnifiedButton {
    /// Creates a button without a magnifier.
    #[must_use]
    pub fn new(element: ElementId, geometry: GeometryConfig) -> Self {
        Self {
            element,
            magnifier: None,
            resolver: GeometryResolver::new(geometry),
        }
    }

    /// Connects the button to a parent's magnifier. The controller's
    /// container is the glass surface the button sits in.
    #[must_use]
    pub fn with_magnifier(mut self, magnifier: HighlightOverlayController) -> Self {
        self.magnifier = Some(magnifier);
        self
    }

    /// Returns the button element.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    /// Returns the connected magnifier.
    #[must_use]
    pub const fn magnifier(&self) -> Option<&HighlightOverlayController> {
        self.magnifier.as_ref()
    }

    /// Pointer entered the button.
    pub fn pointer_enter(&mut self, tree: &ElementTree) -> bool {
        self.report(tree)
    }

    /// Pointer left the button.
    pub fn pointer_leave(&mut self) -> bool {
        self.conceal()
    }

    /// The button received focus.
    pub fn focus(&mut self, tree: &ElementTree) -> bool {
        self.report(tree)
    }

    /// The button lost focus.
    pub fn blur(&mut self) -> bool {
        self.conceal()
    }

    fn report(&mut self, tree: &ElementTree) -> bool {
        let Some(magnifier) = self.magnifier.as_mut() else {
            return false;
        };
        if !magnifier.is_live(tree) || !tree.contains(magnifier.container(), self.element) {
            return false;
        }
        match self.resolver.resolve(tree, self.element, magnifier.container()) {
            Some(rect) => {
                magnifier.set_external(rect);
                true
            }
            None => false,
        }
    }

    fn conceal(&mut self) -> bool {
        match self.magnifier.as_mut() {
            Some(magnifier) => {
                magnifier.hide();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlassConfig;
    use crate::geometry::OverlayRect;
    use crate::layout::Rect;
    use crate::overlay::{ControlMode, OverlayState, SharedOverlay};
    use crate::tree::{ElementFlags, ElementRole, ElementState};

    struct Fixture {
        tree: ElementTree,
        card: ElementId,
        button: ElementId,
    }

    fn fixture(glass: bool) -> Fixture {
        let mut tree = ElementTree::new();
        let id = tree.next_id();
        let mut card = ElementState::new(id, Rect::new(50.0, 50.0, 300.0, 100.0));
        if glass {
            card.flags.set(ElementFlags::GLASS_SURFACE);
        }
        let card = tree.add_root(card);
        let id = tree.next_id();
        let button = tree.add_child(
            card,
            ElementState::new(id, Rect::new(150.0, 100.0, 40.0, 20.0)).with_role(ElementRole::Button),
        );
        Fixture { tree, card, button }
    }

    fn button(f: &Fixture, shared: &SharedOverlay) -> MagnifiedButton {
        let magnifier = HighlightOverlayController::new(
            &f.tree,
            f.card,
            ControlMode::External(shared.clone()),
            &GlassConfig::default(),
        );
        MagnifiedButton::new(f.button, GeometryConfig::default()).with_magnifier(magnifier)
    }

    #[test]
    fn test_enter_and_leave() {
        let f = fixture(true);
        let shared = SharedOverlay::default();
        let mut button = button(&f, &shared);

        assert!(button.pointer_enter(&f.tree));
        assert_eq!(shared.get(), OverlayState::shown(OverlayRect::new(120.0, 60.0, 52.0, 30.0)));

        assert!(button.pointer_leave());
        assert!(!shared.get().visible);
        assert_eq!(shared.get().rect.left, 120.0);
        assert_eq!(button.magnifier().map(HighlightOverlayController::internal_writes), Some(0));
    }

    #[test]
    fn test_focus_and_blur() {
        let f = fixture(true);
        let shared = SharedOverlay::default();
        let mut button = button(&f, &shared);

        assert!(button.focus(&f.tree));
        assert!(shared.get().visible);
        assert!(button.blur());
        assert!(!shared.get().visible);
    }

    #[test]
    fn test_outside_glass_is_noop() {
        let f = fixture(false);
        let shared = SharedOverlay::default();
        let mut button = button(&f, &shared);

        assert!(!button.pointer_enter(&f.tree));
        assert_eq!(shared.get(), OverlayState::default());
    }

    #[test]
    fn test_without_magnifier() {
        let f = fixture(true);
        let mut button = MagnifiedButton::new(f.button, GeometryConfig::default());

        assert!(!button.pointer_enter(&f.tree));
        assert!(!button.blur());
    }
}
