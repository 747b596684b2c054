//! Specification rows sharing their card's magnifier.
//!
//! Entering a row shows the magnifier around it with the spec-item padding.
//! Leaving the row hides it and keeps the geometry for the next entry. Only
//! a resize while a row is lit re-measures it, with the magnified padding.

use crate::config::GeometryConfig;
use crate::event::GlassEvent;
use crate::geometry::GeometryResolver;
use crate::overlay::HighlightOverlayController;
use crate::tree::{ElementId, ElementTree};

/// A column of spec rows inside one glass card.
#[derive(Debug)]
pub struct SpecTable {
    rows: Vec<ElementId>,
    active: Option<usize>,
    magnifier: HighlightOverlayController,
    resolver: GeometryResolver,
}

impl SpecTable {
    /// Creates a table over `rows`, all inside the magnifier's container.
    #[must_use]
    pub fn new(rows: Vec<ElementId>, magnifier: HighlightOverlayController, geometry: GeometryConfig) -> Self {
        Self {
            rows,
            active: None,
            magnifier,
            resolver: GeometryResolver::new(geometry),
        }
    }

    /// Returns the card the rows live in.
    #[must_use]
    pub const fn container(&self) -> ElementId {
        self.magnifier.container()
    }

    /// Returns the row elements.
    #[must_use]
    pub fn rows(&self) -> &[ElementId] {
        &self.rows
    }

    /// Returns the index of the lit row.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Returns the magnifier the table writes to.
    #[must_use]
    pub const fn overlay(&self) -> &HighlightOverlayController {
        &self.magnifier
    }

    /// Handles one event delivered to the card. Returns true if the overlay
    /// was written.
    pub fn handle_event(&mut self, tree: &ElementTree, event: &GlassEvent) -> bool {
        match event {
            GlassEvent::PointerOver { target } => match self.row_index(tree, *target) {
                Some(index) if self.active == Some(index) => false,
                Some(index) => self.enter(tree, index),
                None => false,
            },
            GlassEvent::PointerOut { target, related } => match self.active {
                Some(index)
                    if tree.contains(self.rows[index], *target)
                        && !related.is_some_and(|id| tree.contains(self.rows[index], id)) =>
                {
                    self.leave()
                }
                _ => false,
            },
            GlassEvent::PointerLeave => self.active.is_some() && self.leave(),
            GlassEvent::Resize { .. } => match self.active {
                Some(index) => self.place(tree, index, true),
                None => false,
            },
            _ => false,
        }
    }

    fn enter(&mut self, tree: &ElementTree, index: usize) -> bool {
        let placed = self.place(tree, index, false);
        if placed {
            self.active = Some(index);
        }
        placed
    }

    fn leave(&mut self) -> bool {
        self.active = None;
        self.magnifier.hide();
        true
    }

    fn place(&mut self, tree: &ElementTree, index: usize, magnified: bool) -> bool {
        let Some(&row) = self.rows.get(index) else {
            return false;
        };
        if !self.magnifier.is_live(tree) {
            tracing::trace!("spec row {} lit before its card was mounted", row.raw());
            return false;
        }
        match self
            .resolver
            .resolve_spec_item(tree, row, self.magnifier.container(), magnified)
        {
            Some(rect) => {
                self.magnifier.set_external(rect);
                true
            }
            None => false,
        }
    }

    fn row_index(&self, tree: &ElementTree, target: ElementId) -> Option<usize> {
        self.rows.iter().position(|&row| tree.contains(row, target))
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
        rows: Vec<ElementId>,
        values: Vec<ElementId>,
    }

    fn fixture() -> Fixture {
        let mut tree = ElementTree::new();
        let id = tree.next_id();
        let mut card = ElementState::new(id, Rect::new(0.0, 0.0, 300.0, 120.0));
        card.flags.set(ElementFlags::GLASS_SURFACE);
        let card = tree.add_root(card);

        let mut rows = Vec::new();
        let mut values = Vec::new();
        for i in 0..3u8 {
            let rect = Rect::new(50.0, 10.0 + f32::from(i) * 36.0, 200.0, 28.0);
            let id = tree.next_id();
            let row = tree.add_child(card, ElementState::new(id, rect).with_role(ElementRole::SpecItem));
            let id = tree.next_id();
            values.push(tree.add_child(row, ElementState::new(id, rect.shrink(6.0)).pass_through()));
            rows.push(row);
        }
        Fixture {
            tree,
            card,
            rows,
            values,
        }
    }

    fn table(f: &Fixture, shared: &SharedOverlay) -> SpecTable {
        let config = GlassConfig::default();
        let magnifier =
            HighlightOverlayController::new(&f.tree, f.card, ControlMode::External(shared.clone()), &config);
        SpecTable::new(f.rows.clone(), magnifier, config.geometry)
    }

    #[test]
    fn test_enter_row_uses_plain_padding() {
        let f = fixture();
        let shared = SharedOverlay::default();
        let mut specs = table(&f, &shared);

        assert!(specs.handle_event(&f.tree, &GlassEvent::PointerOver { target: f.values[0] }));
        assert_eq!(specs.active(), Some(0));
        assert_eq!(shared.get(), OverlayState::shown(OverlayRect::new(150.0, 24.0, 220.0, 36.0)));
        assert_eq!(specs.overlay().internal_writes(), 0);
    }

    #[test]
    fn test_repeat_over_within_row_is_ignored() {
        let f = fixture();
        let shared = SharedOverlay::default();
        let mut specs = table(&f, &shared);

        assert!(specs.handle_event(&f.tree, &GlassEvent::PointerOver { target: f.rows[1] }));
        assert!(!specs.handle_event(&f.tree, &GlassEvent::PointerOver { target: f.values[1] }));

        let into_value = GlassEvent::PointerOut {
            target: f.rows[1],
            related: Some(f.values[1]),
        };
        assert!(!specs.handle_event(&f.tree, &into_value));
        assert!(shared.get().visible);
    }

    #[test]
    fn test_leaving_row_hides_and_keeps_geometry() {
        let f = fixture();
        let shared = SharedOverlay::default();
        let mut specs = table(&f, &shared);
        specs.handle_event(&f.tree, &GlassEvent::PointerOver { target: f.rows[0] });

        let to_next = GlassEvent::PointerOut {
            target: f.values[0],
            related: Some(f.rows[1]),
        };
        assert!(specs.handle_event(&f.tree, &to_next));
        assert_eq!(specs.active(), None);
        assert!(!shared.get().visible);
        assert_eq!(shared.get().rect.top, 24.0);

        assert!(specs.handle_event(&f.tree, &GlassEvent::PointerOver { target: f.rows[1] }));
        assert_eq!(shared.get().rect.top, 60.0);
        assert!(shared.get().visible);

        assert!(specs.handle_event(&f.tree, &GlassEvent::PointerLeave));
        assert!(!specs.handle_event(&f.tree, &GlassEvent::PointerLeave));
        assert_eq!(shared.get().rect.top, 60.0);
    }

    #[test]
    fn test_resize_remeasures_lit_row_magnified() {
        let f = fixture();
        let shared = SharedOverlay::default();
        let mut specs = table(&f, &shared);
        let resize = GlassEvent::Resize { viewport_width: 375.0 };

        assert!(!specs.handle_event(&f.tree, &resize));

        specs.handle_event(&f.tree, &GlassEvent::PointerOver { target: f.rows[2] });
        assert!(specs.handle_event(&f.tree, &resize));
        let rect = shared.get().rect;
        assert_eq!((rect.width, rect.height), (228.0, 40.0));
        assert_eq!((rect.left, rect.top), (150.0, 96.0));
    }

    #[test]
    fn test_unmounted_card_is_not_written() {
        let mut f = fixture();
        f.tree.get_mut(f.card).unwrap().flags.clear(ElementFlags::GLASS_SURFACE);
        let shared = SharedOverlay::default();
        let mut specs = table(&f, &shared);

        assert!(!specs.handle_event(&f.tree, &GlassEvent::PointerOver { target: f.rows[0] }));
        assert_eq!(specs.active(), None);
        assert_eq!(shared.get(), OverlayState::default());
    }
}
