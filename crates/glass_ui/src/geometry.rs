//! Container-relative overlay geometry.
//!
//! The overlay is positioned by its center: `left`/`top` are the center of
//! the target relative to the container's top-left corner, and the renderer
//! translates the glass by half its size.

use crate::config::GeometryConfig;
use crate::layout::Rect;
use crate::tree::{ElementId, ElementTree};

/// Horizontal and vertical padding around a specification row.
pub const SPEC_ITEM_PADDING: (f32, f32) = (20.0, 8.0);
/// Padding around a specification row that is already magnified.
pub const SPEC_ITEM_MAGNIFIED_PADDING: (f32, f32) = (28.0, 12.0);

/// Overlay rectangle in container-relative coordinates, center-anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayRect {
    /// Horizontal center relative to the container's left edge.
    pub left: f32,
    /// Vertical center relative to the container's top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl OverlayRect {
    /// Creates a new overlay rectangle.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns the rectangle as top-left bounds, offset by the container
    /// origin.
    #[must_use]
    pub fn to_bounds(&self, origin: (f32, f32)) -> Rect {
        Rect::new(
            origin.0 + self.left - self.width * 0.5,
            origin.1 + self.top - self.height * 0.5,
            self.width,
            self.height,
        )
    }
}

/// Computes overlay rectangles from element geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryResolver {
    config: GeometryConfig,
}

impl GeometryResolver {
    /// Creates a resolver with the given constants.
    #[must_use]
    pub const fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    /// Returns the resolver's constants.
    #[must_use]
    pub const fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Computes the overlay for a target rect inside a container rect.
    ///
    /// Returns `None` for degenerate input, which is what a detached element
    /// reports.
    #[must_use]
    pub fn from_rects(&self, target: Rect, container: Rect) -> Option<OverlayRect> {
        if target.is_degenerate() || container.is_degenerate() {
            return None;
        }
        Some(OverlayRect {
            left: target.x - container.x + target.width * 0.5,
            top: target.y - container.y + target.height * 0.5,
            width: (target.width + self.config.width_padding).max(self.config.min_width),
            height: target.height.max(self.config.min_height),
        })
    }

    /// Reads both elements from the tree and computes the overlay.
    ///
    /// Pure read: never mutates the tree. A missing or detached element
    /// yields `None` and the caller skips the update.
    #[must_use]
    pub fn resolve(
        &self,
        tree: &ElementTree,
        target: ElementId,
        container: ElementId,
    ) -> Option<OverlayRect> {
        if !tree.is_attached(target) || !tree.is_attached(container) {
            return None;
        }
        self.from_rects(tree.bounding_rect(target), tree.bounding_rect(container))
    }

    /// Clamps the horizontal center so the overlay keeps `inset` from both
    /// container edges.
    ///
    /// An overlay wider than the usable span is pinned to the container
    /// middle.
    #[must_use]
    pub fn clamp(&self, rect: OverlayRect, container_width: f32) -> OverlayRect {
        let half = rect.width * 0.5;
        let min = self.config.inset + half;
        let max = container_width - self.config.inset - half;
        let left = if min > max {
            container_width * 0.5
        } else {
            rect.left.clamp(min, max)
        };
        OverlayRect { left, ..rect }
    }

    /// Resolves and clamps in one step.
    #[must_use]
    pub fn resolve_clamped(
        &self,
        tree: &ElementTree,
        target: ElementId,
        container: ElementId,
    ) -> Option<OverlayRect> {
        let rect = self.resolve(tree, target, container)?;
        Some(self.clamp(rect, tree.bounding_rect(container).width))
    }

    /// Computes the overlay for a specification row.
    ///
    /// Rows get padding on both axes (more while `magnified`), a height no
    /// smaller than the minimum, and are capped to the container: the width
    /// to `container.width - 2 * inset` and the height to
    /// `container.height - inset`. The result is clamped like any overlay.
    #[must_use]
    pub fn spec_item_from_rects(&self, item: Rect, container: Rect, magnified: bool) -> Option<OverlayRect> {
        if item.is_degenerate() || container.is_degenerate() {
            return None;
        }
        let (pad_x, pad_y) = if magnified {
            SPEC_ITEM_MAGNIFIED_PADDING
        } else {
            SPEC_ITEM_PADDING
        };
        let inset = self.config.inset;
        let max_width = (container.width - inset * 2.0).max(0.0);
        let max_height = (container.height - inset).max(0.0);

        let rect = OverlayRect {
            left: item.x - container.x + item.width * 0.5,
            top: item.y - container.y + item.height * 0.5,
            width: (item.width + pad_x).min(max_width),
            height: (item.height + pad_y).max(self.config.min_height).min(max_height),
        };
        Some(self.clamp(rect, container.width))
    }

    /// Reads a specification row and its container from the tree and
    /// computes the row overlay. Missing or detached elements yield `None`.
    #[must_use]
    pub fn resolve_spec_item(
        &self,
        tree: &ElementTree,
        item: ElementId,
        container: ElementId,
        magnified: bool,
    ) -> Option<OverlayRect> {
        if !tree.is_attached(item) || !tree.is_attached(container) {
            return None;
        }
        self.spec_item_from_rects(tree.bounding_rect(item), tree.bounding_rect(container), magnified)
    }
}

/// Resolves the overlay for `target` inside `container` with default
/// constants.
#[must_use]
pub fn resolve_rect(tree: &ElementTree, target: ElementId, container: ElementId) -> Option<OverlayRect> {
    GeometryResolver::default().resolve(tree, target, container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementState;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_scenario_center_and_floor() {
        let resolver = GeometryResolver::default();
        let rect = resolver
            .from_rects(Rect::new(100.0, 50.0, 40.0, 20.0), Rect::new(0.0, 0.0, 300.0, 100.0))
            .unwrap();

        assert!(approx(rect.left, 120.0));
        assert!(approx(rect.top, 60.0));
        assert!(approx(rect.width, 52.0));
        assert!(approx(rect.height, 30.0));

        let clamped = resolver.clamp(rect, 300.0);
        assert!(approx(clamped.left, 120.0));
    }

    #[test]
    fn test_container_offset_is_subtracted() {
        let resolver = GeometryResolver::default();
        let rect = resolver
            .from_rects(Rect::new(250.0, 140.0, 60.0, 40.0), Rect::new(200.0, 100.0, 400.0, 200.0))
            .unwrap();

        assert!(approx(rect.left, 80.0));
        assert!(approx(rect.top, 60.0));
        assert!(approx(rect.width, 72.0));
        assert!(approx(rect.height, 40.0));
    }

    #[test]
    fn test_tiny_target_gets_minimum_size() {
        let resolver = GeometryResolver::default();
        let rect = resolver
            .from_rects(Rect::new(10.0, 10.0, 4.0, 4.0), Rect::new(0.0, 0.0, 300.0, 100.0))
            .unwrap();

        assert!(rect.width >= 26.0);
        assert!(rect.height >= 30.0);
    }

    #[test]
    fn test_clamp_edges() {
        let resolver = GeometryResolver::default();

        let near_left = resolver.clamp(OverlayRect::new(5.0, 20.0, 52.0, 30.0), 300.0);
        assert!(approx(near_left.left, 38.0));

        let near_right = resolver.clamp(OverlayRect::new(299.0, 20.0, 52.0, 30.0), 300.0);
        assert!(approx(near_right.left, 262.0));

        let too_wide = resolver.clamp(OverlayRect::new(10.0, 20.0, 400.0, 30.0), 300.0);
        assert!(approx(too_wide.left, 150.0));
    }

    #[test]
    fn test_detached_target_is_noop() {
        let mut tree = ElementTree::new();
        let container_id = tree.next_id();
        let container =
            tree.add_root(ElementState::new(container_id, Rect::new(0.0, 0.0, 300.0, 100.0)));
        let target_id = tree.next_id();
        let target =
            tree.add_child(container, ElementState::new(target_id, Rect::new(10.0, 10.0, 40.0, 20.0)));

        assert!(resolve_rect(&tree, target, container).is_some());

        tree.remove(target);
        assert_eq!(resolve_rect(&tree, target, container), None);
        assert_eq!(resolve_rect(&tree, container, ElementId::new(999)), None);
    }

    #[test]
    fn test_zero_sized_target_is_noop() {
        let resolver = GeometryResolver::default();
        assert_eq!(resolver.from_rects(Rect::ZERO, Rect::new(0.0, 0.0, 300.0, 100.0)), None);
    }

    #[test]
    fn test_spec_item_padding() {
        let resolver = GeometryResolver::default();
        let container = Rect::new(0.0, 0.0, 300.0, 100.0);
        let item = Rect::new(50.0, 40.0, 100.0, 20.0);

        let plain = resolver.spec_item_from_rects(item, container, false).unwrap();
        assert_eq!(plain, OverlayRect::new(100.0, 50.0, 120.0, 30.0));

        let magnified = resolver.spec_item_from_rects(item, container, true).unwrap();
        assert_eq!(magnified, OverlayRect::new(100.0, 50.0, 128.0, 32.0));
    }

    #[test]
    fn test_spec_item_width_cap() {
        let resolver = GeometryResolver::default();
        let container = Rect::new(0.0, 0.0, 300.0, 100.0);

        let wide = resolver
            .spec_item_from_rects(Rect::new(5.0, 40.0, 290.0, 20.0), container, true)
            .unwrap();
        assert_eq!(wide.width, 276.0);
        assert_eq!(wide.left, 150.0);
    }

    #[test]
    fn test_spec_item_height_cap() {
        let resolver = GeometryResolver::default();
        let container = Rect::new(0.0, 0.0, 300.0, 40.0);

        let tall = resolver
            .spec_item_from_rects(Rect::new(100.0, 0.0, 60.0, 40.0), container, false)
            .unwrap();
        assert_eq!(tall.height, 28.0);
        assert_eq!(tall.top, 20.0);
    }

    #[test]
    fn test_spec_item_edge_is_clamped() {
        let resolver = GeometryResolver::default();
        let rect = resolver
            .spec_item_from_rects(Rect::new(0.0, 10.0, 20.0, 20.0), Rect::new(0.0, 0.0, 300.0, 100.0), false)
            .unwrap();

        assert_eq!(rect.width, 40.0);
        assert_eq!(rect.left, 32.0);
    }

    #[test]
    fn test_spec_item_detached_is_noop() {
        let mut tree = ElementTree::new();
        let id = tree.next_id();
        let container = tree.add_root(ElementState::new(id, Rect::new(0.0, 0.0, 300.0, 100.0)));
        let id = tree.next_id();
        let row = tree.add_child(container, ElementState::new(id, Rect::new(10.0, 10.0, 200.0, 20.0)));
        let resolver = GeometryResolver::default();

        assert!(resolver.resolve_spec_item(&tree, row, container, false).is_some());
        tree.remove(row);
        assert_eq!(resolver.resolve_spec_item(&tree, row, container, false), None);
    }

    #[test]
    fn test_to_bounds_translates_by_half() {
        let rect = OverlayRect::new(120.0, 60.0, 52.0, 30.0);
        assert_eq!(rect.to_bounds((10.0, 0.0)), Rect::new(104.0, 45.0, 52.0, 30.0));
    }
}
