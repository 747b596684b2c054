//! Interactive target classification.
//!
//! Only four kinds of element may own the magnifier: links, buttons,
//! specification rows and elements carrying the explicit highlight marker.
//! Classification happens while walking up from the raw event target.

use crate::tree::{ElementId, ElementRole, ElementState, ElementTree};

/// Kind of element that owns the highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractiveTarget {
    /// A hyperlink.
    Link,
    /// A button or tab.
    Button,
    /// A specification table row.
    SpecItem,
    /// Any element carrying the explicit highlight marker.
    CustomMarker,
}

impl InteractiveTarget {
    /// Classifies a single element, or returns `None` if it is not
    /// interactive.
    ///
    /// The role wins over the marker, so a marked link is still a link.
    #[must_use]
    pub fn classify(element: &ElementState) -> Option<Self> {
        match element.role {
            ElementRole::Link => Some(Self::Link),
            ElementRole::Button => Some(Self::Button),
            ElementRole::SpecItem => Some(Self::SpecItem),
            ElementRole::Generic if element.is_highlight_target() => Some(Self::CustomMarker),
            ElementRole::Generic => None,
        }
    }
}

/// An element resolved as the owner of the highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// The interactive element (the raw target or one of its ancestors).
    pub id: ElementId,
    /// Its classification.
    pub kind: InteractiveTarget,
}

/// Walks from `raw` up to the nearest interactive ancestor inside `container`.
///
/// Returns `None` when no interactive element is found, when the match lies
/// outside the container, or when `raw` is detached.
#[must_use]
pub fn resolve_target(
    tree: &ElementTree,
    raw: ElementId,
    container: ElementId,
) -> Option<ResolvedTarget> {
    let id = tree.closest(raw, |el| InteractiveTarget::classify(el).is_some())?;
    if !tree.contains(container, id) {
        return None;
    }
    let kind = tree.get(id).and_then(InteractiveTarget::classify)?;
    Some(ResolvedTarget { id, kind })
}

/// Resolves the interactive element under a point (touch hit testing).
#[must_use]
pub fn resolve_at_point(
    tree: &ElementTree,
    x: f32,
    y: f32,
    container: ElementId,
) -> Option<ResolvedTarget> {
    let hit = tree.element_from_point(x, y)?;
    resolve_target(tree, hit, container)
}
