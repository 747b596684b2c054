//! Element identity, role and flags.

use crate::layout::Rect;

/// Unique identifier for an element.
///
/// Components hold element ids, never the elements themselves: a stale id
/// simply stops resolving once the element is removed from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Creates a new element ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What an element is, as far as target resolution cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementRole {
    /// Plain container or text.
    #[default]
    Generic,
    /// A hyperlink.
    Link,
    /// A button (tabs are buttons).
    Button,
    /// A row of a specification table.
    SpecItem,
}

/// Element flags (bitfield).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementFlags(u32);

impl ElementFlags {
    /// Element takes part in point hit testing.
    pub const HIT_TESTABLE: u32 = 1 << 0;
    /// Element can receive focus.
    pub const FOCUSABLE: u32 = 1 << 1;
    /// Explicit opt-in marker: the element owns the highlight when hovered.
    pub const HIGHLIGHT_TARGET: u32 = 1 << 2;
    /// Element is a mounted glass surface.
    pub const GLASS_SURFACE: u32 = 1 << 3;

    /// Default flags for a new element.
    pub const DEFAULT: Self = Self(Self::HIT_TESTABLE);

    /// Creates new flags with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A node of the element tree.
#[derive(Debug, Clone)]
pub struct ElementState {
    /// Element identifier.
    pub id: ElementId,
    /// Role used by target classification.
    pub role: ElementRole,
    /// Bounding box in absolute coordinates.
    pub rect: Rect,
    /// State flags.
    pub flags: ElementFlags,
    /// Parent element (None for a root).
    pub parent: Option<ElementId>,
    /// Human-readable label, used in logs and by the replay driver.
    pub label: String,
}

impl ElementState {
    /// Creates a generic element with the given bounds.
    #[must_use]
    pub fn new(id: ElementId, rect: Rect) -> Self {
        Self {
            id,
            role: ElementRole::Generic,
            rect,
            flags: ElementFlags::DEFAULT,
            parent: None,
            label: String::new(),
        }
    }

    /// Sets the role. Links and buttons become focusable.
    #[must_use]
    pub fn with_role(mut self, role: ElementRole) -> Self {
        self.role = role;
        if matches!(role, ElementRole::Link | ElementRole::Button) {
            self.flags.set(ElementFlags::FOCUSABLE);
        }
        self
    }

    /// Marks the element as an explicit highlight target.
    #[must_use]
    pub fn highlight_target(mut self) -> Self {
        self.flags.set(ElementFlags::HIGHLIGHT_TARGET);
        self
    }

    /// Excludes the element from point hit testing.
    #[must_use]
    pub fn pass_through(mut self) -> Self {
        self.flags.clear(ElementFlags::HIT_TESTABLE);
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns true if the element is a mounted glass surface.
    #[inline]
    #[must_use]
    pub fn is_glass_surface(&self) -> bool {
        self.flags.has(ElementFlags::GLASS_SURFACE)
    }

    /// Returns true if the element takes part in hit testing.
    #[inline]
    #[must_use]
    pub fn is_hit_testable(&self) -> bool {
        self.flags.has(ElementFlags::HIT_TESTABLE)
    }

    /// Returns true if the element carries the opt-in highlight marker.
    #[inline]
    #[must_use]
    pub fn is_highlight_target(&self) -> bool {
        self.flags.has(ElementFlags::HIGHLIGHT_TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_is_focusable() {
        let el = ElementState::new(ElementId::new(1), Rect::ZERO).with_role(ElementRole::Button);
        assert!(el.flags.has(ElementFlags::FOCUSABLE));
        assert!(el.is_hit_testable());
    }

    #[test]
    fn test_pass_through_and_marker() {
        let el = ElementState::new(ElementId::new(2), Rect::ZERO)
            .pass_through()
            .highlight_target();
        assert!(!el.is_hit_testable());
        assert!(el.is_highlight_target());
        assert!(!el.flags.has(ElementFlags::FOCUSABLE));
    }
}
