//! Input events delivered to a glass container.
//!
//! Positions are absolute tree coordinates, the same space as element
//! bounds.

use crate::overlay::OverlayPatch;
use crate::tree::ElementId;

/// A single touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
}

impl Touch {
    /// Creates a touch point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Event delivered to a glass container or one of its descendants.
#[derive(Debug, Clone, PartialEq)]
pub enum GlassEvent {
    /// The pointer entered the container itself.
    PointerEnter,
    /// The pointer left the container itself.
    PointerLeave,
    /// The pointer moved over a descendant (bubbles from `target`).
    PointerOver {
        /// Element directly under the pointer.
        target: ElementId,
    },
    /// The pointer moved off a descendant.
    PointerOut {
        /// Element the pointer left.
        target: ElementId,
        /// Element the pointer moved onto, if any.
        related: Option<ElementId>,
    },
    /// A descendant received focus.
    FocusIn {
        /// Focused element.
        target: ElementId,
    },
    /// A descendant lost focus.
    FocusOut {
        /// Element that lost focus.
        target: ElementId,
        /// Element receiving focus next, if any.
        related: Option<ElementId>,
    },
    /// The pointer moved.
    PointerMove {
        /// Pointer X.
        x: f32,
        /// Pointer Y.
        y: f32,
    },
    /// A touch began.
    TouchStart {
        /// Element the touch began on.
        target: ElementId,
        /// Active touches, primary first.
        touches: Vec<Touch>,
    },
    /// Touches moved. The target is re-resolved from the primary touch.
    TouchMove {
        /// Active touches, primary first.
        touches: Vec<Touch>,
    },
    /// The last touch ended.
    TouchEnd,
    /// The touch sequence was cancelled.
    TouchCancel,
    /// Partial overlay update pushed by a collaborator.
    Patch(OverlayPatch),
    /// The viewport changed size (resize or orientation change).
    Resize {
        /// New viewport width.
        viewport_width: f32,
    },
}

impl GlassEvent {
    /// Returns the primary touch of a touch event.
    #[must_use]
    pub fn primary_touch(&self) -> Option<Touch> {
        match self {
            Self::TouchStart { touches, .. } | Self::TouchMove { touches } => touches.first().copied(),
            _ => None,
        }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PointerEnter => "pointerenter",
            Self::PointerLeave => "pointerleave",
            Self::PointerOver { .. } => "pointerover",
            Self::PointerOut { .. } => "pointerout",
            Self::FocusIn { .. } => "focusin",
            Self::FocusOut { .. } => "focusout",
            Self::PointerMove { .. } => "pointermove",
            Self::TouchStart { .. } => "touchstart",
            Self::TouchMove { .. } => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::Patch(_) => "patch",
            Self::Resize { .. } => "resize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_touch() {
        let event = GlassEvent::TouchMove {
            touches: vec![Touch::new(3.0, 4.0), Touch::new(9.0, 9.0)],
        };
        assert_eq!(event.primary_touch(), Some(Touch::new(3.0, 4.0)));

        assert_eq!(GlassEvent::TouchMove { touches: Vec::new() }.primary_touch(), None);
        assert_eq!(GlassEvent::TouchEnd.primary_touch(), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(GlassEvent::PointerMove { x: 0.0, y: 0.0 }.name(), "pointermove");
        assert_eq!(GlassEvent::TouchCancel.name(), "touchcancel");
    }
}
