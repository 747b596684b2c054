//! Rectangles and a minimal stacking layout used to place elements.

/// A rectangle in absolute tree coordinates (top-left origin).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin. Detached elements report this.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if the rectangle has no area (or non-finite extents).
    ///
    /// Geometry read from a detached element is degenerate and must never be
    /// rendered.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Shrinks the rectangle by the given amount on all sides.
    #[must_use]
    pub fn shrink(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - amount * 2.0).max(0.0),
            (self.height - amount * 2.0).max(0.0),
        )
    }
}

/// Stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Left to right (a horizontal tab strip).
    #[default]
    Horizontal,
    /// Top to bottom (the stacked compact toolbar).
    Vertical,
}

/// Places children one after another inside a parent, centered on the cross
/// axis.
#[derive(Debug, Clone, Copy)]
pub struct Stack {
    /// Main axis.
    pub direction: Direction,
    /// Gap between children.
    pub gap: f32,
    /// Padding inside the parent.
    pub padding: f32,
}

impl Default for Stack {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            gap: 4.0,
            padding: 0.0,
        }
    }
}

impl Stack {
    /// Creates a horizontal stack.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::default()
    }

    /// Creates a vertical stack.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Self::default()
        }
    }

    /// Sets the gap between children.
    #[must_use]
    pub const fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the padding inside the parent.
    #[must_use]
    pub const fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Returns the bounds of each child of the given size inside `bounds`.
    #[must_use]
    pub fn arrange(&self, bounds: Rect, sizes: &[(f32, f32)]) -> Vec<Rect> {
        let inner = bounds.shrink(self.padding);
        let mut cursor = match self.direction {
            Direction::Horizontal => inner.x,
            Direction::Vertical => inner.y,
        };

        sizes
            .iter()
            .map(|&(w, h)| {
                let rect = match self.direction {
                    Direction::Horizontal => {
                        Rect::new(cursor, inner.y + (inner.height - h) * 0.5, w, h)
                    }
                    Direction::Vertical => {
                        Rect::new(inner.x + (inner.width - w) * 0.5, cursor, w, h)
                    }
                };
                cursor += match self.direction {
                    Direction::Horizontal => w + self.gap,
                    Direction::Vertical => h + self.gap,
                };
                rect
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(50.0, 30.0));
        assert!(!rect.contains(5.0, 30.0));
        assert!(!rect.contains(50.0, 80.0));
    }

    #[test]
    fn test_degenerate_rect() {
        assert!(Rect::ZERO.is_degenerate());
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, f32::NAN, 10.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_stack_horizontal() {
        let stack = Stack::horizontal().with_gap(10.0).with_padding(8.0);
        let bounds = Rect::new(0.0, 0.0, 300.0, 46.0);

        let result = stack.arrange(bounds, &[(60.0, 30.0), (50.0, 30.0), (40.0, 30.0)]);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0], Rect::new(8.0, 8.0, 60.0, 30.0));
        assert_eq!(result[1].x, 78.0);
        assert_eq!(result[2].x, 138.0);
    }

    #[test]
    fn test_stack_vertical_centers_cross_axis() {
        let stack = Stack::vertical().with_gap(0.0);
        let result = stack.arrange(Rect::new(0.0, 0.0, 100.0, 100.0), &[(40.0, 20.0)]);

        assert_eq!(result[0], Rect::new(30.0, 0.0, 40.0, 20.0));
    }
}
