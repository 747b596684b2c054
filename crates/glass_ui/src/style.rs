//! Colors and the glass palette.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Tints used to draw a glass surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlassTint {
    /// Center of the soft halo.
    pub halo: Color,
    /// Center of the bright hotspot.
    pub hotspot: Color,
    /// Magnifier fill.
    pub magnifier: Color,
    /// Magnifier rim.
    pub rim: Color,
}

impl GlassTint {
    /// Frosted white glass.
    pub const FROSTED: Self = Self {
        halo: Color::rgba(1.0, 1.0, 1.0, 0.18),
        hotspot: Color::rgba(1.0, 1.0, 1.0, 0.16),
        magnifier: Color::rgba(1.0, 1.0, 1.0, 0.15),
        rim: Color::rgba(1.0, 1.0, 1.0, 0.28),
    };
}
