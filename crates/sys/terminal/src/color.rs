//! Color handling for the console
//!
//! Pixels are packed u32 RGBA (0xRRGGBBAA). No floating point.

/// RGBA color (0xRRGGBBAA format)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Self = Self(0x00000000);
    pub const BLACK: Self = Self(0x000000FF);
    pub const WHITE: Self = Self(0xFFFFFFFF);
    pub const RED: Self = Self(0xFF0000FF);
    pub const GREEN: Self = Self(0x00FF00FF);
    pub const YELLOW: Self = Self(0xFFFF00FF);
    pub const BLUE: Self = Self(0x0000FFFF);
    pub const MAGENTA: Self = Self(0xFF00FFFF);
    pub const CYAN: Self = Self(0x00FFFFFF);

    /// Create from RGBA components
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Create opaque RGB color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create from raw u32 (0xRRGGBBAA)
    #[inline]
    pub const fn from_u32(val: u32) -> Self {
        Self(val)
    }

    /// Get red component
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Get green component
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Get blue component
    #[inline]
    pub const fn b(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Get alpha component
    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Convert to raw u32
    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Lift every color channel into the upper half (0x80-0xFF), keeping alpha
    ///
    /// Red is lifted too, so bright black is `0x808080FF` rather than a teal.
    #[inline]
    pub const fn brighten(self) -> Self {
        Self(self.0 | 0x8080_8000)
    }
}

impl From<u32> for Color {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// The eight base ANSI colors, by SGR index
const BASE_COLORS: [Color; 8] = [
    Color::BLACK,
    Color::RED,
    Color::GREEN,
    Color::YELLOW,
    Color::BLUE,
    Color::MAGENTA,
    Color::CYAN,
    Color::WHITE,
];

/// Standard 16-color ANSI palette: 0-7 base, 8-15 bright
pub const ANSI_COLORS: [Color; 16] = [
    BASE_COLORS[0],
    BASE_COLORS[1],
    BASE_COLORS[2],
    BASE_COLORS[3],
    BASE_COLORS[4],
    BASE_COLORS[5],
    BASE_COLORS[6],
    BASE_COLORS[7],
    BASE_COLORS[0].brighten(), // 8: Bright Black (gray)
    BASE_COLORS[1].brighten(),
    BASE_COLORS[2].brighten(),
    BASE_COLORS[3].brighten(),
    BASE_COLORS[4].brighten(),
    BASE_COLORS[5].brighten(),
    BASE_COLORS[6].brighten(),
    BASE_COLORS[7].brighten(),
];

/// Map an ANSI color index (0-7) and brightness to a palette entry
///
/// Indices above 7 are folded into range.
#[inline]
pub fn color_for(index: u8, bright: bool) -> Color {
    let index = (index & 0x07) as usize;
    if bright {
        ANSI_COLORS[index + 8]
    } else {
        ANSI_COLORS[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let c = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.to_u32(), 0x12345678);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x12, 0x34, 0x56, 0x78));
        assert_eq!(Color::rgb(1, 2, 3).a(), 255);
    }

    #[test]
    fn test_base_palette() {
        assert_eq!(color_for(0, false), Color(0x000000FF));
        assert_eq!(color_for(1, false), Color(0xFF0000FF));
        assert_eq!(color_for(4, false), Color(0x0000FFFF));
        assert_eq!(color_for(7, false), Color(0xFFFFFFFF));
    }

    #[test]
    fn test_bright_palette() {
        assert_eq!(color_for(0, true), Color(0x808080FF));
        assert_eq!(color_for(1, true), Color(0xFF8080FF));
        assert_eq!(color_for(6, true), Color(0x80FFFFFF));
        assert_eq!(color_for(7, true), Color::WHITE);
    }

    #[test]
    fn test_index_folding() {
        assert_eq!(color_for(9, false), color_for(1, false));
    }
}
