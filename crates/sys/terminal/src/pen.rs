//! Text attributes
//!
//! The pen is what every printed cell is drawn with: a foreground, a
//! background and a handful of attribute flags. SGR sequences are the only
//! way to change it.

use bitflags::bitflags;

use crate::color::{color_for, Color};
use crate::parser::Params;

bitflags! {
    /// Pen attribute flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attrs: u8 {
        const BOLD      = 0b0000_0001;
        const UNDERLINE = 0b0000_0010;
    }
}

/// Colors and attributes a cell is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Attribute flags
    pub attrs: Attrs,
}

impl Pen {
    /// Create a plain pen with the given colors
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: Attrs::empty(),
        }
    }

    /// Foreground as rasterized (bold lifts it into the bright range)
    pub fn effective_fg(&self) -> Color {
        if self.attrs.contains(Attrs::BOLD) {
            self.fg.brighten()
        } else {
            self.fg
        }
    }

    /// Check if glyphs get an underline scanline
    pub fn is_underlined(&self) -> bool {
        self.attrs.contains(Attrs::UNDERLINE)
    }

    /// The same pen with foreground and background exchanged
    pub fn inverse(&self) -> Self {
        Self {
            fg: self.bg,
            bg: self.effective_fg(),
            attrs: self.attrs - Attrs::BOLD,
        }
    }

    /// Apply an SGR parameter list, left to right
    ///
    /// Every accumulated slot is evaluated, so `ESC[m` resets like `ESC[0m`.
    /// `defaults` is the pen `39`/`49` fall back to; `0` always resets to
    /// white on black.
    pub fn apply_sgr(&mut self, params: &Params, defaults: &Pen) {
        for &code in params.iter() {
            match code {
                0 => *self = Pen::default(),
                1 => self.attrs.insert(Attrs::BOLD),
                4 => self.attrs.insert(Attrs::UNDERLINE),
                22 => self.attrs.remove(Attrs::BOLD),
                24 => self.attrs.remove(Attrs::UNDERLINE),
                30..=37 => self.fg = color_for((code - 30) as u8, false),
                39 => self.fg = defaults.fg,
                40..=47 => self.bg = color_for((code - 40) as u8, false),
                49 => self.bg = defaults.bg,
                90..=97 => self.fg = color_for((code - 90) as u8, true),
                100..=107 => self.bg = color_for((code - 100) as u8, true),
                _ => {}
            }
        }
    }
}

impl Default for Pen {
    /// White on black, no attributes
    fn default() -> Self {
        Self::new(Color::WHITE, Color::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sgr(pen: &mut Pen, values: &[u32]) {
        pen.apply_sgr(&Params::from_slice(values), &Pen::default());
    }

    #[test]
    fn test_reset_round_trip() {
        let mut pen = Pen::default();
        sgr(&mut pen, &[31]);
        assert_eq!(pen.fg, Color::RED);
        sgr(&mut pen, &[0]);
        assert_eq!(pen, Pen::default());
    }

    #[test]
    fn test_empty_params_reset() {
        let mut pen = Pen::new(Color::GREEN, Color::BLUE);
        pen.apply_sgr(&Params::new(), &Pen::default());
        assert_eq!(pen, Pen::default());
    }

    #[test]
    fn test_bright_ranges() {
        let mut pen = Pen::default();
        sgr(&mut pen, &[91, 104]);
        assert_eq!(pen.fg, color_for(1, true));
        assert_eq!(pen.bg, color_for(4, true));
    }

    #[test]
    fn test_last_write_wins() {
        let mut pen = Pen::default();
        sgr(&mut pen, &[31, 42, 0, 35]);
        assert_eq!(pen.fg, Color::MAGENTA);
        assert_eq!(pen.bg, Color::BLACK);
    }

    #[test]
    fn test_fifth_code_lands_in_last_slot() {
        use crate::parser::{Event, Parser};

        let mut parser = Parser::new();
        let csi = b"\x1b[31;42;0;3;5m"
            .iter()
            .filter_map(|&b| parser.advance(b))
            .find_map(|event| match event {
                Event::Csi(csi) => Some(csi),
                _ => None,
            })
            .unwrap();

        let mut pen = Pen::default();
        pen.apply_sgr(&csi.params, &Pen::default());
        assert_eq!(pen.fg, Color::MAGENTA);
        assert_eq!(pen.bg, Color::BLACK);
    }

    #[test]
    fn test_unknown_codes_ignored() {
        let mut pen = Pen::default();
        sgr(&mut pen, &[38, 5, 200]);
        assert_eq!(pen, Pen::default());
    }

    #[test]
    fn test_attributes() {
        let mut pen = Pen::default();
        sgr(&mut pen, &[1, 4, 34]);
        assert!(pen.is_underlined());
        assert_eq!(pen.effective_fg(), Color::BLUE.brighten());
        sgr(&mut pen, &[22, 24]);
        assert_eq!(pen.attrs, Attrs::empty());
    }

    #[test]
    fn test_default_color_codes() {
        let defaults = Pen::new(Color::GREEN, Color::BLUE);
        let mut pen = Pen::new(Color::RED, Color::RED);
        pen.apply_sgr(&Params::from_slice(&[39, 49]), &defaults);
        assert_eq!((pen.fg, pen.bg), (Color::GREEN, Color::BLUE));
    }

    #[test]
    fn test_inverse() {
        let pen = Pen::new(Color::RED, Color::BLACK);
        let inv = pen.inverse();
        assert_eq!((inv.fg, inv.bg), (Color::BLACK, Color::RED));
    }
}
