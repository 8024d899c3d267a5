//! Color types and the grayscale palette.
//!
//! Charts are drawn almost entirely in black and grays; accents are reserved for the few marks a
//! caller wants to call out.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black, the primary data color.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Dark gray used for secondary series and axis spines.
    pub const DARK_GRAY: Self = Self::rgb(0x66, 0x66, 0x66);
    /// Medium gray for tertiary series.
    pub const MEDIUM_GRAY: Self = Self::rgb(0x99, 0x99, 0x99);
    /// Light gray for a fourth series.
    pub const LIGHT_GRAY: Self = Self::rgb(0xCC, 0xCC, 0xCC);
    /// Very light gray for optional gridlines.
    pub const GRID_GRAY: Self = Self::rgb(0xE5, 0xE5, 0xE5);
    /// Muted red accent.
    pub const ACCENT_RED: Self = Self::rgb(0xE7, 0x4C, 0x3C);
    /// Muted blue accent.
    pub const ACCENT_BLUE: Self = Self::rgb(0x34, 0x98, 0xDB);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Scale the alpha channel by an opacity in `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        self.with_alpha((f32::from(self.a) * opacity).round() as u8)
    }

    /// Returns true if the color is fully opaque.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for any other shape or non-hex digits.
    ///
    /// # Example
    ///
    /// ```
    /// use inkframe::color::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#666666").unwrap(), Rgba::DARK_GRAY);
    /// assert!(Rgba::from_hex("#66").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        match digits.len() {
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => Err(Error::InvalidColor(hex.to_string())),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when translucent.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Series colors for multi-line charts, darkest first.
pub const GRAYSCALE_PALETTE: [Rgba; 4] =
    [Rgba::BLACK, Rgba::DARK_GRAY, Rgba::MEDIUM_GRAY, Rgba::LIGHT_GRAY];

/// Pick the color for series `index`, wrapping around `palette`.
///
/// Falls back to black for an empty palette.
#[must_use]
pub fn cycle(palette: &[Rgba], index: usize) -> Rgba {
    if palette.is_empty() {
        return Rgba::BLACK;
    }
    palette[index % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::DARK_GRAY.r, 0x66);
        assert_eq!(Rgba::ACCENT_BLUE.b, 0xDB);
    }

    #[test]
    fn test_with_opacity() {
        let c = Rgba::BLACK.with_opacity(0.6);
        assert_eq!(c.a, 153);
        assert_eq!(Rgba::BLACK.with_opacity(2.0).a, 255);
        assert_eq!(Rgba::BLACK.with_opacity(-1.0).a, 0);
    }

    #[test]
    fn test_from_hex_forms() {
        assert_eq!(Rgba::from_hex("#000000").unwrap(), Rgba::BLACK);
        assert_eq!(Rgba::from_hex("999999").unwrap(), Rgba::MEDIUM_GRAY);
        assert_eq!(Rgba::from_hex("#fff").unwrap(), Rgba::WHITE);
        assert_eq!(Rgba::from_hex("#00000080").unwrap(), Rgba::new(0, 0, 0, 128));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        for bad in ["", "#12", "#12345", "#gggggg", "#ééé"] {
            assert!(matches!(Rgba::from_hex(bad), Err(Error::InvalidColor(_))), "{bad}");
        }
    }

    #[test]
    fn test_hex_round_trip_display() {
        assert_eq!(Rgba::ACCENT_RED.to_string(), "#e74c3c");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_hex(), "#01020304");
        let parsed: Rgba = "#e74c3c".parse().unwrap();
        assert_eq!(parsed, Rgba::ACCENT_RED);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(&GRAYSCALE_PALETTE, 0), Rgba::BLACK);
        assert_eq!(cycle(&GRAYSCALE_PALETTE, 3), Rgba::LIGHT_GRAY);
        assert_eq!(cycle(&GRAYSCALE_PALETTE, 4), Rgba::BLACK);
        assert_eq!(cycle(&GRAYSCALE_PALETTE, 9), Rgba::DARK_GRAY);
        assert_eq!(cycle(&[], 2), Rgba::BLACK);
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let color = Rgba::new(10, 20, 30, 40);
        assert_eq!(Rgba::from_array(color.to_array()), color);
    }
}
