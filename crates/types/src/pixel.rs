//! Display cell values: colours, shades and the `Pixel` type.

use thiserror::Error;

/// Failure to parse a persisted colour or shade token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown colour name {0:?}")]
    UnknownColour(String),
    #[error("unknown shade name {0:?}")]
    UnknownShade(String),
}

/// The 16-colour console palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Colour {
    Black = 0x0,
    DarkBlue = 0x1,
    DarkGreen = 0x2,
    DarkCyan = 0x3,
    DarkRed = 0x4,
    Purple = 0x5,
    Brown = 0x6,
    LightGrey = 0x7,
    DarkGrey = 0x8,
    Blue = 0x9,
    Green = 0xA,
    Cyan = 0xB,
    Red = 0xC,
    Magenta = 0xD,
    Yellow = 0xE,
    White = 0xF,
}

impl Colour {
    /// Lowercase snake_case token used by the sprite text format.
    pub const fn name(self) -> &'static str {
        match self {
            Colour::Black => "black",
            Colour::DarkBlue => "dark_blue",
            Colour::DarkGreen => "dark_green",
            Colour::DarkCyan => "dark_cyan",
            Colour::DarkRed => "dark_red",
            Colour::Purple => "purple",
            Colour::Brown => "brown",
            Colour::LightGrey => "light_grey",
            Colour::DarkGrey => "dark_grey",
            Colour::Blue => "blue",
            Colour::Green => "green",
            Colour::Cyan => "cyan",
            Colour::Red => "red",
            Colour::Magenta => "magenta",
            Colour::Yellow => "yellow",
            Colour::White => "white",
        }
    }

    /// Inverse of [`Colour::name`]. Unknown tokens are a format error,
    /// never silently mapped to a default.
    pub fn from_name(name: &str) -> Result<Self, ParseError> {
        Ok(match name {
            "black" => Colour::Black,
            "dark_blue" => Colour::DarkBlue,
            "dark_green" => Colour::DarkGreen,
            "dark_cyan" => Colour::DarkCyan,
            "dark_red" => Colour::DarkRed,
            "purple" => Colour::Purple,
            "brown" => Colour::Brown,
            "light_grey" => Colour::LightGrey,
            "dark_grey" => Colour::DarkGrey,
            "blue" => Colour::Blue,
            "green" => Colour::Green,
            "cyan" => Colour::Cyan,
            "red" => Colour::Red,
            "magenta" => Colour::Magenta,
            "yellow" => Colour::Yellow,
            "white" => Colour::White,
            other => return Err(ParseError::UnknownColour(other.to_string())),
        })
    }
}

/// Glyph-level fill density, rendered as a specific block character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    Empty,
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl Shade {
    /// The character this shade renders as.
    pub const fn glyph(self) -> char {
        match self {
            Shade::Empty => ' ',
            Shade::Quarter => '░',
            Shade::Half => '▒',
            Shade::ThreeQuarters => '▓',
            Shade::Full => '█',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Shade::Empty => "empty",
            Shade::Quarter => "quarter",
            Shade::Half => "half",
            Shade::ThreeQuarters => "three_quarters",
            Shade::Full => "full",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ParseError> {
        Ok(match name {
            "empty" => Shade::Empty,
            "quarter" => Shade::Quarter,
            "half" => Shade::Half,
            "three_quarters" => Shade::ThreeQuarters,
            "full" => Shade::Full,
            other => return Err(ParseError::UnknownShade(other.to_string())),
        })
    }
}

/// One display cell: foreground and background colour plus a fill shade.
///
/// Foreground and background are separate named fields; the legacy packed
/// single-attribute form exists only at the presentation boundary, see
/// [`Pixel::attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub foreground: Colour,
    pub background: Colour,
    pub shade: Shade,
}

/// Monotonic brightness ramp used by [`Pixel::from_luminance`]. Each step
/// layers a lighter foreground shade over the previous level's colour.
const LUMINANCE_RAMP: [Pixel; 13] = [
    Pixel::from_colour(Colour::Black),
    Pixel::with_background(Colour::DarkGrey, Colour::Black, Shade::Quarter),
    Pixel::with_background(Colour::DarkGrey, Colour::Black, Shade::Half),
    Pixel::with_background(Colour::DarkGrey, Colour::Black, Shade::ThreeQuarters),
    Pixel::from_colour(Colour::DarkGrey),
    Pixel::with_background(Colour::LightGrey, Colour::DarkGrey, Shade::Quarter),
    Pixel::with_background(Colour::LightGrey, Colour::DarkGrey, Shade::Half),
    Pixel::with_background(Colour::LightGrey, Colour::DarkGrey, Shade::ThreeQuarters),
    Pixel::from_colour(Colour::LightGrey),
    Pixel::with_background(Colour::White, Colour::LightGrey, Shade::Quarter),
    Pixel::with_background(Colour::White, Colour::LightGrey, Shade::Half),
    Pixel::with_background(Colour::White, Colour::LightGrey, Shade::ThreeQuarters),
    Pixel::from_colour(Colour::White),
];

impl Pixel {
    /// Full white block, the historic default cell.
    pub const fn default_cell() -> Self {
        Self::from_colour(Colour::White)
    }

    /// The transparent sentinel: a shade of `Empty` means "do not draw".
    pub const TRANSPARENT: Self = Self::from_shade(Shade::Empty);

    pub const fn from_colour(foreground: Colour) -> Self {
        Self {
            foreground,
            background: Colour::Black,
            shade: Shade::Full,
        }
    }

    pub const fn from_shade(shade: Shade) -> Self {
        Self {
            foreground: Colour::White,
            background: Colour::Black,
            shade,
        }
    }

    pub const fn new(foreground: Colour, shade: Shade) -> Self {
        Self {
            foreground,
            background: Colour::Black,
            shade,
        }
    }

    pub const fn with_background(foreground: Colour, background: Colour, shade: Shade) -> Self {
        Self {
            foreground,
            background,
            shade,
        }
    }

    /// Quantize a normalized brightness in `[0, 1)` onto the 13-step ramp.
    ///
    /// Values below the range clamp to full black, values at or above 1.0
    /// clamp to full white.
    pub fn from_luminance(luminance: f64) -> Self {
        if (0.0..1.0).contains(&luminance) {
            LUMINANCE_RAMP[(luminance * LUMINANCE_RAMP.len() as f64) as usize]
        } else if luminance >= 1.0 {
            Self::from_colour(Colour::White)
        } else {
            Self::from_colour(Colour::Black)
        }
    }

    /// Index of this pixel on the luminance ramp, if it is a ramp entry.
    pub fn ramp_index(self) -> Option<usize> {
        LUMINANCE_RAMP.iter().position(|&p| p == self)
    }

    /// Packed console attribute: `background << 4 | foreground`.
    ///
    /// This is the presentation-layer encoding only; in-memory pixels keep
    /// the two colours as separate fields.
    pub const fn attribute(self) -> u8 {
        (self.background as u8) << 4 | self.foreground as u8
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::default_cell()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_full_white() {
        let p = Pixel::default();
        assert_eq!(p.foreground, Colour::White);
        assert_eq!(p.background, Colour::Black);
        assert_eq!(p.shade, Shade::Full);
    }

    #[test]
    fn attribute_packs_background_into_high_bits() {
        let p = Pixel::with_background(Colour::Cyan, Colour::DarkRed, Shade::Half);
        assert_eq!(p.attribute(), 0x4B);
        assert_eq!(Pixel::from_colour(Colour::White).attribute(), 0x0F);
    }

    #[test]
    fn colour_names_round_trip() {
        for colour in [
            Colour::Black,
            Colour::DarkBlue,
            Colour::DarkGreen,
            Colour::DarkCyan,
            Colour::DarkRed,
            Colour::Purple,
            Colour::Brown,
            Colour::LightGrey,
            Colour::DarkGrey,
            Colour::Blue,
            Colour::Green,
            Colour::Cyan,
            Colour::Red,
            Colour::Magenta,
            Colour::Yellow,
            Colour::White,
        ] {
            assert_eq!(Colour::from_name(colour.name()).unwrap(), colour);
        }
    }

    #[test]
    fn unknown_names_are_errors_not_defaults() {
        assert_eq!(
            Colour::from_name("chartreuse"),
            Err(ParseError::UnknownColour("chartreuse".to_string()))
        );
        assert_eq!(
            Shade::from_name("half_full"),
            Err(ParseError::UnknownShade("half_full".to_string()))
        );
    }

    #[test]
    fn luminance_clamps_at_both_ends() {
        assert_eq!(Pixel::from_luminance(-0.5), Pixel::from_colour(Colour::Black));
        assert_eq!(Pixel::from_luminance(1.0), Pixel::from_colour(Colour::White));
        assert_eq!(Pixel::from_luminance(7.0), Pixel::from_colour(Colour::White));
    }

    #[test]
    fn luminance_ramp_is_monotonic() {
        let mut last_index = 0;
        for step in 0..100 {
            let luminance = step as f64 / 100.0;
            let index = Pixel::from_luminance(luminance).ramp_index().unwrap();
            assert!(index >= last_index, "ramp went backwards at {luminance}");
            last_index = index;
        }
        assert_eq!(last_index, 12);
    }

    #[test]
    fn shade_glyphs() {
        assert_eq!(Shade::Empty.glyph(), ' ');
        assert_eq!(Shade::Full.glyph(), '█');
    }
}
