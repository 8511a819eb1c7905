use serde::{Deserialize, Serialize};

/// RGBA colour (0.0 - 1.0 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    /// Create a colour from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque colour from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a colour from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Resolve a colour by name or `#rrggbb` hex string.
    ///
    /// Names are matched case-insensitively against the classic palette.
    /// Unknown names and malformed hex strings fall back to white.
    pub fn named(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::WHITE)
    }

    /// Like [`Colour::named`] but reports unknown names instead of falling back.
    pub fn parse(name: &str) -> Option<Self> {
        if let Some(hex) = name.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let colour = match name.to_ascii_uppercase().as_str() {
            "BLACK" => Self::BLACK,
            "BLUE" => Self::BLUE,
            "CYAN" => Self::CYAN,
            "DARKGREY" => Self::DARK_GREY,
            "GREY" => Self::GREY,
            "GREEN" => Self::GREEN,
            "LIGHTGREY" => Self::LIGHT_GREY,
            "MAGENTA" => Self::MAGENTA,
            "ORANGE" => Self::ORANGE,
            "PINK" => Self::PINK,
            "RED" => Self::RED,
            "WHITE" => Self::WHITE,
            "YELLOW" => Self::YELLOW,
            _ => return None,
        };
        Some(colour)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if hex.len() < 6 || !hex.is_char_boundary(6) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    // Classic AWT palette
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const DARK_GREY: Self = Self::rgb(0.25, 0.25, 0.25);
    pub const GREY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const LIGHT_GREY: Self = Self::rgb(0.75, 0.75, 0.75);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    pub const ORANGE: Self = Self::rgb(1.0, 0.78, 0.0);
    pub const PINK: Self = Self::rgb(1.0, 0.69, 0.69);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}
