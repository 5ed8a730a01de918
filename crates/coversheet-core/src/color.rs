//! Colour values and their per-target encodings
//!
//! One parsed [`Color`] is shared by every renderer. Each target only differs
//! in how it spells the value:
//!
//! | target  | encoding        |
//! |---------|-----------------|
//! | preview | `#1a237e`       |
//! | DOCX    | `1A237E`        |
//! | PDF     | `rgb("#1a237e")`|

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Plain white, the default page colour
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Plain black, used for the module line and student details
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    /// Dark grey used for the faculty line
    pub const FACULTY_GREY: Color = Color::rgb(0x33, 0x33, 0x33);
    /// Default theme colour (institution name, title, frame)
    pub const DEFAULT_THEME: Color = Color::rgb(0x1a, 0x23, 0x7e);

    /// Create a colour from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional)
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidColor(input.to_string());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                Ok(Self::rgb(
                    channel(0).map_err(|_| invalid())?,
                    channel(2).map_err(|_| invalid())?,
                    channel(4).map_err(|_| invalid())?,
                ))
            }
            3 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
                Ok(Self::rgb(
                    channel(0).map_err(|_| invalid())?,
                    channel(1).map_err(|_| invalid())?,
                    channel(2).map_err(|_| invalid())?,
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// Parse, falling back to `fallback` when the input is not a colour
    pub fn parse_or(input: &str, fallback: Color) -> Self {
        match Self::parse(input) {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!("{}; using {}", e, fallback);
                fallback
            }
        }
    }

    /// CSS hex notation, lowercase with `#`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WordprocessingML `w:val` notation, uppercase without `#`
    pub fn to_docx(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Typst colour expression
    pub fn to_typst(&self) -> String {
        format!("rgb(\"{}\")", self.to_css())
    }

    /// Whether this is pure white (no page fill needed)
    pub fn is_white(&self) -> bool {
        *self == Self::WHITE
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Color {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).map_err(serde::de::Error::custom)
    }
}
