use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a color from configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("unknown color name: {0}")]
    UnknownName(String),
    #[error("invalid hex color '{0}': expected #RGB, #RRGGBB or #RRGGBBAA")]
    InvalidHex(String),
}

/// RGBA color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.231, 0.188);
    pub const GREEN: Color = Color::rgb(0.204, 0.78, 0.349);
    pub const BLUE: Color = Color::rgb(0.0, 0.478, 1.0);
    pub const ORANGE: Color = Color::rgb(1.0, 0.584, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 0.8, 0.0);
    pub const PURPLE: Color = Color::rgb(0.686, 0.322, 0.871);
    pub const PINK: Color = Color::rgb(1.0, 0.176, 0.333);
    pub const GRAY: Color = Color::rgb(0.557, 0.557, 0.576);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with its alpha multiplied by `opacity`
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Parses `#RGB`, `#RRGGBB`, `#RRGGBBAA` or a named color
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let value = value.trim();
        match value.strip_prefix('#') {
            Some(hex) => parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(value.to_string())),
            None => named(value).ok_or_else(|| ColorError::UnknownName(value.to_string())),
        }
    }

    pub fn to_hex(self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a)
        )
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn named(name: &str) -> Option<Color> {
    let color = match name.to_lowercase().as_str() {
        "clear" | "transparent" => Color::CLEAR,
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "red" => Color::RED,
        "green" => Color::GREEN,
        "blue" => Color::BLUE,
        "orange" => Color::ORANGE,
        "yellow" => Color::YELLOW,
        "purple" => Color::PURPLE,
        "pink" => Color::PINK,
        "gray" | "grey" => Color::GRAY,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let byte = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| f32::from(v) / 255.0);

    match hex.len() {
        3 => {
            // #RGB expands each nibble: #F80 == #FF8800
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            parse_hex(&expanded)
        }
        6 => Some(Color::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
        8 => Some(Color::rgba(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => None,
    }
}
