use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Serialize, Serializer};
use thiserror::Error;
use utoipa::ToSchema;

use super::stream::SeededStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseColorError {
    #[error("expected six hex digits")]
    Length,

    #[error("invalid hex digit")]
    Digit(#[from] hex::FromHexError),
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts `#RRGGBB` or `RRGGBB`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(ParseColorError::Length);
        }

        let bytes = hex::decode(digits)?;

        Ok(Color::from_rgb(bytes[0], bytes[1], bytes[2]))
    }
}

pub const PALETTE: [Color; 7] = [
    Color::from_rgb(0xFF, 0xDA, 0xB9), // peach
    Color::from_rgb(0xE0, 0xBB, 0xE4), // light pinkish purple
    Color::from_rgb(0xC0, 0xC0, 0xC0), // silver
    Color::from_rgb(0x8B, 0x45, 0x13), // saddle brown
    Color::from_rgb(0x2F, 0x4F, 0x4F), // dark slate gray
    Color::from_rgb(0x00, 0x00, 0x00),
    Color::from_rgb(0xFF, 0xFF, 0xFF),
];

/// Picks a palette entry with a single draw.
pub fn pick_color(stream: &mut SeededStream) -> Color {
    let index = (stream.next_fraction() * PALETTE.len() as f64) as usize;

    PALETTE[index]
}

/// Colours chosen for one avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AvatarColors {
    #[schema(value_type = String, example = "#2F4F4F")]
    pub body: Color,
    #[schema(value_type = String, example = "#FFDAB9")]
    pub eye: Color,
    #[schema(value_type = String, example = "#E0BBE4")]
    pub detail: Color,
}

impl AvatarColors {
    /// Draw order is body, eye, detail, then eye retries until it differs from body.
    pub fn draw(stream: &mut SeededStream) -> Self {
        let body = pick_color(stream);
        let mut eye = pick_color(stream);
        let detail = pick_color(stream);

        while eye == body {
            eye = pick_color(stream);
        }

        Self { body, eye, detail }
    }
}
