use crate::foundation::error::{BoxofficeError, BoxofficeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Opaque sRGB color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = BoxofficeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map_err(BoxofficeError::validation)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let trimmed = s.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !hex.is_ascii() {
        return Err(format!("invalid color \"{s}\""));
    }
    match hex.len() {
        6 => Ok(Color::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        3 => {
            let r = hex_byte(&hex[0..1].repeat(2))?;
            let g = hex_byte(&hex[1..2].repeat(2))?;
            let b = hex_byte(&hex[2..3].repeat(2))?;
            Ok(Color::rgb(r, g, b))
        }
        _ => Err(format!(
            "color must be #RRGGBB or #RGB (case-insensitive), got \"{s}\""
        )),
    }
}

/// Palette used for the movie categories.
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::rgb(0xf1, 0x94, 0x8a),
        Color::rgb(0xc3, 0x9b, 0xd3),
        Color::rgb(0x85, 0xc1, 0xe9),
        Color::rgb(0x76, 0xd7, 0xc4),
        Color::rgb(0x82, 0xe0, 0xaa),
        Color::rgb(0xf7, 0xdc, 0x6f),
        Color::rgb(0xf0, 0xb2, 0x7a),
        Color::rgb(0xd7, 0xdb, 0xdd),
    ]
}

/// Ordinal scale from category names to palette colors.
///
/// Categories take palette entries in first-appearance order and wrap around when the domain
/// outgrows the palette. [`OrdinalScale::resolve`] appends unknown categories to the domain.
#[derive(Clone, Debug)]
pub struct OrdinalScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range: Vec<Color>,
}

impl OrdinalScale {
    pub fn new<I, S>(domain: I, range: Vec<Color>) -> BoxofficeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if range.is_empty() {
            return Err(BoxofficeError::validation(
                "color palette must contain at least one color",
            ));
        }
        let mut scale = Self {
            domain: Vec::new(),
            index: HashMap::new(),
            range,
        };
        for key in domain {
            scale.intern(key.into());
        }
        Ok(scale)
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> &[Color] {
        &self.range
    }

    /// Color of a category already in the domain.
    pub fn get(&self, key: &str) -> Option<Color> {
        self.index.get(key).map(|i| self.color_at(*i))
    }

    /// Color of `key`, adding it to the domain first if it is new.
    pub fn resolve(&mut self, key: &str) -> Color {
        let i = match self.index.get(key) {
            Some(i) => *i,
            None => self.intern(key.to_owned()),
        };
        self.color_at(i)
    }

    fn intern(&mut self, key: String) -> usize {
        if let Some(i) = self.index.get(&key) {
            return *i;
        }
        let i = self.domain.len();
        self.index.insert(key.clone(), i);
        self.domain.push(key);
        i
    }

    fn color_at(&self, i: usize) -> Color {
        self.range[i % self.range.len()]
    }
}
