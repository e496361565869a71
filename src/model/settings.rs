//! Typography and direction settings.

use super::Alignment;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_bidi::{bidi_class, BidiClass};

/// Smallest font size accepted by [`TypographySettings::validate`].
pub const MIN_FONT_SIZE: u32 = 8;

/// Largest font size accepted by [`TypographySettings::validate`].
pub const MAX_FONT_SIZE: u32 = 72;

/// Layout direction.
///
/// Controls paragraph alignment only; characters within a line are never
/// reordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right
    Ltr,
    /// Right-to-left (default)
    #[default]
    Rtl,
}

impl Direction {
    /// Alignment applied to every block laid out in this direction.
    pub fn alignment(&self) -> Alignment {
        match self {
            Direction::Rtl => Alignment::Right,
            Direction::Ltr => Alignment::Left,
        }
    }

    /// Guess the direction of a text from its first strong character.
    ///
    /// Falls back to [`Direction::Rtl`] when the text has no strongly
    /// directional character.
    pub fn detect(text: &str) -> Self {
        for c in text.chars() {
            match bidi_class(c) {
                BidiClass::L => return Direction::Ltr,
                BidiClass::R | BidiClass::AL => return Direction::Rtl,
                _ => {}
            }
        }
        Direction::default()
    }

    /// Lowercase name (`"rtl"` or `"ltr"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rtl" => Ok(Direction::Rtl),
            "ltr" => Ok(Direction::Ltr),
            other => Err(Error::Other(format!("Unknown direction: {}", other))),
        }
    }
}

/// Font sizes and direction for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographySettings {
    /// Font size of body paragraphs, in points
    pub main_font_size: u32,

    /// Font size of the highlighted header, in points
    pub bold_font_size: u32,

    /// Layout direction
    pub direction: Direction,
}

impl TypographySettings {
    /// Create settings with the defaults (12pt body, 14pt header, right-to-left).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body font size.
    pub fn with_main_font_size(mut self, size: u32) -> Self {
        self.main_font_size = size;
        self
    }

    /// Set the header font size.
    pub fn with_bold_font_size(mut self, size: u32) -> Self {
        self.bold_font_size = size;
        self
    }

    /// Set the direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Alignment derived from the direction.
    pub fn alignment(&self) -> Alignment {
        self.direction.alignment()
    }

    /// Check that both font sizes lie in the accepted range.
    pub fn validate(&self) -> Result<()> {
        check_font_size("main_font_size", self.main_font_size)?;
        check_font_size("bold_font_size", self.bold_font_size)?;
        Ok(())
    }
}

impl Default for TypographySettings {
    fn default() -> Self {
        Self {
            main_font_size: 12,
            bold_font_size: 14,
            direction: Direction::Rtl,
        }
    }
}

fn check_font_size(field: &'static str, value: u32) -> Result<()> {
    if (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidFontSize {
            field,
            value,
            min: MIN_FONT_SIZE,
            max: MAX_FONT_SIZE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = TypographySettings::default();
        assert_eq!(settings.main_font_size, 12);
        assert_eq!(settings.bold_font_size, 14);
        assert_eq!(settings.direction, Direction::Rtl);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_direction_alignment() {
        assert_eq!(Direction::Rtl.alignment(), Alignment::Right);
        assert_eq!(Direction::Ltr.alignment(), Alignment::Left);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(TypographySettings::new()
            .with_main_font_size(8)
            .with_bold_font_size(72)
            .validate()
            .is_ok());

        let err = TypographySettings::new()
            .with_main_font_size(7)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFontSize {
                field: "main_font_size",
                value: 7,
                ..
            }
        ));

        let err = TypographySettings::new()
            .with_bold_font_size(73)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFontSize {
                field: "bold_font_size",
                ..
            }
        ));
    }

    #[test]
    fn test_direction_detect() {
        assert_eq!(Direction::detect("שלום עולם"), Direction::Rtl);
        assert_eq!(Direction::detect("Hello"), Direction::Ltr);
        assert_eq!(Direction::detect("  123 Hello"), Direction::Ltr);
        assert_eq!(Direction::detect("**123** שלום"), Direction::Rtl);
        assert_eq!(Direction::detect(""), Direction::Rtl);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("rtl".parse::<Direction>().unwrap(), Direction::Rtl);
        assert_eq!(" LTR ".parse::<Direction>().unwrap(), Direction::Ltr);
        assert!("up".parse::<Direction>().is_err());
        assert_eq!(Direction::Ltr.to_string(), "ltr");
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: TypographySettings =
            serde_json::from_str(r#"{"main_font_size": 10, "direction": "ltr"}"#).unwrap();
        assert_eq!(settings.main_font_size, 10);
        assert_eq!(settings.bold_font_size, 14);
        assert_eq!(settings.direction, Direction::Ltr);
    }
}
