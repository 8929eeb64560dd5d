// settings.rs - Overlay Display Settings
//
// Four user-facing settings: background color, text color, font size and
// anchor position. Settings are an immutable value; applying a form builds a
// new value and the old one is replaced wholesale.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::overlay::{DEFAULT_BACKGROUND, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR};
use crate::error::FocusError;
use crate::layout::Anchor;

/// 8-bit ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Named colors accepted besides hex notation
const NAMED_COLORS: &[(&str, u32)] = &[
    ("transparent", 0x00FFFFFF),
    ("black", 0xFF000000),
    ("white", 0xFFFFFFFF),
    ("red", 0xFFFF0000),
    ("green", 0xFF008000),
    ("lime", 0xFF00FF00),
    ("blue", 0xFF0000FF),
    ("yellow", 0xFFFFFF00),
    ("orange", 0xFFFFA500),
    ("purple", 0xFF800080),
    ("gray", 0xFF808080),
    ("grey", 0xFF808080),
    ("cyan", 0xFF00FFFF),
    ("magenta", 0xFFFF00FF),
];

impl Color {
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

/// Parse `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB` or a named color
fn parse_color(s: &str) -> Option<Color> {
    let t = s.trim();
    let Some(hex) = t.strip_prefix('#') else {
        let lower = t.to_ascii_lowercase();
        return NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, argb)| Color::from_argb(*argb));
    };

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    // Short forms repeat each nibble
    let nibble = |shift: u32| ((value >> shift) & 0xF) * 0x11;

    let argb = match hex.len() {
        3 => 0xFF00_0000 | nibble(8) << 16 | nibble(4) << 8 | nibble(0),
        4 => nibble(12) << 24 | nibble(8) << 16 | nibble(4) << 8 | nibble(0),
        6 => 0xFF00_0000 | value,
        8 => value,
        _ => return None,
    };
    Some(Color::from_argb(argb))
}

impl FromStr for Color {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or_else(|| FocusError::invalid_input(format!("unparseable color '{}'", s)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

/// Parse a strictly positive, finite font size
pub fn parse_font_size(s: &str) -> Result<f64, FocusError> {
    match s.trim().parse::<f64>() {
        Ok(size) if size.is_finite() && size > 0.0 => Ok(size),
        _ => Err(FocusError::invalid_input(format!(
            "font size must be a positive number, got '{}'",
            s
        ))),
    }
}

/// Display settings of the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySettings {
    pub background: Color,
    pub text_color: Color,
    pub font_size: f64,
    pub anchor: Anchor,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            background: parse_color(DEFAULT_BACKGROUND).unwrap_or(Color::from_argb(0x4000_0000)),
            text_color: parse_color(DEFAULT_TEXT_COLOR).unwrap_or(Color::from_argb(0xAFFF_FFFF)),
            font_size: DEFAULT_FONT_SIZE,
            anchor: Anchor::Center,
        }
    }
}

impl OverlaySettings {
    /// The form a settings view would show for these settings
    pub fn to_form(&self) -> SettingsForm {
        SettingsForm {
            background: self.background.to_string(),
            text_color: self.text_color.to_string(),
            font_size: self.font_size.to_string(),
            anchor: self.anchor.to_string(),
        }
    }
}

/// Raw strings as entered in the settings view, or read from the settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub background: String,
    pub text_color: String,
    pub font_size: String,
    pub anchor: String,
}

impl SettingsForm {
    /// Form holding the factory defaults (the settings view's reset button)
    pub fn defaults() -> Self {
        OverlaySettings::default().to_form()
    }
}

/// Result of applying a form: the new settings and every rejected field
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedSettings {
    pub settings: OverlaySettings,
    pub rejected: Vec<FocusError>,
}

/// Validates a settings form against the current settings
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsApplier;

impl SettingsApplier {
    /// Build new settings from `form`.
    ///
    /// Each field is validated on its own; an invalid color or font size keeps
    /// the current value. An unknown anchor falls back to center.
    pub fn apply(&self, current: &OverlaySettings, form: &SettingsForm) -> AppliedSettings {
        let mut next = *current;
        let mut rejected = Vec::new();

        match form.background.parse::<Color>() {
            Ok(color) => next.background = color,
            Err(e) => rejected.push(e),
        }
        match form.text_color.parse::<Color>() {
            Ok(color) => next.text_color = color,
            Err(e) => rejected.push(e),
        }
        match parse_font_size(&form.font_size) {
            Ok(size) => next.font_size = size,
            Err(e) => rejected.push(e),
        }
        next.anchor = match form.anchor.parse::<Anchor>() {
            Ok(anchor) => anchor,
            Err(e) => {
                rejected.push(e);
                Anchor::Center
            }
        };

        for e in &rejected {
            warn!("Settings field ignored: {}", e);
        }

        AppliedSettings {
            settings: next,
            rejected,
        }
    }
}
