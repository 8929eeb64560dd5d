// layout.rs - Overlay Geometry
//
// The overlay covers the primary monitor's work area. Inside it, the countdown
// text is placed at one of nine anchors, keeping a margin from the edges.

use std::fmt;
use std::str::FromStr;

use crate::constants::overlay::{ANCHOR_MARGIN, GLYPH_WIDTH_RATIO, LINE_HEIGHT_RATIO};
use crate::error::FocusError;

/// Represents a rectangular region on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkArea {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WorkArea {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Where the countdown text sits inside the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Alignment along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Start,
    Middle,
    End,
}

impl Align {
    fn offset(self, available: i32, content: i32, margin: i32) -> i32 {
        match self {
            Align::Start => margin,
            Align::Middle => available.saturating_sub(content) / 2,
            Align::End => available.saturating_sub(content).saturating_sub(margin),
        }
    }
}

impl Anchor {
    pub fn all() -> [Anchor; 9] {
        [
            Anchor::Center,
            Anchor::Top,
            Anchor::Bottom,
            Anchor::Left,
            Anchor::Right,
            Anchor::TopLeft,
            Anchor::TopRight,
            Anchor::BottomLeft,
            Anchor::BottomRight,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
        }
    }

    fn alignment(&self) -> (Align, Align) {
        match self {
            Anchor::Center => (Align::Middle, Align::Middle),
            Anchor::Top => (Align::Middle, Align::Start),
            Anchor::Bottom => (Align::Middle, Align::End),
            Anchor::Left => (Align::Start, Align::Middle),
            Anchor::Right => (Align::End, Align::Middle),
            Anchor::TopLeft => (Align::Start, Align::Start),
            Anchor::TopRight => (Align::End, Align::Start),
            Anchor::BottomLeft => (Align::Start, Align::End),
            Anchor::BottomRight => (Align::End, Align::End),
        }
    }

    /// Top-left screen position of content of the given size inside `area`
    pub fn place(&self, area: &WorkArea, content: (u32, u32), margin: i32) -> (i32, i32) {
        let (horizontal, vertical) = self.alignment();
        (
            area.x.saturating_add(horizontal.offset(to_i32(area.width), to_i32(content.0), margin)),
            area.y.saturating_add(vertical.offset(to_i32(area.height), to_i32(content.1), margin)),
        )
    }

    pub fn place_with_default_margin(&self, area: &WorkArea, content: (u32, u32)) -> (i32, i32) {
        self.place(area, content, ANCHOR_MARGIN)
    }
}

impl FromStr for Anchor {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Anchor::all()
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| FocusError::invalid_input(format!("unknown anchor position '{}'", s)))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Largest font size whose line still fits the height of `area`
pub fn largest_font_size(area: &WorkArea) -> f64 {
    (area.height as f64 / LINE_HEIGHT_RATIO).floor().max(1.0)
}

/// Rough pixel extents of single-line text at `font_size`
pub fn text_extent(text: &str, font_size: f64) -> (u32, u32) {
    let chars = text.chars().count() as f64;
    (
        (chars * font_size * GLYPH_WIDTH_RATIO).ceil() as u32,
        (font_size * LINE_HEIGHT_RATIO).ceil() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> WorkArea {
        WorkArea::new(0, 0, 1000, 800)
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("TOP-Right".parse::<Anchor>().unwrap(), Anchor::TopRight);
        assert_eq!(" center ".parse::<Anchor>().unwrap(), Anchor::Center);
        assert!("middle".parse::<Anchor>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for anchor in Anchor::all() {
            assert_eq!(anchor.to_string().parse::<Anchor>().unwrap(), anchor);
        }
    }

    #[test]
    fn center_is_centered() {
        assert_eq!(Anchor::Center.place(&area(), (200, 100), 50), (400, 350));
    }

    #[test]
    fn corners_keep_margin() {
        assert_eq!(Anchor::TopLeft.place(&area(), (200, 100), 50), (50, 50));
        assert_eq!(Anchor::BottomRight.place(&area(), (200, 100), 50), (750, 650));
    }

    #[test]
    fn edges_center_the_other_axis() {
        assert_eq!(Anchor::Top.place(&area(), (200, 100), 50), (400, 50));
        assert_eq!(Anchor::Left.place(&area(), (200, 100), 50), (50, 350));
    }

    #[test]
    fn placement_is_offset_by_work_area_origin() {
        let shifted = WorkArea::new(0, 40, 1000, 800);
        assert_eq!(Anchor::TopLeft.place(&shifted, (10, 10), 50), (50, 90));
    }

    #[test]
    fn text_extent_grows_with_font() {
        let small = text_extent("25:00", 10.0);
        let large = text_extent("25:00", 100.0);
        assert!(large.0 > small.0 && large.1 > small.1);
        assert_eq!(large.1, 120);
    }

    #[test]
    fn oversized_content_stays_in_range() {
        let huge = text_extent("25:00", 1e12);
        assert_eq!(huge, (u32::MAX, u32::MAX));
        let (x, y) = Anchor::BottomRight.place(&area(), huge, 50);
        assert!(x < 0 && y < 0);
        assert_eq!(Anchor::TopLeft.place(&area(), huge, 50), (50, 50));
    }

    #[test]
    fn largest_font_fills_the_area_height() {
        assert_eq!(largest_font_size(&area()), 666.0);
        assert_eq!(largest_font_size(&WorkArea::new(0, 0, 10, 0)), 1.0);
    }
}
