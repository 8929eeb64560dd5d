// render.rs - Software Rasterizer
//
// Draws the overlay and the dial into a 32-bit pixel buffer that the host
// pushes to its native window. Pixels are premultiplied ARGB, the layout
// layered windows expect. Text uses a small 5x7 bitmap font scaled to the
// requested font size.

use crate::app::OverlayView;
use crate::dial::{DurationDial, Point};
use crate::layout::{largest_font_size, WorkArea};
use crate::settings::Color;

/// Rows of a 5x7 glyph, bit 4 is the leftmost column
type Glyph = [u8; 7];

const GLYPH_COLUMNS: i32 = 5;
const GLYPH_ROWS: i32 = 7;
/// Horizontal advance per character, in font pixels
const CELL_WIDTH: i32 = 6;
/// Font pixels per unit of font size
const PIXELS_PER_FONT_UNIT: f64 = 0.1;

fn glyph(ch: char) -> Glyph {
    match ch.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        _ => [0; 7],
    }
}

/// Premultiplied ARGB value of `color`
pub fn premultiply(color: Color) -> u32 {
    let scale = |channel: u8| (channel as u32 * color.a as u32 + 127) / 255;
    (color.a as u32) << 24 | scale(color.r) << 16 | scale(color.g) << 8 | scale(color.b)
}

/// Bitmap font scale for a font size, never below one pixel
pub fn text_scale(font_size: f64) -> i32 {
    ((font_size * PIXELS_PER_FONT_UNIT).round() as i32).max(1)
}

/// `text_scale`, limited so one glyph is never taller than `height`
pub fn fitting_scale(font_size: f64, height: u32) -> i32 {
    text_scale(font_size).min((to_i32(height) / GLYPH_ROWS).max(1))
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// An owned pixel buffer, row-major, top-down
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Frame {
    /// A frame filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![premultiply(background); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= to_i32(self.width) || y >= to_i32(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn put(&mut self, x: i32, y: i32, value: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = value;
        }
    }

    /// Draw one line of text with its top-left cell corner at (x, y)
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: i32, color: Color) {
        let value = premultiply(color);
        let scale = scale.max(1);
        let advance = CELL_WIDTH.saturating_mul(scale);
        let mut cursor = x;
        for ch in text.chars() {
            if cursor >= to_i32(self.width) {
                break;
            }
            let rows = glyph(ch);
            for (row, &bits) in rows.iter().enumerate() {
                let top = y.saturating_add((row as i32).saturating_mul(scale));
                for col in 0..GLYPH_COLUMNS {
                    if (bits >> (GLYPH_COLUMNS - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    let left = cursor.saturating_add(col.saturating_mul(scale));
                    self.fill_cell(left, top, scale, value);
                }
            }
            cursor = cursor.saturating_add(advance);
        }
    }

    /// Fill the visible part of a `size` square whose corner is (left, top)
    fn fill_cell(&mut self, left: i32, top: i32, size: i32, value: u32) {
        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = left.saturating_add(size).min(to_i32(self.width));
        let y1 = top.saturating_add(size).min(to_i32(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = self.width as usize;
        for py in y0 as usize..y1 as usize {
            let row = py * stride;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(value);
        }
    }

    /// Pixel size of `text` as drawn by `draw_text`
    pub fn text_size(text: &str, scale: i32) -> (i32, i32) {
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        (
            chars.saturating_mul(CELL_WIDTH).saturating_mul(scale),
            GLYPH_ROWS.saturating_mul(scale),
        )
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.fill_where(center, radius, color, |distance, _| distance <= radius);
    }

    /// Ring of `thickness` centered on `radius`, limited to the first
    /// `sweep_degrees` clockwise from twelve o'clock
    pub fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        thickness: f64,
        sweep_degrees: f64,
        color: Color,
    ) {
        let half = thickness / 2.0;
        self.fill_where(center, radius + half, color, |distance, angle| {
            (distance - radius).abs() <= half && angle <= sweep_degrees
        });
    }

    fn fill_where(
        &mut self,
        center: Point,
        reach: f64,
        color: Color,
        inside: impl Fn(f64, f64) -> bool,
    ) {
        let value = premultiply(color);
        let left = (center.x - reach).floor() as i32;
        let right = (center.x + reach).ceil() as i32;
        let top = (center.y - reach).floor() as i32;
        let bottom = (center.y + reach).ceil() as i32;
        for py in top..=bottom {
            for px in left..=right {
                let sample = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                let dx = sample.x - center.x;
                let dy = sample.y - center.y;
                let distance = (dx * dx + dy * dy).sqrt();
                let angle = crate::dial::angle_degrees(center, sample);
                if inside(distance, angle) {
                    self.put(px, py, value);
                }
            }
        }
    }
}

/// One overlay frame covering `area`: tinted background and the countdown
pub fn overlay_frame(view: &OverlayView, area: &WorkArea) -> Frame {
    let mut frame = Frame::new(area.width, area.height, view.background);
    let font_size = view.font_size.min(largest_font_size(area));
    let scale = fitting_scale(font_size, area.height);
    let (_, glyph_height) = Frame::text_size(&view.text, scale);
    let line_height = (font_size * crate::constants::overlay::LINE_HEIGHT_RATIO) as i32;
    let padding = line_height.saturating_sub(glyph_height).max(0) / 2;

    // View origins are in screen space; the frame starts at the area corner
    let x = view.text_origin.0.saturating_sub(area.x);
    let y = view.text_origin.1.saturating_sub(area.y).saturating_add(padding);
    frame.draw_text(x, y, &view.text, scale, view.text_color);
    frame
}

/// Palette of the main window
pub mod palette {
    use crate::settings::Color;

    pub const BACKGROUND: Color = Color::from_argb(0xFF1E1E1E);
    pub const TRACK: Color = Color::from_argb(0xFF3C3C3C);
    pub const ACTIVE: Color = Color::from_argb(0xFF00A8FF);
    pub const KNOB: Color = Color::from_argb(0xFFFFFFFF);
    pub const LABEL: Color = Color::from_argb(0xFFE0E0E0);
}

const TRACK_THICKNESS: f64 = 12.0;
const KNOB_RADIUS: f64 = 10.0;
const LABEL_SCALE: i32 = 5;

/// The main window: dial track, active arc, knob and the minute count
pub fn dial_frame(dial: &DurationDial, width: u32, height: u32) -> Frame {
    let mut frame = Frame::new(width, height, palette::BACKGROUND);
    let center = dial.center();
    let radius = dial.radius();
    let visual = dial.visual();

    frame.stroke_arc(center, radius, TRACK_THICKNESS, 360.0, palette::TRACK);
    let sweep = if visual.full_circle { 360.0 } else { visual.knob_angle_degrees };
    if visual.visual_minutes > 0 {
        frame.stroke_arc(center, radius, TRACK_THICKNESS, sweep, palette::ACTIVE);
    }
    frame.fill_circle(dial.knob_point(), KNOB_RADIUS, palette::KNOB);

    let label = dial.minutes().to_string();
    let (label_width, label_height) = Frame::text_size(&label, LABEL_SCALE);
    frame.draw_text(
        center.x as i32 - label_width / 2,
        center.y as i32 - label_height / 2,
        &label,
        LABEL_SCALE,
        palette::LABEL,
    );
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Anchor;

    fn view(text: &str, origin: (i32, i32)) -> OverlayView {
        OverlayView {
            text: text.to_string(),
            background: Color::from_argb(0x40000000),
            text_color: Color::from_argb(0xFFFFFFFF),
            font_size: 10.0,
            anchor: Anchor::TopLeft,
            text_origin: origin,
        }
    }

    #[test]
    fn premultiply_scales_channels_by_alpha() {
        assert_eq!(premultiply(Color::from_argb(0xFFFF8000)), 0xFFFF8000);
        assert_eq!(premultiply(Color::from_argb(0x00FFFFFF)), 0);
        assert_eq!(premultiply(Color::from_argb(0x80FF0000)), 0x80800000);
    }

    #[test]
    fn text_scale_tracks_font_size() {
        assert_eq!(text_scale(100.0), 10);
        assert_eq!(text_scale(1.0), 1);
        assert_eq!(text_scale(64.0), 6);
    }

    #[test]
    fn fitting_scale_is_bounded_by_the_frame() {
        assert_eq!(fitting_scale(100.0, 1040), 10);
        assert_eq!(fitting_scale(20_000.0, 1040), 148);
        assert_eq!(fitting_scale(1e12, 1040), 148);
        assert_eq!(fitting_scale(100.0, 3), 1);
    }

    #[test]
    fn text_size_saturates() {
        assert_eq!(Frame::text_size("88:88", 10), (300, 70));
        assert_eq!(Frame::text_size("88:88", i32::MAX), (i32::MAX, i32::MAX));
    }

    #[test]
    fn huge_font_is_drawn_within_the_frame() {
        let area = WorkArea::new(0, 0, 200, 100);
        let huge = OverlayView {
            font_size: 1e12,
            ..view("88:88", (0, 0))
        };
        let frame = overlay_frame(&huge, &area);
        // Drawn at font 83: scale 8, padded 21px, the first "8" starts with a blank column
        assert_eq!(frame.pixel(20, 25), Some(0xFFFFFFFF));
        assert_eq!(frame.pixel(5, 25), Some(premultiply(Color::from_argb(0x40000000))));
    }

    #[test]
    fn overlay_frame_is_background_plus_text() {
        let area = WorkArea::new(100, 50, 200, 100);
        let frame = overlay_frame(&view("1", (110, 60)), &area);
        assert_eq!((frame.width(), frame.height()), (200, 100));

        let background = premultiply(Color::from_argb(0x40000000));
        assert_eq!(frame.pixel(0, 0), Some(background));
        assert_eq!(frame.pixel(199, 99), Some(background));

        // Top row of "1" has its single lit column at x = 2; line padding is 2px
        assert_eq!(frame.pixel(12, 12), Some(0xFFFFFFFF));
        assert_eq!(frame.pixel(10, 12), Some(background));
    }

    #[test]
    fn text_outside_the_frame_is_clipped() {
        let area = WorkArea::new(0, 0, 10, 10);
        let frame = overlay_frame(&view("88:88", (-40, -40)), &area);
        assert_eq!(frame.pixels().len(), 100);
    }

    #[test]
    fn dial_frame_draws_knob_at_twelve_for_an_hour() {
        let mut dial = DurationDial::default();
        dial.set_minutes(60);
        let frame = dial_frame(&dial, 250, 250);
        let knob = dial.knob_point();
        assert_eq!(
            frame.pixel(knob.x as i32, knob.y as i32),
            Some(premultiply(palette::KNOB))
        );
        assert_eq!(frame.pixel(0, 0), Some(premultiply(palette::BACKGROUND)));
    }
}
