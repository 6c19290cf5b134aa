//! Text component for displaying labels and degree readouts.

use core::fmt::Write as _;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Text as EgText};

use crate::ui::core::Drawable;
use crate::ui::theme;

/// Text size presets. The fonts are the ISO-8859-1 variants so the
/// degree sign in readouts has a glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &embedded_graphics::mono_font::iso_8859_1::FONT_5X8,
            TextSize::Medium => &embedded_graphics::mono_font::iso_8859_1::FONT_6X10,
            TextSize::Large => &embedded_graphics::mono_font::iso_8859_1::FONT_10X20,
        }
    }
}

/// Format a degree value for display: rounded to the nearest integer
/// with a trailing degree sign. The buffer fits any `i32` plus the
/// two-byte degree sign, since open-loop roll/pitch integration can
/// drift to arbitrarily large magnitudes.
pub fn format_degrees(value_deg: f32) -> heapless::String<16> {
    let mut out = heapless::String::new();
    let rounded = libm::roundf(value_deg) as i32;
    let _ = write!(out, "{rounded}°");
    out
}

/// Dirty-tracked text display.
pub struct TextComponent {
    bounds: Rectangle,
    text: heapless::String<32>,
    size: TextSize,
    alignment: Alignment,
    color: Rgb565,
    dirty: bool,
}

impl TextComponent {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        let mut text_string = heapless::String::new();
        text_string.push_str(text).ok();

        Self {
            bounds,
            text: text_string,
            size,
            alignment: Alignment::Left,
            color: theme::TEXT,
            dirty: true,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_color(mut self, color: Rgb565) -> Self {
        self.color = color;
        self
    }

    /// Update the displayed text, marking the component dirty only when
    /// the content actually changed.
    pub fn set_text(&mut self, text: &str) {
        if self.text.as_str() != text {
            self.text.clear();
            self.text.push_str(text).ok();
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn text_position(&self) -> Point {
        // Text draws from the baseline, so sit it one glyph height below
        // the top of the bounds.
        let baseline_y =
            self.bounds.top_left.y + self.size.font().character_size.height as i32;
        match self.alignment {
            Alignment::Left => Point::new(self.bounds.top_left.x, baseline_y),
            Alignment::Center => Point::new(self.bounds.center().x, baseline_y),
            Alignment::Right => Point::new(
                self.bounds.top_left.x + self.bounds.size.width as i32,
                baseline_y,
            ),
        }
    }
}

impl Drawable for TextComponent {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let style = MonoTextStyle::new(self.size.font(), self.color);
        EgText::with_alignment(&self.text, self.text_position(), style, self.alignment)
            .draw(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_round_to_nearest_integer() {
        assert_eq!(format_degrees(44.6).as_str(), "45°");
        assert_eq!(format_degrees(44.4).as_str(), "44°");
        assert_eq!(format_degrees(0.0).as_str(), "0°");
        assert_eq!(format_degrees(-12.5).as_str(), "-13°");
        assert_eq!(format_degrees(359.7).as_str(), "360°");
    }

    #[test]
    fn drifted_magnitudes_format_without_truncation() {
        // Open-loop integration can accumulate far past one turn; the
        // readout must keep every digit.
        assert_eq!(format_degrees(123_456.7).as_str(), "123457°");
        assert_eq!(format_degrees(-987_654.4).as_str(), "-987654°");
    }

    #[test]
    fn set_text_tracks_dirtiness() {
        let mut text = TextComponent::new(
            Rectangle::new(Point::zero(), Size::new(100, 20)),
            "Roll: 0°",
            TextSize::Medium,
        );
        text.mark_clean();

        text.set_text("Roll: 0°");
        assert!(!text.is_dirty());

        text.set_text("Roll: 1°");
        assert!(text.is_dirty());
        assert_eq!(text.text(), "Roll: 1°");
    }
}
