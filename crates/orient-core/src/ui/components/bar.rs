//! Horizontal level bar component.
//!
//! One bar per tilt axis. The fill grows left to right: fully empty at
//! -90°, half at 0°, full at +90°.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};

use crate::ui::core::Drawable;
use crate::ui::theme;

/// Fill fraction for a tilt angle in degrees. Values outside [-90, 90]
/// clamp before the fraction is computed.
pub fn fill_fraction(value_deg: f32) -> f32 {
    let clamped = value_deg.clamp(-90.0, 90.0);
    (clamped + 90.0) / 180.0
}

pub struct LevelBar {
    bounds: Rectangle,
    value_deg: f32,
    fill_color: Rgb565,
    dirty: bool,
}

impl LevelBar {
    pub fn new(bounds: Rectangle, fill_color: Rgb565) -> Self {
        Self {
            bounds,
            value_deg: 0.0,
            fill_color,
            dirty: true,
        }
    }

    pub fn set_value(&mut self, value_deg: f32) {
        if self.value_deg != value_deg {
            self.value_deg = value_deg;
            self.dirty = true;
        }
    }

    pub fn value(&self) -> f32 {
        self.value_deg
    }

    fn corner_radius(&self) -> Size {
        let radius = self.bounds.size.height / 2;
        Size::new(radius, radius)
    }
}

impl Drawable for LevelBar {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        RoundedRectangle::with_equal_corners(self.bounds, self.corner_radius())
            .into_styled(PrimitiveStyle::with_fill(theme::TRACK))
            .draw(display)?;

        let fill_width = (fill_fraction(self.value_deg) * self.bounds.size.width as f32) as u32;
        if fill_width > 0 {
            let fill = Rectangle::new(
                self.bounds.top_left,
                Size::new(fill_width, self.bounds.size.height),
            );
            RoundedRectangle::with_equal_corners(fill, self.corner_radius())
                .into_styled(PrimitiveStyle::with_fill(self.fill_color))
                .draw(display)?;
        }

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
    fn fill_fraction_maps_tilt_range_linearly() {
        assert_eq!(fill_fraction(-90.0), 0.0);
        assert_eq!(fill_fraction(0.0), 0.5);
        assert_eq!(fill_fraction(90.0), 1.0);
        assert!((fill_fraction(45.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn values_outside_range_clamp_before_fraction() {
        assert_eq!(fill_fraction(-180.0), 0.0);
        assert_eq!(fill_fraction(720.0), 1.0);
    }

    #[test]
    fn set_value_tracks_dirtiness() {
        let mut bar = LevelBar::new(
            Rectangle::new(Point::zero(), Size::new(100, 12)),
            theme::ROLL_BAR,
        );
        bar.mark_clean();

        bar.set_value(0.0);
        assert!(!bar.is_dirty());

        bar.set_value(10.0);
        assert!(bar.is_dirty());
        assert_eq!(bar.value(), 10.0);
    }
}
