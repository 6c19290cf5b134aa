//! Compass dial component.
//!
//! Draws the dial rings and a two-color needle. The needle is rotated
//! opposite to the heading so its red half keeps pointing at magnetic
//! north however the device is turned.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};

use crate::ui::core::Drawable;
use crate::ui::theme;

/// Inner ring diameter relative to the outer ring.
const INNER_RING_RATIO: f32 = 0.85;

/// Hub dot diameter relative to the outer ring.
const HUB_RATIO: f32 = 0.08;

/// Needle length relative to the inner ring radius.
const NEEDLE_RATIO: f32 = 0.9;

const OUTER_RING_STROKE_PX: u32 = 4;
const INNER_RING_STROKE_PX: u32 = 2;
const NEEDLE_STROKE_PX: u32 = 5;

pub struct CompassDial {
    bounds: Rectangle,
    heading_deg: Option<f32>,
    dirty: bool,
}

impl CompassDial {
    /// `bounds` must be square; the dial fills it.
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            heading_deg: None,
            dirty: true,
        }
    }

    /// Update the displayed heading. While the heading is still unset
    /// the needle rests at north.
    pub fn set_heading(&mut self, heading_deg: Option<f32>) {
        if self.heading_deg != heading_deg {
            self.heading_deg = heading_deg;
            self.dirty = true;
        }
    }

    pub fn heading(&self) -> Option<f32> {
        self.heading_deg
    }

    /// Needle tip offsets from the dial center, north tip first. The
    /// dial turns by the negated heading, which on screen coordinates
    /// (y growing downward) puts the north tip at
    /// `(-sin(h)·len, -cos(h)·len)`.
    fn needle_offsets(&self, length: f32) -> (Point, Point) {
        let heading_rad = self.heading_deg.unwrap_or(0.0).to_radians();
        let dx = -libm::sinf(heading_rad) * length;
        let dy = -libm::cosf(heading_rad) * length;
        let north = Point::new(dx as i32, dy as i32);
        (north, -north)
    }
}

impl Drawable for CompassDial {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let center = self.bounds.center();
        let outer_diameter = self.bounds.size.width.min(self.bounds.size.height);

        Circle::with_center(center, outer_diameter)
            .into_styled(PrimitiveStyle::with_stroke(
                theme::GOLD,
                OUTER_RING_STROKE_PX,
            ))
            .draw(display)?;

        let inner_diameter = (outer_diameter as f32 * INNER_RING_RATIO) as u32;
        Circle::with_center(center, inner_diameter)
            .into_styled(PrimitiveStyle::with_stroke(
                theme::CYAN,
                INNER_RING_STROKE_PX,
            ))
            .draw(display)?;

        let needle_length = inner_diameter as f32 / 2.0 * NEEDLE_RATIO;
        let (north, south) = self.needle_offsets(needle_length);
        Line::new(center, center + north)
            .into_styled(PrimitiveStyle::with_stroke(
                theme::NEEDLE_NORTH,
                NEEDLE_STROKE_PX,
            ))
            .draw(display)?;
        Line::new(center, center + south)
            .into_styled(PrimitiveStyle::with_stroke(
                theme::NEEDLE_SOUTH,
                NEEDLE_STROKE_PX,
            ))
            .draw(display)?;

        // Hub dot last so it caps the needle joint.
        let hub_diameter = (outer_diameter as f32 * HUB_RATIO) as u32;
        Circle::with_center(center, hub_diameter)
            .into_styled(PrimitiveStyle::with_fill(theme::CYAN))
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

    fn dial() -> CompassDial {
        CompassDial::new(Rectangle::new(Point::zero(), Size::new(200, 200)))
    }

    #[test]
    fn unset_heading_rests_at_north() {
        let d = dial();
        let (north, _) = d.needle_offsets(100.0);
        assert_eq!(north, Point::new(0, -100));
    }

    #[test]
    fn needle_turns_opposite_to_heading() {
        let mut d = dial();

        // Heading east: north is to the device's left.
        d.set_heading(Some(90.0));
        let (north, south) = d.needle_offsets(100.0);
        assert_eq!(north, Point::new(-100, 0));
        assert_eq!(south, Point::new(100, 0));

        d.set_heading(Some(180.0));
        let (north, _) = d.needle_offsets(100.0);
        assert_eq!(north.x, 0);
        assert_eq!(north.y, 100);
    }

    #[test]
    fn set_heading_tracks_dirtiness() {
        let mut d = dial();
        d.mark_clean();

        d.set_heading(None);
        assert!(!d.is_dirty());

        d.set_heading(Some(12.0));
        assert!(d.is_dirty());
    }
}
