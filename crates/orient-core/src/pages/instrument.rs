//! The compass + digital level screen.
//!
//! Layout (320×240 landscape):
//! - Left: compass card with the dial and the heading readout.
//! - Right: "Digital Level" column with one labeled bar per tilt axis.
//!
//! The page is a pure function of the latest [`Orientation`]: it keeps
//! no state machine, only the dirty-tracked components it re-renders
//! when a new snapshot arrives.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::Alignment;
use embedded_layout::prelude::*;

use crate::fusion::Orientation;
use crate::pages::page::Page;
use crate::ui::core::{Drawable, PageEvent};
use crate::ui::theme;
use crate::ui::{CompassDial, LevelBar, TextComponent, TextSize, format_degrees};

const CARD_CORNER_RADIUS_PX: u32 = 12;

/// Compass card on the left of the screen.
const COMPASS_CARD: Rectangle = Rectangle::new(Point::new(8, 8), Size::new(204, 224));

/// Dial diameter inside the compass card.
const DIAL_DIAMETER_PX: u32 = 160;

const COMPASS_TITLE_AREA: Rectangle = Rectangle::new(Point::new(8, 14), Size::new(204, 10));
const HEADING_READOUT_AREA: Rectangle = Rectangle::new(Point::new(8, 202), Size::new(204, 22));

/// Right-hand level column.
const LEVEL_TITLE_AREA: Rectangle = Rectangle::new(Point::new(220, 44), Size::new(92, 10));
const ROLL_LABEL_AREA: Rectangle = Rectangle::new(Point::new(220, 80), Size::new(92, 12));
const ROLL_BAR_AREA: Rectangle = Rectangle::new(Point::new(220, 98), Size::new(92, 12));
const PITCH_LABEL_AREA: Rectangle = Rectangle::new(Point::new(220, 136), Size::new(92, 12));
const PITCH_BAR_AREA: Rectangle = Rectangle::new(Point::new(220, 154), Size::new(92, 12));

pub struct InstrumentPage {
    bounds: Rectangle,
    dial: CompassDial,
    heading_readout: TextComponent,
    roll_label: TextComponent,
    roll_bar: LevelBar,
    pitch_label: TextComponent,
    pitch_bar: LevelBar,
    dirty: bool,
}

impl InstrumentPage {
    pub fn new(bounds: Rectangle) -> Self {
        let dial_area = Rectangle::new(
            Point::zero(),
            Size::new(DIAL_DIAMETER_PX, DIAL_DIAMETER_PX),
        )
        .align_to(&COMPASS_CARD, horizontal::Center, vertical::Center);

        Self {
            bounds,
            dial: CompassDial::new(dial_area),
            heading_readout: TextComponent::new(HEADING_READOUT_AREA, "--°", TextSize::Large)
                .with_alignment(Alignment::Center),
            roll_label: TextComponent::new(ROLL_LABEL_AREA, "Roll: 0°", TextSize::Medium)
                .with_alignment(Alignment::Center),
            roll_bar: LevelBar::new(ROLL_BAR_AREA, theme::ROLL_BAR),
            pitch_label: TextComponent::new(PITCH_LABEL_AREA, "Pitch: 0°", TextSize::Medium)
                .with_alignment(Alignment::Center),
            pitch_bar: LevelBar::new(PITCH_BAR_AREA, theme::PITCH_BAR),
            dirty: true,
        }
    }

    fn apply(&mut self, orientation: &Orientation) {
        self.dial.set_heading(orientation.heading_deg);
        match orientation.heading_deg {
            Some(heading) => self.heading_readout.set_text(&format_degrees(heading)),
            None => self.heading_readout.set_text("--°"),
        }

        let mut roll_text: heapless::String<32> = heapless::String::new();
        roll_text.push_str("Roll: ").ok();
        roll_text.push_str(&format_degrees(orientation.roll_deg)).ok();
        self.roll_label.set_text(&roll_text);
        self.roll_bar.set_value(orientation.roll_deg);

        let mut pitch_text: heapless::String<32> = heapless::String::new();
        pitch_text.push_str("Pitch: ").ok();
        pitch_text
            .push_str(&format_degrees(orientation.pitch_deg))
            .ok();
        self.pitch_label.set_text(&pitch_text);
        self.pitch_bar.set_value(orientation.pitch_deg);
    }
}

impl Page for InstrumentPage {
    fn title(&self) -> &str {
        "Compass & Level"
    }

    fn on_activate(&mut self) {
        self.mark_dirty();
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        let PageEvent::OrientationUpdate(orientation) = event;
        self.apply(orientation);
        self.is_dirty()
    }

    fn update(&mut self) {}

    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        // Full-screen background, then the compass card surface.
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(theme::BACKGROUND))
            .draw(display)?;
        RoundedRectangle::with_equal_corners(
            COMPASS_CARD,
            Size::new(CARD_CORNER_RADIUS_PX, CARD_CORNER_RADIUS_PX),
        )
        .into_styled(PrimitiveStyle::with_fill(theme::CARD))
        .draw(display)?;

        TextComponent::new(COMPASS_TITLE_AREA, "Compass", TextSize::Small)
            .with_alignment(Alignment::Center)
            .with_color(theme::GOLD)
            .draw(display)?;
        TextComponent::new(LEVEL_TITLE_AREA, "Digital Level", TextSize::Small)
            .with_alignment(Alignment::Center)
            .with_color(theme::CYAN)
            .draw(display)?;

        self.dial.draw(display)?;
        self.heading_readout.draw(display)?;
        self.roll_label.draw(display)?;
        self.roll_bar.draw(display)?;
        self.pitch_label.draw(display)?;
        self.pitch_bar.draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.dial.is_dirty()
            || self.heading_readout.is_dirty()
            || self.roll_label.is_dirty()
            || self.roll_bar.is_dirty()
            || self.pitch_label.is_dirty()
            || self.pitch_bar.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.dial.mark_clean();
        self.heading_readout.mark_clean();
        self.roll_label.mark_clean();
        self.roll_bar.mark_clean();
        self.pitch_label.mark_clean();
        self.pitch_bar.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

    fn page() -> InstrumentPage {
        InstrumentPage::new(Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
        ))
    }

    #[test]
    fn orientation_update_refreshes_readouts() {
        let mut page = page();
        page.mark_clean();

        let consumed = page.on_event(&PageEvent::OrientationUpdate(Orientation {
            heading_deg: Some(44.6),
            roll_deg: 12.2,
            pitch_deg: -3.7,
        }));

        assert!(consumed);
        assert_eq!(page.heading_readout.text(), "45°");
        assert_eq!(page.roll_label.text(), "Roll: 12°");
        assert_eq!(page.pitch_label.text(), "Pitch: -4°");
    }

    #[test]
    fn unset_heading_shows_placeholder() {
        let mut page = page();
        page.on_event(&PageEvent::OrientationUpdate(Orientation::default()));
        assert_eq!(page.heading_readout.text(), "--°");
    }

    #[test]
    fn identical_snapshot_needs_no_redraw() {
        let mut page = page();
        let orientation = Orientation {
            heading_deg: Some(10.0),
            roll_deg: 0.0,
            pitch_deg: 0.0,
        };

        assert!(page.on_event(&PageEvent::OrientationUpdate(orientation)));
        page.mark_clean();
        assert!(!page.on_event(&PageEvent::OrientationUpdate(orientation)));
    }
}
