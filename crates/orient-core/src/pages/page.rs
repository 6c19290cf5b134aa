//! Core page abstraction for the UI.
//!
//! [`Page`] defines the lifecycle, event, and rendering contract for a
//! screen. The host calls these methods in a well-defined order:
//!
//! 1. **`on_activate`** — when the screen becomes visible. The host
//!    subscribes the sensor streams around the same transition.
//! 2. **`on_event`** — zero or more times per frame for incoming events.
//! 3. **`update`** — once per frame to advance internal state.
//! 4. **`draw_page`** — when `is_dirty()` is true.
//! 5. **`on_deactivate`** — when the screen is hidden and the host has
//!    dropped its sensor subscriptions.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::core::PageEvent;

pub trait Page {
    /// Human-readable title (may appear in debug logs).
    fn title(&self) -> &str;

    /// Called when this page becomes visible.
    fn on_activate(&mut self) {}

    /// Called when this page is hidden.
    fn on_deactivate(&mut self) {}

    /// Handle an incoming [`PageEvent`].
    ///
    /// Returns `true` if the event was consumed and the page needs a
    /// redraw.
    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    /// Advance per-frame state.
    fn update(&mut self);

    /// Render the entire page to the given display target.
    fn draw_page<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error>;

    /// Bounding rectangle of this page (typically the full screen).
    fn bounds(&self) -> Rectangle;

    /// Whether the page has regions that need redrawing.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force the page to be redrawn on the next frame.
    fn mark_dirty(&mut self);
}
