//! Core UI traits and types for the orient UI system.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::fusion::Orientation;

/// Events delivered to the active page by the host loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// A fresh fusion snapshot was published.
    OrientationUpdate(Orientation),
}

/// Dirty region tracking for efficient rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirtyRegion {
    pub bounds: Rectangle,
}

impl DirtyRegion {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }
}

/// Trait for any UI element that can be drawn.
pub trait Drawable {
    /// Draw the element to the display.
    fn draw<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error>;

    /// Bounding rectangle of this element.
    fn bounds(&self) -> Rectangle;

    /// Whether this element needs to be redrawn.
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn).
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw).
    fn mark_dirty(&mut self);

    /// Dirty region for partial updates.
    fn dirty_region(&self) -> Option<DirtyRegion> {
        self.is_dirty().then(|| DirtyRegion::new(self.bounds()))
    }
}
