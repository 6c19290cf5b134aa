//! Color palette for the instrument screen.
//!
//! RGB888 source colors are noted next to each constant; values are
//! pre-quantized to `Rgb565` components so they stay `const`.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Screen background (#0F172A, deep navy).
pub const BACKGROUND: Rgb565 = Rgb565::new(0x0F >> 3, 0x17 >> 2, 0x2A >> 3);

/// Card surfaces (#1E293B).
pub const CARD: Rgb565 = Rgb565::new(0x1E >> 3, 0x29 >> 2, 0x3B >> 3);

/// Bar track wells (#0B1220).
pub const TRACK: Rgb565 = Rgb565::new(0x0B >> 3, 0x12 >> 2, 0x20 >> 3);

/// Compass accents and the "Compass" title (#FFD166, gold).
pub const GOLD: Rgb565 = Rgb565::new(0xFF >> 3, 0xD1 >> 2, 0x66 >> 3);

/// Dial details and the "Digital Level" title (#4BE1EC, cyan).
pub const CYAN: Rgb565 = Rgb565::new(0x4B >> 3, 0xE1 >> 2, 0xEC >> 3);

/// North half of the needle (#EF476F, red).
pub const NEEDLE_NORTH: Rgb565 = Rgb565::new(0xEF >> 3, 0x47 >> 2, 0x6F >> 3);

/// South half of the needle (#06D6A0, green).
pub const NEEDLE_SOUTH: Rgb565 = Rgb565::new(0x06 >> 3, 0xD6 >> 2, 0xA0 >> 3);

/// Roll bar fill (#FFA500, orange).
pub const ROLL_BAR: Rgb565 = Rgb565::new(0xFF >> 3, 0xA5 >> 2, 0x00 >> 3);

/// Pitch bar fill (#9B59B6, purple).
pub const PITCH_BAR: Rgb565 = Rgb565::new(0x9B >> 3, 0x59 >> 2, 0xB6 >> 3);

/// Readout and label text.
pub const TEXT: Rgb565 = Rgb565::WHITE;
