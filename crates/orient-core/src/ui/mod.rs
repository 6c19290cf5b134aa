//! UI system for the instrument screen.

pub mod components;
pub mod core;
pub mod theme;

pub use components::bar::{LevelBar, fill_fraction};
pub use components::dial::CompassDial;
pub use components::text::{TextComponent, TextSize, format_degrees};
pub use self::core::{DirtyRegion, Drawable, PageEvent};
