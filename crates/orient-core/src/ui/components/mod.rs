//! Drawable components composing the instrument screen.

pub mod bar;
pub mod dial;
pub mod text;
