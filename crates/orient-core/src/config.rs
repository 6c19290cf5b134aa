//! Compile-time configuration for the instrument.
//!
//! There is no runtime configuration surface: no persisted settings, no
//! CLI. Everything a host needs to agree on with this crate lives here.

/// Display width in pixels (landscape panel).
pub const DISPLAY_WIDTH_PX: u32 = 320;

/// Display height in pixels.
pub const DISPLAY_HEIGHT_PX: u32 = 240;

/// Delivery interval for the accelerometer and magnetometer streams, in
/// microseconds. Matches the UI-rate the original instrument registers
/// its orientation sensors with.
pub const UI_RATE_INTERVAL_US: u64 = 66_667;

/// Delivery interval for the gyroscope stream, in microseconds
/// (game-rate).
pub const GAME_RATE_INTERVAL_US: u64 = 20_000;

/// Standard gravity in m/s², used by the free-fall guard and by hosts
/// synthesizing accelerometer data.
pub const STANDARD_GRAVITY: f32 = 9.81;
