//! Hardware-independent core library for orient-rs
//!
//! This crate contains all platform-agnostic logic for the orient compass
//! and digital level instrument: sensor fusion (heading from the
//! accelerometer + magnetometer pair, roll/pitch from gyroscope
//! integration), the observable orientation state read by the renderer,
//! and the UI components that draw the instrument screen.
//!
//! It is `no_std` so it compiles on both embedded targets and desktop
//! hosts (for the simulator and tests). Sensor hardware drivers and the
//! host's sensor delivery subsystem are explicitly not part of this
//! crate; hosts feed calibrated [`SensorSample`](sensors::SensorSample)s
//! into a [`SensorHub`](sensors::SensorHub) and read the derived
//! [`Orientation`](fusion::Orientation) back out.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod fusion;
pub mod pages;
pub mod sensors;
pub mod state;
pub mod ui;
