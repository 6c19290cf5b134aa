//! Sensor stream types and lifecycle-scoped registration.
//!
//! This crate does not own any sensor hardware. The host (an embedded
//! board support crate or the desktop simulator) produces calibrated
//! 3-axis samples at platform-chosen rates and pushes them through a
//! [`SensorHub`], which models the subscribe-while-visible lifecycle:
//! samples are only routed to the fusion unit while their sensor kind is
//! subscribed, and a sensor the host does not have is silently skipped
//! at subscription time.

use log::info;
use nalgebra as na;

use crate::config::{GAME_RATE_INTERVAL_US, UI_RATE_INTERVAL_US};
use crate::fusion::OrientationTracker;

/// The three sensor streams the instrument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Accelerometer,
    Magnetometer,
    Gyroscope,
}

impl SensorKind {
    pub const COUNT: usize = 3;

    /// Delivery interval the host should use for this stream, in
    /// microseconds. Orientation inputs arrive at UI rate, the
    /// gyroscope at game rate.
    pub const fn delivery_interval_us(self) -> u64 {
        match self {
            SensorKind::Accelerometer | SensorKind::Magnetometer => UI_RATE_INTERVAL_US,
            SensorKind::Gyroscope => GAME_RATE_INTERVAL_US,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SensorKind::Accelerometer => "accelerometer",
            SensorKind::Magnetometer => "magnetometer",
            SensorKind::Gyroscope => "gyroscope",
        }
    }

    const fn index(self) -> usize {
        match self {
            SensorKind::Accelerometer => 0,
            SensorKind::Magnetometer => 1,
            SensorKind::Gyroscope => 2,
        }
    }

    const ALL: [SensorKind; Self::COUNT] = [
        SensorKind::Accelerometer,
        SensorKind::Magnetometer,
        SensorKind::Gyroscope,
    ];
}

/// One timestamped 3-axis sample, tagged with its stream.
///
/// Accelerometer and magnetometer values are device-frame vectors in
/// m/s² and µT respectively; gyroscope values are angular rates in
/// rad/s. Timestamps are host-monotonic nanoseconds and are only
/// meaningful within a stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub kind: SensorKind,
    pub values: na::Vector3<f32>,
    pub timestamp_ns: i64,
}

impl SensorSample {
    pub fn new(kind: SensorKind, values: na::Vector3<f32>, timestamp_ns: i64) -> Self {
        Self {
            kind,
            values,
            timestamp_ns,
        }
    }
}

/// Which sensors the host actually has. Missing hardware is expected,
/// not an error: the dependent derived values simply never update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorAvailability {
    pub accelerometer: bool,
    pub magnetometer: bool,
    pub gyroscope: bool,
}

impl SensorAvailability {
    /// All three sensors present.
    pub const fn all() -> Self {
        Self {
            accelerometer: true,
            magnetometer: true,
            gyroscope: true,
        }
    }

    pub const fn has(&self, kind: SensorKind) -> bool {
        match kind {
            SensorKind::Accelerometer => self.accelerometer,
            SensorKind::Magnetometer => self.magnetometer,
            SensorKind::Gyroscope => self.gyroscope,
        }
    }
}

/// Registration state for the three streams, scoped to the screen's
/// visible lifetime: subscribe on becoming visible, unsubscribe on
/// becoming hidden so no events are processed (and no battery burned)
/// while nothing is displayed.
#[derive(Debug)]
pub struct SensorHub {
    available: SensorAvailability,
    subscribed: [bool; SensorKind::COUNT],
}

impl SensorHub {
    pub fn new(available: SensorAvailability) -> Self {
        Self {
            available,
            subscribed: [false; SensorKind::COUNT],
        }
    }

    /// Subscribe every available stream. Kinds the host lacks are
    /// skipped without error.
    pub fn subscribe_all(&mut self) {
        for kind in SensorKind::ALL {
            if self.available.has(kind) {
                self.subscribed[kind.index()] = true;
            } else {
                info!("{} not present, skipping registration", kind.name());
            }
        }
    }

    /// Drop every subscription (screen hidden).
    pub fn unsubscribe_all(&mut self) {
        self.subscribed = [false; SensorKind::COUNT];
    }

    pub fn is_subscribed(&self, kind: SensorKind) -> bool {
        self.subscribed[kind.index()]
    }

    /// Route a sample to the tracker if its stream is subscribed.
    /// Returns whether the sample was consumed.
    pub fn deliver(&self, sample: &SensorSample, tracker: &mut OrientationTracker) -> bool {
        if !self.is_subscribed(sample.kind) {
            return false;
        }
        tracker.handle(sample);
        true
    }
}
