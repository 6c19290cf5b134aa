//! Sensor fusion for the compass heading and the digital level.
//!
//! Two independent pipelines share one tracker:
//!
//! - **Heading**: the last accelerometer and magnetometer vectors are
//!   combined into a rotation matrix ([`rotation`]) and the azimuth is
//!   extracted and normalized into [0, 360) degrees.
//! - **Attitude**: gyroscope angular rates are integrated over the
//!   elapsed time between samples into cumulative roll and pitch.
//!
//! The attitude pipeline is pure open-loop integration. It is never
//! fused with the accelerometer-derived tilt, so the indicated roll and
//! pitch drift without bound over long runs. That is the documented
//! behavior of this instrument, not an oversight.

pub mod rotation;

use log::debug;
use nalgebra as na;

use crate::sensors::SensorSample;

/// Derived outputs of the fusion unit, the explicit state object handed
/// from fusion to rendering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Compass heading in degrees, [0, 360), 0 = magnetic north,
    /// increasing clockwise. `None` until both the gravity and the
    /// geomagnetic vector have been observed at least once.
    pub heading_deg: Option<f32>,
    /// Cumulative roll in degrees (open-loop gyro integration).
    pub roll_deg: f32,
    /// Cumulative pitch in degrees (open-loop gyro integration).
    pub pitch_deg: f32,
}

/// Fuses the three sensor streams into an [`Orientation`].
///
/// Hosts deliver samples through [`handle`](Self::handle) (or call the
/// per-sensor handlers directly); all derivation happens synchronously
/// inside the call, so the snapshot returned by
/// [`orientation`](Self::orientation) is always current.
#[derive(Debug, Default)]
pub struct OrientationTracker {
    gravity: Option<na::Vector3<f32>>,
    geomagnetic: Option<na::Vector3<f32>>,
    roll_rad: f32,
    pitch_rad: f32,
    last_gyro_ns: Option<i64>,
    heading_deg: Option<f32>,
}

impl OrientationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch a tagged sample to the handler for its sensor kind.
    pub fn handle(&mut self, sample: &SensorSample) {
        use crate::sensors::SensorKind::*;
        match sample.kind {
            Accelerometer => self.on_accelerometer(sample.values),
            Magnetometer => self.on_magnetometer(sample.values),
            Gyroscope => self.on_gyroscope(sample.values, sample.timestamp_ns),
        }
    }

    /// Store the latest gravity vector and refresh the heading.
    pub fn on_accelerometer(&mut self, values: na::Vector3<f32>) {
        self.gravity = Some(values);
        self.recompute_heading();
    }

    /// Store the latest geomagnetic vector and refresh the heading.
    pub fn on_magnetometer(&mut self, values: na::Vector3<f32>) {
        self.geomagnetic = Some(values);
        self.recompute_heading();
    }

    /// Integrate angular rates (rad/s) over the time since the previous
    /// gyroscope sample. The first sample only seeds the clock and
    /// contributes no delta.
    pub fn on_gyroscope(&mut self, rates: na::Vector3<f32>, timestamp_ns: i64) {
        if let Some(prev_ns) = self.last_gyro_ns {
            let dt = (timestamp_ns - prev_ns) as f32 / 1e9;
            self.roll_rad += rates.x * dt;
            self.pitch_rad += rates.y * dt;
        }
        self.last_gyro_ns = Some(timestamp_ns);
    }

    /// Snapshot of the derived outputs.
    pub fn orientation(&self) -> Orientation {
        Orientation {
            heading_deg: self.heading_deg,
            roll_deg: self.roll_rad.to_degrees(),
            pitch_deg: self.pitch_rad.to_degrees(),
        }
    }

    fn recompute_heading(&mut self) {
        let (Some(gravity), Some(geomagnetic)) = (self.gravity, self.geomagnetic) else {
            return;
        };

        match rotation::rotation_matrix(&gravity, &geomagnetic) {
            Ok(r) => {
                let mut azimuth_deg = rotation::orientation_angles(&r).azimuth_rad.to_degrees();
                if azimuth_deg < 0.0 {
                    azimuth_deg += 360.0;
                }
                self.heading_deg = Some(azimuth_deg);
            }
            // Degenerate sample pair: keep the previous heading.
            Err(err) => debug!("heading update skipped: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STANDARD_GRAVITY;

    fn flat_gravity() -> na::Vector3<f32> {
        na::Vector3::new(0.0, 0.0, STANDARD_GRAVITY)
    }

    #[test]
    fn heading_stays_unset_until_both_vectors_seen() {
        let mut tracker = OrientationTracker::new();
        assert_eq!(tracker.orientation().heading_deg, None);

        tracker.on_accelerometer(flat_gravity());
        assert_eq!(tracker.orientation().heading_deg, None);

        tracker.on_magnetometer(na::Vector3::new(0.0, 22.0, -40.0));
        let heading = tracker.orientation().heading_deg.unwrap();
        assert!(heading.abs() < 1e-3);
    }

    #[test]
    fn negative_azimuth_normalizes_into_range() {
        let mut tracker = OrientationTracker::new();
        tracker.on_accelerometer(flat_gravity());
        // West-facing device: azimuth comes out as -90° and must be
        // folded to 270°.
        tracker.on_magnetometer(na::Vector3::new(22.0, 0.0, -40.0));

        let heading = tracker.orientation().heading_deg.unwrap();
        assert!((heading - 270.0).abs() < 1e-3);
        assert!((0.0..360.0).contains(&heading));
    }

    #[test]
    fn degenerate_pair_retains_previous_heading() {
        let mut tracker = OrientationTracker::new();
        tracker.on_accelerometer(flat_gravity());
        tracker.on_magnetometer(na::Vector3::new(0.0, 22.0, -40.0));
        let before = tracker.orientation().heading_deg;
        assert!(before.is_some());

        // Field collapses onto the gravity axis: no bearing available.
        tracker.on_magnetometer(na::Vector3::new(0.0, 0.0, 50.0));
        assert_eq!(tracker.orientation().heading_deg, before);
    }

    #[test]
    fn first_gyro_sample_seeds_clock_without_delta() {
        let mut tracker = OrientationTracker::new();
        tracker.on_gyroscope(na::Vector3::new(10f32.to_radians(), 0.0, 0.0), 0);

        let orientation = tracker.orientation();
        assert_eq!(orientation.roll_deg, 0.0);
        assert_eq!(orientation.pitch_deg, 0.0);
    }

    #[test]
    fn gyro_integrates_rate_over_elapsed_time() {
        let mut tracker = OrientationTracker::new();
        let rates = na::Vector3::new(10f32.to_radians(), 0.0, 0.0);

        tracker.on_gyroscope(rates, 0);
        tracker.on_gyroscope(rates, 1_000_000_000);

        let orientation = tracker.orientation();
        assert!((orientation.roll_deg - 10.0).abs() < 1e-3);
        assert!(orientation.pitch_deg.abs() < 1e-6);
    }

    #[test]
    fn pitch_integrates_second_axis() {
        let mut tracker = OrientationTracker::new();
        let rates = na::Vector3::new(0.0, 5f32.to_radians(), 0.0);

        tracker.on_gyroscope(rates, 0);
        tracker.on_gyroscope(rates, 2_000_000_000);

        assert!((tracker.orientation().pitch_deg - 10.0).abs() < 1e-3);
    }

    #[test]
    fn tagged_samples_dispatch_to_their_handlers() {
        use crate::sensors::{SensorKind, SensorSample};

        let mut tracker = OrientationTracker::new();
        tracker.handle(&SensorSample::new(
            SensorKind::Accelerometer,
            flat_gravity(),
            0,
        ));
        tracker.handle(&SensorSample::new(
            SensorKind::Magnetometer,
            na::Vector3::new(0.0, 22.0, -40.0),
            0,
        ));
        tracker.handle(&SensorSample::new(
            SensorKind::Gyroscope,
            na::Vector3::new(10f32.to_radians(), 0.0, 0.0),
            0,
        ));
        tracker.handle(&SensorSample::new(
            SensorKind::Gyroscope,
            na::Vector3::new(10f32.to_radians(), 0.0, 0.0),
            500_000_000,
        ));

        let orientation = tracker.orientation();
        assert!(orientation.heading_deg.is_some());
        assert!((orientation.roll_deg - 5.0).abs() < 1e-3);
    }
}
