//! Desktop simulator for the orient-rs compass and digital level UI.
//!
//! Renders the instrument page in an SDL2 window via
//! `embedded-graphics-simulator` and drives the fusion unit with
//! synthetic accelerometer, magnetometer, and gyroscope streams, so the
//! screen can be exercised without hardware.
//!
//! # Key bindings
//!
//! | Key       | Action                          |
//! |-----------|---------------------------------|
//! | Space / H | Toggle screen hidden/visible    |
//! | Q / Esc   | Quit                            |
//!
//! Hiding the screen unsubscribes the sensor streams (the lifecycle the
//! instrument uses on hardware to stop burning battery while not
//! displayed); showing it again re-subscribes and updates resume with
//! the next sample.

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::info;
use nalgebra as na;

use orient_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, STANDARD_GRAVITY};
use orient_core::fusion::OrientationTracker;
use orient_core::pages::{InstrumentPage, Page};
use orient_core::sensors::{SensorAvailability, SensorHub, SensorKind, SensorSample};
use orient_core::state::OrientationState;
use orient_core::ui::PageEvent;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Simulated horizontal and vertical geomagnetic field components, µT.
const FIELD_HORIZONTAL_UT: f32 = 22.0;
const FIELD_VERTICAL_UT: f32 = -40.0;

/// Simulated turn rate in degrees of heading per second.
const TURN_RATE_DEG_PER_S: f64 = 12.0;

/// Roll oscillation: amplitude in degrees, period in seconds.
const ROLL_AMPLITUDE_DEG: f64 = 25.0;
const ROLL_PERIOD_S: f64 = 8.0;

/// Pitch oscillation: amplitude in degrees, period in seconds.
const PITCH_AMPLITUDE_DEG: f64 = 15.0;
const PITCH_PERIOD_S: f64 = 13.0;

/// Orientation snapshots flow through this cell from the sampling side
/// to the render loop, the same binding a firmware host would share
/// between its sampling and display tasks.
static ORIENTATION: OrientationState = OrientationState::new();

// ---------------------------------------------------------------------------
// Synthetic sensor streams
// ---------------------------------------------------------------------------

/// Generates the three sensor streams for a device held level while
/// slowly turning clockwise, with sinusoidal roll and pitch wobble.
///
/// The gyro channels carry the analytic derivatives of the wobble, so
/// the tracker's open-loop integration reproduces the simulated tilt.
/// Each stream ticks at its platform delivery rate with monotonic
/// nanosecond timestamps.
struct SyntheticSensors {
    next_due_ns: [i64; SensorKind::COUNT],
}

impl SyntheticSensors {
    fn new() -> Self {
        Self {
            next_due_ns: [0; SensorKind::COUNT],
        }
    }

    /// Collect every sample that has come due by `now_ns`.
    fn poll(&mut self, now_ns: i64, out: &mut Vec<SensorSample>) {
        for (slot, kind) in [
            SensorKind::Accelerometer,
            SensorKind::Magnetometer,
            SensorKind::Gyroscope,
        ]
        .into_iter()
        .enumerate()
        {
            let interval_ns = kind.delivery_interval_us() as i64 * 1_000;
            while self.next_due_ns[slot] <= now_ns {
                let t_ns = self.next_due_ns[slot];
                out.push(SensorSample::new(kind, Self::values_at(kind, t_ns), t_ns));
                self.next_due_ns[slot] += interval_ns;
            }
        }
    }

    fn values_at(kind: SensorKind, t_ns: i64) -> na::Vector3<f32> {
        let t = t_ns as f64 / 1e9;
        match kind {
            // Device held level: gravity stays on the Z axis.
            SensorKind::Accelerometer => na::Vector3::new(0.0, 0.0, STANDARD_GRAVITY),
            SensorKind::Magnetometer => {
                let heading_rad = (TURN_RATE_DEG_PER_S * t).to_radians();
                na::Vector3::new(
                    -FIELD_HORIZONTAL_UT * heading_rad.sin() as f32,
                    FIELD_HORIZONTAL_UT * heading_rad.cos() as f32,
                    FIELD_VERTICAL_UT,
                )
            }
            SensorKind::Gyroscope => {
                // d/dt of A·sin(2π·t/T) in rad/s for each axis.
                let roll_rate = ROLL_AMPLITUDE_DEG.to_radians()
                    * (std::f64::consts::TAU / ROLL_PERIOD_S)
                    * (std::f64::consts::TAU * t / ROLL_PERIOD_S).cos();
                let pitch_rate = PITCH_AMPLITUDE_DEG.to_radians()
                    * (std::f64::consts::TAU / PITCH_PERIOD_S)
                    * (std::f64::consts::TAU * t / PITCH_PERIOD_S).cos();
                na::Vector3::new(roll_rate as f32, pitch_rate as f32, 0.0)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting orient-rs simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: Space/H=hide/show  Q=Quit");

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Orient Simulator", &output_settings);

    let mut sensors = SyntheticSensors::new();
    let mut hub = SensorHub::new(SensorAvailability::all());
    let mut tracker = OrientationTracker::new();

    let screen_bounds = Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
    );
    let mut page = InstrumentPage::new(screen_bounds);

    // Screen starts visible: subscribe before the first sample lands.
    hub.subscribe_all();
    page.on_activate();
    let mut visible = true;
    let mut last_version = 0u32;

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    let _ = page.draw_page(&mut display);
    page.mark_clean();
    window.update(&display);

    let started = Instant::now();
    let mut sample_buf: Vec<SensorSample> = Vec::new();

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::Space | Keycode::H => {
                        visible = !visible;
                        if visible {
                            info!("Screen shown, re-subscribing sensors");
                            hub.subscribe_all();
                            page.on_activate();
                        } else {
                            info!("Screen hidden, unsubscribing sensors");
                            hub.unsubscribe_all();
                            page.on_deactivate();
                            let _ = display.clear(Rgb565::BLACK);
                        }
                    }
                    _ => {}
                },

                _ => {}
            }
        }

        // --- Sensor delivery ----------------------------------------------
        // The host keeps producing samples while hidden; the hub drops
        // them, exactly as the platform would stop delivering to an
        // unregistered listener.
        let now_ns = started.elapsed().as_nanos() as i64;
        sample_buf.clear();
        sensors.poll(now_ns, &mut sample_buf);

        let mut consumed_any = false;
        for sample in &sample_buf {
            consumed_any |= hub.deliver(sample, &mut tracker);
        }
        if consumed_any {
            ORIENTATION.publish(tracker.orientation());
        }

        // --- Page update --------------------------------------------------
        if visible {
            if let Some((orientation, version)) = ORIENTATION.changed_since(last_version) {
                page.on_event(&PageEvent::OrientationUpdate(orientation));
                last_version = version;
            }
            page.update();

            if page.is_dirty() {
                if let Err(e) = page.draw_page(&mut display) {
                    log::error!("Draw error: {:?}", e);
                }
                page.mark_clean();
            }
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
