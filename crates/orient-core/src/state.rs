//! Observable orientation state shared between fusion and rendering.
//!
//! The fusion side publishes snapshots after each batch of sensor
//! samples; the render loop polls for changes once per frame. The cell
//! is `const`-constructible so hosts can keep it in a `static` and hand
//! the same reference to a sampling task and a display task.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::fusion::Orientation;

struct Inner {
    orientation: Orientation,
    version: u32,
}

/// Versioned cell holding the latest [`Orientation`].
pub struct OrientationState {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Inner>>,
}

impl OrientationState {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                orientation: Orientation {
                    heading_deg: None,
                    roll_deg: 0.0,
                    pitch_deg: 0.0,
                },
                version: 0,
            })),
        }
    }

    /// Store a snapshot. The version only advances when the value
    /// actually changed, so an idle instrument causes no redraws.
    pub fn publish(&self, orientation: Orientation) {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            if inner.orientation != orientation {
                inner.orientation = orientation;
                inner.version = inner.version.wrapping_add(1);
            }
        });
    }

    /// Latest snapshot, regardless of version.
    pub fn get(&self) -> Orientation {
        self.inner.lock(|cell| cell.borrow().orientation)
    }

    /// Snapshot and current version if anything changed since
    /// `last_version`.
    pub fn changed_since(&self, last_version: u32) -> Option<(Orientation, u32)> {
        self.inner.lock(|cell| {
            let inner = cell.borrow();
            (inner.version != last_version).then(|| (inner.orientation, inner.version))
        })
    }
}

impl Default for OrientationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset_and_unversioned() {
        let state = OrientationState::new();
        assert_eq!(state.get().heading_deg, None);
        assert!(state.changed_since(0).is_none());
    }

    #[test]
    fn publish_bumps_version_only_on_change() {
        let state = OrientationState::new();
        let orientation = Orientation {
            heading_deg: Some(45.0),
            roll_deg: 1.0,
            pitch_deg: -2.0,
        };

        state.publish(orientation);
        let (seen, version) = state.changed_since(0).unwrap();
        assert_eq!(seen, orientation);

        // Same value again: consumers at `version` see nothing new.
        state.publish(orientation);
        assert!(state.changed_since(version).is_none());

        state.publish(Orientation {
            heading_deg: Some(46.0),
            ..orientation
        });
        assert!(state.changed_since(version).is_some());
    }
}
