//! Rotation matrix derivation from a gravity/geomagnetic vector pair.
//!
//! This is the standard device-orientation construction: the rows of the
//! matrix are the device-frame directions of magnetic east (`H`),
//! magnetic north projected onto the horizontal plane (`M`), and up
//! (`A`), so the matrix maps device-frame vectors into the world frame.
//! Heading is then the azimuth angle extracted from that matrix.

use nalgebra as na;
use thiserror_no_std::Error;

use crate::config::STANDARD_GRAVITY;

/// Squared gravity magnitude below which the device is considered close
/// to free fall (1% of g²) and no orientation can be derived.
const FREE_FALL_GRAVITY_SQUARED: f32 = 0.01 * STANDARD_GRAVITY * STANDARD_GRAVITY;

/// Minimum norm of the horizontal (east) vector. Below this the gravity
/// and geomagnetic vectors are close to collinear, which happens near
/// the magnetic poles or under strong local interference.
const MIN_HORIZONTAL_NORM: f32 = 0.1;

/// Reasons a rotation matrix cannot be derived from a sample pair.
///
/// Callers treat every variant the same way: skip the event and keep
/// the previously derived heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RotationError {
    #[error("gravity vector too small, device close to free fall")]
    FreeFall,
    #[error("gravity and geomagnetic vectors are nearly collinear")]
    Collinear,
}

/// Euler angles extracted from a rotation matrix, all in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationAngles {
    /// Rotation about the vertical axis; 0 = magnetic north, increasing
    /// clockwise. Range (-π, π].
    pub azimuth_rad: f32,
    /// Rotation about the lateral axis. Range [-π/2, π/2].
    pub pitch_rad: f32,
    /// Rotation about the longitudinal axis. Range (-π, π].
    pub roll_rad: f32,
}

/// Derive the device-to-world rotation matrix from the last known
/// gravity and geomagnetic field vectors (device frame, any units).
pub fn rotation_matrix(
    gravity: &na::Vector3<f32>,
    geomagnetic: &na::Vector3<f32>,
) -> Result<na::Matrix3<f32>, RotationError> {
    let gravity_sq = gravity.norm_squared();
    if gravity_sq < FREE_FALL_GRAVITY_SQUARED {
        return Err(RotationError::FreeFall);
    }

    // East is perpendicular to both the field and gravity.
    let h = geomagnetic.cross(gravity);
    let norm_h = libm::sqrtf(h.norm_squared());
    if norm_h < MIN_HORIZONTAL_NORM {
        return Err(RotationError::Collinear);
    }

    let h = h / norm_h;
    let a = gravity / libm::sqrtf(gravity_sq);
    // Horizontal north completes the right-handed basis.
    let m = a.cross(&h);

    Ok(na::Matrix3::new(
        h.x, h.y, h.z, //
        m.x, m.y, m.z, //
        a.x, a.y, a.z,
    ))
}

/// Extract azimuth/pitch/roll from a rotation matrix produced by
/// [`rotation_matrix`].
pub fn orientation_angles(r: &na::Matrix3<f32>) -> OrientationAngles {
    OrientationAngles {
        azimuth_rad: libm::atan2f(r[(0, 1)], r[(1, 1)]),
        pitch_rad: libm::asinf(-r[(2, 1)]),
        roll_rad: libm::atan2f(-r[(2, 0)], r[(2, 2)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    // Geomagnetic field fixture: ~22 µT horizontal, 40 µT downward dip,
    // expressed in the device frame for a device held flat.
    const FIELD_HORIZONTAL: f32 = 22.0;
    const FIELD_VERTICAL: f32 = -40.0;

    fn flat_gravity() -> na::Vector3<f32> {
        na::Vector3::new(0.0, 0.0, STANDARD_GRAVITY)
    }

    #[test]
    fn flat_north_facing_device_yields_identity() {
        let field = na::Vector3::new(0.0, FIELD_HORIZONTAL, FIELD_VERTICAL);
        let r = rotation_matrix(&flat_gravity(), &field).unwrap();

        let identity = na::Matrix3::<f32>::identity();
        for row in 0..3 {
            for col in 0..3 {
                assert!((r[(row, col)] - identity[(row, col)]).abs() < 1e-5);
            }
        }

        let angles = orientation_angles(&r);
        assert!(angles.azimuth_rad.abs() < 1e-5);
        assert!(angles.pitch_rad.abs() < 1e-5);
        assert!(angles.roll_rad.abs() < 1e-5);
    }

    #[test]
    fn east_facing_device_yields_quarter_turn_azimuth() {
        // Device top pointing east: magnetic north lies along device -X.
        let field = na::Vector3::new(-FIELD_HORIZONTAL, 0.0, FIELD_VERTICAL);
        let r = rotation_matrix(&flat_gravity(), &field).unwrap();

        let angles = orientation_angles(&r);
        assert!((angles.azimuth_rad - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn west_facing_device_yields_negative_azimuth() {
        let field = na::Vector3::new(FIELD_HORIZONTAL, 0.0, FIELD_VERTICAL);
        let r = rotation_matrix(&flat_gravity(), &field).unwrap();

        let angles = orientation_angles(&r);
        assert!((angles.azimuth_rad + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn collinear_vectors_are_rejected() {
        // Field aligned with gravity: no horizontal component to take a
        // bearing from.
        let field = na::Vector3::new(0.0, 0.0, 50.0);
        assert_eq!(
            rotation_matrix(&flat_gravity(), &field),
            Err(RotationError::Collinear)
        );
    }

    #[test]
    fn free_fall_is_rejected() {
        let gravity = na::Vector3::new(0.0, 0.0, 0.05);
        let field = na::Vector3::new(0.0, FIELD_HORIZONTAL, FIELD_VERTICAL);
        assert_eq!(
            rotation_matrix(&gravity, &field),
            Err(RotationError::FreeFall)
        );
    }
}
