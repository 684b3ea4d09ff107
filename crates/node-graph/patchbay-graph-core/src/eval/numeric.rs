//! Numeric helper utilities shared across node kernels.

use std::f64::consts::TAU;

/// Euclidean magnitude of one XYZ triple.
pub fn magnitude3(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Normalize one XYZ triple, returning the unit vector and the input
/// magnitude. The zero vector normalizes to the zero vector, not NaN.
pub fn normalize3(v: [f64; 3]) -> ([f64; 3], f64) {
    let len = magnitude3(v);
    if len == 0.0 {
        ([0.0, 0.0, 0.0], 0.0)
    } else {
        ([v[0] / len, v[1] / len, v[2] / len], len)
    }
}

/// Right-handed cross product, explicit sign on the middle term.
pub fn cross3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        -(a[0] * b[2] - a[2] * b[0]),
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cartesian XYZ to `(pitch, yaw, length)`.
///
/// Angles are normalized turns: yaw maps a full revolution to `[-0.5, 0.5)`
/// and the `-0.25` offset puts pitch 0 on the horizontal plane rather than
/// straight up. A zero-length input yields pitch 0.
pub fn cartesian_to_polar(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let len = magnitude3([x, y, z]);
    let yaw = (-x).atan2(-z) / TAU;
    let pitch = if len == 0.0 {
        0.0
    } else {
        (-y / len).acos() / TAU - 0.25
    };
    (pitch, yaw, len)
}

/// Inverse of [`cartesian_to_polar`]. No division; defined for all finite
/// inputs.
pub fn polar_to_cartesian(pitch: f64, yaw: f64, length: f64) -> (f64, f64, f64) {
    let pitch = (pitch + 0.25) * TAU;
    let yaw = yaw * TAU;
    let x = -length * yaw.sin() * pitch.sin();
    let y = -length * pitch.cos();
    let z = -length * yaw.cos() * pitch.sin();
    (x, y, z)
}
