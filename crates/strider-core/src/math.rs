//! Smoothing and direction helpers
//!
//! `smooth_damp` is the critically damped spring approximation from Game
//! Programming Gems 4 (ch. 1.10). It tracks a velocity term so a moving
//! target is followed without overshoot.

use glam::{Quat, Vec3};

/// Smallest smooth time accepted; keeps `2 / smooth_time` finite.
const MIN_SMOOTH_TIME: f32 = 1.0e-4;

/// Move `current` toward `target` with a critically damped spring.
///
/// `velocity` carries state between calls. A zero `dt` returns `current`
/// unchanged and leaves `velocity` untouched.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let omega = 2.0 / smooth_time.max(MIN_SMOOTH_TIME);
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;

    let output = target + (change + temp) * exp;

    // Never step past the target
    if (target - current > 0.0) == (output > target) {
        *velocity = 0.0;
        return target;
    }

    output
}

/// Vector form of [`smooth_damp`]
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let omega = 2.0 / smooth_time.max(MIN_SMOOTH_TIME);
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;

    let output = target + (change + temp) * exp;

    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }

    output
}

/// Interpolation factor for a per-frame smoothing constant tuned at 60 Hz.
///
/// `smoothing` is the fraction of the remaining distance covered in one
/// 1/60 s frame. The result scales with `dt` and is 0 when `dt` is 0.
pub fn frame_lerp_factor(smoothing: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - smoothing.clamp(0.0, 1.0)).powf(dt * 60.0)
}

/// Project onto the horizontal (XZ) plane and normalize.
///
/// Returns `Vec3::ZERO` for vertical or zero-length input.
pub fn horizontal_direction(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Yaw-only rotation whose forward (-Z) points along `direction`.
///
/// Returns `None` when `direction` has no horizontal component.
pub fn yaw_rotation(direction: Vec3) -> Option<Quat> {
    let flat = horizontal_direction(direction);
    if flat == Vec3::ZERO {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}
