//! Ship velocity model
//!
//! Velocities are `Vec2` with `x` = columns per tick and `y` = rows per tick.
//! Each update first fades the current velocity, then accelerates along any
//! axis with input. Acceleration is strongest from rest and tapers off as
//! the ship approaches its speed limit.

use glam::Vec2;

use crate::consts::SHIP_ACCELERATION;
use crate::error::{Axis, SimError};

fn check_direction(axis: Axis, value: i8) -> Result<(), SimError> {
    if (-1..=1).contains(&value) {
        Ok(())
    } else {
        Err(SimError::InvalidDirection { axis, value })
    }
}

fn check_limit(limit: f32) -> Result<f32, SimError> {
    let limit = limit.abs();
    if limit > 0.0 && limit.is_finite() {
        Ok(limit)
    } else {
        Err(SimError::InvalidSpeedLimit { limit })
    }
}

/// Speed change along one axis toward `forward` (positive) or backward
fn accelerate(speed: f32, limit: f32, forward: bool) -> f32 {
    let delta = (speed / limit).cos() * SHIP_ACCELERATION;
    let speed = if forward { speed + delta } else { speed - delta };
    speed.clamp(-limit, limit)
}

/// Compute the next velocity.
///
/// `rows_direction` and `columns_direction` must be -1, 0 or 1; `fading`
/// must lie in [0, 1]. Each component of the result is within its limit.
pub fn update_velocity(
    velocity: Vec2,
    rows_direction: i8,
    columns_direction: i8,
    limit: Vec2,
    fading: f32,
) -> Result<Vec2, SimError> {
    check_direction(Axis::Row, rows_direction)?;
    check_direction(Axis::Column, columns_direction)?;
    if !(0.0..=1.0).contains(&fading) {
        return Err(SimError::InvalidFading { fading });
    }
    let limit = Vec2::new(check_limit(limit.x)?, check_limit(limit.y)?);

    let mut next = (velocity * fading).clamp(-limit, limit);
    if rows_direction != 0 {
        next.y = accelerate(next.y, limit.y, rows_direction > 0);
    }
    if columns_direction != 0 {
        next.x = accelerate(next.x, limit.x, columns_direction > 0);
    }
    Ok(next)
}
