//! Numeric validity gate.
//!
//! Every division, normalization, `atan2` input and cross product on the
//! per-frame path goes through these helpers. A failure short-circuits the
//! frame to not-visible instead of letting NaN reach the renderer or the
//! smoother's stored pose.

use crate::{constants::EPSILON, error::TrackingLoss};
use nalgebra::Vector3;

/// Result of a guarded computation
pub type Gate<T> = std::result::Result<T, TrackingLoss>;

/// Pass a finite scalar through
pub fn finite(value: f64) -> Gate<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrackingLoss::NonFinite)
    }
}

/// Pass a vector with all-finite components through
pub fn finite_vector(vector: Vector3<f64>) -> Gate<Vector3<f64>> {
    if vector.iter().all(|c| c.is_finite()) {
        Ok(vector)
    } else {
        Err(TrackingLoss::NonFinite)
    }
}

/// Euclidean distance usable as a scale denominator or reference
pub fn reference_distance(a: &Vector3<f64>, b: &Vector3<f64>) -> Gate<f64> {
    let distance = (b - a).norm();
    if !distance.is_finite() || distance < EPSILON {
        return Err(TrackingLoss::DegenerateReference);
    }
    Ok(distance)
}

/// Unit vector, rejecting collapsed or non-finite input
pub fn normalize(vector: &Vector3<f64>) -> Gate<Vector3<f64>> {
    let norm = vector.norm();
    if !norm.is_finite() {
        return Err(TrackingLoss::NonFinite);
    }
    if norm < EPSILON {
        return Err(TrackingLoss::DegenerateAxis);
    }
    Ok(vector / norm)
}

/// `atan2` whose arguments are finite and not both vanishing
pub fn angle(y: f64, x: f64) -> Gate<f64> {
    finite(y)?;
    finite(x)?;
    if y.hypot(x) < EPSILON {
        return Err(TrackingLoss::DegenerateAxis);
    }
    Ok(y.atan2(x))
}
