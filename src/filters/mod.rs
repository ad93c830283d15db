//! Temporal filtering of raw poses.
//!
//! Filters hold per-accessory state and are advanced once per frame by a
//! single owner. A hidden raw pose always resets that state.

/// Exponential smoothing with lerp/slerp toward the raw pose
pub mod exponential;

use crate::{pose::Pose, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for all pose filters
pub trait PoseFilter: Send + Sync {
    /// Advance the filter by one raw pose and return the pose to apply
    fn apply(&mut self, raw: &Pose) -> Pose;

    /// Forget all history; the next visible pose snaps
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes poses through unchanged
pub struct NoFilter;

impl PoseFilter for NoFilter {
    fn apply(&mut self, raw: &Pose) -> Pose {
        if raw.visible && raw.is_finite() {
            *raw
        } else {
            Pose::hidden()
        }
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Selectable filter implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Exponential smoothing with the profile's factor
    #[default]
    Exponential,
    /// Raw poses applied directly
    None,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exponential => f.write_str("exponential"),
            Self::None => f.write_str("none"),
        }
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "exponential" | "exp" => Ok(Self::Exponential),
            "none" | "nofilter" => Ok(Self::None),
            _ => Err(Error::UnknownFilter(s.to_string())),
        }
    }
}

/// Create a pose filter of the given kind
///
/// # Errors
///
/// Returns an error if `alpha` is outside (0, 1] for a smoothing filter
pub fn create_filter(kind: FilterKind, alpha: f64) -> Result<Box<dyn PoseFilter>> {
    match kind {
        FilterKind::Exponential => Ok(Box::new(exponential::ExponentialSmoother::try_new(alpha)?)),
        FilterKind::None => Ok(Box::new(NoFilter)),
    }
}
