use super::PoseFilter;
use crate::{constants::EPSILON, pose::Pose, Error, Result};
use nalgebra::{UnitQuaternion, Vector3};

/// Last emitted pose for one accessory instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingState {
    pub last_position: Vector3<f64>,
    pub last_orientation: UnitQuaternion<f64>,
    pub initialized: bool,
}

impl Default for SmoothingState {
    fn default() -> Self {
        Self {
            last_position: Vector3::zeros(),
            last_orientation: UnitQuaternion::identity(),
            initialized: false,
        }
    }
}

impl SmoothingState {
    /// Advance the state by one raw pose.
    ///
    /// A hidden (or non-finite) raw pose hard-resets the state. The first
    /// visible pose after a reset is emitted unchanged. Later poses lerp the
    /// position and slerp the orientation toward the raw pose by `alpha`;
    /// scale always follows the raw pose.
    ///
    /// An `alpha` outside (0, 1], or an interpolation that leaves the finite
    /// range, is treated like a lost frame: nothing non-finite is ever stored.
    #[must_use]
    pub fn update(self, raw: &Pose, alpha: f64) -> (Pose, Self) {
        if !valid_alpha(alpha) || !raw.visible || !raw.is_finite() {
            return (Pose::hidden(), Self::default());
        }

        if !self.initialized {
            let state = Self {
                last_position: raw.position,
                last_orientation: raw.orientation,
                initialized: true,
            };
            return (*raw, state);
        }

        let position = self.last_position.lerp(&raw.position, alpha);
        // nearly identical rotations have no well-defined slerp axis
        let orientation = self
            .last_orientation
            .try_slerp(&raw.orientation, alpha, EPSILON)
            .unwrap_or(raw.orientation);

        let pose = Pose::new(position, orientation, raw.scale);
        if !pose.is_finite() {
            return (Pose::hidden(), Self::default());
        }
        let state = Self {
            last_position: position,
            last_orientation: orientation,
            initialized: true,
        };
        (pose, state)
    }
}

fn valid_alpha(alpha: f64) -> bool {
    alpha > 0.0 && alpha <= 1.0
}

/// Constant-factor exponential pose smoothing
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    alpha: f64,
    state: SmoothingState,
}

impl ExponentialSmoother {
    /// Create a smoother, panicking on an out-of-range factor
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is not in (0, 1]
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        assert!(valid_alpha(alpha), "Alpha must be in (0, 1]");
        Self {
            alpha,
            state: SmoothingState::default(),
        }
    }

    /// Create a smoother, rejecting an out-of-range factor
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not in (0, 1]
    pub fn try_new(alpha: f64) -> Result<Self> {
        if valid_alpha(alpha) {
            Ok(Self::new(alpha))
        } else {
            Err(Error::InvalidInput(format!("Alpha must be in (0, 1], got {alpha}")))
        }
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[must_use]
    pub fn state(&self) -> &SmoothingState {
        &self.state
    }
}

impl PoseFilter for ExponentialSmoother {
    fn apply(&mut self, raw: &Pose) -> Pose {
        let (pose, state) = self.state.update(raw, self.alpha);
        self.state = state;
        pose
    }

    fn reset(&mut self) {
        self.state = SmoothingState::default();
    }

    fn name(&self) -> &str {
        "ExponentialSmoother"
    }
}
