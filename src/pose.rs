//! Rigid-body placement for an attached mesh.

use nalgebra::{UnitQuaternion, Vector3};

/// Position, orientation and per-axis scale for one accessory in one frame.
///
/// When `visible` is false the remaining fields carry no meaning and the
/// renderer hides the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub scale: Vector3<f64>,
    pub visible: bool,
}

impl Pose {
    /// Visible pose from its parts
    #[must_use]
    pub fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>, scale: Vector3<f64>) -> Self {
        Self {
            position,
            orientation,
            scale,
            visible: true,
        }
    }

    /// The not-visible sentinel
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            scale: Vector3::repeat(1.0),
            visible: false,
        }
    }

    /// True when every component is a finite number
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
            && self.scale.iter().all(|c| c.is_finite())
            && self.orientation.coords.iter().all(|c| c.is_finite())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::hidden()
    }
}
