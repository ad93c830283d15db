//! Landmark frames as delivered by the external face mesh detector.

use crate::{constants::NUM_FACE_LANDMARKS, Error, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One tracked point in normalized view space.
///
/// `x` and `y` are in `[0, 1]` with `y` growing downward; `z` is a relative
/// depth where more negative means closer to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Landmark {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// A complete, fixed-topology landmark set for one video frame.
///
/// Absence of a face is expressed as `Option<&LandmarkFrame>` at call sites.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: Box<[Landmark]>,
}

impl LandmarkFrame {
    /// Build a frame from exactly [`NUM_FACE_LANDMARKS`] points
    ///
    /// # Errors
    ///
    /// Returns an error if the number of points does not match the topology
    pub fn new(points: Vec<Landmark>) -> Result<Self> {
        if points.len() != NUM_FACE_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Expected {} landmarks, got {}",
                NUM_FACE_LANDMARKS,
                points.len()
            )));
        }

        Ok(Self {
            points: points.into_boxed_slice(),
        })
    }

    #[must_use]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.points
    }

    /// Landmark at a topology index, if it exists
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    /// Landmark at a topology index as a vector
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Vector3<f64>> {
        self.get(index).map(Landmark::to_vector)
    }

    /// Unweighted mean of a landmark cluster.
    ///
    /// Returns `None` for an empty cluster or any out-of-range index.
    #[must_use]
    pub fn average(&self, indices: &[usize]) -> Option<Vector3<f64>> {
        if indices.is_empty() {
            return None;
        }

        let mut sum = Vector3::zeros();
        for &index in indices {
            sum += self.point(index)?;
        }

        #[allow(clippy::cast_precision_loss)] // clusters hold a handful of indices
        let count = indices.len() as f64;
        Some(sum / count)
    }
}

impl TryFrom<Vec<Landmark>> for LandmarkFrame {
    type Error = Error;

    fn try_from(points: Vec<Landmark>) -> Result<Self> {
        Self::new(points)
    }
}
