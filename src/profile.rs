//! Per-category placement profiles.
//!
//! A profile tells the estimator which landmarks anchor an accessory, how the
//! scale reference is measured, how the anchor maps into world space, and how
//! orientation is derived. Every tuning coefficient lives here so it can be
//! recalibrated from configuration without touching the estimator.

use crate::{
    constants::{landmarks, DEFAULT_SMOOTHING_ALPHA, DEPTH_BASE, DEPTH_MULTIPLIER, NUM_FACE_LANDMARKS, VIEW_SCALE},
    Error, Result,
};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Complete placement configuration for one accessory category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessoryProfile {
    /// How the placement anchor is derived
    pub anchor: AnchorModel,

    /// Bilateral landmark pair whose distance drives scale
    pub width_reference: [usize; 2],

    /// Reference distance to desired mesh width factor
    pub width_multiplier: f64,

    /// Bounds applied to the scale factor
    pub scale_clamp: ScaleClamp,

    /// Per-axis scale ratios applied after clamping
    pub axis_ratios: AxisRatios,

    /// View-to-world mapping and size compensation
    pub placement: Placement,

    /// How orientation is derived
    pub orientation: OrientationModel,

    /// Smoothing factor in (0, 1]
    pub smoothing_alpha: f64,
}

/// Inclusive scale factor bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleClamp {
    pub min: f64,
    pub max: f64,
}

impl ScaleClamp {
    /// Clamp into `[min, max]`; never panics, even on an unvalidated range
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Non-uniform scale ratios so an accessory does not thicken as fast as it widens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisRatios {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl AxisRatios {
    pub const UNIFORM: Self = Self {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    };

    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.width, self.height, self.depth)
    }
}

/// Mapping from the anchor point to a world-space position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placement {
    /// Normalized view units to world units
    pub view_scale: f64,

    /// World depth for zero landmark depth
    pub depth_base: f64,

    /// World depth per unit of landmark depth
    pub depth_multiplier: f64,

    /// Constant vertical world offset
    pub vertical_offset: f64,

    /// Downward shift per unit of `(scale - 1)`
    pub vertical_compensation: f64,

    /// Backward shift per unit of `(scale - 1)`, never negative
    pub depth_compensation: f64,
}

/// Anchor derivation strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnchorModel {
    /// Midpoint of two eye clusters blended toward the nose bridge.
    ///
    /// Depth is read from the nose bridge, and the vertical coordinate is
    /// blended with a second reference landmark.
    EyeBridge {
        left_eye: Vec<usize>,
        right_eye: Vec<usize>,
        nose_bridge: usize,
        /// Interpolation weight toward the nose bridge
        bridge_weight: f64,
        vertical_reference: usize,
        /// Weight of the blended anchor in the vertical coordinate
        vertical_anchor_weight: f64,
    },

    /// A single landmark used directly
    Landmark { index: usize },
}

/// Orientation derivation strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrientationModel {
    /// Damped yaw, pitch and roll from a bilateral landmark vector.
    ///
    /// Composed as yaw (about Y), then pitch (about X), then roll (about Z).
    DampedEuler {
        left: Vec<usize>,
        right: Vec<usize>,
        /// Landmark above the bilateral pair, used for roll asymmetry
        brow: usize,
        yaw_damping: f64,
        pitch_damping: f64,
        pitch_bias: f64,
        roll_damping: f64,
        roll_brow_gain: f64,
    },

    /// Orthonormal basis from the temple axis and a vertical face axis
    TempleBasis {
        left: usize,
        right: usize,
        top: usize,
        bottom: usize,
        /// Fraction of the basis rotation applied, in (0, 1]
        damping: f64,
    },
}

impl AccessoryProfile {
    /// Eyewear profile anchored between the eyes
    #[must_use]
    pub fn glasses() -> Self {
        Self {
            anchor: AnchorModel::EyeBridge {
                left_eye: landmarks::LEFT_EYE.to_vec(),
                right_eye: landmarks::RIGHT_EYE.to_vec(),
                nose_bridge: landmarks::NOSE_BRIDGE,
                bridge_weight: 0.18,
                vertical_reference: landmarks::NOSE_TIP,
                vertical_anchor_weight: 0.7,
            },
            width_reference: [landmarks::LEFT_TEMPLE, landmarks::RIGHT_TEMPLE],
            width_multiplier: 10.0,
            scale_clamp: ScaleClamp { min: 0.75, max: 2.8 },
            axis_ratios: AxisRatios {
                width: 1.0,
                height: 0.82,
                depth: 1.3,
            },
            placement: Placement {
                view_scale: VIEW_SCALE,
                depth_base: DEPTH_BASE,
                depth_multiplier: DEPTH_MULTIPLIER,
                vertical_offset: -0.04,
                vertical_compensation: 0.06,
                depth_compensation: 0.18,
            },
            orientation: OrientationModel::DampedEuler {
                left: landmarks::LEFT_EYE.to_vec(),
                right: landmarks::RIGHT_EYE.to_vec(),
                brow: landmarks::FOREHEAD,
                yaw_damping: 0.8,
                pitch_damping: 0.75,
                pitch_bias: 0.08,
                roll_damping: 0.55,
                roll_brow_gain: 0.3,
            },
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
        }
    }

    /// Headwear profile anchored on the forehead
    #[must_use]
    pub fn hat() -> Self {
        Self {
            anchor: AnchorModel::Landmark {
                index: landmarks::FOREHEAD,
            },
            width_reference: [landmarks::LEFT_TEMPLE, landmarks::RIGHT_TEMPLE],
            width_multiplier: 12.0,
            scale_clamp: ScaleClamp { min: 0.9, max: 3.5 },
            axis_ratios: AxisRatios::UNIFORM,
            placement: Placement {
                view_scale: VIEW_SCALE,
                depth_base: DEPTH_BASE,
                depth_multiplier: DEPTH_MULTIPLIER,
                vertical_offset: 0.5,
                vertical_compensation: 0.0,
                depth_compensation: 0.0,
            },
            orientation: OrientationModel::TempleBasis {
                left: landmarks::LEFT_TEMPLE,
                right: landmarks::RIGHT_TEMPLE,
                top: landmarks::FOREHEAD,
                bottom: landmarks::NOSE_BRIDGE,
                damping: 1.0,
            },
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
        }
    }

    /// Check every index and coefficient
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` naming the profile and the offending field
    pub fn validate(&self, name: &str) -> Result<()> {
        let fail = |message: String| Err(Error::ConfigError(format!("profile '{name}': {message}")));

        match &self.anchor {
            AnchorModel::EyeBridge {
                left_eye,
                right_eye,
                nose_bridge,
                bridge_weight,
                vertical_reference,
                vertical_anchor_weight,
            } => {
                check_cluster("anchor.left_eye", left_eye).or_else(fail)?;
                check_cluster("anchor.right_eye", right_eye).or_else(fail)?;
                check_index("anchor.nose_bridge", *nose_bridge).or_else(fail)?;
                check_index("anchor.vertical_reference", *vertical_reference).or_else(fail)?;
                check_unit_interval("anchor.bridge_weight", *bridge_weight).or_else(fail)?;
                check_unit_interval("anchor.vertical_anchor_weight", *vertical_anchor_weight)
                    .or_else(fail)?;
            }
            AnchorModel::Landmark { index } => check_index("anchor.index", *index).or_else(fail)?,
        }

        for (i, &index) in self.width_reference.iter().enumerate() {
            check_index(&format!("width_reference[{i}]"), index).or_else(fail)?;
        }
        if self.width_reference[0] == self.width_reference[1] {
            return fail("width_reference must name two distinct landmarks".to_string());
        }

        if !self.width_multiplier.is_finite() || self.width_multiplier <= 0.0 {
            return fail(format!("width_multiplier must be positive, got {}", self.width_multiplier));
        }

        let ScaleClamp { min, max } = self.scale_clamp;
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return fail(format!("scale_clamp must satisfy 0 < min <= max, got [{min}, {max}]"));
        }

        let ratios = self.axis_ratios;
        if [ratios.width, ratios.height, ratios.depth]
            .iter()
            .any(|r| !r.is_finite() || *r <= 0.0)
        {
            return fail("axis_ratios must all be positive".to_string());
        }

        let placement = self.placement;
        if !placement.view_scale.is_finite() || placement.view_scale <= 0.0 {
            return fail("placement.view_scale must be positive".to_string());
        }
        if [
            placement.depth_base,
            placement.depth_multiplier,
            placement.vertical_offset,
            placement.vertical_compensation,
            placement.depth_compensation,
        ]
        .iter()
        .any(|v| !v.is_finite())
        {
            return fail("placement coefficients must be finite".to_string());
        }

        match &self.orientation {
            OrientationModel::DampedEuler {
                left,
                right,
                brow,
                yaw_damping,
                pitch_damping,
                pitch_bias,
                roll_damping,
                roll_brow_gain,
            } => {
                check_cluster("orientation.left", left).or_else(fail)?;
                check_cluster("orientation.right", right).or_else(fail)?;
                check_index("orientation.brow", *brow).or_else(fail)?;
                check_euler_damping("orientation.yaw_damping", *yaw_damping).or_else(fail)?;
                check_euler_damping("orientation.pitch_damping", *pitch_damping).or_else(fail)?;
                check_euler_damping("orientation.roll_damping", *roll_damping).or_else(fail)?;
                if !pitch_bias.is_finite() || !roll_brow_gain.is_finite() {
                    return fail("orientation bias and gain must be finite".to_string());
                }
            }
            OrientationModel::TempleBasis {
                left,
                right,
                top,
                bottom,
                damping,
            } => {
                check_index("orientation.left", *left).or_else(fail)?;
                check_index("orientation.right", *right).or_else(fail)?;
                check_index("orientation.top", *top).or_else(fail)?;
                check_index("orientation.bottom", *bottom).or_else(fail)?;
                check_damping("orientation.damping", *damping).or_else(fail)?;
            }
        }

        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return fail(format!("smoothing_alpha must be in (0, 1], got {}", self.smoothing_alpha));
        }

        Ok(())
    }
}

fn check_index(field: &str, index: usize) -> std::result::Result<(), String> {
    if index < NUM_FACE_LANDMARKS {
        Ok(())
    } else {
        Err(format!("{field} index {index} is outside 0..{NUM_FACE_LANDMARKS}"))
    }
}

fn check_cluster(field: &str, indices: &[usize]) -> std::result::Result<(), String> {
    if indices.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    indices.iter().try_for_each(|&index| check_index(field, index))
}

fn check_unit_interval(field: &str, value: f64) -> std::result::Result<(), String> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{field} must be between 0.0 and 1.0, got {value}"))
    }
}

fn check_damping(field: &str, value: f64) -> std::result::Result<(), String> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(format!("{field} must be in (0, 1], got {value}"))
    }
}

/// Euler dampings always attenuate, so 1.0 is out of range
fn check_euler_damping(field: &str, value: f64) -> std::result::Result<(), String> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(format!("{field} must be in (0, 1), got {value}"))
    }
}
