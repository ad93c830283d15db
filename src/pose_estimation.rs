//! Landmark-to-pose estimation.
//!
//! The estimator is a pure function of the landmark frame, the accessory
//! profile and the mesh reference width. It never fails: every degenerate
//! input degrades to [`Pose::hidden`].

use crate::{
    constants::EPSILON,
    error::TrackingLoss,
    guard::{self, Gate},
    landmarks::LandmarkFrame,
    pose::Pose,
    profile::{AccessoryProfile, AnchorModel, OrientationModel, Placement},
};
use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

/// Estimate the raw pose for one frame.
///
/// `None` means the detector found no face. The returned pose is not visible
/// whenever tracking is lost, which is the caller's cue to reset smoothing.
#[must_use]
pub fn estimate(frame: Option<&LandmarkFrame>, profile: &AccessoryProfile, reference_width: f64) -> Pose {
    try_estimate(frame, profile, reference_width).unwrap_or_else(|_| Pose::hidden())
}

/// Estimate the raw pose, reporting why tracking was lost
///
/// # Errors
///
/// Returns the [`TrackingLoss`] reason when no visible pose can be produced
pub fn try_estimate(
    frame: Option<&LandmarkFrame>,
    profile: &AccessoryProfile,
    reference_width: f64,
) -> Gate<Pose> {
    let frame = frame.ok_or(TrackingLoss::NoFace)?;

    let anchor = anchor_point(frame, &profile.anchor)?;

    let [left, right] = profile.width_reference;
    let reference = guard::reference_distance(&landmark(frame, left)?, &landmark(frame, right)?)?;
    let factor = scale_factor(reference, profile, reference_width)?;
    let scale = guard::finite_vector(profile.axis_ratios.to_vector() * factor)?;

    let position = guard::finite_vector(place(&anchor, factor, &profile.placement))?;
    let orientation = orientation(frame, &profile.orientation)?;

    let pose = Pose::new(position, orientation, scale);
    if !pose.is_finite() {
        return Err(TrackingLoss::NonFinite);
    }
    Ok(pose)
}

/// Clamped scale factor from a reference distance
///
/// # Errors
///
/// Returns `NonFinite` if the unclamped factor is NaN or infinite
pub fn scale_factor(reference_distance: f64, profile: &AccessoryProfile, reference_width: f64) -> Gate<f64> {
    let desired_width = reference_distance * profile.width_multiplier;
    let raw = guard::finite(desired_width / reference_width.max(EPSILON))?;
    Ok(profile.scale_clamp.apply(raw))
}

/// Compose damped angles as yaw about Y, then pitch about X, then roll about Z
#[must_use]
pub fn compose_orientation(yaw: f64, pitch: f64, roll: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), roll)
}

fn landmark(frame: &LandmarkFrame, index: usize) -> Gate<Vector3<f64>> {
    guard::finite_vector(frame.point(index).ok_or(TrackingLoss::MissingLandmark)?)
}

fn cluster(frame: &LandmarkFrame, indices: &[usize]) -> Gate<Vector3<f64>> {
    guard::finite_vector(frame.average(indices).ok_or(TrackingLoss::MissingLandmark)?)
}

/// Anchor in view space; `z` carries the depth sample used for placement
fn anchor_point(frame: &LandmarkFrame, model: &AnchorModel) -> Gate<Vector3<f64>> {
    match model {
        AnchorModel::EyeBridge {
            left_eye,
            right_eye,
            nose_bridge,
            bridge_weight,
            vertical_reference,
            vertical_anchor_weight,
        } => {
            let left = cluster(frame, left_eye)?;
            let right = cluster(frame, right_eye)?;
            let bridge = landmark(frame, *nose_bridge)?;
            let reference = landmark(frame, *vertical_reference)?;

            let midpoint = (left + right) * 0.5;
            let anchor = midpoint.lerp(&bridge, *bridge_weight);
            let y = anchor.y * vertical_anchor_weight + reference.y * (1.0 - vertical_anchor_weight);

            Ok(Vector3::new(anchor.x, y, bridge.z))
        }
        AnchorModel::Landmark { index } => landmark(frame, *index),
    }
}

fn place(anchor: &Vector3<f64>, factor: f64, placement: &Placement) -> Vector3<f64> {
    let growth = factor - 1.0;

    let x = (anchor.x - 0.5) * placement.view_scale;
    let y = -(anchor.y - 0.5) * placement.view_scale + placement.vertical_offset
        - placement.vertical_compensation * growth;
    let z = placement.depth_base
        - anchor.z * placement.depth_multiplier
        - (placement.depth_compensation * growth).max(0.0);

    Vector3::new(x, y, z)
}

fn orientation(frame: &LandmarkFrame, model: &OrientationModel) -> Gate<UnitQuaternion<f64>> {
    match model {
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
            let left = cluster(frame, left)?;
            let right = cluster(frame, right)?;
            let brow = landmark(frame, *brow)?;

            let axis = right - left;
            let horizontal = axis.x.hypot(axis.z);

            let yaw = guard::angle(axis.z, axis.x)? * yaw_damping;
            let pitch = guard::angle(-axis.y, horizontal)? * pitch_damping + pitch_bias;

            let midpoint = (left + right) * 0.5;
            let asymmetry = brow.y - midpoint.y;
            let roll = guard::angle(axis.y, axis.x)? * roll_damping + asymmetry * roll_brow_gain;

            Ok(compose_orientation(
                guard::finite(yaw)?,
                guard::finite(pitch)?,
                guard::finite(roll)?,
            ))
        }
        OrientationModel::TempleBasis {
            left,
            right,
            top,
            bottom,
            damping,
        } => {
            let x_axis = guard::normalize(&(landmark(frame, *right)? - landmark(frame, *left)?))?;
            let up = guard::normalize(&(landmark(frame, *top)? - landmark(frame, *bottom)?))?;
            let z_axis = guard::normalize(&x_axis.cross(&up))?;
            let y_axis = guard::normalize(&z_axis.cross(&x_axis))?;

            let basis = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x_axis, y_axis, z_axis]));
            let rotation = UnitQuaternion::from_rotation_matrix(&basis);

            Ok(if *damping < 1.0 { rotation.powf(*damping) } else { rotation })
        }
    }
}
