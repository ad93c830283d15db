//! Tests for landmark-to-pose estimation


use accessory_pose::{
    constants::{landmarks, NUM_FACE_LANDMARKS},
    landmarks::{Landmark, LandmarkFrame},
    pose_estimation::{estimate, try_estimate},
    profile::AccessoryProfile,
    registry::{AccessoryCategory, ProfileRegistry},
    TrackingLoss,
};
use proptest::prelude::*;
use test_helpers::{assert_pose_finite, face_frame, face_frame_at, FaceGeometry};

#[test]
fn test_glasses_scale_scenario() {
    let profile = AccessoryProfile::glasses();
    let pose = estimate(Some(&face_frame(0.12)), &profile, 1.0);

    assert_pose_finite(&pose);
    assert!((pose.scale.x - 1.2).abs() < 1e-9, "{}", pose.scale.x);
    assert!((pose.scale.y - 0.984).abs() < 1e-9, "{}", pose.scale.y);
    assert!((pose.scale.z - 1.56).abs() < 1e-9, "{}", pose.scale.z);
}

#[test]
fn test_hat_scale_is_uniform() {
    let profile = AccessoryProfile::hat();
    let pose = estimate(Some(&face_frame(0.12)), &profile, 1.0);

    assert_pose_finite(&pose);
    assert!((pose.scale.x - 1.44).abs() < 1e-9);
    assert_eq!(pose.scale.x, pose.scale.y);
    assert_eq!(pose.scale.y, pose.scale.z);
}

#[test]
fn test_estimation_is_deterministic() {
    let registry = ProfileRegistry::default();
    let frame = FaceGeometry {
        eye_depth_skew: 0.013,
        center_x: 0.47,
        ..FaceGeometry::default()
    }
    .frame();

    for category in AccessoryCategory::ALL {
        let profile = registry.profile_for(category);
        let first = estimate(Some(&frame), profile, 0.8);
        let second = estimate(Some(&frame), profile, 0.8);
        assert_eq!(first, second, "{category}");
    }
}

#[test]
fn test_no_face_is_not_visible() {
    let profile = AccessoryProfile::glasses();
    assert!(!estimate(None, &profile, 1.0).visible);
    assert_eq!(try_estimate(None, &profile, 1.0), Err(TrackingLoss::NoFace));
}

#[test]
fn test_coincident_temples_are_not_visible() {
    for profile in [AccessoryProfile::glasses(), AccessoryProfile::hat()] {
        let result = try_estimate(Some(&face_frame(0.0)), &profile, 1.0);
        assert_eq!(result, Err(TrackingLoss::DegenerateReference));
    }
}

#[test]
fn test_collapsed_eyes_are_not_visible() {
    let frame = FaceGeometry {
        eye_span: 0.0,
        ..FaceGeometry::default()
    }
    .frame();
    let result = try_estimate(Some(&frame), &AccessoryProfile::glasses(), 1.0);
    assert_eq!(result, Err(TrackingLoss::DegenerateAxis));
}

#[test]
fn test_scale_clamps_exactly_to_bounds() {
    let profile = AccessoryProfile::glasses();

    let small = estimate(Some(&face_frame(0.01)), &profile, 1.0);
    assert_eq!(small.scale.x, profile.scale_clamp.min);

    let large = estimate(Some(&face_frame(0.9)), &profile, 1.0);
    assert_eq!(large.scale.x, profile.scale_clamp.max);
}

#[test]
fn test_zero_reference_width_clamps_instead_of_dividing_by_zero() {
    let profile = AccessoryProfile::glasses();
    let pose = estimate(Some(&face_frame(0.12)), &profile, 0.0);

    assert_pose_finite(&pose);
    assert_eq!(pose.scale.x, profile.scale_clamp.max);
}

#[test]
fn test_larger_mesh_scales_down() {
    let profile = AccessoryProfile::glasses();
    let unit = estimate(Some(&face_frame(0.12)), &profile, 1.0);
    let wide = estimate(Some(&face_frame(0.12)), &profile, 1.2);

    assert!(wide.scale.x < unit.scale.x);
    assert!((wide.scale.x - 1.0).abs() < 1e-9);
}

#[test]
fn test_position_follows_face_horizontally() {
    let profile = AccessoryProfile::glasses();
    let centered = estimate(Some(&face_frame_at(0.5, 0.5)), &profile, 1.0);
    let right = estimate(Some(&face_frame_at(0.6, 0.5)), &profile, 1.0);

    assert!(centered.position.x.abs() < 1e-9);
    assert!((right.position.x - 0.31).abs() < 1e-9, "{}", right.position.x);
    // same scale, so only x moves
    assert!((right.position.y - centered.position.y).abs() < 1e-9);
    assert!((right.position.z - centered.position.z).abs() < 1e-9);
}

#[test]
fn test_position_y_points_up() {
    let profile = AccessoryProfile::hat();
    let high = estimate(Some(&face_frame_at(0.5, 0.3)), &profile, 1.0);
    let low = estimate(Some(&face_frame_at(0.5, 0.7)), &profile, 1.0);

    assert!(high.position.y > low.position.y);
}

#[test]
fn test_head_turn_changes_orientation() {
    let profile = AccessoryProfile::glasses();
    let frontal = estimate(Some(&face_frame(0.12)), &profile, 1.0);
    let left = estimate(
        Some(
            &FaceGeometry {
                eye_depth_skew: 0.04,
                ..FaceGeometry::default()
            }
            .frame(),
        ),
        &profile,
        1.0,
    );
    let right = estimate(
        Some(
            &FaceGeometry {
                eye_depth_skew: -0.04,
                ..FaceGeometry::default()
            }
            .frame(),
        ),
        &profile,
        1.0,
    );

    let to_left = frontal.orientation.angle_to(&left.orientation);
    let to_right = frontal.orientation.angle_to(&right.orientation);
    assert!(to_left > 0.1);
    assert!((to_left - to_right).abs() < 1e-9);
    assert!(left.orientation.angle_to(&right.orientation) > to_left);
}

#[test]
fn test_out_of_range_profile_index_is_not_visible() {
    let mut profile = AccessoryProfile::hat();
    profile.width_reference = [234, NUM_FACE_LANDMARKS];
    assert_eq!(
        try_estimate(Some(&face_frame(0.12)), &profile, 1.0),
        Err(TrackingLoss::MissingLandmark)
    );
}

#[test]
fn test_non_finite_landmark_is_not_visible() {
    let mut points = face_frame(0.12).landmarks().to_vec();
    points[landmarks::NOSE_BRIDGE] = Landmark::new(f64::NAN, 0.5, 0.0);
    let frame = LandmarkFrame::new(points).unwrap();

    assert!(!estimate(Some(&frame), &AccessoryProfile::glasses(), 1.0).visible);
}

const KEY_LANDMARKS: [usize; 13] = [
    33,
    133,
    159,
    145,
    362,
    263,
    386,
    374,
    landmarks::LEFT_TEMPLE,
    landmarks::RIGHT_TEMPLE,
    landmarks::FOREHEAD,
    landmarks::NOSE_BRIDGE,
    landmarks::NOSE_TIP,
];

fn perturbed_frame(offsets: &[(f64, f64, f64)]) -> LandmarkFrame {
    let mut points = face_frame(0.12).landmarks().to_vec();
    for (&index, &(dx, dy, dz)) in KEY_LANDMARKS.iter().zip(offsets) {
        let p = points[index];
        points[index] = Landmark::new(p.x + dx, p.y + dy, p.z + dz);
    }
    LandmarkFrame::new(points).unwrap()
}

proptest! {
    #[test]
    fn prop_visible_pose_is_finite_and_clamped(
        offsets in prop::collection::vec((-0.5..0.5f64, -0.5..0.5f64, -0.5..0.5f64), KEY_LANDMARKS.len()),
        width in 0.0..5.0f64,
    ) {
        let frame = perturbed_frame(&offsets);
        let registry = ProfileRegistry::default();

        for category in AccessoryCategory::ALL {
            let profile = registry.profile_for(category);
            let pose = estimate(Some(&frame), profile, width);
            if pose.visible {
                prop_assert!(pose.is_finite());
                prop_assert!(pose.scale.x >= profile.scale_clamp.min);
                prop_assert!(pose.scale.x <= profile.scale_clamp.max);
            }
        }
    }

    #[test]
    fn prop_arbitrary_numbers_never_leak_into_visible_pose(
        values in prop::collection::vec(any::<f64>(), KEY_LANDMARKS.len() * 3),
        width in any::<f64>(),
    ) {
        let mut points = vec![Landmark::default(); NUM_FACE_LANDMARKS];
        for (&index, xyz) in KEY_LANDMARKS.iter().zip(values.chunks_exact(3)) {
            points[index] = Landmark::new(xyz[0], xyz[1], xyz[2]);
        }
        let frame = LandmarkFrame::new(points).unwrap();

        for profile in [AccessoryProfile::glasses(), AccessoryProfile::hat()] {
            let pose = estimate(Some(&frame), &profile, width);
            prop_assert!(!pose.visible || pose.is_finite());
        }
    }
}
