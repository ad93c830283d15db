//! End-to-end replay of recorded landmark streams


use accessory_pose::{
    filters::FilterKind,
    pose_estimation::estimate,
    registry::{AccessoryCategory, ProfileRegistry},
    replay::{replay, FrameRecord, PoseRecord},
    tracker::{AccessoryTracker, MeshReference},
};
use std::fmt::Write as _;
use test_helpers::{face_frame, face_frame_at};

fn recording(frames: &[Option<f64>]) -> String {
    let mut out = String::new();
    for frame in frames {
        let record = FrameRecord {
            landmarks: frame.map(|x| face_frame_at(x, 0.5).landmarks().to_vec()),
        };
        writeln!(out, "{}", serde_json::to_string(&record).unwrap()).unwrap();
    }
    out
}

fn glasses_tracker() -> AccessoryTracker {
    let mut tracker =
        AccessoryTracker::new(AccessoryCategory::Glasses, &ProfileRegistry::default(), FilterKind::Exponential).unwrap();
    tracker.attach_mesh(MeshReference::new(3, 1.0).unwrap()).unwrap();
    tracker
}

fn parse_output(output: &[u8]) -> Vec<PoseRecord> {
    std::str::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_replay_writes_one_record_per_frame() {
    let input = recording(&[Some(0.5), Some(0.52), None, Some(0.5)]);
    let mut output = Vec::new();
    let mut tracker = glasses_tracker();

    let stats = replay(input.as_bytes(), &mut output, &mut tracker).unwrap();
    let records = parse_output(&output);

    assert_eq!(records.len(), 4);
    assert_eq!(
        records.iter().map(|r| r.frame).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
    assert_eq!(
        records.iter().map(|r| r.visible).collect::<Vec<_>>(),
        vec![true, true, false, true]
    );
    assert_eq!(records[0].event.as_deref(), Some("acquired"));
    assert_eq!(records[1].event, None);
    assert_eq!(records[2].event.as_deref(), Some("lost (no face in frame)"));
    assert_eq!(records[3].event.as_deref(), Some("acquired"));

    assert_eq!(stats.frames, 4);
    assert_eq!(stats.visible_frames, 3);
}

#[test]
fn test_replayed_pose_matches_estimate() {
    let input = recording(&[Some(0.5)]);
    let mut output = Vec::new();
    let mut tracker = glasses_tracker();
    replay(input.as_bytes(), &mut output, &mut tracker).unwrap();

    let record = &parse_output(&output)[0];
    let raw = estimate(Some(&face_frame(0.12)), tracker.profile(), 1.0);
    let q = raw.orientation.coords;

    assert_close(&record.position, &[raw.position.x, raw.position.y, raw.position.z]);
    assert_close(&record.orientation, &[q.x, q.y, q.z, q.w]);
    assert_close(&record.scale, &[raw.scale.x, raw.scale.y, raw.scale.z]);
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-12, "{actual:?} vs {expected:?}");
    }
}

#[test]
fn test_replay_stops_on_malformed_line() {
    let mut input = recording(&[Some(0.5)]);
    input.push_str("{\"landmarks\": 7}\n");
    let mut output = Vec::new();

    let err = replay(input.as_bytes(), &mut output, &mut glasses_tracker()).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn test_empty_recording() {
    let mut output = Vec::new();
    let stats = replay("".as_bytes(), &mut output, &mut glasses_tracker()).unwrap();

    assert!(output.is_empty());
    assert_eq!(stats.frames, 0);
    assert_eq!(stats.visibility_ratio(), 0.0);
}
