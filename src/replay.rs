//! Replay of recorded landmark streams through a tracker.
//!
//! Recordings are JSON lines, one frame per line:
//!
//! ```text
//! {"landmarks": [{"x": 0.5, "y": 0.4, "z": -0.02}, ...]}
//! {"landmarks": null}
//! ```
//!
//! A `null` (or missing) landmark list marks a frame with no face. Each
//! processed frame produces one [`PoseRecord`] line on the output.

use crate::{
    landmarks::{Landmark, LandmarkFrame},
    tracker::{AccessoryTracker, TrackedPose},
    tracking_monitor::TrackingStats,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// One recorded detector output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

/// One applied pose, as written to the output stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub frame: u64,
    pub visible: bool,
    pub position: [f64; 3],
    /// Quaternion as `[x, y, z, w]`
    pub orientation: [f64; 4],
    pub scale: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

impl PoseRecord {
    #[must_use]
    pub fn new(frame: u64, tracked: &TrackedPose) -> Self {
        let pose = &tracked.pose;
        let q = pose.orientation.coords;
        Self {
            frame,
            visible: pose.visible,
            position: [pose.position.x, pose.position.y, pose.position.z],
            orientation: [q.x, q.y, q.z, q.w],
            scale: [pose.scale.x, pose.scale.y, pose.scale.z],
            event: tracked.event.map(|e| e.to_string()),
        }
    }
}

/// Iterator over the frames of a JSON-lines recording
pub struct RecordingReader<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> RecordingReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    fn parse(&self, line: &str) -> Result<Option<LandmarkFrame>> {
        let record: FrameRecord = serde_json::from_str(line)
            .map_err(|e| Error::InvalidInput(format!("line {}: {e}", self.line_number)))?;

        record
            .landmarks
            .map(LandmarkFrame::new)
            .transpose()
            .map_err(|e| Error::InvalidInput(format!("line {}: {e}", self.line_number)))
    }
}

impl<R: BufRead> Iterator for RecordingReader<R> {
    type Item = Result<Option<LandmarkFrame>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(self.parse(trimmed));
        }
    }
}

/// Run every frame of a recording through the tracker, writing one pose per line
///
/// # Errors
///
/// Returns an error on unreadable or malformed input, or if writing fails
pub fn replay<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    tracker: &mut AccessoryTracker,
) -> Result<TrackingStats> {
    let mut frame_index = 0_u64;

    for frame in RecordingReader::new(reader) {
        let frame = frame?;
        let tracked = tracker.process(frame.as_ref());

        serde_json::to_writer(&mut writer, &PoseRecord::new(frame_index, &tracked))?;
        writer.write_all(b"\n")?;
        frame_index += 1;
    }

    writer.flush()?;
    Ok(tracker.stats())
}
