//! Tracking state transitions for one accessory instance.
//!
//! The monitor turns the per-frame visible/not-visible outcome into
//! acquisition and loss events, so hosts can react to changes (status UI,
//! telemetry) without inspecting every frame.

use crate::error::TrackingLoss;
use std::fmt;

/// A change in tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingEvent {
    /// A visible pose after one or more lost frames (or the first ever)
    Acquired,
    /// The first lost frame after visible tracking
    Lost(TrackingLoss),
}

impl fmt::Display for TrackingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acquired => f.write_str("acquired"),
            Self::Lost(reason) => write!(f, "lost ({reason})"),
        }
    }
}

/// Counters accumulated since the monitor was created or reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackingStats {
    /// Frames observed
    pub frames: u64,
    /// Frames that produced a visible pose
    pub visible_frames: u64,
    /// Transitions into tracking
    pub acquisitions: u64,
    /// Transitions out of tracking
    pub losses: u64,
    /// Reason for the most recent lost frame
    pub last_loss: Option<TrackingLoss>,
}

impl TrackingStats {
    /// Fraction of observed frames that were visible
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // frame counts stay far below 2^52
    pub fn visibility_ratio(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.visible_frames as f64 / self.frames as f64
    }
}

/// Edge detector over per-frame tracking outcomes
#[derive(Debug, Clone, Default)]
pub struct TrackingMonitor {
    tracking: bool,
    stats: TrackingStats,
}

impl TrackingMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame outcome and report a state change, if any
    pub fn update(&mut self, outcome: Result<(), TrackingLoss>) -> Option<TrackingEvent> {
        self.stats.frames += 1;

        match outcome {
            Ok(()) => {
                self.stats.visible_frames += 1;
                if self.tracking {
                    return None;
                }
                self.tracking = true;
                self.stats.acquisitions += 1;
                Some(TrackingEvent::Acquired)
            }
            Err(reason) => {
                self.stats.last_loss = Some(reason);
                if !self.tracking {
                    return None;
                }
                self.tracking = false;
                self.stats.losses += 1;
                Some(TrackingEvent::Lost(reason))
            }
        }
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    #[must_use]
    pub fn stats(&self) -> TrackingStats {
        self.stats
    }

    /// Return to the not-tracking state, keeping counters
    pub fn reset(&mut self) {
        self.tracking = false;
    }
}
