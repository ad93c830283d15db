//! Pose estimation for face-attached AR accessories.
//!
//! This library turns a per-frame set of 468 facial landmarks into a stable
//! rigid-body transform (position, orientation, per-axis scale) for an
//! eyewear or headwear mesh:
//! 1. A read-only profile registry holds per-category anchors and tuning
//! 2. A pure estimator maps one landmark frame to a raw pose, or not-visible
//! 3. An exponential smoother (lerp + slerp) removes frame-to-frame jitter
//! 4. A per-accessory tracker enforces the reset rules between them
//!
//! Landmark detection, mesh loading and rendering stay outside: the detector
//! hands in frames, the mesh loader hands in a reference width, and the
//! renderer consumes one [`pose::Pose`] per frame.
//!
//! # Examples
//!
//! ```
//! use accessory_pose::{
//!     filters::FilterKind,
//!     landmarks::{Landmark, LandmarkFrame},
//!     registry::{AccessoryCategory, ProfileRegistry},
//!     tracker::{AccessoryTracker, MeshReference},
//! };
//!
//! # fn main() -> accessory_pose::Result<()> {
//! let registry = ProfileRegistry::default();
//! let mut tracker = AccessoryTracker::new(AccessoryCategory::Glasses, &registry, FilterKind::Exponential)?;
//! tracker.attach_mesh(MeshReference::new(1, 1.0)?)?;
//!
//! // Every landmark coincides, so the temple distance collapses
//! let frame = LandmarkFrame::new(vec![Landmark::new(0.5, 0.5, 0.0); 468])?;
//! assert!(!tracker.process(Some(&frame)).pose.visible);
//!
//! // No face detected
//! assert!(!tracker.process(None).pose.visible);
//! # Ok(())
//! # }
//! ```

/// Constants used throughout the library
pub mod constants;

/// Error types and result handling
pub mod error;

/// Landmark points and frames from the face mesh detector
pub mod landmarks;

/// Pose output type
pub mod pose;

/// Per-category placement profiles
pub mod profile;

/// Accessory categories and the profile registry
pub mod registry;

/// Numeric validity checks for the per-frame path
pub mod guard;

/// Landmark-to-pose estimation
pub mod pose_estimation;

/// Temporal pose filters
pub mod filters;

/// Tracking state transitions and statistics
pub mod tracking_monitor;

/// Per-accessory tracking
pub mod tracker;

/// Configuration management
pub mod config;

/// Replay of recorded landmark streams
pub mod replay;

pub use error::{Error, Result, TrackingLoss};
