//! Per-accessory tracking: estimation, smoothing and reset rules in one place.
//!
//! One [`AccessoryTracker`] owns the smoothing state of one attached
//! accessory. It is driven once per landmark frame by a single caller and
//! never shares state with other trackers.

use crate::{
    filters::{create_filter, FilterKind, PoseFilter},
    landmarks::LandmarkFrame,
    pose::Pose,
    pose_estimation::try_estimate,
    profile::AccessoryProfile,
    registry::{AccessoryCategory, ProfileRegistry},
    tracking_monitor::{TrackingEvent, TrackingMonitor, TrackingStats},
    Error, Result,
};
use log::{debug, info};

/// Identity and reference width of a loaded mesh asset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshReference {
    /// Asset identity; a different id means a differently proportioned mesh
    pub id: u64,
    /// Bounding-box width in the mesh's local units
    pub width: f64,
}

impl MeshReference {
    /// Validate and build a mesh reference
    ///
    /// # Errors
    ///
    /// Returns an error if the width is not a positive finite number
    pub fn new(id: u64, width: f64) -> Result<Self> {
        let mesh = Self { id, width };
        mesh.validate()?;
        Ok(mesh)
    }

    fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(Error::InvalidMesh(format!(
                "mesh {} has unusable reference width {}",
                self.id, self.width
            )));
        }
        Ok(())
    }
}

/// Pose to apply this frame, with any tracking state change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPose {
    pub pose: Pose,
    pub event: Option<TrackingEvent>,
}

/// Tracks one accessory instance across frames
pub struct AccessoryTracker {
    category: AccessoryCategory,
    profile: AccessoryProfile,
    mesh: Option<MeshReference>,
    filter: Box<dyn PoseFilter>,
    monitor: TrackingMonitor,
}

impl AccessoryTracker {
    /// Create a tracker for a category using the registry's profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile's smoothing factor is invalid
    pub fn new(category: AccessoryCategory, registry: &ProfileRegistry, filter_kind: FilterKind) -> Result<Self> {
        let profile = registry.profile_for(category).clone();
        let filter = create_filter(filter_kind, profile.smoothing_alpha)?;
        info!(
            "Tracking {} with {} (alpha {})",
            category,
            filter.name(),
            profile.smoothing_alpha
        );

        Ok(Self {
            category,
            profile,
            mesh: None,
            filter,
            monitor: TrackingMonitor::new(),
        })
    }

    #[must_use]
    pub fn category(&self) -> AccessoryCategory {
        self.category
    }

    #[must_use]
    pub fn profile(&self) -> &AccessoryProfile {
        &self.profile
    }

    #[must_use]
    pub fn mesh(&self) -> Option<MeshReference> {
        self.mesh
    }

    #[must_use]
    pub fn stats(&self) -> TrackingStats {
        self.monitor.stats()
    }

    /// Attach a mesh, resetting smoothing when its identity changes
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh width is unusable; the current mesh is kept
    pub fn attach_mesh(&mut self, mesh: MeshReference) -> Result<()> {
        mesh.validate()?;

        let changed = self.mesh.map_or(true, |current| current.id != mesh.id);
        if changed {
            info!("{}: attached mesh {} (width {})", self.category, mesh.id, mesh.width);
            self.reset();
        }
        self.mesh = Some(mesh);
        Ok(())
    }

    /// Detach the current mesh; later frames are not visible until a new one arrives
    pub fn detach_mesh(&mut self) {
        if let Some(mesh) = self.mesh.take() {
            info!("{}: detached mesh {}", self.category, mesh.id);
        }
        self.reset();
    }

    /// Drop smoothing history so the next visible pose snaps
    pub fn reset(&mut self) {
        self.filter.reset();
        self.monitor.reset();
    }

    /// Process one landmark frame; `None` means no face was detected
    pub fn process(&mut self, frame: Option<&LandmarkFrame>) -> TrackedPose {
        let Some(mesh) = self.mesh else {
            return TrackedPose {
                pose: Pose::hidden(),
                event: None,
            };
        };

        let (pose, outcome) = match try_estimate(frame, &self.profile, mesh.width) {
            Ok(raw) => (self.filter.apply(&raw), Ok(())),
            Err(reason) => {
                debug!("{}: frame not visible: {}", self.category, reason);
                self.filter.reset();
                (Pose::hidden(), Err(reason))
            }
        };

        let event = self.monitor.update(outcome);
        if let Some(event) = event {
            info!("{}: tracking {}", self.category, event);
        }

        TrackedPose { pose, event }
    }
}
