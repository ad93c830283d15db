//! Configuration management for accessory tracking

use crate::{
    filters::FilterKind,
    profile::AccessoryProfile,
    registry::{AccessoryCategory, ProfileRegistry},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Placement profile per accessory category
    pub profiles: ProfilesConfig,

    /// Tracking configuration
    pub tracking: TrackingConfig,
}

/// Profiles section; an omitted category keeps its built-in profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesConfig {
    #[serde(default = "AccessoryProfile::glasses")]
    pub glasses: AccessoryProfile,

    #[serde(default = "AccessoryProfile::hat")]
    pub hat: AccessoryProfile,
}

/// Tracking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackingConfig {
    /// Pose filter applied after estimation
    pub filter: FilterKind,

    /// Category used when none is given on the command line
    pub default_category: AccessoryCategory,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            glasses: AccessoryProfile::glasses(),
            hat: AccessoryProfile::hat(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            filter: FilterKind::Exponential,
            default_category: AccessoryCategory::Glasses,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed YAML or unknown keys
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found in any profile
    pub fn validate(&self) -> Result<()> {
        self.registry().map(|_| ())
    }

    /// Validated, read-only profile registry
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any profile is malformed
    pub fn registry(&self) -> Result<ProfileRegistry> {
        ProfileRegistry::new(self.profiles.glasses.clone(), self.profiles.hat.clone())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Accessory pose configuration
#
# Every coefficient below was tuned by eye; recalibrate against recorded
# face scans before changing them in production.

profiles:
  glasses:
    anchor:
      kind: eye_bridge
      left_eye: [33, 133, 159, 145]
      right_eye: [362, 263, 386, 374]
      nose_bridge: 168
      bridge_weight: 0.18
      vertical_reference: 1
      vertical_anchor_weight: 0.7
    width_reference: [234, 454]
    width_multiplier: 10.0
    scale_clamp:
      min: 0.75
      max: 2.8
    axis_ratios:
      width: 1.0
      height: 0.82
      depth: 1.3
    placement:
      view_scale: 3.1
      depth_base: -2.1
      depth_multiplier: 2.6
      vertical_offset: -0.04
      vertical_compensation: 0.06
      depth_compensation: 0.18
    orientation:
      kind: damped_euler
      left: [33, 133, 159, 145]
      right: [362, 263, 386, 374]
      brow: 10
      yaw_damping: 0.8
      pitch_damping: 0.75
      pitch_bias: 0.08
      roll_damping: 0.55
      roll_brow_gain: 0.3
    smoothing_alpha: 0.3

  hat:
    anchor:
      kind: landmark
      index: 10
    width_reference: [234, 454]
    width_multiplier: 12.0
    scale_clamp:
      min: 0.9
      max: 3.5
    axis_ratios:
      width: 1.0
      height: 1.0
      depth: 1.0
    placement:
      view_scale: 3.1
      depth_base: -2.1
      depth_multiplier: 2.6
      vertical_offset: 0.5
      vertical_compensation: 0.0
      depth_compensation: 0.0
    orientation:
      kind: temple_basis
      left: 234
      right: 454
      top: 10
      bottom: 168
      damping: 1.0
    smoothing_alpha: 0.3

# Tracking
tracking:
  filter: exponential
  default_category: glasses
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_matches_defaults() {
        let config = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        config.validate().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let yaml = "profiles:\n  necklace:\n    width_multiplier: 3.0\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_unknown_default_category_rejected() {
        assert!(Config::from_yaml("tracking:\n  default_category: scarf\n").is_err());
    }

    #[test]
    fn test_incomplete_profile_rejected() {
        let yaml = "profiles:\n  hat:\n    width_multiplier: 12.0\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_validate_catches_bad_coefficients() {
        let mut config = Config::default();
        config.profiles.glasses.scale_clamp.min = -1.0;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_partial_tracking_section() {
        let config = Config::from_yaml("tracking:\n  filter: none\n").unwrap();
        assert_eq!(config.tracking.filter, FilterKind::None);
        assert_eq!(config.tracking.default_category, AccessoryCategory::Glasses);
    }
}
