//! Accessory categories and the read-only profile registry.

use crate::{profile::AccessoryProfile, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of supported accessory kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessoryCategory {
    /// Eyewear
    Glasses,
    /// Headwear
    Hat,
}

impl AccessoryCategory {
    pub const ALL: [Self; 2] = [Self::Glasses, Self::Hat];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Glasses => "glasses",
            Self::Hat => "hat",
        }
    }
}

impl fmt::Display for AccessoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccessoryCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "glasses" | "eyewear" => Ok(Self::Glasses),
            "hat" | "headwear" => Ok(Self::Hat),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// One profile per category, validated once and shared read-only.
///
/// Only built through [`ProfileRegistry::new`] or `Default`, so every
/// registry has passed validation and is total over [`AccessoryCategory`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRegistry {
    glasses: AccessoryProfile,
    hat: AccessoryProfile,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self {
            glasses: AccessoryProfile::glasses(),
            hat: AccessoryProfile::hat(),
        }
    }
}

impl ProfileRegistry {
    /// Build a registry from explicit profiles
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any profile is malformed
    pub fn new(glasses: AccessoryProfile, hat: AccessoryProfile) -> Result<Self> {
        let registry = Self { glasses, hat };
        registry.validate()?;
        Ok(registry)
    }

    /// Profile for a category; total over the enumeration
    #[must_use]
    pub fn profile_for(&self, category: AccessoryCategory) -> &AccessoryProfile {
        match category {
            AccessoryCategory::Glasses => &self.glasses,
            AccessoryCategory::Hat => &self.hat,
        }
    }

    /// Validate every profile
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found
    pub fn validate(&self) -> Result<()> {
        for category in AccessoryCategory::ALL {
            self.profile_for(category).validate(category.name())?;
        }
        Ok(())
    }
}
