//! Error types for the accessory pose library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration could not be parsed or written
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON recording or output could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Accessory category name not in the closed set
    #[error("Unknown accessory category: {0}")]
    UnknownCategory(String),

    /// Filter name not recognized
    #[error("Unknown filter type: {0}")]
    UnknownFilter(String),

    /// Mesh reference width unusable for scaling
    #[error("Invalid mesh reference: {0}")]
    InvalidMesh(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Why a frame produced no visible pose.
///
/// These are expected per-frame outcomes, not failures; they never leave the
/// library as an `Err`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingLoss {
    /// The detector reported no face for this frame
    #[error("no face in frame")]
    NoFace,

    /// The scale reference distance was zero, tiny or non-finite
    #[error("degenerate reference distance")]
    DegenerateReference,

    /// An orientation axis or cross product collapsed below epsilon
    #[error("degenerate orientation axis")]
    DegenerateAxis,

    /// A profile referenced a landmark index outside the frame
    #[error("landmark index out of range")]
    MissingLandmark,

    /// An intermediate value was NaN or infinite
    #[error("non-finite intermediate value")]
    NonFinite,
}
