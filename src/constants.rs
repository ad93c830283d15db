//! Constants used throughout the library

/// Number of landmarks in one face mesh frame
pub const NUM_FACE_LANDMARKS: usize = 468;

/// Numeric guard for every division, normalization and cross product
pub const EPSILON: f64 = 1e-6;

/// Normalized view space to world space factor
pub const VIEW_SCALE: f64 = 3.1;

/// World depth of a landmark with zero relative depth
pub const DEPTH_BASE: f64 = -2.1;

/// World depth per unit of landmark depth
pub const DEPTH_MULTIPLIER: f64 = 2.6;

/// Default smoothing factor
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.3;

/// Landmark topology indices
pub mod landmarks {
    /// Left eye cluster: outer corner, inner corner, upper lid, lower lid
    pub const LEFT_EYE: [usize; 4] = [33, 133, 159, 145];
    /// Right eye cluster: inner corner, outer corner, upper lid, lower lid
    pub const RIGHT_EYE: [usize; 4] = [362, 263, 386, 374];
    pub const LEFT_TEMPLE: usize = 234;
    pub const RIGHT_TEMPLE: usize = 454;
    pub const FOREHEAD: usize = 10;
    pub const NOSE_BRIDGE: usize = 168;
    pub const NOSE_TIP: usize = 1;
}
