//! Parameters for voxelization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{VoxelError, VoxelResult};

/// Default brick depth in meters.
pub const DEFAULT_THICKNESS: f64 = 0.2;

/// Default diagonal cross-product length at or below which a face is degenerate.
pub const DEFAULT_DEGENERATE_TOLERANCE: f64 = 1e-12;

/// What to do with a face whose normal cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DegeneratePolicy {
    /// Fail the whole operation, naming the face.
    #[default]
    Reject,

    /// Use the mean of the neighboring faces' normals and flag the brick.
    ///
    /// Still fails when the face has no neighbor with a valid normal.
    NeighborAverage,
}

impl std::fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::NeighborAverage => write!(f, "neighbor-average"),
        }
    }
}

/// Parameters for [`voxelize`](crate::voxelize).
///
/// # Example
///
/// ```
/// use vault_voxel::{DegeneratePolicy, VoxelizeParams};
///
/// let params = VoxelizeParams::default();
/// assert!((params.thickness - 0.2).abs() < 1e-12);
///
/// let params = VoxelizeParams::with_thickness(0.12)
///     .degenerate_policy(DegeneratePolicy::NeighborAverage)
///     .parallel(false);
/// assert!(params.validate().is_ok());
///
/// assert!(VoxelizeParams::with_thickness(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelizeParams {
    /// Uniform brick depth along the outward normal, in mesh units.
    pub thickness: f64,

    /// Faces whose diagonal cross product is this short or shorter are degenerate.
    pub degenerate_tolerance: f64,

    /// Handling of degenerate faces.
    pub degenerate_policy: DegeneratePolicy,

    /// Whether to use parallel processing (via rayon).
    ///
    /// Results are identical either way.
    pub parallel: bool,
}

impl Default for VoxelizeParams {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
            degenerate_tolerance: DEFAULT_DEGENERATE_TOLERANCE,
            degenerate_policy: DegeneratePolicy::Reject,
            parallel: true,
        }
    }
}

impl VoxelizeParams {
    /// Default params with a custom brick thickness.
    #[must_use]
    pub fn with_thickness(thickness: f64) -> Self {
        Self {
            thickness,
            ..Self::default()
        }
    }

    /// Params that tolerate degenerate faces by borrowing neighbor normals.
    ///
    /// Suited to meshes straight out of form-finding, where a few faces
    /// near the supports can collapse.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            degenerate_policy: DegeneratePolicy::NeighborAverage,
            ..Self::default()
        }
    }

    /// Set the brick thickness.
    #[must_use]
    pub const fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the degenerate-face tolerance.
    #[must_use]
    pub const fn degenerate_tolerance(mut self, tolerance: f64) -> Self {
        self.degenerate_tolerance = tolerance;
        self
    }

    /// Set the degenerate-face policy.
    #[must_use]
    pub const fn degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Enable or disable rayon.
    #[must_use]
    pub const fn parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Check the parameters, thickness first.
    ///
    /// # Errors
    ///
    /// [`VoxelError::InvalidThickness`] for a non-positive or non-finite
    /// thickness, [`VoxelError::InvalidParams`] for a negative or non-finite
    /// tolerance.
    pub fn validate(&self) -> VoxelResult<Thickness> {
        let thickness = Thickness::new(self.thickness)?;
        if !self.degenerate_tolerance.is_finite() || self.degenerate_tolerance < 0.0 {
            return Err(VoxelError::invalid_params(format!(
                "degenerate tolerance must be finite and non-negative, got {}",
                self.degenerate_tolerance
            )));
        }
        Ok(thickness)
    }
}

/// A brick depth known to be positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Thickness(f64);

impl Thickness {
    /// Validate a raw thickness.
    ///
    /// # Errors
    ///
    /// [`VoxelError::InvalidThickness`] unless `value > 0` and finite.
    pub fn new(value: f64) -> VoxelResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(VoxelError::InvalidThickness { thickness: value })
        }
    }

    /// The raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}
