//! Render preparation for brick assemblies.
//!
//! Turns an assembly into plain polygon data and per-brick scalars that a
//! plotting or export layer can consume without knowing brick layout.

// Surface vertex indices are u32; assemblies beyond 500M bricks are not supported.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use nalgebra::Point3;
use vault_mesh::Aabb;

use crate::assembly::{BRICK_FACE_CORNERS, BrickAssembly};

/// Per-brick coloring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorBy {
    /// Single color for every brick.
    #[default]
    Uniform,
    /// Brick center height (z).
    Height,
    /// Number of adjacent bricks.
    NeighborCount,
}

impl std::fmt::Display for ColorBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Height => write!(f, "height"),
            Self::NeighborCount => write!(f, "neighbors"),
        }
    }
}

/// Scalar value per brick for the chosen mode, or `None` for [`ColorBy::Uniform`].
///
/// # Example
///
/// ```
/// use vault_mesh::QuadMesh;
/// use vault_voxel::{brick_values, voxelize_mesh, ColorBy, VoxelizeParams};
///
/// let plan = QuadMesh::grid(2.0, 1.0, 2, 1);
/// let bricks = voxelize_mesh(&plan, &VoxelizeParams::default()).unwrap();
///
/// assert_eq!(brick_values(&bricks, ColorBy::NeighborCount), Some(vec![1.0, 1.0]));
/// assert_eq!(brick_values(&bricks, ColorBy::Uniform), None);
/// ```
#[must_use]
pub fn brick_values(assembly: &BrickAssembly, color_by: ColorBy) -> Option<Vec<f64>> {
    match color_by {
        ColorBy::Uniform => None,
        ColorBy::Height => Some(assembly.center_heights()),
        ColorBy::NeighborCount => Some(
            assembly
                .neighbor_counts()
                .into_iter()
                .map(|n| n as f64)
                .collect(),
        ),
    }
}

/// Min-max scale values into `[0, 1]`.
///
/// A constant (or empty) series maps to all zeros.
#[must_use]
pub fn normalize_values(values: &[f64]) -> Vec<f64> {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = hi - lo;
    if span.is_nan() || span <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - lo) / span).collect()
}

/// All brick faces of an assembly as one indexed quad surface.
///
/// Every brick contributes its 8 corners and 6 quads, in
/// [`brick_faces`](crate::brick_faces) order; bricks do not share vertices.
#[derive(Debug, Clone, Default)]
pub struct BrickSurface {
    /// Corner positions, 8 per brick.
    pub positions: Vec<Point3<f64>>,
    /// Quads indexing into `positions`, 6 per brick.
    pub quads: Vec<[u32; 4]>,
    /// Brick index of each quad.
    pub brick_of_quad: Vec<usize>,
}

impl BrickSurface {
    /// Collect the surface of every brick.
    #[must_use]
    pub fn from_assembly(assembly: &BrickAssembly) -> Self {
        let n = assembly.len();
        let mut surface = Self {
            positions: Vec::with_capacity(n * 8),
            quads: Vec::with_capacity(n * 6),
            brick_of_quad: Vec::with_capacity(n * 6),
        };

        for (brick, corners) in assembly.corners().iter().enumerate() {
            let base = surface.positions.len() as u32;
            surface.positions.extend_from_slice(corners);
            for quad in BRICK_FACE_CORNERS {
                surface.quads.push(quad.map(|k| base + k as u32));
                surface.brick_of_quad.push(brick);
            }
        }

        surface
    }

    /// Number of bricks represented.
    #[must_use]
    pub fn brick_count(&self) -> usize {
        self.positions.len() / 8
    }

    /// Plot limits: the extents of every corner grown by `pad` on each side.
    ///
    /// An empty surface gives an empty box.
    #[must_use]
    pub fn view_bounds(&self, pad: f64) -> Aabb {
        Aabb::from_points(self.positions.iter()).padded(pad)
    }

    /// Split every quad into two triangles along the 0-2 diagonal.
    #[must_use]
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.quads
            .iter()
            .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
            .collect()
    }

    /// Per-quad values, repeating each brick's value over its six faces.
    ///
    /// Returns `None` if `brick_values` does not have one value per brick.
    #[must_use]
    pub fn quad_values(&self, brick_values: &[f64]) -> Option<Vec<f64>> {
        if brick_values.len() != self.brick_count() {
            return None;
        }
        Some(self.brick_of_quad.iter().map(|&b| brick_values[b]).collect())
    }
}
