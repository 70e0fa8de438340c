//! The brick assembly produced by voxelization.

use nalgebra::{Point3, Vector3};
use vault_mesh::Aabb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adjacency::{is_symmetric, pair_count};

/// Corner indices of the six brick faces, in [`brick_faces`] order.
///
/// Outer face first, then the inner face with reversed winding, then the
/// four sides in outer-edge order.
pub const BRICK_FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [7, 6, 5, 4],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// The six quad faces of a brick.
///
/// `corners` holds the outer quad in 0-3 and the inner quad in 4-7. The
/// result is the outer face (0,1,2,3), the inner face (7,6,5,4) and the
/// sides (0,1,5,4), (1,2,6,5), (2,3,7,6), (3,0,4,7).
///
/// # Example
///
/// ```
/// use vault_voxel::{brick_faces, Point3};
///
/// let mut corners = [Point3::origin(); 8];
/// for (k, c) in corners.iter_mut().enumerate() {
///     c.x = k as f64;
/// }
/// let faces = brick_faces(&corners);
///
/// assert_eq!(faces.len(), 6);
/// assert_eq!(faces[1][0].x, 7.0);
/// assert_eq!(faces[5][1].x, 0.0);
/// ```
#[must_use]
pub fn brick_faces(corners: &[Point3<f64>; 8]) -> [[Point3<f64>; 4]; 6] {
    BRICK_FACE_CORNERS.map(|quad| quad.map(|k| corners[k]))
}

/// A set of bricks derived from a vault mesh, one per voxelized face.
///
/// Stored as parallel arrays indexed by brick. The assembly is built once
/// by [`voxelize`](crate::voxelize) and not edited afterwards; a changed
/// mesh or thickness means a new assembly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrickAssembly {
    centers: Vec<Point3<f64>>,
    normals: Vec<Vector3<f64>>,
    neighbors: Vec<Vec<usize>>,
    thickness: f64,
    corners: Vec<[Point3<f64>; 8]>,
    face_vertices: Vec<[u32; 4]>,
    source_faces: Vec<usize>,
    degenerate: Vec<usize>,
}

/// Column data for [`BrickAssembly::from_parts`].
#[derive(Debug, Clone, Default)]
pub(crate) struct AssemblyParts {
    pub centers: Vec<Point3<f64>>,
    pub normals: Vec<Vector3<f64>>,
    pub neighbors: Vec<Vec<usize>>,
    pub thickness: f64,
    pub corners: Vec<[Point3<f64>; 8]>,
    pub face_vertices: Vec<[u32; 4]>,
    pub source_faces: Vec<usize>,
    pub degenerate: Vec<usize>,
}

impl BrickAssembly {
    pub(crate) fn from_parts(parts: AssemblyParts) -> Self {
        debug_assert_eq!(parts.centers.len(), parts.normals.len());
        debug_assert_eq!(parts.centers.len(), parts.neighbors.len());
        debug_assert_eq!(parts.centers.len(), parts.corners.len());
        debug_assert_eq!(parts.centers.len(), parts.face_vertices.len());
        debug_assert_eq!(parts.centers.len(), parts.source_faces.len());

        Self {
            centers: parts.centers,
            normals: parts.normals,
            neighbors: parts.neighbors,
            thickness: parts.thickness,
            corners: parts.corners,
            face_vertices: parts.face_vertices,
            source_faces: parts.source_faces,
            degenerate: parts.degenerate,
        }
    }

    /// Number of bricks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// True when there are no bricks.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Brick centers, halfway between outer and inner face.
    #[inline]
    #[must_use]
    pub fn centers(&self) -> &[Point3<f64>] {
        &self.centers
    }

    /// Outward unit normals.
    #[inline]
    #[must_use]
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    /// Adjacent brick indices per brick, sorted.
    #[inline]
    #[must_use]
    pub fn neighbors(&self) -> &[Vec<usize>] {
        &self.neighbors
    }

    /// Uniform brick depth.
    #[inline]
    #[must_use]
    pub const fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Eight corners per brick: outer quad 0-3, inner quad 4-7.
    #[inline]
    #[must_use]
    pub fn corners(&self) -> &[[Point3<f64>; 8]] {
        &self.corners
    }

    /// Mesh vertex indices of the face each brick came from.
    #[inline]
    #[must_use]
    pub fn face_vertices(&self) -> &[[u32; 4]] {
        &self.face_vertices
    }

    /// Mesh face key each brick came from.
    #[inline]
    #[must_use]
    pub fn source_faces(&self) -> &[usize] {
        &self.source_faces
    }

    /// Bricks whose normal was borrowed from neighbors, sorted.
    #[inline]
    #[must_use]
    pub fn degenerate(&self) -> &[usize] {
        &self.degenerate
    }

    /// Whether brick `i` got a neighbor-average normal.
    #[must_use]
    pub fn is_degenerate(&self, i: usize) -> bool {
        self.degenerate.binary_search(&i).is_ok()
    }

    /// Six face polygons of brick `i`.
    #[must_use]
    pub fn brick_faces(&self, i: usize) -> Option<[[Point3<f64>; 4]; 6]> {
        self.corners.get(i).map(brick_faces)
    }

    /// Whether bricks `i` and `j` share an edge.
    #[must_use]
    pub fn are_neighbors(&self, i: usize, j: usize) -> bool {
        self.neighbors
            .get(i)
            .is_some_and(|list| list.binary_search(&j).is_ok())
    }

    /// Whether every adjacency entry has its mirror.
    #[must_use]
    pub fn is_adjacency_symmetric(&self) -> bool {
        is_symmetric(&self.neighbors)
    }

    /// Number of undirected adjacency pairs (joints between bricks).
    #[must_use]
    pub fn joint_count(&self) -> usize {
        pair_count(&self.neighbors)
    }

    /// Height (z) of every brick center.
    #[must_use]
    pub fn center_heights(&self) -> Vec<f64> {
        self.centers.iter().map(|c| c.z).collect()
    }

    /// Number of neighbors of every brick.
    #[must_use]
    pub fn neighbor_counts(&self) -> Vec<usize> {
        self.neighbors.iter().map(Vec::len).collect()
    }

    /// Extents of all brick corners.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.corners.iter().flatten())
    }
}

impl std::fmt::Display for BrickAssembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Brick Assembly:")?;
        writeln!(f, "  Bricks: {}", self.len())?;
        writeln!(f, "  Thickness: {:.3}", self.thickness)?;
        writeln!(f, "  Joints: {}", self.joint_count())?;
        if !self.degenerate.is_empty() {
            writeln!(f, "  Degenerate (neighbor normals): {}", self.degenerate.len())?;
        }
        if !self.is_empty() {
            let b = self.bounds();
            writeln!(
                f,
                "  Bounds: ({:.3}, {:.3}, {:.3}) - ({:.3}, {:.3}, {:.3})",
                b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
            )?;
        }
        Ok(())
    }
}
