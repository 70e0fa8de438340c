//! Quad mesh topology for vault surfaces.
//!
//! This crate holds the mesh side of the vault pipeline: the floor-plan
//! topology that form-finding solves over, and that the brick voxelizer
//! later walks face by face.
//!
//! - [`QuadMesh`] - polygon faces (quads in practice) over plan vertices
//! - [`FaceAdjacency`] - edge-to-face index and per-face neighbor lists
//! - [`QuadTopology`] - the read-only interface consumers depend on
//! - [`Aabb`] - extents of point sets
//!
//! # Layer 0 Crate
//!
//! No rendering, solver, or I/O dependencies. Coordinates are `f64` and
//! unit-agnostic; the vault tooling uses meters.
//!
//! # Winding
//!
//! Faces produced by [`QuadMesh::grid`] are counter-clockwise when viewed
//! from +Z. Meshes coming from elsewhere may use either winding; the
//! voxelizer orients normals on its own and does not rely on it.
//!
//! # Example
//!
//! ```
//! use vault_mesh::{QuadMesh, QuadTopology};
//!
//! // 4 x 3 m floor plan split into 4 x 3 faces
//! let plan = QuadMesh::grid(4.0, 3.0, 4, 3);
//!
//! assert_eq!(plan.vertex_count(), 20);
//! assert_eq!(plan.face_count(), 12);
//!
//! // Interior face has four edge neighbors
//! assert_eq!(plan.face_neighbors(5).len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod bounds;
mod mesh;
mod traits;

pub use adjacency::FaceAdjacency;
pub use bounds::Aabb;
pub use mesh::QuadMesh;
pub use traits::QuadTopology;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
