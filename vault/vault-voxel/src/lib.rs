//! Brick voxelization of vault surfaces.
//!
//! Converts a form-found quad mesh into an assembly of thick bricks. Every
//! face becomes one brick: the face itself is the outer surface, and a copy
//! shifted inward by the brick thickness along the outward face normal is
//! the inner surface. Bricks that come from edge-sharing faces are recorded
//! as neighbors.
//!
//! # Pipeline
//!
//! 1. Parameter and input validation ([`VoxelizeParams`], [`Thickness`])
//! 2. Normal estimation from quad diagonals, oriented away from the vertex
//!    centroid ([`estimate_face_normal`])
//! 3. Extrusion into eight-corner bricks ([`extrude_quad`])
//! 4. Neighbor translation from mesh faces to bricks
//!    ([`build_brick_adjacency`])
//!
//! The result is a [`BrickAssembly`]. [`BrickSurface`] and [`write_obj`]
//! prepare it for plotting or export.
//!
//! # Orientation Limitation
//!
//! Outward orientation compares each face center against the centroid of
//! all mesh vertices. That is right for dome-like, star-shaped surfaces and
//! wrong for faces in re-entrant regions, which end up pointing inward.
//!
//! # Layer 0 Crate
//!
//! No rendering or GUI dependencies. Normal estimation and adjacency run on
//! rayon when [`VoxelizeParams::parallel`] is enabled.
//!
//! # Example
//!
//! ```
//! use vault_mesh::QuadMesh;
//! use vault_voxel::{voxelize, VoxelizeParams};
//!
//! let plan = QuadMesh::grid(4.0, 4.0, 4, 4);
//! let xyz = plan.positions().to_vec();
//!
//! let bricks = voxelize(&xyz, &plan, &VoxelizeParams::with_thickness(0.3)).unwrap();
//!
//! assert_eq!(bricks.len(), 16);
//! assert!((bricks.normals()[0].z - 1.0).abs() < 1e-12);
//! assert!((bricks.centers()[0].z + 0.15).abs() < 1e-12);
//! assert_eq!(bricks.neighbors()[5], vec![1, 4, 6, 9]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod assembly;
mod error;
mod export;
mod extrude;
mod face;
mod normals;
mod params;
mod render;
mod voxelize;

pub use adjacency::{build_brick_adjacency, is_symmetric, pair_count};
pub use assembly::{BRICK_FACE_CORNERS, BrickAssembly, brick_faces};
pub use error::{VoxelError, VoxelResult};
pub use export::{save_obj, write_obj};
pub use extrude::{ExtrudedBrick, extrude_quad};
pub use face::{FaceIndex, QuadFace, gather_quads};
pub use normals::{
    FaceNormals, diagonal_normal, estimate_face_normal, estimate_normals, orient_outward,
    resolve_degenerate, vertex_centroid,
};
pub use params::{
    DEFAULT_DEGENERATE_TOLERANCE, DEFAULT_THICKNESS, DegeneratePolicy, Thickness, VoxelizeParams,
};
pub use render::{BrickSurface, ColorBy, brick_values, normalize_values};
pub use voxelize::{compute_face_normals, voxelize, voxelize_faces, voxelize_mesh};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
