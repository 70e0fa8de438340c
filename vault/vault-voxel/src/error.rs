//! Error types for voxelization.

use thiserror::Error;

/// Result type alias for voxelization operations.
pub type VoxelResult<T> = Result<T, VoxelError>;

/// Errors that can occur while turning a vault surface into bricks.
#[derive(Debug, Error)]
pub enum VoxelError {
    /// No faces to voxelize.
    #[error("input mesh has no faces")]
    EmptyMesh,

    /// Brick thickness is zero, negative, or not finite.
    #[error("brick thickness must be positive and finite, got {thickness}")]
    InvalidThickness {
        /// The rejected thickness.
        thickness: f64,
    },

    /// Other invalid parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Coordinate array does not line up with the mesh vertices.
    #[error("expected {expected} vertex coordinates, got {got}")]
    CoordinateCountMismatch {
        /// Vertex count of the mesh.
        expected: usize,
        /// Length of the coordinate array.
        got: usize,
    },

    /// A face is not a quad.
    #[error("face {face} has {vertex_count} vertices, expected 4")]
    MalformedFace {
        /// Offending face key.
        face: usize,
        /// Number of vertices it has.
        vertex_count: usize,
    },

    /// A requested face key does not exist in the mesh.
    #[error("face {face} does not exist in the mesh")]
    UnknownFace {
        /// The missing face key.
        face: usize,
    },

    /// A face key is listed more than once.
    #[error("face {face} is listed more than once")]
    DuplicateFace {
        /// The repeated face key.
        face: usize,
    },

    /// A face corner has a NaN or infinite coordinate.
    #[error("face {face} uses vertex {vertex}, which has a non-finite coordinate")]
    NonFiniteVertex {
        /// Offending face key.
        face: usize,
        /// The vertex index.
        vertex: u32,
    },

    /// A vertex outside every voxelized face has a NaN or infinite coordinate.
    ///
    /// It would still poison the centroid used for orientation.
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// The vertex index.
        vertex: usize,
    },

    /// A face references a vertex outside the coordinate array.
    #[error("face {face} references vertex {vertex}, but only {vertex_count} vertices exist")]
    VertexOutOfRange {
        /// Offending face key.
        face: usize,
        /// The out-of-range vertex index.
        vertex: u32,
        /// Number of available vertices.
        vertex_count: usize,
    },

    /// A face has no usable normal.
    #[error("face {face} is degenerate (diagonal cross product length {length:e})")]
    DegenerateFace {
        /// Offending face key.
        face: usize,
        /// Length of the diagonal cross product.
        length: f64,
    },

    /// Writing brick geometry failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VoxelError {
    /// Create an empty mesh error.
    #[must_use]
    pub const fn empty_mesh() -> Self {
        Self::EmptyMesh
    }

    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }

    /// Create a degenerate face error.
    #[must_use]
    pub const fn degenerate_face(face: usize, length: f64) -> Self {
        Self::DegenerateFace { face, length }
    }

    /// The mesh face the error is about, if any.
    #[must_use]
    pub const fn face(&self) -> Option<usize> {
        match self {
            Self::MalformedFace { face, .. }
            | Self::UnknownFace { face }
            | Self::DuplicateFace { face }
            | Self::NonFiniteVertex { face, .. }
            | Self::VertexOutOfRange { face, .. }
            | Self::DegenerateFace { face, .. } => Some(*face),
            _ => None,
        }
    }
}
