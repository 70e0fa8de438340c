//! Polygon mesh over plan vertices.

// Grid sizes and vertex indices are u32; a floor plan with more than
// 4B vertices is out of reach.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use nalgebra::Point3;

use crate::{Aabb, FaceAdjacency, QuadTopology};

/// A quad-dominant polygon mesh.
///
/// Stores vertex positions and faces as ordered vertex-index lists. Faces
/// are expected to be quads, but the mesh itself does not enforce it;
/// validation belongs to the consumers that need four corners.
///
/// The edge adjacency is indexed once at construction, so the mesh is
/// immutable afterwards. Build a new mesh to change topology.
///
/// # Example
///
/// ```
/// use vault_mesh::{Point3, QuadMesh, QuadTopology};
///
/// let mesh = QuadMesh::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![vec![0, 1, 2, 3]],
/// );
///
/// assert_eq!(mesh.face_count(), 1);
/// assert!(mesh.face_neighbors(0).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuadMesh {
    vertices: Vec<Point3<f64>>,
    faces: Vec<Vec<u32>>,
    adjacency: FaceAdjacency,
}

impl QuadMesh {
    /// Create a mesh from vertex positions and faces.
    #[must_use]
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<Vec<u32>>) -> Self {
        let adjacency = FaceAdjacency::build(&faces);
        Self {
            vertices,
            faces,
            adjacency,
        }
    }

    /// Create a mesh from a flat `[x0, y0, z0, x1, ...]` array and quads.
    ///
    /// Trailing coordinates that do not make up a full point are ignored.
    #[must_use]
    pub fn from_raw(positions: &[f64], quads: &[[u32; 4]]) -> Self {
        let vertices = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let faces = quads.iter().map(|q| q.to_vec()).collect();
        Self::new(vertices, faces)
    }

    /// Rectangular floor plan of `nx` by `ny` quads covering `dx` by `dy`.
    ///
    /// Vertex `(i, j)` sits at `(i * dx / nx, j * dy / ny, 0)` with index
    /// `j * (nx + 1) + i`. Faces are listed row by row and wound
    /// counter-clockwise seen from +Z. Zero `nx` or `ny` gives an empty mesh.
    ///
    /// # Panics
    ///
    /// Panics if `(nx + 1) * (ny + 1)` vertices cannot be addressed with
    /// `u32` indices.
    ///
    /// # Example
    ///
    /// ```
    /// use vault_mesh::{QuadMesh, QuadTopology};
    ///
    /// let plan = QuadMesh::grid(5.0, 5.0, 2, 2);
    /// assert_eq!(plan.vertex_count(), 9);
    /// assert_eq!(plan.face_vertices(0), Some(&[0, 1, 4, 3][..]));
    /// ```
    #[must_use]
    pub fn grid(dx: f64, dy: f64, nx: u32, ny: u32) -> Self {
        if nx == 0 || ny == 0 {
            return Self::default();
        }

        let vertex_count = (u64::from(nx) + 1) * (u64::from(ny) + 1);
        assert!(
            vertex_count <= u64::from(u32::MAX),
            "grid of {nx} x {ny} faces exceeds u32 vertex indices"
        );

        let row = nx + 1;
        let step_x = dx / f64::from(nx);
        let step_y = dy / f64::from(ny);

        let mut vertices = Vec::with_capacity(usize::try_from(vertex_count).unwrap_or(0));
        for j in 0..=ny {
            for i in 0..=nx {
                vertices.push(Point3::new(
                    f64::from(i) * step_x,
                    f64::from(j) * step_y,
                    0.0,
                ));
            }
        }

        let mut faces = Vec::with_capacity(usize::try_from(nx * ny).unwrap_or(0));
        for j in 0..ny {
            for i in 0..nx {
                let v = j * row + i;
                faces.push(vec![v, v + 1, v + 1 + row, v + row]);
            }
        }

        Self::new(vertices, faces)
    }

    /// Vertex positions.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Faces as vertex-index lists.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Edge adjacency built at construction.
    #[inline]
    #[must_use]
    pub const fn adjacency(&self) -> &FaceAdjacency {
        &self.adjacency
    }

    /// Vertices on boundary edges, sorted ascending.
    ///
    /// These are the supports of a vault over this plan.
    #[must_use]
    pub fn boundary_vertices(&self) -> Vec<u32> {
        let mut out: Vec<u32> = self
            .adjacency
            .boundary_edges()
            .flat_map(|(a, b)| [a, b])
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Extents of the vertex positions.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// Check whether every face is a quad.
    #[must_use]
    pub fn is_all_quads(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 4)
    }
}

impl QuadTopology for QuadMesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face_keys(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.faces.len()
    }

    fn face_vertices(&self, face: usize) -> Option<&[u32]> {
        self.faces.get(face).map(Vec::as_slice)
    }

    fn face_neighbors(&self, face: usize) -> Vec<usize> {
        self.adjacency.neighbors(face).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grid_counts() {
        let plan = QuadMesh::grid(4.0, 2.0, 4, 2);

        assert_eq!(plan.vertex_count(), 15);
        assert_eq!(plan.face_count(), 8);
        assert!(plan.is_all_quads());
        assert!(plan.adjacency().is_manifold());
    }

    #[test]
    fn grid_positions_span_plan() {
        let plan = QuadMesh::grid(5.0, 3.0, 2, 3);
        let bounds = plan.bounds();

        assert_relative_eq!(bounds.min, Point3::origin());
        assert_relative_eq!(bounds.max, Point3::new(5.0, 3.0, 0.0));
        assert_relative_eq!(plan.positions()[4], Point3::new(2.5, 1.0, 0.0));
    }

    #[test]
    fn grid_faces_wind_counter_clockwise() {
        let plan = QuadMesh::grid(2.0, 2.0, 2, 2);
        let p = plan.positions();

        for face in plan.faces() {
            let a = p[face[1] as usize] - p[face[0] as usize];
            let b = p[face[2] as usize] - p[face[1] as usize];
            assert!(a.cross(&b).z > 0.0);
        }
    }

    #[test]
    fn grid_neighbors() {
        // 3 x 3 plan, center face is 4
        let plan = QuadMesh::grid(3.0, 3.0, 3, 3);

        assert_eq!(plan.face_neighbors(4), vec![1, 3, 5, 7]);
        assert_eq!(plan.face_neighbors(0), vec![1, 3]);
        assert!(plan.face_neighbors(99).is_empty());
    }

    #[test]
    fn grid_zero_divisions_is_empty() {
        let plan = QuadMesh::grid(1.0, 1.0, 0, 3);
        assert!(QuadTopology::is_empty(&plan));
        assert_eq!(plan.vertex_count(), 0);
    }

    #[test]
    #[should_panic(expected = "exceeds u32 vertex indices")]
    fn grid_rejects_unaddressable_size() {
        let _ = QuadMesh::grid(1.0, 1.0, u32::MAX, 1);
    }

    #[test]
    fn boundary_vertices_ring() {
        let plan = QuadMesh::grid(2.0, 2.0, 2, 2);

        // Everything except the center vertex 4
        assert_eq!(plan.boundary_vertices(), vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn from_raw_builds_adjacency() {
        let positions = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 2.0, 1.0, 0.0,
        ];
        let mesh = QuadMesh::from_raw(&positions, &[[0, 1, 4, 3], [1, 2, 5, 4]]);

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_neighbors(1), vec![0]);
        assert_eq!(mesh.face_keys().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn non_quad_faces_are_kept() {
        let mesh = QuadMesh::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![vec![0, 1, 2]],
        );

        assert!(!mesh.is_all_quads());
        assert_eq!(mesh.face_vertices(0).map(<[u32]>::len), Some(3));
    }
}
