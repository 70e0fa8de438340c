//! Topology interface consumed by the voxelizer.

/// Read-only face topology of a polygon mesh.
///
/// Face identifiers are plain `usize` keys. They do not have to be dense:
/// an implementation backed by a mesh with removed faces may skip ids, and
/// consumers must only rely on the keys returned by [`face_keys`].
///
/// [`face_keys`]: QuadTopology::face_keys
pub trait QuadTopology {
    /// Number of vertices addressable by face indices.
    fn vertex_count(&self) -> usize;

    /// Number of faces.
    fn face_count(&self) -> usize;

    /// Check if the mesh has no faces.
    fn is_empty(&self) -> bool {
        self.face_count() == 0
    }

    /// Iterate over face keys in mesh order.
    fn face_keys(&self) -> impl Iterator<Item = usize> + '_;

    /// Ordered vertex indices of a face.
    ///
    /// Returns `None` for an unknown face key. The slice is whatever the
    /// mesh stores; callers expecting quads must check its length.
    fn face_vertices(&self, face: usize) -> Option<&[u32]>;

    /// Faces sharing at least one edge with `face`.
    ///
    /// Unknown keys yield an empty list. Implementations should keep the
    /// relation symmetric; consumers do not repair it.
    fn face_neighbors(&self, face: usize) -> Vec<usize>;
}
