//! Edge-based face adjacency.
//!
//! Two faces are neighbors when they use the same undirected edge. The
//! relation is symmetric by construction.

use hashbrown::HashMap;

/// Edge and neighbor lookups for a polygon mesh.
///
/// Built once from the face list; faces may have any number of vertices.
#[derive(Debug, Clone, Default)]
pub struct FaceAdjacency {
    /// Maps edge (v0, v1) to face indices. v0 < v1.
    edge_to_faces: HashMap<(u32, u32), Vec<usize>>,
    /// Sorted, deduplicated neighbor list per face.
    neighbors: Vec<Vec<usize>>,
}

impl FaceAdjacency {
    /// Build adjacency from polygon faces.
    ///
    /// # Example
    ///
    /// ```
    /// use vault_mesh::FaceAdjacency;
    ///
    /// // Two quads sharing the edge 1-4
    /// let faces = vec![vec![0, 1, 4, 3], vec![1, 2, 5, 4]];
    /// let adj = FaceAdjacency::build(&faces);
    ///
    /// assert_eq!(adj.neighbors(0), &[1]);
    /// assert_eq!(adj.neighbors(1), &[0]);
    /// assert_eq!(adj.boundary_edge_count(), 6);
    /// ```
    #[must_use]
    pub fn build<F: AsRef<[u32]>>(faces: &[F]) -> Self {
        let mut edge_to_faces: HashMap<(u32, u32), Vec<usize>> = HashMap::new();

        for (face_idx, face) in faces.iter().enumerate() {
            let face = face.as_ref();
            let n = face.len();
            if n < 2 {
                continue;
            }
            for k in 0..n {
                let (a, b) = (face[k], face[(k + 1) % n]);
                if a == b {
                    continue;
                }
                let users = edge_to_faces.entry(normalize_edge(a, b)).or_default();
                if !users.contains(&face_idx) {
                    users.push(face_idx);
                }
            }
        }

        let mut neighbors = vec![Vec::new(); faces.len()];
        for users in edge_to_faces.values() {
            for &f in users {
                neighbors[f].extend(users.iter().copied().filter(|&g| g != f));
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            edge_to_faces,
            neighbors,
        }
    }

    /// Faces sharing an edge with `face`. Empty for unknown faces.
    #[must_use]
    pub fn neighbors(&self, face: usize) -> &[usize] {
        self.neighbors.get(face).map_or(&[], Vec::as_slice)
    }

    /// Faces using the edge between two vertices, in either direction.
    #[must_use]
    pub fn faces_for_edge(&self, v0: u32, v1: u32) -> Option<&[usize]> {
        self.edge_to_faces
            .get(&normalize_edge(v0, v1))
            .map(Vec::as_slice)
    }

    /// Edges used by exactly one face (the vault's supported rim).
    pub fn boundary_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edge_to_faces
            .iter()
            .filter(|(_, faces)| faces.len() == 1)
            .map(|(&edge, _)| edge)
    }

    /// Count of edges used by exactly one face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_to_faces
            .values()
            .filter(|faces| faces.len() == 1)
            .count()
    }

    /// Count of edges shared by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_to_faces
            .values()
            .filter(|faces| faces.len() > 2)
            .count()
    }

    /// Every edge is used by at most two faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edge_to_faces.values().all(|faces| faces.len() <= 2)
    }

    /// Total number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_to_faces.len()
    }
}

#[inline]
fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}
