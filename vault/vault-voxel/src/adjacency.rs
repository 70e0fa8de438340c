//! Brick adjacency from mesh face adjacency.

use rayon::prelude::*;
use vault_mesh::QuadTopology;

use crate::face::FaceIndex;

/// Translate mesh face neighbors into brick-index neighbors.
///
/// `faces[i]` is the mesh face that became brick `i`, and `index` is the
/// lookup built over the same list. Neighbors that were not voxelized are
/// left out. Each list is sorted and free of duplicates and self-loops.
///
/// The result is symmetric whenever the mesh's own neighbor relation is.
#[must_use]
pub fn build_brick_adjacency<M: QuadTopology + Sync>(
    mesh: &M,
    faces: &[usize],
    index: &FaceIndex,
    parallel: bool,
) -> Vec<Vec<usize>> {
    let lookup = |(brick, &face): (usize, &usize)| {
        let mut list: Vec<usize> = mesh
            .face_neighbors(face)
            .into_iter()
            .filter_map(|nb| index.get(nb))
            .filter(|&nb| nb != brick)
            .collect();
        list.sort_unstable();
        list.dedup();
        list
    };

    if parallel {
        faces.par_iter().enumerate().map(lookup).collect()
    } else {
        faces.iter().enumerate().map(lookup).collect()
    }
}

/// Check that `j` lists `i` whenever `i` lists `j`.
#[must_use]
pub fn is_symmetric(neighbors: &[Vec<usize>]) -> bool {
    neighbors.iter().enumerate().all(|(i, list)| {
        list.iter()
            .all(|&j| neighbors.get(j).is_some_and(|back| back.contains(&i)))
    })
}

/// Number of undirected adjacency pairs.
#[must_use]
pub fn pair_count(neighbors: &[Vec<usize>]) -> usize {
    neighbors
        .iter()
        .enumerate()
        .map(|(i, list)| list.iter().filter(|&&j| j > i).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_mesh::QuadMesh;

    fn lookup(faces: &[usize]) -> FaceIndex {
        match FaceIndex::build(faces) {
            Ok(index) => index,
            Err(e) => panic!("{e}"),
        }
    }

    /// Topology with a deliberately one-sided neighbor entry.
    struct Lopsided;

    impl QuadTopology for Lopsided {
        fn vertex_count(&self) -> usize {
            0
        }
        fn face_count(&self) -> usize {
            2
        }
        fn face_keys(&self) -> impl Iterator<Item = usize> + '_ {
            0..2
        }
        fn face_vertices(&self, _face: usize) -> Option<&[u32]> {
            None
        }
        fn face_neighbors(&self, face: usize) -> Vec<usize> {
            if face == 0 { vec![1, 1, 0] } else { Vec::new() }
        }
    }

    #[test]
    fn grid_adjacency_matches_mesh() {
        let plan = QuadMesh::grid(3.0, 3.0, 3, 3);
        let faces: Vec<usize> = (0..9).collect();
        let index = lookup(&faces);

        let nb = build_brick_adjacency(&plan, &faces, &index, false);

        assert_eq!(nb[4], vec![1, 3, 5, 7]);
        assert_eq!(nb[0], vec![1, 3]);
        assert!(is_symmetric(&nb));
        assert_eq!(pair_count(&nb), 12);
    }

    #[test]
    fn unprocessed_neighbors_are_omitted() {
        let plan = QuadMesh::grid(3.0, 1.0, 3, 1);
        // Only the two end faces; the middle one is filtered out upstream
        let faces = vec![0, 2];
        let index = lookup(&faces);

        let nb = build_brick_adjacency(&plan, &faces, &index, false);
        assert_eq!(nb, vec![Vec::<usize>::new(), Vec::new()]);
    }

    #[test]
    fn brick_indices_follow_processing_order() {
        let plan = QuadMesh::grid(3.0, 1.0, 3, 1);
        let faces = vec![2, 1, 0];
        let index = lookup(&faces);

        let nb = build_brick_adjacency(&plan, &faces, &index, true);
        assert_eq!(nb, vec![vec![1], vec![0, 2], vec![1]]);
    }

    #[test]
    fn asymmetric_mesh_relation_is_not_repaired() {
        let faces = vec![0, 1];
        let index = lookup(&faces);

        let nb = build_brick_adjacency(&Lopsided, &faces, &index, false);
        assert_eq!(nb, vec![vec![1], Vec::new()]);
        assert!(!is_symmetric(&nb));
    }

    #[test]
    fn parallel_matches_serial() {
        let plan = QuadMesh::grid(6.0, 4.0, 12, 8);
        let faces: Vec<usize> = (0..96).collect();
        let index = lookup(&faces);

        assert_eq!(
            build_brick_adjacency(&plan, &faces, &index, true),
            build_brick_adjacency(&plan, &faces, &index, false)
        );
    }
}
