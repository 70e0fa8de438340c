//! Validated quad faces and the face-to-brick lookup.

use hashbrown::HashMap;
use nalgebra::Point3;
use vault_mesh::QuadTopology;

use crate::error::{VoxelError, VoxelResult};

/// A mesh face checked to be a quad with in-range vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadFace {
    /// Key of the face in the source mesh.
    pub key: usize,
    /// Vertex indices in mesh order.
    pub vertices: [u32; 4],
    /// Corner positions, resolved from the coordinate array.
    pub points: [Point3<f64>; 4],
}

impl QuadFace {
    /// Resolve one mesh face against the coordinate array.
    ///
    /// # Errors
    ///
    /// [`VoxelError::UnknownFace`], [`VoxelError::MalformedFace`],
    /// [`VoxelError::VertexOutOfRange`] or [`VoxelError::NonFiniteVertex`].
    pub fn resolve<M: QuadTopology>(
        xyz: &[Point3<f64>],
        mesh: &M,
        key: usize,
    ) -> VoxelResult<Self> {
        let verts = mesh
            .face_vertices(key)
            .ok_or(VoxelError::UnknownFace { face: key })?;

        let vertices: [u32; 4] = verts.try_into().map_err(|_| VoxelError::MalformedFace {
            face: key,
            vertex_count: verts.len(),
        })?;

        let mut points = [Point3::origin(); 4];
        for (slot, &v) in points.iter_mut().zip(&vertices) {
            let p = xyz.get(v as usize).ok_or(VoxelError::VertexOutOfRange {
                face: key,
                vertex: v,
                vertex_count: xyz.len(),
            })?;
            if !is_finite(p) {
                return Err(VoxelError::NonFiniteVertex {
                    face: key,
                    vertex: v,
                });
            }
            *slot = *p;
        }

        Ok(Self {
            key,
            vertices,
            points,
        })
    }

    /// Mean of the four corners.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        let sum = self.points.iter().fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / 4.0)
    }
}

/// Resolve every face in `keys`, stopping at the first invalid one.
///
/// # Errors
///
/// The first face-level error in key order.
pub fn gather_quads<M: QuadTopology>(
    xyz: &[Point3<f64>],
    mesh: &M,
    keys: &[usize],
) -> VoxelResult<Vec<QuadFace>> {
    keys.iter()
        .map(|&key| QuadFace::resolve(xyz, mesh, key))
        .collect()
}

/// True when every coordinate of `p` is finite.
#[inline]
#[must_use]
pub(crate) fn is_finite(p: &Point3<f64>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}

/// Maps mesh face keys to brick indices.
///
/// Compact key ranges use a direct array; sparse keys fall back to a hash map.
#[derive(Debug, Clone)]
pub enum FaceIndex {
    /// `slots[key]` holds the brick index, if the face was voxelized.
    Dense(Vec<Option<usize>>),
    /// Hash lookup for widely spread keys.
    Sparse(HashMap<usize, usize>),
}

impl FaceIndex {
    /// Build the lookup for faces voxelized in the given order.
    ///
    /// # Errors
    ///
    /// [`VoxelError::DuplicateFace`] for the first key listed twice.
    pub fn build(keys: &[usize]) -> VoxelResult<Self> {
        let Some(&max_key) = keys.iter().max() else {
            return Ok(Self::Dense(Vec::new()));
        };

        if max_key < keys.len().saturating_mul(2).max(16) {
            let mut slots = vec![None; max_key + 1];
            for (brick, &key) in keys.iter().enumerate() {
                if slots[key].replace(brick).is_some() {
                    return Err(VoxelError::DuplicateFace { face: key });
                }
            }
            Ok(Self::Dense(slots))
        } else {
            let mut map = HashMap::with_capacity(keys.len());
            for (brick, &key) in keys.iter().enumerate() {
                if map.insert(key, brick).is_some() {
                    return Err(VoxelError::DuplicateFace { face: key });
                }
            }
            Ok(Self::Sparse(map))
        }
    }

    /// Brick index for a face key, if that face was voxelized.
    #[inline]
    #[must_use]
    pub fn get(&self, key: usize) -> Option<usize> {
        match self {
            Self::Dense(slots) => slots.get(key).copied().flatten(),
            Self::Sparse(map) => map.get(&key).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vault_mesh::QuadMesh;

    fn unit_square() -> QuadMesh {
        QuadMesh::grid(1.0, 1.0, 1, 1)
    }

    #[test]
    fn resolve_quad() {
        let mesh = unit_square();
        let quad = QuadFace::resolve(mesh.positions(), &mesh, 0);

        let Ok(quad) = quad else {
            panic!("unit square should resolve");
        };
        assert_eq!(quad.vertices, [0, 1, 3, 2]);
        assert_relative_eq!(quad.points[2], Point3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(quad.center(), Point3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn resolve_rejects_triangle() {
        let mesh = QuadMesh::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![vec![0, 1, 2]],
        );
        let err = QuadFace::resolve(mesh.positions(), &mesh, 0);
        assert!(matches!(
            err,
            Err(VoxelError::MalformedFace {
                face: 0,
                vertex_count: 3
            })
        ));
    }

    #[test]
    fn resolve_rejects_out_of_range_vertex() {
        let mesh = unit_square();
        let short = &mesh.positions()[..3];
        let err = QuadFace::resolve(short, &mesh, 0);
        assert!(matches!(
            err,
            Err(VoxelError::VertexOutOfRange {
                face: 0,
                vertex: 3,
                vertex_count: 3
            })
        ));
    }

    #[test]
    fn resolve_rejects_unknown_face() {
        let mesh = unit_square();
        assert!(matches!(
            QuadFace::resolve(mesh.positions(), &mesh, 4),
            Err(VoxelError::UnknownFace { face: 4 })
        ));
    }

    fn lookup(keys: &[usize]) -> FaceIndex {
        match FaceIndex::build(keys) {
            Ok(index) => index,
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn resolve_rejects_non_finite_corner() {
        let mesh = unit_square();
        let mut xyz = mesh.positions().to_vec();
        xyz[3].y = f64::INFINITY;

        let err = QuadFace::resolve(&xyz, &mesh, 0);
        assert!(matches!(
            err,
            Err(VoxelError::NonFiniteVertex { face: 0, vertex: 3 })
        ));
    }

    #[test]
    fn dense_index() {
        let index = lookup(&[3, 1, 2]);
        assert!(matches!(index, FaceIndex::Dense(_)));
        assert_eq!(index.get(3), Some(0));
        assert_eq!(index.get(1), Some(1));
        assert_eq!(index.get(0), None);
        assert_eq!(index.get(100), None);
    }

    #[test]
    fn sparse_index() {
        let index = lookup(&[10_000, 5, 70_000]);
        assert!(matches!(index, FaceIndex::Sparse(_)));
        assert_eq!(index.get(70_000), Some(2));
        assert_eq!(index.get(6), None);
    }

    #[test]
    fn duplicate_keys_rejected() {
        assert!(matches!(
            FaceIndex::build(&[1, 2, 1]),
            Err(VoxelError::DuplicateFace { face: 1 })
        ));
        assert!(matches!(
            FaceIndex::build(&[50_000, 7, 50_000]),
            Err(VoxelError::DuplicateFace { face: 50_000 })
        ));
    }

    #[test]
    fn empty_index() {
        let index = lookup(&[]);
        assert_eq!(index.get(0), None);
    }
}
