//! Outward face normals.
//!
//! Each quad's normal is the normalized cross product of its diagonals,
//! `(p2 - p0) x (p3 - p1)`, which does not require the quad to be planar.
//! Orientation is decided against a single reference point, the centroid
//! of all vertex coordinates: a normal whose dot product with
//! `face_center - reference` is negative gets flipped.
//!
//! The centroid test assumes the vault is star-shaped about its centroid.
//! On strongly re-entrant surfaces (deep troughs, folds) it can point some
//! normals into the surface. That is a property of the heuristic and is
//! kept as is.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{VoxelError, VoxelResult};
use crate::face::QuadFace;
use crate::params::DegeneratePolicy;

/// Per-face normals after the degenerate-face policy has been applied.
#[derive(Debug, Clone, Default)]
pub struct FaceNormals {
    /// One unit normal per face, in input order.
    pub normals: Vec<Vector3<f64>>,
    /// Positions (in input order) of faces whose normal was borrowed
    /// from neighbors.
    pub degenerate: Vec<usize>,
}

/// Centroid of a coordinate array. `None` when empty.
///
/// # Example
///
/// ```
/// use vault_voxel::{vertex_centroid, Point3};
///
/// let xyz = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)];
/// assert_eq!(vertex_centroid(&xyz), Some(Point3::new(1.0, 2.0, 3.0)));
/// assert_eq!(vertex_centroid(&[]), None);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn vertex_centroid(xyz: &[Point3<f64>]) -> Option<Point3<f64>> {
    if xyz.is_empty() {
        return None;
    }
    let sum = xyz.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / xyz.len() as f64))
}

/// Raw (unnormalized, unoriented) diagonal cross product of a quad.
#[inline]
#[must_use]
pub fn diagonal_normal(points: &[Point3<f64>; 4]) -> Vector3<f64> {
    let d0 = points[2] - points[0];
    let d1 = points[3] - points[1];
    d0.cross(&d1)
}

/// Flip `normal` if it points toward `reference` as seen from `face_center`.
///
/// A normal exactly perpendicular to `face_center - reference` is kept.
#[inline]
#[must_use]
pub fn orient_outward(
    normal: Vector3<f64>,
    face_center: &Point3<f64>,
    reference: &Point3<f64>,
) -> Vector3<f64> {
    if normal.dot(&(face_center - reference)) < 0.0 {
        -normal
    } else {
        normal
    }
}

/// Outward unit normal of one quad, or `None` if it is degenerate.
///
/// A quad is degenerate when its diagonal cross product has length at or
/// below `tolerance` (zero area or parallel diagonals), or when that length
/// is not finite.
///
/// # Example
///
/// ```
/// use vault_voxel::{estimate_face_normal, Point3};
///
/// let quad = [
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 1.0),
///     Point3::new(1.0, 1.0, 1.0),
///     Point3::new(0.0, 1.0, 1.0),
/// ];
/// // Reference below the quad: normal points up
/// let n = estimate_face_normal(&quad, &Point3::new(0.5, 0.5, 0.0), 1e-12).unwrap();
/// assert!((n.z - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn estimate_face_normal(
    points: &[Point3<f64>; 4],
    reference: &Point3<f64>,
    tolerance: f64,
) -> Option<Vector3<f64>> {
    let raw = diagonal_normal(points);
    let length = raw.norm();
    if !length.is_finite() || length <= tolerance {
        return None;
    }
    let center = quad_center(points);
    Some(orient_outward(raw / length, &center, reference))
}

/// Estimate normals for every quad; degenerate quads yield `None`.
#[must_use]
pub fn estimate_normals(
    quads: &[QuadFace],
    reference: &Point3<f64>,
    tolerance: f64,
    parallel: bool,
) -> Vec<Option<Vector3<f64>>> {
    let estimate = |q: &QuadFace| estimate_face_normal(&q.points, reference, tolerance);
    if parallel {
        quads.par_iter().map(estimate).collect()
    } else {
        quads.iter().map(estimate).collect()
    }
}

/// Apply the degenerate-face policy.
///
/// `neighbors` is the brick-index adjacency of the same quads. Fallback
/// normals are averaged from valid neighbors only, so a degenerate face
/// never borrows from another degenerate face.
///
/// # Errors
///
/// [`VoxelError::DegenerateFace`] for the first degenerate quad under
/// [`DegeneratePolicy::Reject`], or for a degenerate quad with no usable
/// neighbor under [`DegeneratePolicy::NeighborAverage`].
/// [`VoxelError::InvalidParams`] if `raw` or `neighbors` is not one entry
/// per quad.
pub fn resolve_degenerate(
    quads: &[QuadFace],
    raw: Vec<Option<Vector3<f64>>>,
    neighbors: &[Vec<usize>],
    policy: DegeneratePolicy,
    tolerance: f64,
) -> VoxelResult<FaceNormals> {
    if raw.len() != quads.len() || neighbors.len() != quads.len() {
        return Err(VoxelError::invalid_params(format!(
            "{} quads but {} normals and {} neighbor lists",
            quads.len(),
            raw.len(),
            neighbors.len()
        )));
    }

    let degenerate: Vec<usize> = raw
        .iter()
        .enumerate()
        .filter_map(|(i, n)| n.is_none().then_some(i))
        .collect();

    if degenerate.is_empty() {
        let normals = raw.into_iter().flatten().collect();
        return Ok(FaceNormals {
            normals,
            degenerate,
        });
    }

    debug!(count = degenerate.len(), %policy, "Found degenerate faces");

    if policy == DegeneratePolicy::Reject {
        let first = &quads[degenerate[0]];
        return Err(VoxelError::degenerate_face(
            first.key,
            diagonal_normal(&first.points).norm(),
        ));
    }

    let mut fallback = Vec::with_capacity(degenerate.len());
    for &i in &degenerate {
        let sum = neighbors
            .get(i)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|&j| raw.get(j).copied().flatten())
            .fold(Vector3::zeros(), |acc, n| acc + n);

        let length = sum.norm();
        if length <= tolerance {
            return Err(VoxelError::degenerate_face(
                quads[i].key,
                diagonal_normal(&quads[i].points).norm(),
            ));
        }
        warn!(face = quads[i].key, "Degenerate face, using neighbor-average normal");
        fallback.push((i, sum / length));
    }

    let mut normals: Vec<Vector3<f64>> = raw
        .into_iter()
        .map(|n| n.unwrap_or_else(Vector3::zeros))
        .collect();
    for (i, n) in fallback {
        normals[i] = n;
    }

    Ok(FaceNormals {
        normals,
        degenerate,
    })
}

fn quad_center(points: &[Point3<f64>; 4]) -> Point3<f64> {
    let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / 4.0)
}
