//! Inward extrusion of a quad into a brick.

use nalgebra::{Point3, Vector3};

use crate::params::Thickness;

/// Geometry of a single extruded brick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudedBrick {
    /// Outer quad (0-3, mesh order) followed by inner quad (4-7).
    pub corners: [Point3<f64>; 8],
    /// Midpoint between the outer and inner quad centroids.
    pub center: Point3<f64>,
}

/// Extrude a quad inward, against its outward normal.
///
/// Inner corner `k + 4` is outer corner `k` moved by `-thickness * normal`.
/// The two quads are parallel and `thickness` apart along the normal.
///
/// # Example
///
/// ```
/// use vault_voxel::{extrude_quad, Point3, Thickness, Vector3};
///
/// let quad = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let brick = extrude_quad(&quad, &Vector3::z(), Thickness::new(0.2).unwrap());
///
/// assert!((brick.corners[6].z + 0.2).abs() < 1e-12);
/// assert!((brick.center.z + 0.1).abs() < 1e-12);
/// ```
#[must_use]
pub fn extrude_quad(
    points: &[Point3<f64>; 4],
    normal: &Vector3<f64>,
    thickness: Thickness,
) -> ExtrudedBrick {
    let t = thickness.get();
    let offset = normal * t;

    let mut corners = [Point3::origin(); 8];
    for (k, p) in points.iter().enumerate() {
        corners[k] = *p;
        corners[k + 4] = p - offset;
    }

    let mean = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / 4.0;
    let center = Point3::from(mean - normal * (0.5 * t));

    ExtrudedBrick { corners, center }
}
