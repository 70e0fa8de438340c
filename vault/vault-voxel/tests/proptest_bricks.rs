//! Property-based tests for brick voxelization.
//!
//! Random height fields over regular plans are always valid quad surfaces
//! (their diagonal cross product has a constant positive z component), so
//! every generated case must voxelize.
//!
//! Run with: cargo test -p vault-voxel -- proptest

#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation)]

use proptest::prelude::*;
use vault_mesh::{Point3, QuadMesh, Vector3};
use vault_voxel::{VoxelizeParams, vertex_centroid, voxelize, voxelize_mesh};

// =============================================================================
// Strategies
// =============================================================================

/// A height field: plan divisions, vertex heights and a brick thickness.
#[derive(Debug, Clone)]
struct HeightField {
    nx: usize,
    ny: usize,
    plan: QuadMesh,
    xyz: Vec<Point3<f64>>,
    thickness: f64,
}

fn arb_height_field() -> impl Strategy<Value = HeightField> {
    (1u32..7, 1u32..7, 0.5..4.0f64, 0.5..4.0f64).prop_flat_map(|(nx, ny, w, d)| {
        let count = ((nx + 1) * (ny + 1)) as usize;
        (
            prop::collection::vec(-2.0..2.0f64, count),
            0.01..0.8f64,
        )
            .prop_map(move |(heights, thickness)| {
                let plan = QuadMesh::grid(w, d, nx, ny);
                let xyz = plan
                    .positions()
                    .iter()
                    .zip(&heights)
                    .map(|(p, &z)| Point3::new(p.x, p.y, z))
                    .collect();
                HeightField {
                    nx: nx as usize,
                    ny: ny as usize,
                    plan,
                    xyz,
                    thickness,
                }
            })
    })
}

/// Arbitrary polygon soup that may or may not be a valid quad mesh.
fn arb_soup() -> impl Strategy<Value = QuadMesh> {
    (1usize..12).prop_flat_map(|n| {
        let vertices = prop::collection::vec(prop::array::uniform3(-5.0..5.0f64), n);
        let face = prop::collection::vec(0u32..(n as u32 + 2), 3..=5);
        let faces = prop::collection::vec(face, 0..8);
        (vertices, faces).prop_map(|(v, f)| {
            let vertices = v.into_iter().map(|[x, y, z]| Point3::new(x, y, z)).collect();
            QuadMesh::new(vertices, f)
        })
    })
}

fn params(thickness: f64) -> VoxelizeParams {
    VoxelizeParams::with_thickness(thickness).parallel(false)
}

// =============================================================================
// Property Tests: Geometry
// =============================================================================

proptest! {
    /// One brick per face, each with a unit normal.
    #[test]
    fn one_unit_normal_per_face(field in arb_height_field()) {
        let asm = voxelize(&field.xyz, &field.plan, &params(field.thickness)).unwrap();

        prop_assert_eq!(asm.len(), field.plan.faces().len());
        for n in asm.normals() {
            prop_assert!((n.norm() - 1.0).abs() < 1e-9, "normal length {}", n.norm());
        }
    }

    /// Inner corners are the outer corners shifted by the thickness along the normal.
    #[test]
    fn inner_face_is_offset_outer_face(field in arb_height_field()) {
        let t = field.thickness;
        let asm = voxelize(&field.xyz, &field.plan, &params(t)).unwrap();

        for (corners, n) in asm.corners().iter().zip(asm.normals()) {
            for k in 0..4 {
                let expected = corners[k] - *n * t;
                prop_assert!((corners[k + 4] - expected).norm() < 1e-9);
            }
        }
    }

    /// Centers sit half a thickness below the outer face center.
    #[test]
    fn center_is_half_thickness_inside(field in arb_height_field()) {
        let t = field.thickness;
        let asm = voxelize(&field.xyz, &field.plan, &params(t)).unwrap();

        for i in 0..asm.len() {
            let outer = &asm.corners()[i][..4];
            let mean = outer.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / 4.0;
            let expected = mean - asm.normals()[i] * (0.5 * t);
            prop_assert!((asm.centers()[i].coords - expected).norm() < 1e-9);
        }
    }

    /// No normal points toward the vertex centroid.
    #[test]
    fn normals_face_away_from_centroid(field in arb_height_field()) {
        let centroid = vertex_centroid(&field.xyz).unwrap();
        let asm = voxelize(&field.xyz, &field.plan, &params(field.thickness)).unwrap();

        for i in 0..asm.len() {
            let outer = &asm.corners()[i][..4];
            let mean = outer.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / 4.0;
            prop_assert!(asm.normals()[i].dot(&(mean - centroid.coords)) >= -1e-12);
        }
    }

    /// Each brick has six faces and the inner cap mirrors the outer one.
    #[test]
    fn brick_caps_are_opposite(field in arb_height_field()) {
        let asm = voxelize(&field.xyz, &field.plan, &params(field.thickness)).unwrap();

        for i in 0..asm.len() {
            let faces = asm.brick_faces(i).unwrap();
            prop_assert_eq!(faces.len(), 6);
            let c = &asm.corners()[i];
            prop_assert_eq!(faces[0], [c[0], c[1], c[2], c[3]]);
            prop_assert_eq!(faces[1], [c[7], c[6], c[5], c[4]]);
        }
    }
}

// =============================================================================
// Property Tests: Adjacency
// =============================================================================

proptest! {
    /// Adjacency is symmetric and matches the grid's edge structure.
    #[test]
    fn adjacency_matches_grid(field in arb_height_field()) {
        let asm = voxelize(&field.xyz, &field.plan, &params(field.thickness)).unwrap();

        prop_assert!(asm.is_adjacency_symmetric());
        prop_assert!(asm.neighbor_counts().iter().all(|&n| n <= 4));

        let (nx, ny) = (field.nx, field.ny);
        prop_assert_eq!(asm.joint_count(), nx * (ny - 1) + ny * (nx - 1));
    }

    /// Running on the thread pool gives the same assembly.
    #[test]
    fn parallel_matches_serial(field in arb_height_field()) {
        let p = params(field.thickness);
        let serial = voxelize(&field.xyz, &field.plan, &p).unwrap();
        let parallel = voxelize(&field.xyz, &field.plan, &p.clone().parallel(true)).unwrap();

        prop_assert_eq!(serial, parallel);
    }
}

// =============================================================================
// Property Tests: Robustness
// =============================================================================

proptest! {
    /// Malformed input produces an error, never a panic.
    #[test]
    fn soup_never_panics(mesh in arb_soup()) {
        let _ = voxelize_mesh(&mesh, &params(0.2));
    }

    /// Successful runs always produce one brick per face.
    #[test]
    fn soup_success_is_complete(mesh in arb_soup()) {
        if let Ok(asm) = voxelize_mesh(&mesh, &params(0.2)) {
            prop_assert_eq!(asm.len(), mesh.faces().len());
            prop_assert!(asm.is_adjacency_symmetric());
        }
    }
}
