//! Surface-to-brick voxelization pipeline.
//!
//! One forward pass: validate, estimate normals, build adjacency, settle
//! degenerate faces, extrude. Per-face work runs on rayon when enabled; the
//! output does not depend on it.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, info};
use vault_mesh::{QuadMesh, QuadTopology};

use crate::adjacency::{build_brick_adjacency, pair_count};
use crate::assembly::{AssemblyParts, BrickAssembly};
use crate::error::{VoxelError, VoxelResult};
use crate::extrude::{ExtrudedBrick, extrude_quad};
use crate::face::{FaceIndex, QuadFace, gather_quads, is_finite};
use crate::normals::{FaceNormals, estimate_normals, resolve_degenerate, vertex_centroid};
use crate::params::{Thickness, VoxelizeParams};

/// Convert a vault surface into bricks, one per mesh face.
///
/// `xyz` holds the solved vertex positions, index-aligned with the mesh
/// vertices. Each face is extruded inward by `params.thickness` along its
/// outward normal.
///
/// # Errors
///
/// Fails before touching any face on invalid parameters
/// ([`VoxelError::InvalidThickness`], [`VoxelError::InvalidParams`]), an
/// empty mesh, a coordinate array of the wrong length, or a repeated face
/// key. Then fails on the first non-quad face, out-of-range vertex or
/// non-finite corner, on any other non-finite coordinate, and on degenerate
/// faces as dictated by [`DegeneratePolicy`](crate::DegeneratePolicy).
///
/// # Example
///
/// ```
/// use vault_mesh::QuadMesh;
/// use vault_voxel::{voxelize, VoxelizeParams};
///
/// let plan = QuadMesh::grid(5.0, 5.0, 2, 2);
/// let bricks = voxelize(plan.positions(), &plan, &VoxelizeParams::default()).unwrap();
///
/// assert_eq!(bricks.len(), 4);
/// assert!(bricks.centers().iter().all(|c| (c.z + 0.1).abs() < 1e-12));
/// ```
pub fn voxelize<M: QuadTopology + Sync>(
    xyz: &[Point3<f64>],
    mesh: &M,
    params: &VoxelizeParams,
) -> VoxelResult<BrickAssembly> {
    let faces: Vec<usize> = mesh.face_keys().collect();
    voxelize_faces(xyz, mesh, &faces, params)
}

/// Voxelize using the mesh's own vertex positions.
///
/// # Errors
///
/// Same as [`voxelize`].
pub fn voxelize_mesh(mesh: &QuadMesh, params: &VoxelizeParams) -> VoxelResult<BrickAssembly> {
    voxelize(mesh.positions(), mesh, params)
}

/// Voxelize a chosen subset of faces.
///
/// Brick `i` comes from `faces[i]`. Mesh neighbors outside the subset are
/// dropped from the adjacency lists. The orientation reference is still the
/// centroid of all of `xyz`.
///
/// # Errors
///
/// Same as [`voxelize`], plus [`VoxelError::UnknownFace`] for keys the mesh
/// does not know and [`VoxelError::DuplicateFace`] for keys listed twice.
pub fn voxelize_faces<M: QuadTopology + Sync>(
    xyz: &[Point3<f64>],
    mesh: &M,
    faces: &[usize],
    params: &VoxelizeParams,
) -> VoxelResult<BrickAssembly> {
    let thickness = params.validate()?;

    info!(
        faces = faces.len(),
        vertices = xyz.len(),
        thickness = thickness.get(),
        policy = %params.degenerate_policy,
        "Voxelizing vault surface"
    );

    let prepared = prepare(xyz, mesh, faces, params)?;

    let bricks = extrude_all(&prepared.quads, &prepared.normals.normals, thickness, params.parallel);

    let mut parts = AssemblyParts {
        thickness: thickness.get(),
        degenerate: prepared.normals.degenerate,
        ..AssemblyParts::default()
    };
    parts.centers = bricks.iter().map(|b| b.center).collect();
    parts.corners = bricks.iter().map(|b| b.corners).collect();
    parts.face_vertices = prepared.quads.iter().map(|q| q.vertices).collect();
    parts.source_faces = prepared.quads.iter().map(|q| q.key).collect();
    parts.normals = prepared.normals.normals;
    parts.neighbors = prepared.neighbors;

    let assembly = BrickAssembly::from_parts(parts);

    info!(
        bricks = assembly.len(),
        joints = assembly.joint_count(),
        degenerate = assembly.degenerate().len(),
        "Voxelization complete"
    );

    Ok(assembly)
}

/// Outward unit normals for every mesh face, in face-key order.
///
/// Runs the same validation and degenerate-face handling as [`voxelize`].
///
/// # Errors
///
/// Same as [`voxelize`].
pub fn compute_face_normals<M: QuadTopology + Sync>(
    xyz: &[Point3<f64>],
    mesh: &M,
    params: &VoxelizeParams,
) -> VoxelResult<FaceNormals> {
    params.validate()?;
    let faces: Vec<usize> = mesh.face_keys().collect();
    Ok(prepare(xyz, mesh, &faces, params)?.normals)
}

struct Prepared {
    quads: Vec<QuadFace>,
    normals: FaceNormals,
    neighbors: Vec<Vec<usize>>,
}

fn prepare<M: QuadTopology + Sync>(
    xyz: &[Point3<f64>],
    mesh: &M,
    faces: &[usize],
    params: &VoxelizeParams,
) -> VoxelResult<Prepared> {
    if faces.is_empty() {
        return Err(VoxelError::empty_mesh());
    }
    if xyz.len() != mesh.vertex_count() {
        return Err(VoxelError::CoordinateCountMismatch {
            expected: mesh.vertex_count(),
            got: xyz.len(),
        });
    }

    let index = FaceIndex::build(faces)?;
    let quads = gather_quads(xyz, mesh, faces)?;

    // Unused vertices still feed the orientation centroid
    if let Some(vertex) = xyz.iter().position(|p| !is_finite(p)) {
        return Err(VoxelError::NonFiniteCoordinate { vertex });
    }
    let reference = vertex_centroid(xyz).ok_or_else(VoxelError::empty_mesh)?;

    let raw = estimate_normals(&quads, &reference, params.degenerate_tolerance, params.parallel);

    let neighbors = build_brick_adjacency(mesh, faces, &index, params.parallel);
    debug!(pairs = pair_count(&neighbors), "Built brick adjacency");

    let normals = resolve_degenerate(
        &quads,
        raw,
        &neighbors,
        params.degenerate_policy,
        params.degenerate_tolerance,
    )?;

    Ok(Prepared {
        quads,
        normals,
        neighbors,
    })
}

fn extrude_all(
    quads: &[QuadFace],
    normals: &[Vector3<f64>],
    thickness: Thickness,
    parallel: bool,
) -> Vec<ExtrudedBrick> {
    let extrude = |(q, n): (&QuadFace, &Vector3<f64>)| extrude_quad(&q.points, n, thickness);
    if parallel {
        quads.par_iter().zip(normals.par_iter()).map(extrude).collect()
    } else {
        quads.iter().zip(normals).map(extrude).collect()
    }
}
