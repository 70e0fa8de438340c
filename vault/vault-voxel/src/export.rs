//! Wavefront OBJ export of brick surfaces.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::VoxelResult;
use crate::render::BrickSurface;

/// Write the brick surface as ASCII OBJ.
///
/// Each brick becomes its own `o brick_<i>` object with 8 vertices and
/// 6 quad faces. OBJ indices are 1-based and global across objects.
///
/// # Errors
///
/// Returns [`VoxelError::Io`](crate::VoxelError::Io) if writing fails.
///
/// # Example
///
/// ```
/// use vault_mesh::QuadMesh;
/// use vault_voxel::{voxelize_mesh, write_obj, BrickSurface, VoxelizeParams};
///
/// let plan = QuadMesh::grid(1.0, 1.0, 1, 1);
/// let bricks = voxelize_mesh(&plan, &VoxelizeParams::default()).unwrap();
///
/// let mut out = Vec::new();
/// write_obj(&BrickSurface::from_assembly(&bricks), &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
///
/// assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 8);
/// assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 6);
/// ```
pub fn write_obj<W: Write>(surface: &BrickSurface, writer: &mut W) -> VoxelResult<()> {
    writeln!(writer, "# vault-voxel brick assembly")?;
    writeln!(writer, "# bricks: {}", surface.brick_count())?;

    for (brick, corners) in surface.positions.chunks_exact(8).enumerate() {
        writeln!(writer, "o brick_{brick}")?;
        for p in corners {
            writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for quad in surface.quads.iter().skip(brick * 6).take(6) {
            writeln!(
                writer,
                "f {} {} {} {}",
                quad[0] + 1,
                quad[1] + 1,
                quad[2] + 1,
                quad[3] + 1
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Save the brick surface to an OBJ file.
///
/// # Errors
///
/// Returns [`VoxelError::Io`](crate::VoxelError::Io) if the file cannot be
/// created or written.
pub fn save_obj<P: AsRef<Path>>(surface: &BrickSurface, path: P) -> VoxelResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(surface, &mut writer)
}
