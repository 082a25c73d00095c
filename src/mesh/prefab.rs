//! Procedural generators for a few common shapes, written against the
//! builder the way any other call site would be.
//!
//! Generators append to the mesh instead of replacing it, so shapes can be
//! batched into one stream; every face is emitted as a locally indexed
//! quad and rebased by the index builder. Position is mandatory in the
//! mesh's format. Normals and texcoords are filled only when the format
//! declares them, and a declared color channel is seeded white on each
//! face's first vertex; per-face constants ride on carry-forward.

use crate::errors::Result;
use crate::math::{Color, Vector3};

use super::builder::MeshBuilder;
use super::vertex::VertexChannel;

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Appends a quad of the given edge length, centered on the origin in the
/// XY plane and facing +Z.
pub fn quad(mesh: &mut MeshBuilder, size: f32) -> Result<()> {
    let h = size * 0.5;
    let corners = [
        Vector3::new(-h, -h, 0.0),
        Vector3::new(h, -h, 0.0),
        Vector3::new(h, h, 0.0),
        Vector3::new(-h, h, 0.0),
    ];
    face(mesh, &corners, Vector3::unit_z(), &FACE_UVS)
}

/// Appends a `cols` x `rows` grid of quads spanning `size` in the XY plane
/// and facing +Z, texcoords running 0..1 across the whole grid.
pub fn plane(mesh: &mut MeshBuilder, cols: usize, rows: usize, size: f32) -> Result<()> {
    let h = size * 0.5;
    let cell = size / cols.max(1) as f32;
    let cell_y = size / rows.max(1) as f32;

    for row in 0..rows {
        for col in 0..cols {
            let x0 = -h + col as f32 * cell;
            let y0 = -h + row as f32 * cell_y;
            let (x1, y1) = (x0 + cell, y0 + cell_y);

            let corners = [
                Vector3::new(x0, y0, 0.0),
                Vector3::new(x1, y0, 0.0),
                Vector3::new(x1, y1, 0.0),
                Vector3::new(x0, y1, 0.0),
            ];
            let (u0, v0) = (col as f32 / cols as f32, row as f32 / rows as f32);
            let (u1, v1) = ((col + 1) as f32 / cols as f32, (row + 1) as f32 / rows as f32);
            let uvs = [[u0, v0], [u1, v0], [u1, v1], [u0, v1]];

            face(mesh, &corners, Vector3::unit_z(), &uvs)?;
        }
    }
    Ok(())
}

/// Appends an axis-aligned cube of the given edge length centered on the
/// origin: six outward-facing quads, 24 vertices, 36 indices.
pub fn cube(mesh: &mut MeshBuilder, size: f32) -> Result<()> {
    let h = size * 0.5;

    // Per face: outward normal and the two in-plane basis vectors, chosen
    // so `u` x `v` points outward.
    let faces: [[Vector3<f32>; 3]; 6] = [
        [Vector3::unit_z(), Vector3::unit_x(), Vector3::unit_y()],
        [-Vector3::unit_z(), -Vector3::unit_x(), Vector3::unit_y()],
        [Vector3::unit_y(), Vector3::unit_x(), -Vector3::unit_z()],
        [-Vector3::unit_y(), Vector3::unit_x(), Vector3::unit_z()],
        [Vector3::unit_x(), -Vector3::unit_z(), Vector3::unit_y()],
        [-Vector3::unit_x(), Vector3::unit_z(), Vector3::unit_y()],
    ];

    for &[n, u, v] in &faces {
        let origin = n * h;
        let corners = [
            origin - u * h - v * h,
            origin + u * h - v * h,
            origin + u * h + v * h,
            origin - u * h + v * h,
        ];
        face(mesh, &corners, n, &FACE_UVS)?;
    }
    Ok(())
}

fn face(
    mesh: &mut MeshBuilder,
    corners: &[Vector3<f32>; 4],
    normal: Vector3<f32>,
    uvs: &[[f32; 2]; 4],
) -> Result<()> {
    let format = mesh.vertex_format();

    for (i, &corner) in corners.iter().enumerate() {
        mesh.start_vertex().position(corner)?;

        // Written once, carried across the other three vertices.
        if i == 0 {
            if format.contains(VertexChannel::Normal.bit()) {
                mesh.normal(normal)?;
            }
            if format.contains(VertexChannel::Color0.bit()) {
                mesh.color(Color::white())?;
            }
        }

        if format.contains(VertexChannel::Texcoord0.bit()) {
            mesh.texcoord(uvs[i])?;
        }
    }

    mesh.append_indices(&[0, 1, 2, 2, 0, 3]);
    Ok(())
}
