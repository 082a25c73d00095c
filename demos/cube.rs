//! Builds a textured cube on the CPU and hands it to a stand-in device,
//! which is everything a rendering back end would see of this crate.
//!
//! Run with `RUST_LOG=debug cargo run --example cube` to watch the upload.

extern crate env_logger;
#[macro_use]
extern crate log;
extern crate meshkit;

use meshkit::mesh::prefab;
use meshkit::prelude::*;

/// Stand-in for a device back end; a real one would copy the payloads into
/// graphics-API buffer objects here.
struct PrintTarget;

impl BufferTarget for PrintTarget {
    fn upload_vertices(
        &mut self,
        format: VertexFormat,
        vertices: &[u8],
        usage: BufferUsage,
    ) -> Result<()> {
        info!(
            "vertex buffer: {} bytes, stride {} ({:?})",
            vertices.len(),
            format.stride(),
            usage
        );
        Ok(())
    }

    fn upload_indices(&mut self, indices: &[u16], usage: BufferUsage) -> Result<()> {
        info!("index buffer: {} indices ({:?})", indices.len(), usage);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let format = VertexFormat::POSITION
        | VertexFormat::NORMAL
        | VertexFormat::COLOR0
        | VertexFormat::TEXCOORD0;

    let mut mesh = MeshBuilder::new(format);
    prefab::cube(&mut mesh, 2.0)?;

    println!(
        "cube: {} vertices x {} bytes, {} indices over {} channels",
        mesh.vertex_count(),
        format.stride(),
        mesh.index_count(),
        format.len()
    );

    upload(&mut mesh, &mut PrintTarget, BufferUsage::StaticDraw)
}
