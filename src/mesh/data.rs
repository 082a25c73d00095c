//! The read side of mesh construction: the contract an upload layer uses
//! to size its buffer objects and copy the finished payloads out, plus the
//! usage hints it forwards to the device. Nothing in here touches a
//! graphics API; the device stays behind the [`BufferTarget`] seam.
//!
//! [`BufferTarget`]: trait.BufferTarget.html

use crate::errors::{Error, Result};

use super::builder::{IndexBuilder, MeshBuilder, VertexBuilder};
use super::vertex::VertexFormat;

/// Hints about the intended update and access strategy of an uploaded
/// buffer. Forwarded untouched to the device; the builders attach no
/// semantics to it.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times.
    StaticDraw,
    /// Re-uploaded now and then, drawn many times in between.
    DynamicDraw,
    /// Re-uploaded for roughly every use.
    StreamDraw,
    /// As the `Draw` variants, but read back by the application rather
    /// than sourced for drawing.
    StaticCopy,
    DynamicCopy,
    StreamCopy,
}

impl Default for BufferUsage {
    fn default() -> Self {
        BufferUsage::StaticDraw
    }
}

/// Finished vertex payloads, as an upload layer sees them.
pub trait VertexData {
    /// The number of vertices available.
    fn vertex_count(&self) -> usize;

    /// The format vertex records are packed against.
    fn vertex_format(&self) -> VertexFormat;

    /// Copies the packed vertex records into `dest`, finalizing any vertex
    /// still in progress first. `format` must equal `vertex_format()` and
    /// `dest` must hold exactly `vertex_count() * stride` bytes; nothing is
    /// written otherwise.
    fn copy_vertices(&mut self, format: VertexFormat, dest: &mut [u8]) -> Result<()>;
}

/// Finished index payloads, as an upload layer sees them.
pub trait IndexData {
    /// The number of indices available.
    fn index_count(&self) -> usize;

    /// Copies the index stream into `dest`, whose length must equal
    /// `index_count()`.
    fn copy_indices(&self, dest: &mut [u16]) -> Result<()>;
}

/// Everything an upload layer needs from one mesh.
pub trait MeshData: VertexData + IndexData {}

impl<T: VertexData + IndexData> MeshData for T {}

impl VertexData for VertexBuilder {
    fn vertex_count(&self) -> usize {
        self.vertex_count()
    }

    fn vertex_format(&self) -> VertexFormat {
        self.vertex_format()
    }

    fn copy_vertices(&mut self, format: VertexFormat, dest: &mut [u8]) -> Result<()> {
        if format != self.vertex_format() {
            return Err(Error::FormatMismatch(self.vertex_format(), format));
        }

        let expected = self.vertex_count() * self.stride();
        if dest.len() != expected {
            return Err(Error::LengthMismatch(expected, dest.len()));
        }

        dest.copy_from_slice(self.finish());
        Ok(())
    }
}

impl IndexData for IndexBuilder {
    fn index_count(&self) -> usize {
        self.index_count()
    }

    fn copy_indices(&self, dest: &mut [u16]) -> Result<()> {
        self.copy_indices(dest)
    }
}

impl VertexData for MeshBuilder {
    fn vertex_count(&self) -> usize {
        self.vertices.vertex_count()
    }

    fn vertex_format(&self) -> VertexFormat {
        self.vertices.vertex_format()
    }

    fn copy_vertices(&mut self, format: VertexFormat, dest: &mut [u8]) -> Result<()> {
        self.vertices.copy_vertices(format, dest)
    }
}

impl IndexData for MeshBuilder {
    /// A mesh that never supplied indices reports one index per vertex.
    fn index_count(&self) -> usize {
        if self.indices.has_indices() {
            self.indices.index_count()
        } else {
            self.vertices.vertex_count()
        }
    }

    fn copy_indices(&self, dest: &mut [u16]) -> Result<()> {
        if self.indices.has_indices() {
            return self.indices.copy_indices(dest);
        }

        // Identity sequence for naturally ordered meshes.
        let count = self.vertices.vertex_count();
        if dest.len() != count {
            return Err(Error::LengthMismatch(count, dest.len()));
        }

        for (i, index) in dest.iter_mut().enumerate() {
            *index = i as u16;
        }
        Ok(())
    }
}

/// The device-side collaborator: whatever owns the actual buffer objects.
/// Implementations receive finished payloads and a pass-through usage hint;
/// how they store or upload them is entirely their business.
pub trait BufferTarget {
    fn upload_vertices(
        &mut self,
        format: VertexFormat,
        vertices: &[u8],
        usage: BufferUsage,
    ) -> Result<()>;

    fn upload_indices(&mut self, indices: &[u16], usage: BufferUsage) -> Result<()>;
}

/// Drives one mesh's payloads into a [`BufferTarget`]: sizes scratch
/// buffers from the counts, copies both streams out, and hands them over.
///
/// [`BufferTarget`]: trait.BufferTarget.html
pub fn upload<M, T>(data: &mut M, target: &mut T, usage: BufferUsage) -> Result<()>
where
    M: MeshData + ?Sized,
    T: BufferTarget + ?Sized,
{
    let format = data.vertex_format();

    let mut vertices = vec![0; data.vertex_count() * format.stride()];
    data.copy_vertices(format, &mut vertices)?;

    let mut indices = vec![0; data.index_count()];
    data.copy_indices(&mut indices)?;

    debug!(
        "uploading {} vertices ({} bytes) and {} indices ({:?})",
        data.vertex_count(),
        vertices.len(),
        indices.len(),
        usage
    );

    target.upload_vertices(format, &vertices, usage)?;
    target.upload_indices(&indices, usage)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mesh::vertex::VertexChannel;

    #[derive(Debug, Default)]
    struct RecordingTarget {
        vertices: Vec<u8>,
        indices: Vec<u16>,
        usage: Option<BufferUsage>,
    }

    impl BufferTarget for RecordingTarget {
        fn upload_vertices(
            &mut self,
            _: VertexFormat,
            vertices: &[u8],
            usage: BufferUsage,
        ) -> Result<()> {
            self.vertices = vertices.to_vec();
            self.usage = Some(usage);
            Ok(())
        }

        fn upload_indices(&mut self, indices: &[u16], usage: BufferUsage) -> Result<()> {
            self.indices = indices.to_vec();
            self.usage = Some(usage);
            Ok(())
        }
    }

    fn two_triangles() -> MeshBuilder {
        let mut mesh = MeshBuilder::new(VertexFormat::POSITION | VertexFormat::COLOR0);
        mesh.start_vertex()
            .position([0.0, 0.0, 0.0])
            .unwrap()
            .color([255, 255, 255, 255])
            .unwrap();
        mesh.start_vertex().position([1.0, 0.0, 0.0]).unwrap();
        mesh.start_vertex().position([1.0, 1.0, 0.0]).unwrap();
        mesh.start_vertex().position([0.0, 1.0, 0.0]).unwrap();
        mesh.append_indices(&[0, 1, 2, 2, 0, 3]);
        mesh
    }

    #[test]
    fn format_is_validated() {
        let mut mesh = two_triangles();
        let format = mesh.vertex_format();
        let mut dest = vec![0; mesh.vertex_count() * format.stride()];

        assert_eq!(
            mesh.copy_vertices(VertexFormat::POSITION, &mut dest).err(),
            Some(Error::FormatMismatch(format, VertexFormat::POSITION))
        );
        assert!(mesh.copy_vertices(format, &mut dest).is_ok());
    }

    #[test]
    fn destination_length_is_validated() {
        let mut mesh = two_triangles();
        let format = mesh.vertex_format();

        let mut short = vec![0; 3];
        assert_eq!(
            mesh.copy_vertices(format, &mut short).err(),
            Some(Error::LengthMismatch(4 * format.stride(), 3))
        );
    }

    #[test]
    fn identity_fallback() {
        let mut mesh = MeshBuilder::new(VertexFormat::POSITION);
        for _ in 0..4 {
            mesh.start_vertex().position([0.0, 0.0, 0.0]).unwrap();
        }

        assert_eq!(mesh.index_count(), 4);
        let mut indices = vec![0; 4];
        mesh.copy_indices(&mut indices).unwrap();
        assert_eq!(indices, [0, 1, 2, 3]);

        // Supplying indices switches the fallback off.
        mesh.append_indices(&[0, 1, 2]);
        assert_eq!(mesh.index_count(), 3);
    }

    #[test]
    fn upload_copies_both_streams() {
        let mut mesh = two_triangles();
        let mut target = RecordingTarget::default();

        upload(&mut mesh, &mut target, BufferUsage::DynamicDraw).unwrap();

        assert_eq!(target.vertices.len(), 4 * mesh.vertex_format().stride());
        assert_eq!(target.indices, [0, 1, 2, 2, 0, 3]);
        assert_eq!(target.usage, Some(BufferUsage::DynamicDraw));

        // Carry-forward ran before the copy went out.
        let stride = mesh.vertex_format().stride();
        let color = mesh
            .vertex_format()
            .offset(VertexChannel::Color0)
            .unwrap();
        for v in 0..4 {
            let at = v * stride + color;
            assert_eq!(&target.vertices[at..at + 4], &[255, 255, 255, 255]);
        }
    }
}
