//! Incremental mesh builders.
//!
//! [`VertexBuilder`] assembles a growable byte buffer of interleaved vertex
//! records, one `start_vertex` call per vertex followed by any number of
//! per-channel setters. Channels a vertex does not set are carried forward
//! from the most recent vertex that did set them, so call sites only write
//! what changes:
//!
//! ```rust
//! use meshkit::prelude::*;
//!
//! # fn run() -> meshkit::errors::Result<()> {
//! let mut quad = MeshBuilder::new(VertexFormat::POSITION | VertexFormat::COLOR0);
//! quad.start_vertex().position([0.0, 0.0, 0.0])?.color(Color::white())?;
//! quad.start_vertex().position([1.0, 0.0, 0.0])?;
//! quad.start_vertex().position([1.0, 1.0, 0.0])?;
//! quad.start_vertex().position([0.0, 1.0, 0.0])?;
//! quad.append_indices(&[0, 1, 2, 2, 0, 3]);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
//!
//! [`IndexBuilder`] collects 16-bit indices in locally numbered batches and
//! rebases each batch against the vertices emitted so far, so a primitive
//! can always be described as indices `0..n` of its own four-or-so vertices.
//!
//! [`VertexBuilder`]: struct.VertexBuilder.html
//! [`IndexBuilder`]: struct.IndexBuilder.html

use byteorder::{ByteOrder, NativeEndian};

use crate::errors::{Error, Result};

use super::vertex::{OffsetTable, VertexChannel, VertexFormat};
use super::MAX_VERTEX_CHANNELS;

/// Builds a tightly interleaved vertex byte stream against a fixed
/// [`VertexFormat`].
///
/// [`VertexFormat`]: ../vertex/struct.VertexFormat.html
#[derive(Debug)]
pub struct VertexBuilder {
    format: VertexFormat,
    stride: usize,
    verts: Vec<u8>,
    count: usize,
    /// Channels explicitly written on the current vertex.
    written: VertexFormat,
    /// Byte offset of the most recent value ever written per channel, used
    /// to fill unset channels on finalization.
    last: [Option<usize>; MAX_VERTEX_CHANNELS],
    offsets: OffsetTable,
}

impl VertexBuilder {
    pub fn new(format: VertexFormat) -> Self {
        VertexBuilder {
            format,
            stride: format.stride(),
            verts: Vec::new(),
            count: 0,
            written: VertexFormat::empty(),
            last: [None; MAX_VERTEX_CHANNELS],
            offsets: OffsetTable::new(),
        }
    }

    /// The immutable format this builder packs records against.
    #[inline]
    pub fn vertex_format(&self) -> VertexFormat {
        self.format
    }

    /// The byte stride of one vertex record.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The number of vertices started so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.count
    }

    /// Finalizes the vertex in progress and starts a new, zero-filled one.
    /// Every setter until the next `start_vertex` writes into this record.
    pub fn start_vertex(&mut self) -> &mut Self {
        self.fill();
        self.written = VertexFormat::empty();
        self.count += 1;

        let len = self.verts.len() + self.stride;
        self.verts.resize(len, 0);
        self
    }

    /// Copies `data` into the current vertex's slot for `channel`. The
    /// payload length must equal the channel's byte size; writing the same
    /// channel twice on one vertex keeps the later value.
    pub fn set_channel(&mut self, channel: VertexChannel, data: &[u8]) -> Result<&mut Self> {
        let offset = self.offsets.offset(self.format, channel)?;

        if self.count == 0 {
            return Err(Error::NoActiveVertex);
        }

        if data.len() != channel.bytes() {
            return Err(Error::LengthMismatch(channel.bytes(), data.len()));
        }

        let at = (self.count - 1) * self.stride + offset;
        self.verts[at..at + data.len()].copy_from_slice(data);
        self.written |= channel.bit();
        self.last[channel.index()] = Some(at);
        Ok(self)
    }

    /// Sets the vertex position.
    pub fn position<T>(&mut self, position: T) -> Result<&mut Self>
    where
        T: Into<[f32; 3]>,
    {
        self.set_f32(VertexChannel::Position, &position.into())
    }

    /// Sets the vertex color as packed RGBA bytes. `math::Color` converts
    /// into the packed form, so float colors work here too.
    pub fn color<T>(&mut self, color: T) -> Result<&mut Self>
    where
        T: Into<[u8; 4]>,
    {
        let color = color.into();
        self.set_channel(VertexChannel::Color0, &color)
    }

    /// Sets the vertex normal.
    pub fn normal<T>(&mut self, normal: T) -> Result<&mut Self>
    where
        T: Into<[f32; 3]>,
    {
        self.set_f32(VertexChannel::Normal, &normal.into())
    }

    /// Sets the first texture coordinate set.
    pub fn texcoord<T>(&mut self, texcoord: T) -> Result<&mut Self>
    where
        T: Into<[f32; 2]>,
    {
        self.set_f32(VertexChannel::Texcoord0, &texcoord.into())
    }

    /// Writes float elements as their IEEE-754 bit patterns, native byte
    /// order; no numeric conversion happens on the way in.
    fn set_f32(&mut self, channel: VertexChannel, values: &[f32]) -> Result<&mut Self> {
        let mut raw = [0u8; 16];
        let len = values.len() * 4;
        NativeEndian::write_f32_into(values, &mut raw[..len]);
        self.set_channel(channel, &raw[..len])
    }

    /// Fills every format channel the current vertex has not written with
    /// the most recent value any earlier vertex wrote for it. Channels
    /// nothing ever wrote keep their zero fill. Each channel's slot is
    /// disjoint, so the fill order cannot matter.
    fn fill(&mut self) {
        if self.count == 0 {
            return;
        }

        let cur = (self.count - 1) * self.stride;
        for channel in self.format.channels() {
            if self.written.contains(channel.bit()) {
                continue;
            }

            if let Some(src) = self.last[channel.index()] {
                let dst = cur + self.offsets.lookup(self.format, channel);
                self.verts.copy_within(src..src + channel.bytes(), dst);
                self.last[channel.index()] = Some(dst);
                self.written |= channel.bit();
            }
        }
    }

    /// Finalizes the vertex in progress and returns the packed stream.
    /// Idempotent; also fine to call on an empty builder.
    pub fn finish(&mut self) -> &[u8] {
        self.fill();
        &self.verts
    }

    /// Clears the stream back to zero vertices. The format, stride and
    /// cached channel offsets are retained.
    pub fn clear(&mut self) {
        self.verts.clear();
        self.count = 0;
        self.written = VertexFormat::empty();
        self.last = [None; MAX_VERTEX_CHANNELS];
    }
}

/// Builds a 16-bit index stream out of locally numbered batches.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    /// `None` until indices are first supplied, which is how the mesh
    /// facade knows to fall back to an identity sequence.
    indices: Option<Vec<u16>>,
    /// Base the next batch's indices will be offset by; one more than the
    /// highest index produced so far.
    next: u16,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a batch of indices numbered relative to this call, offsetting
    /// each by the running base. The base then advances past the highest
    /// raw index of the batch, so consecutive batches chain onto a shared,
    /// growing vertex stream without knowing their absolute offsets.
    pub fn append(&mut self, relative: &[u16]) -> &mut Self {
        if relative.is_empty() {
            return self;
        }

        let base = self.next;
        let mut top = 0;

        let indices = self.indices.get_or_insert_with(Vec::new);
        indices.reserve(relative.len());
        for &index in relative {
            indices.push(base.wrapping_add(index));
            if index > top {
                top = index;
            }
        }

        self.next = base.wrapping_add(top).wrapping_add(1);
        self
    }

    /// Replaces the whole stream with an already absolute index sequence
    /// and rewinds the rebasing base to zero.
    pub fn set_indices(&mut self, indices: &[u16]) -> &mut Self {
        self.next = 0;
        match self.indices {
            Some(ref mut stored) => {
                stored.clear();
                stored.extend_from_slice(indices);
            }
            None => self.indices = Some(indices.to_vec()),
        }
        self
    }

    /// Whether any indices have ever been supplied since construction or
    /// the last `clear`.
    pub fn has_indices(&self) -> bool {
        self.indices.is_some()
    }

    /// The number of indices supplied so far.
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, Vec::len)
    }

    /// Copies the stream into `dest`, whose length must equal
    /// `index_count()`.
    pub fn copy_indices(&self, dest: &mut [u16]) -> Result<()> {
        let count = self.index_count();
        if dest.len() != count {
            return Err(Error::LengthMismatch(count, dest.len()));
        }

        if let Some(ref indices) = self.indices {
            dest.copy_from_slice(indices);
        }
        Ok(())
    }

    /// Empties the stream and rewinds the base, restoring the state of a
    /// freshly constructed builder.
    pub fn clear(&mut self) {
        self.indices = None;
        self.next = 0;
    }
}

/// A vertex and an index builder behind one object, which is how meshes are
/// usually assembled. The setters mirror both sub-builders; on the read
/// side a mesh that never supplied indices reports the identity sequence
/// `0..vertex_count`, so naturally ordered meshes can skip index building
/// entirely.
#[derive(Debug)]
pub struct MeshBuilder {
    pub(super) vertices: VertexBuilder,
    pub(super) indices: IndexBuilder,
}

impl MeshBuilder {
    pub fn new(format: VertexFormat) -> Self {
        MeshBuilder {
            vertices: VertexBuilder::new(format),
            indices: IndexBuilder::new(),
        }
    }

    /// The immutable format vertex records are packed against.
    #[inline]
    pub fn vertex_format(&self) -> VertexFormat {
        self.vertices.vertex_format()
    }

    /// See [`VertexBuilder::start_vertex`](struct.VertexBuilder.html#method.start_vertex).
    pub fn start_vertex(&mut self) -> &mut Self {
        self.vertices.start_vertex();
        self
    }

    pub fn set_channel(&mut self, channel: VertexChannel, data: &[u8]) -> Result<&mut Self> {
        self.vertices.set_channel(channel, data)?;
        Ok(self)
    }

    pub fn position<T: Into<[f32; 3]>>(&mut self, position: T) -> Result<&mut Self> {
        self.vertices.position(position)?;
        Ok(self)
    }

    pub fn color<T: Into<[u8; 4]>>(&mut self, color: T) -> Result<&mut Self> {
        self.vertices.color(color)?;
        Ok(self)
    }

    pub fn normal<T: Into<[f32; 3]>>(&mut self, normal: T) -> Result<&mut Self> {
        self.vertices.normal(normal)?;
        Ok(self)
    }

    pub fn texcoord<T: Into<[f32; 2]>>(&mut self, texcoord: T) -> Result<&mut Self> {
        self.vertices.texcoord(texcoord)?;
        Ok(self)
    }

    /// See [`IndexBuilder::append`](struct.IndexBuilder.html#method.append).
    pub fn append_indices(&mut self, relative: &[u16]) -> &mut Self {
        self.indices.append(relative);
        self
    }

    /// See [`IndexBuilder::set_indices`](struct.IndexBuilder.html#method.set_indices).
    pub fn set_indices(&mut self, indices: &[u16]) -> &mut Self {
        self.indices.set_indices(indices);
        self
    }

    /// Finalizes the vertex in progress and returns the packed stream.
    pub fn finish(&mut self) -> &[u8] {
        self.vertices.finish()
    }

    /// Resets both streams back to empty; the format is retained.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}
