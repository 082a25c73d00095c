//! Incremental construction of interleaved vertex and index streams.
//!
//! A mesh is described vertex-by-vertex against a fixed [`VertexFormat`];
//! the builders in this module pack those calls into the exact binary
//! layout the format implies and hand the finished payloads to an upload
//! layer through the [`VertexData`] / [`IndexData`] contract.
//!
//! [`VertexFormat`]: vertex/struct.VertexFormat.html
//! [`VertexData`]: data/trait.VertexData.html
//! [`IndexData`]: data/trait.IndexData.html

pub mod builder;
pub mod data;
pub mod prefab;
pub mod vertex;

pub use self::builder::{IndexBuilder, MeshBuilder, VertexBuilder};
pub use self::data::{upload, BufferTarget, BufferUsage, IndexData, MeshData, VertexData};
pub use self::vertex::{ElementFormat, VertexChannel, VertexFormat};

/// The number of distinct vertex channel kinds a format can declare.
pub const MAX_VERTEX_CHANNELS: usize = 18;
