pub use crate::errors::{Error, Result};

pub use crate::math;
pub use crate::math::Color;

pub use crate::mesh;
pub use crate::mesh::{
    upload, BufferTarget, BufferUsage, IndexBuilder, IndexData, MeshBuilder, MeshData,
    VertexBuilder, VertexChannel, VertexData, VertexFormat,
};
