//! Meshkit is a small toolkit for describing meshes vertex-by-vertex and
//! packing them into tightly interleaved byte streams that are ready for a
//! rendering back end to upload.
//!
//! The entry point is [`MeshBuilder`], which couples a growable interleaved
//! vertex stream with a rebasing 16-bit index stream. The set of per-vertex
//! channels is picked once, at construction time, as a [`VertexFormat`]
//! bit-set; the binary layout of every vertex record is derived from it.
//!
//! ```rust
//! use meshkit::prelude::*;
//!
//! # fn run() -> meshkit::errors::Result<()> {
//! let mut mesh = MeshBuilder::new(VertexFormat::POSITION | VertexFormat::COLOR0);
//!
//! // Channels that do not change between vertices only have to be written
//! // once; finalization carries the last written value forward.
//! mesh.start_vertex().position([0.0, 0.0, 0.0])?.color([255, 0, 0, 255])?;
//! mesh.start_vertex().position([1.0, 0.0, 0.0])?;
//! mesh.start_vertex().position([1.0, 1.0, 0.0])?;
//! mesh.start_vertex().position([0.0, 1.0, 0.0])?;
//! mesh.append_indices(&[0, 1, 2, 2, 0, 3]);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
//!
//! The finished payloads are read back through the [`VertexData`] and
//! [`IndexData`] traits, which is all an upload layer ever sees of a
//! builder. No graphics API is touched anywhere in this crate.
//!
//! [`MeshBuilder`]: mesh/builder/struct.MeshBuilder.html
//! [`VertexFormat`]: mesh/vertex/struct.VertexFormat.html
//! [`VertexData`]: mesh/data/trait.VertexData.html
//! [`IndexData`]: mesh/data/trait.IndexData.html

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub mod errors;
pub mod math;
pub mod mesh;
pub mod prelude;
