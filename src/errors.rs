use crate::mesh::vertex::{VertexChannel, VertexFormat};

#[derive(Debug, Fail, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A setter was invoked for a channel the builder's vertex format does
    /// not declare.
    #[fail(display = "Vertex channel {:?} is not declared in the format.", _0)]
    ChannelNotInFormat(VertexChannel),
    /// A per-channel setter was called before the first vertex was started.
    #[fail(display = "No vertex has been started.")]
    NoActiveVertex,
    /// The transfer destination expects a different vertex format than the
    /// one the builder was constructed with.
    #[fail(display = "Vertex format mismatch, have {:?} but {:?} was requested.", _0, _1)]
    FormatMismatch(VertexFormat, VertexFormat),
    /// A payload or destination length does not match the source.
    #[fail(display = "Length mismatch, expected {} but got {}.", _0, _1)]
    LengthMismatch(usize, usize),
}

pub type Result<T> = ::std::result::Result<T, Error>;
