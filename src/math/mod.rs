//! Math types used across the crate, mostly re-exported from `cgmath`.

pub use cgmath::*;

pub mod color;
pub use self::color::Color;
