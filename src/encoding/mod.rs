//! Modules used for compressing/encoding data: packing codes into bits
//! and wrapping the result into a frame.
pub(crate) mod bit_writer;
mod compressor;
mod packer;

pub use bit_writer::BitWriter;
pub use compressor::*;
pub use packer::*;
