//! Structures and utilities used for decoding packed payloads

pub mod bit_reader;
mod decompressor;
mod unpacker;

pub use decompressor::*;
pub use unpacker::*;
