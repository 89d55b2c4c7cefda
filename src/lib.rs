//! A Huffman coding compressor and decompressor for in-memory byte buffers.
//!
//! The whole input is counted, a Huffman tree is grown from the byte frequencies,
//! and every byte is replaced by its code, packed most significant bit first.
//! The resulting [`CodeTable`] has to travel with the payload: it is the only
//! thing the decoder needs besides the packed bits and the number of symbols.
//!
//! ```
//! let compressed = huffzip::compress(b"AAAAABBBCC").unwrap();
//! let restored = huffzip::decompress(&compressed.packed, &compressed.codes).unwrap();
//! assert_eq!(restored, b"AAAAABBBCC");
//! ```
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

macro_rules! vprintln {
    ($($x:expr),*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($x),*);
    }
}

pub mod common;
pub mod decoding;
pub mod encoding;
pub mod frame;
pub mod huff0;
mod tests;

#[cfg(feature = "std")]
pub mod io;

pub use decoding::{decompress, decompress_frame, DecompressError};
pub use encoding::{compress, compress_all, CompressError, Compressed, Packed};
pub use huff0::{Code, CodeTable, DecodeTrie, FrequencyTable, HuffmanTree};
