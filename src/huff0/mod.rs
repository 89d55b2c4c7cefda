/// Huffman coding is a method of encoding where symbols are assigned a code,
/// and more commonly used symbols get shorter codes, and less commonly
/// used symbols get longer codes. Codes are prefix free, meaning no code
/// is the beginning of another one.
mod code;
mod code_table;
mod frequency;
mod tree;
mod trie;

pub use code::*;
pub use code_table::*;
pub use frequency::*;
pub use tree::*;
pub use trie::*;

/// Result of following a single bit from some position in a code tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<P> {
    /// The bit leads to another inner node
    Continue(P),
    /// The bit completes the code of this symbol
    Emit(u8),
    /// No code continues with this bit
    Dead,
}

/// Anything that can be walked one bit at a time, starting from a root and ending at a symbol.
///
/// Both the [`HuffmanTree`] built during compression and the [`DecodeTrie`] rebuilt from a
/// persisted [`CodeTable`] implement this, so the unpacker does not care which one it gets.
pub trait CodeWalker {
    /// Handle to an inner node
    type Position: Copy;

    /// The inner node every code starts at
    fn start(&self) -> Self::Position;

    /// Follow `bit` (false is 0/left, true is 1/right) from the inner node `from`
    fn step(&self, from: Self::Position, bit: bool) -> Step<Self::Position>;
}

/// Compress `data` into a frame and decode it again, panicking if anything goes wrong
/// or the output differs from the input.
#[cfg(feature = "fuzz_exports")]
pub fn round_trip(data: &[u8]) {
    let compressed = crate::encoding::compress(data).unwrap();
    let frame = compressed.to_frame_bytes();
    let decoded = crate::decoding::decompress_frame(&frame, &compressed.codes).unwrap();
    assert_eq!(data, decoded.as_slice());

    let codebook = compressed.codes.to_codebook_string();
    let reloaded = CodeTable::parse_codebook(&codebook).unwrap();
    assert_eq!(reloaded, compressed.codes);
}
