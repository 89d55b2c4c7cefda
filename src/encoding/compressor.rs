//! Counting, tree building and packing tied together.

use alloc::vec::Vec;

use super::{pack, PackError, Packed};
use crate::frame::FrameHeader;
use crate::huff0::{CodeTable, FrequencyTable, HuffmanTree};

/// Everything produced by [`compress`]: the packed payload and the codebook needed to
/// decode it. Both have to be stored, neither is of any use without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub packed: Packed,
    pub codes: CodeTable,
    /// xxhash64 of the original content, only computed with the `hash` feature
    pub content_checksum: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CompressError {
    #[error(transparent)]
    PackError(#[from] PackError),
}

/// Compress a single buffer.
///
/// ```
/// let compressed = huffzip::compress(b"AAAAABBBCC").unwrap();
/// assert_eq!(compressed.codes.len(), 3);
/// assert_eq!(compressed.packed.symbol_count, 10);
/// ```
pub fn compress(data: &[u8]) -> Result<Compressed, CompressError> {
    let frequencies = FrequencyTable::count(data);
    let codes = match HuffmanTree::build(&frequencies) {
        Some(tree) => tree.code_table(),
        None => CodeTable::new(),
    };
    vprintln!(
        "Compressing {} bytes with {} distinct symbols",
        data.len(),
        codes.len()
    );

    let packed = pack(data, &codes)?;
    vprintln!(
        "Packed {} bytes into {} bits",
        packed.symbol_count,
        packed.bit_len
    );

    Ok(Compressed {
        packed,
        codes,
        content_checksum: checksum(data),
    })
}

/// Concatenate all `sources` in order and compress them as one buffer with one codebook.
pub fn compress_all<I>(sources: I) -> Result<Compressed, CompressError>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut combined = Vec::new();
    for source in sources {
        combined.extend_from_slice(source.as_ref());
    }
    compress(&combined)
}

#[cfg(feature = "hash")]
fn checksum(data: &[u8]) -> Option<u64> {
    Some(crate::frame::content_checksum(data))
}

#[cfg(not(feature = "hash"))]
fn checksum(_data: &[u8]) -> Option<u64> {
    None
}

impl Compressed {
    pub fn frame_header(&self) -> FrameHeader {
        FrameHeader {
            symbol_count: self.packed.symbol_count,
            content_checksum: self.content_checksum,
        }
    }

    /// The frame header followed by the packed payload. This is what goes into the archive,
    /// the codebook is stored separately.
    pub fn to_frame_bytes(&self) -> Vec<u8> {
        let header = self.frame_header();
        let mut output = Vec::with_capacity(header.serialized_len() + self.packed.bytes.len());
        header.serialize(&mut output);
        output.extend_from_slice(&self.packed.bytes);
        output
    }

    /// Size of the packed payload in relation to the input, `1.0` for empty input
    pub fn ratio(&self) -> f64 {
        if self.packed.symbol_count == 0 {
            return 1.0;
        }
        self.packed.bytes.len() as f64 / self.packed.symbol_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::{compress, compress_all};
    use crate::frame::read_frame_header;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn empty_input_compresses_to_nothing() {
        let compressed = compress(&[]).unwrap();
        assert!(compressed.codes.is_empty());
        assert!(compressed.packed.bytes.is_empty());
        assert_eq!(compressed.packed.symbol_count, 0);
        assert_eq!(compressed.ratio(), 1.0);
    }

    #[test]
    fn scenario_sizes() {
        let compressed = compress(b"AAAAABBBCC").unwrap();
        let len = |symbol: u8| compressed.codes.get(symbol).unwrap().len() as u64;
        let bits = 5 * len(b'A') + 3 * len(b'B') + 2 * len(b'C');
        assert!(len(b'A') < len(b'C'));
        assert_eq!(compressed.packed.bit_len, bits);
        assert_eq!(compressed.packed.bytes.len() as u64, bits.div_ceil(8));
    }

    #[test]
    fn compress_all_concatenates() {
        let parts: Vec<Vec<u8>> = vec![b"hello ".to_vec(), vec![], b"world".to_vec()];
        assert_eq!(compress_all(&parts).unwrap(), compress(b"hello world").unwrap());
    }

    #[test]
    fn deterministic_output() {
        let data = b"it was the best of times, it was the worst of times";
        assert_eq!(compress(data).unwrap(), compress(data).unwrap());
    }

    #[test]
    fn frame_starts_with_header() {
        let compressed = compress(b"frame me").unwrap();
        let frame = compressed.to_frame_bytes();
        let (header, bytes_read) = read_frame_header(&frame).unwrap();
        assert_eq!(header, compressed.frame_header());
        assert_eq!(&frame[bytes_read..], compressed.packed.bytes.as_slice());
        #[cfg(feature = "hash")]
        assert!(header.content_checksum.is_some());
    }
}
