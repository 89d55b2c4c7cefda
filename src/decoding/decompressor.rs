//! Rebuilding the input from a packed payload and its codebook.

use alloc::vec::Vec;

use super::unpacker::{unpack, UnpackError};
use crate::encoding::Packed;
use crate::frame::{read_frame_header, ReadFrameHeaderError};
use crate::huff0::{CodeTable, DecodeTrie, TrieError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressError {
    #[error("Codebook can't be used for decoding: {0}")]
    InvalidCodebook(#[from] TrieError),
    #[error(transparent)]
    UnpackError(#[from] UnpackError),
    #[error(transparent)]
    ReadFrameHeaderError(#[from] ReadFrameHeaderError),
    #[error("Content checksum mismatch. Frame says: {expected:#018x}, decoded content has: {got:#018x}")]
    ChecksumMismatch { expected: u64, got: u64 },
}

/// Decode `packed` with the codes of `codes`.
///
/// The codes are turned into a [`DecodeTrie`] first, a codebook that isn't prefix free
/// is rejected before a single bit is looked at.
pub fn decompress(packed: &Packed, codes: &CodeTable) -> Result<Vec<u8>, DecompressError> {
    decompress_bytes(&packed.bytes, codes, packed.symbol_count)
}

/// Decode a frame as written by [`crate::Compressed::to_frame_bytes`].
///
/// With the `hash` feature a checksum present in the frame is verified, without it
/// the checksum is skipped.
pub fn decompress_frame(frame: &[u8], codes: &CodeTable) -> Result<Vec<u8>, DecompressError> {
    let (header, header_len) = read_frame_header(frame)?;
    vprintln!(
        "Frame header: {} symbols, checksum: {:?}",
        header.symbol_count,
        header.content_checksum
    );
    let output = decompress_bytes(&frame[header_len..], codes, header.symbol_count)?;

    #[cfg(feature = "hash")]
    if let Some(expected) = header.content_checksum {
        let got = crate::frame::content_checksum(&output);
        if got != expected {
            return Err(DecompressError::ChecksumMismatch { expected, got });
        }
    }

    Ok(output)
}

fn decompress_bytes(
    packed: &[u8],
    codes: &CodeTable,
    symbol_count: u64,
) -> Result<Vec<u8>, DecompressError> {
    let trie = DecodeTrie::from_code_table(codes)?;
    Ok(unpack(packed, &trie, symbol_count)?)
}
