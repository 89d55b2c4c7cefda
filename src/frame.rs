//! The frame wrapped around a packed payload.
//!
//! A packed payload on its own can't tell how many symbols it holds, the last byte may
//! end in padding bits that look like the start of another code. The frame header
//! carries that count, plus an optional checksum of the original content:
//!
//! | field          | bytes | notes                                              |
//! |----------------|-------|----------------------------------------------------|
//! | magic number   | 4     | [`MAGIC_NUM`], little endian                       |
//! | descriptor     | 1     | bit 0: content checksum present, others reserved   |
//! | symbol count   | 8     | little endian                                      |
//! | checksum       | 0/8   | xxhash64 of the original content, little endian    |
//!
//! The packed payload follows directly after the header.
use alloc::vec::Vec;

use crate::common::{MAGIC_NUM, MIN_FRAME_HEADER_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    /// Number of bytes the payload decodes to
    pub symbol_count: u64,
    /// xxhash64 of the original content, if present
    pub content_checksum: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDescriptor(pub u8);

const CHECKSUM_FLAG: u8 = 0x1;

impl FrameDescriptor {
    pub fn content_checksum_flag(&self) -> bool {
        self.0 & CHECKSUM_FLAG == CHECKSUM_FLAG
    }

    pub fn reserved_bits(&self) -> u8 {
        self.0 & !CHECKSUM_FLAG
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ReadFrameHeaderError {
    #[error("Frame header needs at least {need} bytes, got: {got}")]
    NotEnoughBytes { got: usize, need: usize },
    #[error("Read wrong magic number: 0x{0:X}")]
    BadMagicNumber(u32),
    #[error("Reserved bits of the frame descriptor are set: 0b{0:08b}")]
    ReservedBitsSet(u8),
}

impl FrameHeader {
    pub fn descriptor(&self) -> FrameDescriptor {
        if self.content_checksum.is_some() {
            FrameDescriptor(CHECKSUM_FLAG)
        } else {
            FrameDescriptor(0)
        }
    }

    /// Number of bytes [`FrameHeader::serialize`] appends
    pub fn serialized_len(&self) -> usize {
        MIN_FRAME_HEADER_SIZE + if self.content_checksum.is_some() { 8 } else { 0 }
    }

    /// Serialize the frame header into a buffer
    pub fn serialize(&self, output: &mut Vec<u8>) {
        vprintln!(
            "Serializing frame header for {} symbols",
            self.symbol_count
        );
        output.extend_from_slice(&MAGIC_NUM.to_le_bytes());
        output.push(self.descriptor().0);
        output.extend_from_slice(&self.symbol_count.to_le_bytes());
        if let Some(checksum) = self.content_checksum {
            output.extend_from_slice(&checksum.to_le_bytes());
        }
    }
}

/// Read a frame header from the start of `source`.
/// Returns the header and the number of bytes it occupied.
pub fn read_frame_header(source: &[u8]) -> Result<(FrameHeader, usize), ReadFrameHeaderError> {
    use ReadFrameHeaderError as err;

    if source.len() < MIN_FRAME_HEADER_SIZE {
        return Err(err::NotEnoughBytes {
            got: source.len(),
            need: MIN_FRAME_HEADER_SIZE,
        });
    }

    let magic_num = u32::from_le_bytes(read_array(&source[0..4]));
    if magic_num != MAGIC_NUM {
        return Err(err::BadMagicNumber(magic_num));
    }

    let descriptor = FrameDescriptor(source[4]);
    if descriptor.reserved_bits() != 0 {
        return Err(err::ReservedBitsSet(descriptor.0));
    }

    let symbol_count = u64::from_le_bytes(read_array(&source[5..13]));
    let mut bytes_read = MIN_FRAME_HEADER_SIZE;

    let content_checksum = if descriptor.content_checksum_flag() {
        let need = bytes_read + 8;
        if source.len() < need {
            return Err(err::NotEnoughBytes {
                got: source.len(),
                need,
            });
        }
        let checksum = u64::from_le_bytes(read_array(&source[bytes_read..need]));
        bytes_read = need;
        Some(checksum)
    } else {
        None
    };

    Ok((
        FrameHeader {
            symbol_count,
            content_checksum,
        },
        bytes_read,
    ))
}

fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut array = [0; N];
    array.copy_from_slice(bytes);
    array
}

/// xxhash64 of `content`, as stored in the frame header
#[cfg(feature = "hash")]
pub fn content_checksum(content: &[u8]) -> u64 {
    twox_hash::XxHash64::oneshot(crate::common::CHECKSUM_SEED, content)
}
