use alloc::vec::Vec;

use super::BitWriter;
use crate::huff0::CodeTable;

/// Packed bits together with what's needed to know where they end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed {
    /// The concatenated codes, most significant bit first, zero padded
    pub bytes: Vec<u8>,
    /// Number of symbols (original bytes) encoded in `bytes`
    pub symbol_count: u64,
    /// Number of meaningful bits in `bytes`, everything after is padding
    pub bit_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PackError {
    #[error("Byte {symbol} at offset {offset} has no code in the code table. The code table doesn't belong to this input")]
    MissingCode { symbol: u8, offset: usize },
}

/// Replace every byte of `data` by its code from `codes`.
///
/// Fails on the first byte that has no code, nothing is dropped or substituted.
pub fn pack(data: &[u8], codes: &CodeTable) -> Result<Packed, PackError> {
    // half the input size is a decent guess for anything worth compressing
    let mut writer = BitWriter::with_capacity(data.len() / 2);
    for (offset, &symbol) in data.iter().enumerate() {
        let code = codes
            .get(symbol)
            .ok_or(PackError::MissingCode { symbol, offset })?;
        writer.write_code(code);
    }

    let bit_len = writer.bits_written();
    Ok(Packed {
        bytes: writer.dump(),
        symbol_count: data.len() as u64,
        bit_len,
    })
}
