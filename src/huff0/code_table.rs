use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use super::{Code, CodeError, DecodeTrie, FrequencyTable, HuffmanTree};
use crate::common::ALPHABET_SIZE;

/// Maps every byte value that occurs in the input to its [`Code`].
///
/// This is the codebook that has to be persisted next to a compressed payload.
/// The text form written by [`CodeTable::to_codebook_string`] has one entry per line:
///
/// ```text
/// 65 0
/// 66 11
/// 67 10
/// ```
///
/// Byte values are written as unsigned decimals. When reading, `-128..=-1` is accepted
/// too and interpreted as the two's complement spelling of `128..=255`.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    /// Index is the symbol
    codes: Vec<Option<Code>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CodebookError {
    #[error("Line {line}: expected `<byte-value> <bit-string>` but found {fields} fields")]
    WrongFieldCount { line: usize, fields: usize },
    #[error("Line {line}: {got:?} is not a byte value, expected a number in -128..=255")]
    InvalidByteValue { line: usize, got: String },
    #[error("Line {line}: byte value {symbol} already has a code")]
    DuplicateSymbol { line: usize, symbol: u8 },
    #[error("Line {line}: {source}")]
    InvalidCode {
        line: usize,
        #[source]
        source: CodeError,
    },
}

impl CodeTable {
    pub fn new() -> Self {
        CodeTable {
            codes: vec![None; ALPHABET_SIZE],
        }
    }

    /// Record the path to every leaf of `tree`. Left edges are `0`, right edges are `1`.
    pub fn derive(tree: &HuffmanTree) -> Self {
        let mut table = Self::new();
        tree.for_each_path(|symbol, code| {
            table.codes[symbol as usize] = Some(*code);
        });
        table
    }

    /// Count `data`, build a tree for it and derive the codes in one go.
    /// Empty input gives an empty table.
    pub fn for_data(data: &[u8]) -> Self {
        HuffmanTree::from_bytes(data)
            .map(|tree| tree.code_table())
            .unwrap_or_default()
    }

    /// Set the code for `symbol`, returning the code it replaced
    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes[symbol as usize].replace(code)
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// All `(symbol, code)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }

    /// Number of symbols with a code
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// True if no code is a prefix of another one, which is what makes a payload decodable
    pub fn is_prefix_free(&self) -> bool {
        DecodeTrie::from_code_table(self).is_ok()
    }

    /// Number of bits the input described by `frequencies` packs into.
    /// `None` if some symbol of `frequencies` has no code.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> Option<u64> {
        frequencies.iter().try_fold(0u64, |bits, (symbol, count)| {
            let code = self.get(symbol)?;
            Some(bits + count * code.len() as u64)
        })
    }

    /// Write the codebook text form, entries in ascending symbol order
    pub fn to_codebook_string(&self) -> String {
        let mut output = String::with_capacity(self.len() * 16);
        for (symbol, code) in self.iter() {
            output.push_str(&format!("{symbol} {code}\n"));
        }
        output
    }

    /// Parse the codebook text form. Blank lines and surrounding whitespace are ignored.
    ///
    /// This only checks every line on its own. Whether the codes together form a prefix
    /// free code is checked when a [`DecodeTrie`] is built from the table.
    pub fn parse_codebook(text: &str) -> Result<Self, CodebookError> {
        use CodebookError as err;

        let mut table = Self::new();
        for (idx, raw_line) in text.lines().enumerate() {
            let line = idx + 1;
            let fields: Vec<&str> = raw_line.split_whitespace().collect();
            let (value, bits) = match fields.as_slice() {
                [] => continue,
                [value, bits] => (*value, *bits),
                _ => {
                    return Err(err::WrongFieldCount {
                        line,
                        fields: fields.len(),
                    })
                }
            };
            let symbol = parse_byte_value(value).ok_or_else(|| err::InvalidByteValue {
                line,
                got: String::from(value),
            })?;
            let code = bits
                .parse::<Code>()
                .map_err(|source| err::InvalidCode { line, source })?;
            if table.insert(symbol, code).is_some() {
                return Err(err::DuplicateSymbol { line, symbol });
            }
        }
        vprintln!("Parsed codebook with {} entries", table.len());
        Ok(table)
    }
}

/// `0..=255` as is, `-128..=-1` as the signed spelling of `128..=255`
fn parse_byte_value(value: &str) -> Option<u8> {
    let value: i16 = value.parse().ok()?;
    match value {
        0..=255 => u8::try_from(value).ok(),
        -128..=-1 => u8::try_from(value + 256).ok(),
        _ => None,
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(u8, Code)> for CodeTable {
    /// Later codes for the same symbol replace earlier ones
    fn from_iter<I: IntoIterator<Item = (u8, Code)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, code) in iter {
            table.insert(symbol, code);
        }
        table
    }
}

#[cfg(feature = "std")]
mod persist {
    use super::{CodeTable, CodebookError};
    use crate::io::{Error, Read, Write};
    use std::string::String;

    #[derive(Debug, thiserror::Error)]
    #[non_exhaustive]
    pub enum ReadCodebookError {
        #[error("Error while reading the codebook: {0}")]
        Io(#[from] Error),
        #[error(transparent)]
        Parse(#[from] CodebookError),
    }

    impl CodeTable {
        /// Write the codebook text form into `writer`
        pub fn write_codebook(&self, mut writer: impl Write) -> Result<(), Error> {
            writer.write_all(self.to_codebook_string().as_bytes())?;
            writer.flush()
        }

        /// Read and parse a whole codebook from `reader`
        pub fn read_codebook(mut reader: impl Read) -> Result<Self, ReadCodebookError> {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            Ok(Self::parse_codebook(&text)?)
        }
    }
}

#[cfg(feature = "std")]
pub use persist::ReadCodebookError;
