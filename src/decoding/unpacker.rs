use alloc::vec::Vec;

use super::bit_reader::BitReader;
use crate::huff0::{CodeWalker, Step};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum UnpackError {
    #[error("Bit {bit_offset} leads to a code no symbol has (after {decoded} symbols). The payload or the codebook is corrupted")]
    Corrupted { bit_offset: usize, decoded: usize },
    #[error("Payload ended after {decoded} of {expected} symbols")]
    UnexpectedEnd { decoded: usize, expected: u64 },
    #[error("Can't decode {symbol_count} symbols from {available_bits} bits, every symbol needs at least one bit")]
    SymbolCountTooLarge {
        symbol_count: u64,
        available_bits: usize,
    },
    #[error("{unused_bits} bits are left after the last symbol, more than the padding of one byte")]
    TrailingBytes { unused_bits: usize },
}

/// Decode exactly `symbol_count` symbols from `packed` by walking `walker` one bit at a time.
///
/// Walks start at the root, a `0` bit goes left and a `1` bit goes right. Whenever a symbol
/// is reached it is emitted and the walk starts over. The padding bits in the last byte are
/// never looked at, but a payload with whole unused bytes at the end is rejected.
pub fn unpack<W: CodeWalker>(
    packed: &[u8],
    walker: &W,
    symbol_count: u64,
) -> Result<Vec<u8>, UnpackError> {
    use UnpackError as err;

    let mut br = BitReader::new(packed);
    let expected = usize::try_from(symbol_count)
        .ok()
        .filter(|&expected| expected <= br.bits_left())
        .ok_or(err::SymbolCountTooLarge {
            symbol_count,
            available_bits: br.bits_left(),
        })?;

    let mut output = Vec::with_capacity(expected);
    let mut position = walker.start();
    while output.len() < expected {
        let bit_offset = br.bits_read();
        let bit = br.get_bit().map_err(|_| err::UnexpectedEnd {
            decoded: output.len(),
            expected: symbol_count,
        })?;
        match walker.step(position, bit) {
            Step::Continue(next) => position = next,
            Step::Emit(symbol) => {
                output.push(symbol);
                position = walker.start();
            }
            Step::Dead => {
                return Err(err::Corrupted {
                    bit_offset,
                    decoded: output.len(),
                })
            }
        }
    }

    if br.bits_left() >= 8 {
        return Err(err::TrailingBytes {
            unused_bits: br.bits_left(),
        });
    }
    vprintln!(
        "Unpacked {} symbols from {} bits, {} padding bits",
        output.len(),
        br.bits_read(),
        br.bits_left()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::{unpack, UnpackError};
    use crate::encoding::pack;
    use crate::huff0::{Code, CodeTable, DecodeTrie, HuffmanTree};

    fn trie(entries: &[(u8, &str)]) -> DecodeTrie {
        let table: CodeTable = entries
            .iter()
            .map(|(symbol, bits)| (*symbol, bits.parse::<Code>().unwrap()))
            .collect();
        DecodeTrie::from_code_table(&table).unwrap()
    }

    #[test]
    fn padding_is_never_decoded() {
        // A is `0`, so padding zeros would decode as extra A's without the symbol count
        let trie = trie(&[(b'A', "0"), (b'B', "11"), (b'C', "10")]);
        let packed = [0b0000_0111, 0b1111_0100];
        assert_eq!(unpack(&packed, &trie, 10).unwrap(), b"AAAAABBBCC");
        assert_eq!(unpack(&packed, &trie, 9).unwrap(), b"AAAAABBBC");
    }

    #[test]
    fn tree_and_trie_decode_the_same() {
        let data = b"she sells sea shells by the sea shore";
        let tree = HuffmanTree::from_bytes(data).unwrap();
        let table = tree.code_table();
        let packed = pack(data, &table).unwrap();
        let trie = DecodeTrie::from_code_table(&table).unwrap();
        assert_eq!(unpack(&packed.bytes, &tree, packed.symbol_count).unwrap(), data);
        assert_eq!(unpack(&packed.bytes, &trie, packed.symbol_count).unwrap(), data);
    }

    #[test]
    fn dead_path_is_corruption() {
        // single symbol tree: `1` leads nowhere
        let tree = HuffmanTree::from_bytes(&[7; 3]).unwrap();
        assert_eq!(unpack(&[0b0000_0000], &tree, 3).unwrap(), [7, 7, 7]);
        assert_eq!(
            unpack(&[0b0010_0000], &tree, 3),
            Err(UnpackError::Corrupted {
                bit_offset: 2,
                decoded: 2
            })
        );

        // incomplete code: `11` leads nowhere
        let trie = trie(&[(1, "0"), (2, "10")]);
        assert_eq!(
            unpack(&[0b0110_0000], &trie, 3),
            Err(UnpackError::Corrupted {
                bit_offset: 2,
                decoded: 1
            })
        );
    }

    #[test]
    fn truncated_payload() {
        let trie = trie(&[(1, "0"), (2, "1111")]);
        // 0 1111 0 11 is cut short in the middle of the second 2
        assert_eq!(
            unpack(&[0b0111_1011], &trie, 4),
            Err(UnpackError::UnexpectedEnd {
                decoded: 3,
                expected: 4
            })
        );
        assert_eq!(
            unpack(&[0xFF], &trie, 9),
            Err(UnpackError::SymbolCountTooLarge {
                symbol_count: 9,
                available_bits: 8
            })
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let trie = trie(&[(1, "0"), (2, "1")]);
        assert_eq!(unpack(&[0b1000_0000], &trie, 1).unwrap(), [2]);
        assert_eq!(
            unpack(&[0b1000_0000, 0], &trie, 1),
            Err(UnpackError::TrailingBytes { unused_bits: 15 })
        );
        assert!(unpack(&[], &trie, 0).unwrap().is_empty());
        assert_eq!(
            unpack(&[0], &trie, 0),
            Err(UnpackError::TrailingBytes { unused_bits: 8 })
        );
    }
}
