#![cfg(test)]
//! Tests going through the whole pipeline, from raw bytes to packed bits and back.


use crate::huff0::{DecodeTrie, FrequencyTable, HuffmanTree};
use crate::{compress, decompress, decompress_frame, CodeTable, DecompressError};
use alloc::vec::Vec;

#[test]
fn scenario_aaaaabbbcc() {
    let data = b"AAAAABBBCC";

    let frequencies = FrequencyTable::count(data);
    assert_eq!(
        frequencies.iter().collect::<Vec<_>>(),
        [(b'A', 5), (b'B', 3), (b'C', 2)]
    );

    let compressed = compress(data).unwrap();
    let codes = &compressed.codes;
    let len = |symbol: u8| codes.get(symbol).map(|code| code.len()).unwrap();
    assert!(len(b'A') < len(b'C'));

    let bits = 5 * len(b'A') + 3 * len(b'B') + 2 * len(b'C');
    assert_eq!(compressed.packed.bytes.len(), bits.div_ceil(8));
    assert_eq!(decompress(&compressed.packed, codes).unwrap(), data);
}

#[test]
fn single_symbol_regression() {
    let data = [7u8; 1000];
    let compressed = compress(&data).unwrap();
    assert_eq!(compressed.codes.len(), 1);
    assert_eq!(compressed.codes.get(7).unwrap().len(), 1);
    assert_eq!(compressed.packed.bytes.len(), 125);
    assert!(compressed.packed.bytes.iter().all(|&byte| byte == 0));
    assert_eq!(decompress(&compressed.packed, &compressed.codes).unwrap(), data);
}

#[test]
fn single_byte_input() {
    let compressed = compress(&[200]).unwrap();
    assert_eq!(compressed.packed.bytes, [0]);
    assert_eq!(decompress(&compressed.packed, &compressed.codes).unwrap(), [200]);
}

#[test]
fn empty_input() {
    let compressed = compress(&[]).unwrap();
    assert!(compressed.codes.is_empty());
    assert!(compressed.packed.bytes.is_empty());
    assert!(decompress(&compressed.packed, &compressed.codes)
        .unwrap()
        .is_empty());
    let frame = compressed.to_frame_bytes();
    assert!(decompress_frame(&frame, &compressed.codes)
        .unwrap()
        .is_empty());
}

#[test]
fn all_byte_values() {
    let data: Vec<u8> = (0..=255).collect();
    let compressed = compress(&data).unwrap();
    assert_eq!(compressed.codes.len(), 256);
    // equal counts over a power of two symbols give a perfectly balanced tree
    assert!(compressed.codes.iter().all(|(_, code)| code.len() == 8));
    assert_eq!(decompress(&compressed.packed, &compressed.codes).unwrap(), data);
}

#[test]
fn codebook_survives_text_round_trip() {
    let data = b"Codes are written as text and read back before decoding \xff\x80\x00";
    let compressed = compress(data).unwrap();
    let text = compressed.codes.to_codebook_string();
    let reloaded = CodeTable::parse_codebook(&text).unwrap();
    assert_eq!(reloaded, compressed.codes);
    assert_eq!(decompress(&compressed.packed, &reloaded).unwrap(), data);
}

#[test]
fn decoding_uses_only_the_codebook() {
    // Decoding with a trie from the persisted codes and with the original tree agree
    let data = b"mississippi river";
    let tree = HuffmanTree::from_bytes(data).unwrap();
    let codes = tree.code_table();
    let trie = DecodeTrie::from_code_table(&codes).unwrap();
    let compressed = compress(data).unwrap();
    assert_eq!(compressed.codes, codes);
    let via_tree =
        crate::decoding::unpack(&compressed.packed.bytes, &tree, compressed.packed.symbol_count)
            .unwrap();
    let via_trie =
        crate::decoding::unpack(&compressed.packed.bytes, &trie, compressed.packed.symbol_count)
            .unwrap();
    assert_eq!(via_tree, via_trie);
    assert_eq!(via_trie, data);
}

#[test]
fn corruption_is_reported() {
    let compressed = compress(&[7u8; 16]).unwrap();
    let mut packed = compressed.packed.clone();
    packed.bytes[1] = 0b0000_1000;
    assert!(matches!(
        decompress(&packed, &compressed.codes),
        Err(DecompressError::UnpackError(
            crate::decoding::UnpackError::Corrupted { bit_offset: 12, .. }
        ))
    ));
}

#[test]
fn codebook_from_other_input_is_rejected() {
    let compressed = compress(b"abc").unwrap();
    let other = compress(b"xyz").unwrap();
    assert_ne!(compressed.codes, other.codes);
    // pack with the wrong table fails loudly instead of dropping bytes
    assert!(crate::encoding::pack(b"abc", &other.codes).is_err());
    // decode with the wrong table gives the wrong bytes, the checksum catches that
    #[cfg(feature = "hash")]
    assert!(matches!(
        decompress_frame(&compressed.to_frame_bytes(), &other.codes),
        Err(DecompressError::ChecksumMismatch { .. })
    ));
}
