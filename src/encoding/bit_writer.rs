use alloc::vec::Vec;

use crate::huff0::Code;

/// An interface for writing an arbitrary number of bits into a buffer,
/// most significant bit first.
///
/// The first bit written ends up in the highest bit of the first byte. Bits that have
/// not been written yet are zero, so the output is always zero padded to a byte boundary.
pub struct BitWriter {
    /// The buffer that's filled with bits
    output: Vec<u8>,
    /// The index pointing to the next unoccupied bit. Effectively just
    /// the number of bits that have been written into the buffer so far.
    bit_idx: u64,
}

impl BitWriter {
    /// Initialize a new writer. Write new bits into the buffer with `write_bits`, and
    /// obtain the output using `dump`
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Like [`BitWriter::new`] but with room for `bytes` bytes of output
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            bit_idx: 0,
        }
    }

    /// Write the `num_bits` most significant bits of `bits`.
    ///
    /// The lower `8 - num_bits` bits of `bits` have to be zero.
    ///
    /// # Panics
    /// If `num_bits` is not in `1..=8`
    pub fn write_bits(&mut self, bits: u8, num_bits: u32) {
        assert!((1..=8).contains(&num_bits), "can't write {num_bits} bits at once");
        debug_assert!(
            num_bits == 8 || bits << num_bits == 0,
            "bits below num_bits must be zero"
        );

        let occupied = (self.bit_idx % 8) as u32;
        if occupied == 0 {
            self.output.push(bits);
        } else {
            // fill the free low bits of the current byte, spill the rest into a new one
            let free = 8 - occupied;
            if let Some(last) = self.output.last_mut() {
                *last |= bits >> occupied;
            }
            if num_bits > free {
                self.output.push(bits << free);
            }
        }
        self.bit_idx += u64::from(num_bits);
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(if bit { 0x80 } else { 0 }, 1);
    }

    /// Append all bits of `code`
    pub fn write_code(&mut self, code: &Code) {
        let mut remaining = code.len();
        for &byte in code.as_bytes() {
            let num_bits = remaining.min(8);
            self.write_bits(byte, num_bits as u32);
            remaining -= num_bits;
        }
    }

    /// Number of bits written so far, not counting padding
    pub fn bits_written(&self) -> u64 {
        self.bit_idx
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.bit_idx % 8 == 0
    }

    /// Returns the populated buffer that you've been writing bits into.
    /// If the last byte isn't full its remaining low bits are zero.
    ///
    /// This function consumes the writer, so it cannot be used after
    /// dumping
    pub fn dump(self) -> Vec<u8> {
        vprintln!(
            "Dumping {} bits in {} bytes",
            self.bit_idx,
            self.output.len()
        );
        self.output
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}
