/// Reads single bits from a byte slice, most significant bit of every byte first.
pub struct BitReader<'s> {
    idx: usize, //index counts bits already read
    source: &'s [u8],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GetBitsError {
    #[error("Can't read {requested} bits, only have {remaining} bits left")]
    NotEnoughRemainingBits { requested: usize, remaining: usize },
}

impl<'s> BitReader<'s> {
    pub fn new(source: &'s [u8]) -> BitReader<'s> {
        BitReader { idx: 0, source }
    }

    pub fn bits_left(&self) -> usize {
        self.source.len() * 8 - self.idx
    }

    pub fn bits_read(&self) -> usize {
        self.idx
    }

    pub fn get_bit(&mut self) -> Result<bool, GetBitsError> {
        if self.bits_left() == 0 {
            return Err(GetBitsError::NotEnoughRemainingBits {
                requested: 1,
                remaining: 0,
            });
        }
        let byte = self.source[self.idx / 8];
        let bit = (byte >> (7 - self.idx % 8)) & 1 == 1;
        self.idx += 1;
        Ok(bit)
    }

    /// Read `n` bits, the first one read ends up as the most significant of the result
    pub fn get_bits(&mut self, n: usize) -> Result<u64, GetBitsError> {
        if n > 64 || self.bits_left() < n {
            return Err(GetBitsError::NotEnoughRemainingBits {
                requested: n,
                remaining: self.bits_left(),
            });
        }
        let mut value = 0u64;
        for _ in 0..n {
            value = (value << 1) | u64::from(self.get_bit()?);
        }
        Ok(value)
    }

    pub fn reset(&mut self, new_source: &'s [u8]) {
        self.idx = 0;
        self.source = new_source;
    }
}

#[cfg(test)]
mod tests {
    use super::{BitReader, GetBitsError};

    #[test]
    fn reads_msb_first() {
        let source = [0b1010_0000, 0b0000_0001];
        let mut br = BitReader::new(&source);
        assert!(br.get_bit().unwrap());
        assert!(!br.get_bit().unwrap());
        assert!(br.get_bit().unwrap());
        assert_eq!(br.bits_read(), 3);
        assert_eq!(br.bits_left(), 13);
        assert_eq!(br.get_bits(13).unwrap(), 1);
        assert_eq!(
            br.get_bit(),
            Err(GetBitsError::NotEnoughRemainingBits {
                requested: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn reset_starts_over() {
        let mut br = BitReader::new(&[0xFF]);
        assert_eq!(br.get_bits(8).unwrap(), 0xFF);
        br.reset(&[0x0F]);
        assert_eq!(br.get_bits(4).unwrap(), 0);
        assert_eq!(br.get_bits(4).unwrap(), 0xF);
        assert!(br.get_bits(1).is_err());
    }
}
