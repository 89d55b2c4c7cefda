use crate::common::MAX_CODE_BITS;

const CODE_BYTES: usize = MAX_CODE_BITS.div_ceil(8);

/// The bit string assigned to a single symbol.
///
/// Bits are stored most significant bit first, the first bit of the code lives in the
/// highest bit of `bits[0]`. Everything behind `len` is kept zero so the bytes can be
/// copied into the packed output as they are.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    len: u8,
    bits: [u8; CODE_BYTES],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CodeError {
    #[error("A code needs at least one bit")]
    Empty,
    #[error("Code is {got} bits long but no code can be longer than {MAX_CODE_BITS} bits")]
    TooLong { got: usize },
    #[error("Invalid character {got:?} at position {position}, codes consist of '0' and '1' only")]
    InvalidDigit { got: char, position: usize },
}

impl Code {
    /// The code of the root, before any edge has been taken
    pub(crate) const fn empty() -> Self {
        Code {
            len: 0,
            bits: [0; CODE_BYTES],
        }
    }

    /// Number of bits in this code
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `idx`, counted from the start of the code
    ///
    /// # Panics
    /// If `idx` is not smaller than [`Code::len`]
    pub fn bit(&self, idx: usize) -> bool {
        assert!(idx < self.len(), "bit {idx} of a {} bit code", self.len);
        (self.bits[idx / 8] >> (7 - idx % 8)) & 1 == 1
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(|idx| self.bit(idx))
    }

    /// The code packed most significant bit first, the last byte padded with zeros
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits[..self.len().div_ceil(8)]
    }

    /// Append one bit
    pub fn push(&mut self, bit: bool) -> Result<(), CodeError> {
        let idx = self.len();
        if idx == MAX_CODE_BITS {
            return Err(CodeError::TooLong { got: idx + 1 });
        }
        if bit {
            self.bits[idx / 8] |= 1 << (7 - idx % 8);
        }
        self.len += 1;
        Ok(())
    }

    /// Copy of this code extended by `bit`. Used while walking down a tree, which can't be
    /// deeper than [`MAX_CODE_BITS`].
    pub(crate) fn child(&self, bit: bool) -> Self {
        let mut child = *self;
        if child.push(bit).is_err() {
            panic!("Tree deeper than {MAX_CODE_BITS} levels. This is an internal error");
        }
        child
    }

    /// True if `prefix` is a (not necessarily proper) prefix of this code
    pub fn starts_with(&self, prefix: &Code) -> bool {
        prefix.len <= self.len && (0..prefix.len()).all(|idx| self.bit(idx) == prefix.bit(idx))
    }
}

impl core::str::FromStr for Code {
    type Err = CodeError;

    /// Parse a string of `0` and `1` characters
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut code = Code::empty();
        for (position, got) in s.chars().enumerate() {
            match got {
                '0' => code.push(false)?,
                '1' => code.push(true)?,
                _ => return Err(CodeError::InvalidDigit { got, position }),
            }
        }
        if code.is_empty() {
            return Err(CodeError::Empty);
        }
        Ok(code)
    }
}

impl core::fmt::Display for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Code({self})")
    }
}
