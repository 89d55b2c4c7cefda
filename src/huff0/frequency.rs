use crate::common::ALPHABET_SIZE;

/// How often each byte value occurs in some input.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Index is the byte value
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count every byte of `data`. Empty input yields an empty table.
    pub fn count(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.add(data);
        table
    }

    /// Add the bytes of `data` to the counts already present
    pub fn add(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// How often `symbol` was seen
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts, which is the length of everything counted so far
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of byte values that occurred at least once
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// All `(symbol, count)` pairs with a non-zero count, in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    /// Repeated symbols are summed up
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.counts[symbol as usize] += count;
        }
        table
    }
}
