//! Values and interfaces shared between the encoding side
//! and the decoding side.

// --- SYMBOLS ---
/// Number of distinct symbols a byte oriented code has to cover.
pub const ALPHABET_SIZE: usize = 256;
/// A full binary tree with [`ALPHABET_SIZE`] leaves is at most this deep,
/// so no valid code is ever longer.
pub const MAX_CODE_BITS: usize = ALPHABET_SIZE - 1;

// --- FRAMES ---
/// This magic number is included at the start of every frame ("HFZ1")
pub const MAGIC_NUM: u32 = 0x4846_5A31;
/// Magic number, descriptor and symbol count. The checksum is optional
/// and not part of this.
pub const MIN_FRAME_HEADER_SIZE: usize = 4 + 1 + 8;
/// Seed used for the xxhash64 content checksum
pub const CHECKSUM_SEED: u64 = 0;

// --- ARCHIVES ---
/// Name of the single archive entry holding a frame
pub const ARCHIVE_ENTRY_NAME: &str = "compressed.bin";
