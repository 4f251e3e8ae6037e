//! Archive format constants

/// Archive magic bytes: "HFPK"
pub const ARCHIVE_MAGIC: [u8; 4] = *b"HFPK";

/// Current archive format version
pub const FORMAT_VERSION: u16 = 1;

/// Fixed prelude size: magic + version
pub const PRELUDE_SIZE: usize = 6;

/// Trailing crc32 size
pub const CHECKSUM_SIZE: usize = 4;

/// Pre-order tree marker bits
pub const TREE_INTERNAL: bool = false;
pub const TREE_LEAF: bool = true;

/// A byte-alphabet tree has at most 256 leaves, so no valid root-to-leaf
/// path exceeds this many internal nodes; deeper input is malformed.
pub const MAX_TREE_DEPTH: usize = 256;
