// basically all the layout granularity used in this crate is collected here
// so it is clear which values are load bearing and which are tunable

/// Width in bytes of a boundary tag word.
pub const WORD: usize = 4;

/// Payload alignment unit. Block sizes are always a multiple of this.
pub const ALIGNMENT: usize = 8;

/// Header plus footer bytes carried by every block.
pub const OVERHEAD: usize = 2 * WORD;

/// Width in bytes of a free-list link field stored in a free block's payload.
pub const LINK: usize = 8;

/// Smallest block the scanning index can carve: header + footer + one
/// aligned payload unit.
pub const MIN_BLOCK_SCAN: usize = OVERHEAD + ALIGNMENT;

/// Smallest block the linked indexes can carve: the payload must hold
/// two link fields while the block is free.
pub const MIN_BLOCK_LINKED: usize = OVERHEAD + 2 * LINK;

/// Default minimum arena extension.
pub const CHUNK_SIZE: usize = 1 << 12;

/// Default hard cap on arena length.
pub const REGION_LIMIT: usize = 20 * (1 << 20);

/// Largest block size a tag word can encode.
pub const MAX_BLOCK: usize = (u32::MAX & !(ALIGNMENT as u32 - 1)) as usize;

/// Null value for free-list links. Offset 0 is the arena's padding word,
/// never a block, so it can double as nil.
pub const NIL: usize = 0;

/// Payload offset of the first real block. The padding word, prologue
/// header, prologue footer and initial epilogue header precede it.
pub const HEAP_START: usize = 4 * WORD;

/// Bytes permanently held by the padding word, prologue and epilogue.
pub const SENTINEL_BYTES: usize = 4 * WORD;

/// Number of size-class buckets in the segregated index. Bucket `k`
/// covers sizes in `[2^(k+4), 2^(k+5))`; the last bucket is open ended.
pub const BUCKET_COUNT: usize = 12;
