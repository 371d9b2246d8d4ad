/// A snapshot of heap occupancy and traffic counters.
///
/// Obtained by calling [`crate::Heap::metrics`]. Occupancy is recomputed
/// from the arena on each call, so `allocated_bytes + free_bytes` plus
/// the fixed sentinel overhead always equals `arena_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapMetrics {
    /// Current arena length in bytes, sentinels included.
    pub arena_size: usize,

    /// Bytes held by allocated blocks, tag overhead included.
    pub allocated_bytes: usize,

    /// Bytes held by free blocks, tag overhead included.
    pub free_bytes: usize,

    /// Number of free blocks.
    pub free_blocks: usize,

    /// Placements served since construction. A realloc that moves its
    /// payload counts the new placement here as well.
    pub allocs: u64,

    /// Frees since construction, including the release half of a moving
    /// realloc.
    pub frees: u64,

    /// Realloc calls that changed a block, in place or moving.
    pub reallocs: u64,

    /// How many times the arena was extended.
    pub extensions: u64,
}
