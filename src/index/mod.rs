mod explicit;
mod list;
mod scan;
mod segregated;

use crate::arena::Arena;
use crate::config::Policy;
use crate::constants::{MIN_BLOCK_LINKED, MIN_BLOCK_SCAN};
use explicit::ExplicitList;
use scan::{ScanFit, ScanIndex};
use segregated::SegregatedList;

/// Tracks which blocks are free.
///
/// Three interchangeable shapes are supported, chosen once when the heap
/// is constructed: scanning the arena in block order, one doubly linked
/// list of free blocks, and size-segregated lists. Link fields for the
/// linked shapes live inside the free block's own payload bytes.
pub enum FreeIndex {
    Scan(ScanIndex),
    Explicit(ExplicitList),
    Segregated(SegregatedList),
}

impl FreeIndex {
    pub fn new(policy: Policy) -> Self {
        match policy {
            Policy::FirstFit => FreeIndex::Scan(ScanIndex::new(ScanFit::First)),
            Policy::NextFit => FreeIndex::Scan(ScanIndex::new(ScanFit::Next)),
            Policy::ExplicitList => FreeIndex::Explicit(ExplicitList::new()),
            Policy::Segregated => FreeIndex::Segregated(SegregatedList::new()),
        }
    }

    /// Smallest block the active variant can carve. Linked variants need
    /// room for two link fields in the payload.
    pub fn min_block(&self) -> usize {
        match self {
            FreeIndex::Scan(_) => MIN_BLOCK_SCAN,
            FreeIndex::Explicit(_) | FreeIndex::Segregated(_) => MIN_BLOCK_LINKED,
        }
    }

    /// Registers a free block. A no-op for the scanning variant, whose
    /// membership is derived from the allocated flag.
    pub fn insert(&mut self, arena: &mut Arena, bp: usize) {
        match self {
            FreeIndex::Scan(_) => {}
            FreeIndex::Explicit(list) => list.insert(arena, bp),
            FreeIndex::Segregated(seg) => seg.insert(arena, bp),
        }
    }

    /// Drops a block from the index ahead of its size or allocated flag
    /// changing.
    pub fn remove(&mut self, arena: &mut Arena, bp: usize) {
        match self {
            FreeIndex::Scan(_) => {}
            FreeIndex::Explicit(list) => list.remove(arena, bp),
            FreeIndex::Segregated(seg) => seg.remove(arena, bp),
        }
    }

    /// Returns a free block of at least `min_size` under the active
    /// placement policy, or `None` when nothing fits.
    pub fn locate(&mut self, arena: &Arena, min_size: usize) -> Option<usize> {
        match self {
            FreeIndex::Scan(scan) => scan.locate(arena, min_size),
            FreeIndex::Explicit(list) => list.locate(arena, min_size),
            FreeIndex::Segregated(seg) => seg.locate(arena, min_size),
        }
    }

    /// Records where the next rotating search should resume. Only the
    /// next-fit scan keeps a cursor.
    pub fn set_cursor(&mut self, bp: usize) {
        if let FreeIndex::Scan(scan) = self {
            scan.set_cursor(bp);
        }
    }

    /// Rebases a cursor pointing into `merged..end` onto the merged
    /// block's start, so a search never resumes from a stale mid-block
    /// offset.
    pub fn relocate_cursor(&mut self, merged: usize, end: usize) {
        if let FreeIndex::Scan(scan) = self {
            scan.relocate_cursor(merged, end);
        }
    }

    /// How many times `bp` is registered. Audit use only.
    pub fn occurrences(&self, arena: &Arena, bp: usize) -> usize {
        match self {
            FreeIndex::Scan(_) => scan::derived_membership(arena, bp),
            FreeIndex::Explicit(list) => list.occurrences(arena, bp),
            FreeIndex::Segregated(seg) => seg.occurrences(arena, bp),
        }
    }

    /// Total free bytes visible to the index. Audit use only.
    pub fn free_bytes(&self, arena: &Arena) -> usize {
        match self {
            FreeIndex::Scan(_) => scan::free_bytes(arena),
            FreeIndex::Explicit(list) => list.free_bytes(arena),
            FreeIndex::Segregated(seg) => seg.free_bytes(arena),
        }
    }
}
