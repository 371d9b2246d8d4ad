//! Merging a free block with its physical neighbors.
//!
//! The prologue and epilogue sentinels are permanently allocated, so the
//! neighbor reads here never leave the arena.

use crate::arena::Arena;
use crate::block;
use crate::index::FreeIndex;

/// Merges the free block at `bp` with free adjacent neighbors, keeping
/// the index membership and any scan cursor consistent. Returns the
/// merged block's address, which moves backward when the predecessor is
/// absorbed.
pub fn coalesce(arena: &mut Arena, index: &mut FreeIndex, bp: usize) -> usize {
    let prev_allocated = block::prev_allocated(arena, bp);
    let next_bp = block::next(arena, bp);
    let next_allocated = block::is_allocated(arena, next_bp);
    let mut size = block::size(arena, bp);

    match (prev_allocated, next_allocated) {
        (true, true) => {
            index.insert(arena, bp);
            bp
        }
        (true, false) => {
            index.remove(arena, next_bp);
            size += block::size(arena, next_bp);
            block::set_tags(arena, bp, size, false);
            index.insert(arena, bp);
            index.relocate_cursor(bp, bp + size);
            bp
        }
        (false, true) => {
            let prev_bp = block::prev(arena, bp);

            index.remove(arena, prev_bp);
            size += block::size(arena, prev_bp);
            block::set_tags(arena, prev_bp, size, false);
            index.insert(arena, prev_bp);
            index.relocate_cursor(prev_bp, prev_bp + size);
            prev_bp
        }
        (false, false) => {
            let prev_bp = block::prev(arena, bp);

            index.remove(arena, prev_bp);
            index.remove(arena, next_bp);
            size += block::size(arena, prev_bp) + block::size(arena, next_bp);
            block::set_tags(arena, prev_bp, size, false);
            index.insert(arena, prev_bp);
            index.relocate_cursor(prev_bp, prev_bp + size);
            prev_bp
        }
    }
}
