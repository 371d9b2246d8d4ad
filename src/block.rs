//! Offset arithmetic over boundary-tagged blocks.
//!
//! A block address is the offset of its payload. The header tag sits one
//! word before the payload and the footer tag occupies the block's last
//! word, so a neighbor in either direction is reachable in O(1).

use crate::arena::Arena;
use crate::constants::{OVERHEAD, WORD};
use crate::tag::{pack, unpack};

pub fn header(bp: usize) -> usize {
    bp - WORD
}

pub fn size(arena: &Arena, bp: usize) -> usize {
    unpack(arena.read_tag(header(bp))).0
}

pub fn is_allocated(arena: &Arena, bp: usize) -> bool {
    unpack(arena.read_tag(header(bp))).1
}

pub fn footer(arena: &Arena, bp: usize) -> usize {
    bp + size(arena, bp) - OVERHEAD
}

pub fn payload_len(arena: &Arena, bp: usize) -> usize {
    size(arena, bp) - OVERHEAD
}

pub fn next(arena: &Arena, bp: usize) -> usize {
    bp + size(arena, bp)
}

/// Steps backward through the predecessor's footer.
pub fn prev(arena: &Arena, bp: usize) -> usize {
    let (prev_size, _) = unpack(arena.read_tag(bp - OVERHEAD));

    bp - prev_size
}

pub fn prev_allocated(arena: &Arena, bp: usize) -> bool {
    unpack(arena.read_tag(bp - OVERHEAD)).1
}

/// Writes matching header and footer tags for the block at `bp`.
pub fn set_tags(arena: &mut Arena, bp: usize, size: usize, allocated: bool) {
    let tag = pack(size, allocated);

    arena.write_tag(bp - WORD, tag);
    arena.write_tag(bp + size - OVERHEAD, tag);
}

/// Installs the zero-size allocated epilogue header in the arena's last
/// word.
pub fn set_epilogue(arena: &mut Arena, arena_len: usize) {
    arena.write_tag(arena_len - WORD, pack(0, true));
}
