//! The no-state index: membership is derived from each block's allocated
//! flag and `locate` walks the arena in block order.

use crate::arena::Arena;
use crate::block;
use crate::constants::{HEAP_START, NIL};

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum ScanFit {
    First,
    Next,
}

pub struct ScanIndex {
    fit: ScanFit,
    // next-fit resumes here; NIL means start from the heap base
    cursor: usize,
}

impl ScanIndex {
    pub fn new(fit: ScanFit) -> Self {
        Self { fit, cursor: NIL }
    }

    pub fn locate(&mut self, arena: &Arena, min_size: usize) -> Option<usize> {
        match self.fit {
            ScanFit::First => scan(arena, HEAP_START, NIL, min_size),
            ScanFit::Next => {
                let start = if self.cursor == NIL {
                    HEAP_START
                } else {
                    self.cursor
                };

                let hit = scan(arena, start, NIL, min_size)
                    .or_else(|| scan(arena, HEAP_START, start, min_size))?;

                self.cursor = hit;
                Some(hit)
            }
        }
    }

    pub fn set_cursor(&mut self, bp: usize) {
        if self.fit == ScanFit::Next {
            self.cursor = bp;
        }
    }

    pub fn relocate_cursor(&mut self, merged: usize, end: usize) {
        if merged <= self.cursor && self.cursor < end {
            self.cursor = merged;
        }
    }
}

// walks blocks in arena order from `from`, stopping at `until` or at the
// epilogue, returning the first free block of at least `min_size`
fn scan(arena: &Arena, from: usize, until: usize, min_size: usize) -> Option<usize> {
    let mut bp = from;

    loop {
        if bp == until {
            return None;
        }

        let size = block::size(arena, bp);

        if size == 0 {
            return None;
        }

        if !block::is_allocated(arena, bp) && size >= min_size {
            return Some(bp);
        }

        bp += size;
    }
}

pub fn derived_membership(arena: &Arena, bp: usize) -> usize {
    if block::is_allocated(arena, bp) {
        0
    } else {
        1
    }
}

pub fn free_bytes(arena: &Arena) -> usize {
    let mut total = 0;
    let mut bp = HEAP_START;

    loop {
        let size = block::size(arena, bp);

        if size == 0 {
            return total;
        }

        if !block::is_allocated(arena, bp) {
            total += size;
        }

        bp += size;
    }
}
