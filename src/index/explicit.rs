use super::list::FreeList;
use crate::arena::Arena;
use crate::block;

/// A single doubly linked list of free blocks, most recently freed first.
/// `locate` is first fit over that recency order.
pub struct ExplicitList {
    list: FreeList,
}

impl ExplicitList {
    pub fn new() -> Self {
        Self {
            list: FreeList::new(),
        }
    }

    pub fn insert(&mut self, arena: &mut Arena, bp: usize) {
        self.list.push(arena, bp);
    }

    pub fn remove(&mut self, arena: &mut Arena, bp: usize) {
        self.list.unlink(arena, bp);
    }

    pub fn locate(&self, arena: &Arena, min_size: usize) -> Option<usize> {
        self.list
            .iter(arena)
            .find(|&bp| block::size(arena, bp) >= min_size)
    }

    pub fn occurrences(&self, arena: &Arena, bp: usize) -> usize {
        self.list.iter(arena).filter(|&member| member == bp).count()
    }

    pub fn free_bytes(&self, arena: &Arena) -> usize {
        self.list.iter(arena).map(|bp| block::size(arena, bp)).sum()
    }
}
