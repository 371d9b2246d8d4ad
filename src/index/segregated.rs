use super::list::FreeList;
use crate::arena::Arena;
use crate::block;
use crate::constants::{BUCKET_COUNT, NIL};

/// Size-segregated free lists. Bucket `k` holds free blocks whose size
/// falls in `[2^(k+4), 2^(k+5))`, with the last bucket catching
/// everything larger.
///
/// `locate` is best fit within a bucket: the first bucket that yields any
/// candidate wins, trading strict global best fit for a bounded scan.
pub struct SegregatedList {
    buckets: [FreeList; BUCKET_COUNT],
}

fn bucket_of(size: usize) -> usize {
    debug_assert!(size >= 16);

    (size.ilog2() as usize).saturating_sub(4).min(BUCKET_COUNT - 1)
}

impl SegregatedList {
    pub fn new() -> Self {
        Self {
            buckets: [FreeList::new(); BUCKET_COUNT],
        }
    }

    pub fn insert(&mut self, arena: &mut Arena, bp: usize) {
        let size = block::size(arena, bp);

        self.buckets[bucket_of(size)].push(arena, bp);
    }

    pub fn remove(&mut self, arena: &mut Arena, bp: usize) {
        let size = block::size(arena, bp);

        self.buckets[bucket_of(size)].unlink(arena, bp);
    }

    pub fn locate(&self, arena: &Arena, min_size: usize) -> Option<usize> {
        for bucket in &self.buckets[bucket_of(min_size)..] {
            let mut best = NIL;
            let mut best_size = usize::MAX;

            for bp in bucket.iter(arena) {
                let size = block::size(arena, bp);

                if size == min_size {
                    return Some(bp);
                }

                if size >= min_size && size < best_size {
                    best = bp;
                    best_size = size;
                }
            }

            if best != NIL {
                return Some(best);
            }
        }

        None
    }

    pub fn occurrences(&self, arena: &Arena, bp: usize) -> usize {
        self.buckets
            .iter()
            .map(|bucket| bucket.iter(arena).filter(|&member| member == bp).count())
            .sum()
    }

    pub fn free_bytes(&self, arena: &Arena) -> usize {
        self.buckets
            .iter()
            .map(|bucket| {
                bucket
                    .iter(arena)
                    .map(|bp| block::size(arena, bp))
                    .sum::<usize>()
            })
            .sum()
    }
}
