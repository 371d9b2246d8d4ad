use crate::arena::Arena;
use crate::block;
use crate::coalesce::coalesce;
use crate::config::{HeapConfig, Policy};
use crate::constants::{ALIGNMENT, HEAP_START, MAX_BLOCK, OVERHEAD, SENTINEL_BYTES, WORD};
use crate::error::HeapError;
use crate::index::FreeIndex;
use crate::metrics::HeapMetrics;
use crate::tag::pack;

/// A payload offset handed out by [`Heap::alloc`]. Offsets stay stable
/// for the life of the allocation; `Option<Address>` stands in for a
/// nullable pointer.
pub type Address = usize;

/// A single-threaded heap over one growable arena.
///
/// Every block carries a `(size, allocated)` tag at both ends, freed
/// blocks merge with free neighbors, and the free-block index chosen at
/// construction decides where the next allocation lands.
///
/// See the [module-level documentation](./index.html) for more details.
pub struct Heap {
    arena: Arena,
    index: FreeIndex,
    config: HeapConfig,
    allocs: u64,
    frees: u64,
    reallocs: u64,
    extensions: u64,
}

impl Heap {
    /// Creates a heap: installs the padding word, prologue and epilogue
    /// sentinels, then performs the initial arena extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use loam::{Heap, HeapConfig};
    ///
    /// let mut heap = Heap::new(HeapConfig::default()).unwrap();
    /// let p = heap.alloc(100).unwrap();
    ///
    /// heap.free(Some(p));
    /// ```
    pub fn new(config: HeapConfig) -> Result<Heap, HeapError> {
        let mut arena = Arena::new(config.limit);

        arena.grow(4 * WORD)?;
        arena.write_tag(0, 0); // alignment padding, never a block
        arena.write_tag(WORD, pack(OVERHEAD, true)); // prologue header
        arena.write_tag(2 * WORD, pack(OVERHEAD, true)); // prologue footer
        arena.write_tag(3 * WORD, pack(0, true)); // initial epilogue

        let mut heap = Heap {
            arena,
            index: FreeIndex::new(config.policy),
            config,
            allocs: 0,
            frees: 0,
            reallocs: 0,
            extensions: 0,
        };

        heap.extend(config.chunk_size)?;
        log::debug!(
            "heap ready: {:?} policy, {} byte arena",
            config.policy,
            heap.arena.len()
        );

        Ok(heap)
    }

    /// Creates a heap with the given policy and default settings
    /// otherwise.
    pub fn with_policy(policy: Policy) -> Result<Heap, HeapError> {
        Heap::new(HeapConfig {
            policy,
            ..HeapConfig::default()
        })
    }

    /// Allocates `size` bytes and returns the payload address, or `None`
    /// when `size` is zero or the region cannot supply more memory.
    pub fn alloc(&mut self, size: usize) -> Option<Address> {
        if size == 0 {
            return None;
        }

        let asize = match self.adjusted_size(size) {
            Ok(asize) => asize,
            Err(err) => {
                log::debug!("allocation of {} bytes failed: {}", size, err);
                return None;
            }
        };

        if let Some(bp) = self.index.locate(&self.arena, asize) {
            self.place(bp, asize);
            self.allocs += 1;
            return Some(bp);
        }

        match self.extend(asize.max(self.config.chunk_size)) {
            Ok(bp) => {
                self.place(bp, asize);
                self.allocs += 1;
                Some(bp)
            }
            Err(err) => {
                log::debug!("allocation of {} bytes failed: {}", size, err);
                None
            }
        }
    }

    /// Releases an allocation. A no-op on `None`. Presenting an address
    /// the heap did not hand out, or one already freed, is undefined.
    pub fn free(&mut self, ptr: Option<Address>) {
        let Some(bp) = ptr else {
            return;
        };

        let size = block::size(&self.arena, bp);

        block::set_tags(&mut self.arena, bp, size, false);
        coalesce(&mut self.arena, &mut self.index, bp);
        self.frees += 1;
    }

    /// Resizes an allocation. `None` acts as [`Heap::alloc`]; a zero
    /// `size` acts as [`Heap::free`] and returns `None`. Shrinking and
    /// growing into a free successor keep the address; otherwise the
    /// payload moves and a different address comes back.
    pub fn realloc(&mut self, ptr: Option<Address>, size: usize) -> Option<Address> {
        let Some(bp) = ptr else {
            return self.alloc(size);
        };

        if size == 0 {
            self.free(Some(bp));
            return None;
        }

        let asize = match self.adjusted_size(size) {
            Ok(asize) => asize,
            Err(err) => {
                log::debug!("resize to {} bytes failed: {}", size, err);
                return None;
            }
        };

        let csize = block::size(&self.arena, bp);
        self.reallocs += 1;

        if asize <= csize {
            // shrink in place; only split when the tail can stand alone
            if csize - asize >= self.index.min_block() {
                block::set_tags(&mut self.arena, bp, asize, true);
                let rest = bp + asize;
                block::set_tags(&mut self.arena, rest, csize - asize, false);
                coalesce(&mut self.arena, &mut self.index, rest);
            }

            return Some(bp);
        }

        let next_bp = block::next(&self.arena, bp);

        if !block::is_allocated(&self.arena, next_bp) {
            let combined = csize + block::size(&self.arena, next_bp);

            if combined >= asize {
                self.index.remove(&mut self.arena, next_bp);

                if combined - asize >= self.index.min_block() {
                    block::set_tags(&mut self.arena, bp, asize, true);
                    let rest = bp + asize;
                    block::set_tags(&mut self.arena, rest, combined - asize, false);
                    self.index.insert(&mut self.arena, rest);
                } else {
                    block::set_tags(&mut self.arena, bp, combined, true);
                }

                self.index.relocate_cursor(bp, bp + combined);
                return Some(bp);
            }
        }

        // no adjacent room; move the payload
        log::trace!("moving a {} byte payload to grow to {}", csize - OVERHEAD, size);
        let new_bp = self.alloc(size)?;
        self.arena.copy(bp, new_bp, size.min(csize - OVERHEAD));
        self.free(Some(bp));
        Some(new_bp)
    }

    /// The payload bytes granted to a live allocation. At least as long
    /// as the requested size; alignment rounding may have granted more.
    pub fn payload(&self, ptr: Address) -> &[u8] {
        self.arena.slice(ptr, block::payload_len(&self.arena, ptr))
    }

    /// Mutable access to a live allocation's payload bytes.
    pub fn payload_mut(&mut self, ptr: Address) -> &mut [u8] {
        let len = block::payload_len(&self.arena, ptr);

        self.arena.slice_mut(ptr, len)
    }

    /// Walks every real block in arena order, sentinels excluded.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks {
            arena: &self.arena,
            bp: HEAP_START,
        }
    }

    /// Returns a snapshot of occupancy and traffic counters.
    pub fn metrics(&self) -> HeapMetrics {
        let mut allocated_bytes = 0;
        let mut free_bytes = 0;
        let mut free_blocks = 0;

        for b in self.blocks() {
            if b.allocated {
                allocated_bytes += b.size;
            } else {
                free_bytes += b.size;
                free_blocks += 1;
            }
        }

        HeapMetrics {
            arena_size: self.arena.len(),
            allocated_bytes,
            free_bytes,
            free_blocks,
            allocs: self.allocs,
            frees: self.frees,
            reallocs: self.reallocs,
            extensions: self.extensions,
        }
    }

    /// Audits every structural invariant: matching boundary tags, block
    /// geometry, no adjacent free blocks, exactly-once index membership,
    /// and byte conservation. The allocation path never runs this.
    pub fn check(&self) -> Result<(), HeapError> {
        let min_block = self.index.min_block();
        let mut prev_free = false;
        let mut free_total = 0;
        let mut accounted = SENTINEL_BYTES;

        for b in self.blocks() {
            let header = self.arena.read_tag(block::header(b.addr));
            let footer = self.arena.read_tag(block::footer(&self.arena, b.addr));

            if header != footer {
                return Err(HeapError::Corrupted(format!(
                    "tag mismatch at {}: header {:#x}, footer {:#x}",
                    b.addr, header, footer
                )));
            }

            if b.addr % ALIGNMENT != 0 || b.size % ALIGNMENT != 0 || b.size < min_block {
                return Err(HeapError::Corrupted(format!(
                    "bad geometry at {}: size {}",
                    b.addr, b.size
                )));
            }

            if prev_free && !b.allocated {
                return Err(HeapError::Corrupted(format!(
                    "unmerged free neighbors at {}",
                    b.addr
                )));
            }

            let hits = self.index.occurrences(&self.arena, b.addr);
            let expected = if b.allocated { 0 } else { 1 };

            if hits != expected {
                return Err(HeapError::Corrupted(format!(
                    "block at {} indexed {} times, expected {}",
                    b.addr, hits, expected
                )));
            }

            if !b.allocated {
                free_total += b.size;
            }

            prev_free = !b.allocated;
            accounted += b.size;
        }

        if accounted != self.arena.len() {
            return Err(HeapError::Corrupted(format!(
                "{} bytes accounted for in a {} byte arena",
                accounted,
                self.arena.len()
            )));
        }

        let tracked = self.index.free_bytes(&self.arena);

        if tracked != free_total {
            return Err(HeapError::Corrupted(format!(
                "index tracks {} free bytes, arena holds {}",
                tracked, free_total
            )));
        }

        Ok(())
    }

    // header + footer overhead added, rounded to the alignment unit, and
    // raised to the policy minimum
    fn adjusted_size(&self, size: usize) -> Result<usize, HeapError> {
        let asize = size
            .checked_add(OVERHEAD + ALIGNMENT - 1)
            .ok_or(HeapError::SizeOverflow)?
            & !(ALIGNMENT - 1);

        if asize > MAX_BLOCK {
            return Err(HeapError::SizeOverflow);
        }

        Ok(asize.max(self.index.min_block()))
    }

    // grows the arena, formats the new span as one free block over the old
    // epilogue, re-installs the epilogue after it, and merges with a free
    // old tail
    fn extend(&mut self, bytes: usize) -> Result<Address, HeapError> {
        let size = (bytes + ALIGNMENT - 1) & !(ALIGNMENT - 1);
        let bp = self.arena.len();
        let new_len = self.arena.grow(size)?;

        block::set_tags(&mut self.arena, bp, size, false);
        block::set_epilogue(&mut self.arena, new_len);
        self.extensions += 1;
        log::trace!("arena extended by {} bytes to {}", size, new_len);

        Ok(coalesce(&mut self.arena, &mut self.index, bp))
    }

    // split-on-allocate: the block leaves the index before its identity
    // changes; the remainder becomes a new free block when it can stand
    // alone, and next fit resumes searching from it
    fn place(&mut self, bp: usize, asize: usize) {
        let csize = block::size(&self.arena, bp);

        self.index.remove(&mut self.arena, bp);

        if csize - asize >= self.index.min_block() {
            block::set_tags(&mut self.arena, bp, asize, true);
            let rest = bp + asize;
            block::set_tags(&mut self.arena, rest, csize - asize, false);
            self.index.insert(&mut self.arena, rest);
            self.index.set_cursor(rest);
        } else {
            block::set_tags(&mut self.arena, bp, csize, true);
        }
    }
}

/// One entry yielded by [`Heap::blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Payload offset of the block.
    pub addr: Address,
    /// Block length in bytes, tag overhead included.
    pub size: usize,
    pub allocated: bool,
}

pub struct Blocks<'a> {
    arena: &'a Arena,
    bp: usize,
}

impl Iterator for Blocks<'_> {
    type Item = BlockInfo;

    fn next(&mut self) -> Option<BlockInfo> {
        let size = block::size(self.arena, self.bp);

        if size == 0 {
            return None; // epilogue
        }

        let info = BlockInfo {
            addr: self.bp,
            size,
            allocated: block::is_allocated(self.arena, self.bp),
        };

        self.bp += size;
        Some(info)
    }
}
