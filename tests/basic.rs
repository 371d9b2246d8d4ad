use loam::{Heap, HeapConfig, Policy};

const POLICIES: [Policy; 4] = [
    Policy::FirstFit,
    Policy::NextFit,
    Policy::ExplicitList,
    Policy::Segregated,
];

#[test]
fn zero_and_null_inputs_are_defined() {
    for policy in POLICIES {
        let mut heap = Heap::with_policy(policy).unwrap();

        assert_eq!(heap.alloc(0), None);
        heap.free(None); // no-op
        assert_eq!(heap.realloc(None, 0), None);
        heap.check().unwrap();
    }
}

#[test]
fn freed_block_is_reused_by_the_linked_indexes() {
    for policy in [Policy::ExplicitList, Policy::Segregated] {
        let mut heap = Heap::with_policy(policy).unwrap();

        let first = heap.alloc(1).unwrap();
        let _second = heap.alloc(1).unwrap();

        heap.free(Some(first));

        assert_eq!(heap.alloc(1).unwrap(), first);
        heap.check().unwrap();
    }
}

#[test]
fn exact_reuse_needs_no_growth() {
    for policy in POLICIES {
        let mut heap = Heap::with_policy(policy).unwrap();

        let p = heap.alloc(100).unwrap();
        let extensions = heap.metrics().extensions;

        heap.free(Some(p));

        assert_eq!(heap.alloc(100).unwrap(), p);
        assert_eq!(heap.metrics().extensions, extensions);
        heap.check().unwrap();
    }
}

#[test]
fn freeing_neighbors_leaves_one_merged_block() {
    for policy in POLICIES {
        let mut heap = Heap::with_policy(policy).unwrap();

        let first = heap.alloc(16).unwrap();
        let second = heap.alloc(16).unwrap();

        heap.free(Some(first));
        heap.free(Some(second));

        let metrics = heap.metrics();

        // both blocks and the arena tail fold back into a single span
        assert_eq!(metrics.free_blocks, 1);
        assert_eq!(metrics.free_bytes, metrics.arena_size - 16);
        assert_eq!(metrics.allocated_bytes, 0);
        heap.check().unwrap();
    }
}

#[test]
fn coalescing_covers_all_four_neighbor_shapes() {
    for policy in POLICIES {
        // both neighbors allocated, then both neighbors free
        let mut heap = Heap::with_policy(policy).unwrap();
        let a = heap.alloc(24).unwrap();
        let b = heap.alloc(24).unwrap();
        let c = heap.alloc(24).unwrap();
        let _pin = heap.alloc(24).unwrap();

        heap.free(Some(a));
        assert_eq!(heap.metrics().free_blocks, 2); // a and the arena tail
        heap.free(Some(c));
        assert_eq!(heap.metrics().free_blocks, 3);
        heap.free(Some(b));
        assert_eq!(heap.metrics().free_blocks, 2); // a, b and c merged
        heap.check().unwrap();

        // free successor: the freed block absorbs it and keeps its start
        let mut heap = Heap::with_policy(policy).unwrap();
        let a = heap.alloc(24).unwrap();
        let b = heap.alloc(24).unwrap();
        let _pin = heap.alloc(24).unwrap();

        heap.free(Some(b));
        heap.free(Some(a));

        let merged = heap.blocks().find(|blk| !blk.allocated).unwrap();
        assert_eq!(merged.addr, a);
        assert_eq!(heap.metrics().free_blocks, 2);
        heap.check().unwrap();

        // free predecessor: the freed block folds backward into it
        let mut heap = Heap::with_policy(policy).unwrap();
        let a = heap.alloc(24).unwrap();
        let b = heap.alloc(24).unwrap();
        let _pin = heap.alloc(24).unwrap();

        heap.free(Some(a));
        heap.free(Some(b));

        let merged = heap.blocks().find(|blk| !blk.allocated).unwrap();
        assert_eq!(merged.addr, a);
        assert_eq!(heap.metrics().free_blocks, 2);
        heap.check().unwrap();
    }
}

#[test]
fn payload_survives_unrelated_traffic() {
    for policy in POLICIES {
        let mut heap = Heap::with_policy(policy).unwrap();

        let p = heap.alloc(64).unwrap();
        for (i, byte) in heap.payload_mut(p)[..64].iter_mut().enumerate() {
            *byte = i as u8;
        }

        let a = heap.alloc(200).unwrap();
        let b = heap.alloc(32).unwrap();
        heap.free(Some(a));
        let c = heap.alloc(500).unwrap();
        heap.free(Some(b));
        heap.free(Some(c));

        for (i, byte) in heap.payload(p)[..64].iter().enumerate() {
            assert_eq!(*byte, i as u8);
        }

        heap.check().unwrap();
    }
}

#[test]
fn realloc_with_no_address_allocates() {
    let mut heap = Heap::with_policy(Policy::FirstFit).unwrap();

    let p = heap.realloc(None, 48).unwrap();

    heap.payload_mut(p)[..48].fill(9);
    assert!(heap.payload(p)[..48].iter().all(|&b| b == 9));
    heap.check().unwrap();
}

#[test]
fn realloc_to_zero_frees() {
    for policy in POLICIES {
        let mut heap = Heap::with_policy(policy).unwrap();

        let p = heap.alloc(100).unwrap();

        assert_eq!(heap.realloc(Some(p), 0), None);
        assert_eq!(heap.metrics().allocated_bytes, 0);
        heap.check().unwrap();
    }
}

#[test]
fn shrinking_keeps_the_address() {
    for policy in POLICIES {
        let mut heap = Heap::with_policy(policy).unwrap();

        let p = heap.alloc(200).unwrap();
        heap.payload_mut(p)[..50].fill(3);

        assert_eq!(heap.realloc(Some(p), 50), Some(p));
        assert!(heap.payload(p)[..50].iter().all(|&b| b == 3));
        heap.check().unwrap();
    }
}

#[test]
fn growing_into_a_free_successor_keeps_the_address() {
    for policy in POLICIES {
        let mut heap = Heap::new(HeapConfig {
            policy,
            chunk_size: 16384,
            ..HeapConfig::default()
        })
        .unwrap();

        let p = heap.alloc(4000).unwrap();
        heap.payload_mut(p)[..4000].fill(5);

        // the rest of the 16 KiB chunk sits free right after the block
        assert_eq!(heap.realloc(Some(p), 8000), Some(p));
        assert!(heap.payload(p)[..4000].iter().all(|&b| b == 5));
        assert!(heap.payload(p).len() >= 8000);
        heap.check().unwrap();
    }
}

#[test]
fn blocked_growth_moves_and_copies() {
    for policy in POLICIES {
        let mut heap = Heap::with_policy(policy).unwrap();

        let p = heap.alloc(4000).unwrap();
        for (i, byte) in heap.payload_mut(p)[..4000].iter_mut().enumerate() {
            *byte = i as u8;
        }

        // pin an allocated block right behind p
        let pin = heap.alloc(100).unwrap();
        assert!(pin > p);

        let moved = heap.realloc(Some(p), 8000).unwrap();

        assert_ne!(moved, p);
        for (i, byte) in heap.payload(moved)[..4000].iter().enumerate() {
            assert_eq!(*byte, i as u8);
        }

        heap.check().unwrap();
    }
}

#[test]
fn no_bytes_are_lost_across_traffic() {
    for policy in POLICIES {
        let mut heap = Heap::with_policy(policy).unwrap();
        let mut live = Vec::new();

        for size in [1, 8, 100, 500, 33, 4096, 9] {
            live.push(heap.alloc(size).unwrap());

            let metrics = heap.metrics();
            let sentinels = metrics.arena_size - metrics.allocated_bytes - metrics.free_bytes;
            assert_eq!(sentinels, 16);
        }

        for p in live {
            heap.free(Some(p));

            let metrics = heap.metrics();
            assert_eq!(
                metrics.allocated_bytes + metrics.free_bytes + 16,
                metrics.arena_size
            );
        }

        heap.check().unwrap();
    }
}
