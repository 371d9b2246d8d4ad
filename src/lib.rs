//! A single-threaded heap allocator built from raw bytes up.
//!
//! `loam` manages one contiguous, growable byte region and services
//! allocate / free / resize requests against it with classic boundary
//! tags: every block carries a `(size, allocated)` tag word at both ends,
//! freed blocks merge with free physical neighbors, and a swappable
//! free-block index decides where the next allocation lands.
//!
//! Addresses handed out by a [`Heap`] are byte offsets into its arena
//! rather than raw pointers, so every tag, link and payload access stays
//! bounds checked while the block algorithms remain untouched.
//!
//! ```rust
//! use loam::{Heap, HeapConfig};
//!
//! let mut heap = Heap::new(HeapConfig::default()).unwrap();
//!
//! let p = heap.alloc(100).unwrap();
//! heap.payload_mut(p)[..5].copy_from_slice(b"hello");
//! assert_eq!(&heap.payload(p)[..5], b"hello");
//!
//! heap.free(Some(p));
//! ```
//!
//! Four placement policies are available, chosen once when the heap is
//! constructed: first fit and next fit over an implicit block scan, first
//! fit over an explicit free list, and bucketed best fit over segregated
//! size classes.
//!
//! ```rust
//! use loam::{Heap, Policy};
//!
//! let mut heap = Heap::with_policy(Policy::NextFit).unwrap();
//!
//! let p = heap.alloc(32).unwrap();
//! let p = heap.realloc(Some(p), 64).unwrap();
//!
//! heap.free(Some(p));
//! ```
//!
//! The engine is not reentrant and performs no synchronization; wrap a
//! heap in your own mutual exclusion if it must be shared. Freeing an
//! address the heap never handed out, freeing twice, or writing past a
//! payload's granted length is undefined by design and not detected.

mod arena;
mod block;
mod coalesce;
mod config;
mod constants;
mod error;
mod heap;
mod index;
mod metrics;
mod tag;

pub use config::{HeapConfig, Policy};
pub use error::HeapError;
pub use heap::{Address, BlockInfo, Blocks, Heap};
pub use metrics::HeapMetrics;
