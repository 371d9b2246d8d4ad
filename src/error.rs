use thiserror::Error;

/// Failures a heap can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// The region limit was reached and the arena could not grow.
    #[error("region limit reached")]
    OutOfMemory,

    /// The requested size cannot be encoded in a block tag.
    #[error("requested size overflows the maximum block size")]
    SizeOverflow,

    /// An audit found a broken structural invariant. Only ever returned
    /// by [`crate::Heap::check`], never by the allocation path.
    #[error("heap audit failed: {0}")]
    Corrupted(String),
}
