use crate::constants::{LINK, WORD};
use crate::error::HeapError;

/// The contiguous byte region every block lives in.
///
/// The arena grows monotonically and never hands memory back for the life
/// of the heap. All block addresses are byte offsets into this buffer, so
/// tag and link accesses stay bounds checked instead of going through raw
/// pointer casts.
pub struct Arena {
    bytes: Vec<u8>,
    limit: usize,
}

impl Arena {
    pub fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Extends the region by `additional` bytes and returns the new total
    /// length. Fails without mutating anything once the limit would be
    /// crossed.
    pub fn grow(&mut self, additional: usize) -> Result<usize, HeapError> {
        let new_len = self
            .bytes
            .len()
            .checked_add(additional)
            .ok_or(HeapError::OutOfMemory)?;

        if new_len > self.limit {
            return Err(HeapError::OutOfMemory);
        }

        self.bytes.resize(new_len, 0);
        Ok(new_len)
    }

    pub fn read_tag(&self, at: usize) -> u32 {
        u32::from_le_bytes(self.bytes[at..at + WORD].try_into().unwrap())
    }

    pub fn write_tag(&mut self, at: usize, tag: u32) {
        self.bytes[at..at + WORD].copy_from_slice(&tag.to_le_bytes());
    }

    pub fn read_link(&self, at: usize) -> usize {
        u64::from_le_bytes(self.bytes[at..at + LINK].try_into().unwrap()) as usize
    }

    pub fn write_link(&mut self, at: usize, to: usize) {
        self.bytes[at..at + LINK].copy_from_slice(&(to as u64).to_le_bytes());
    }

    pub fn slice(&self, at: usize, len: usize) -> &[u8] {
        &self.bytes[at..at + len]
    }

    pub fn slice_mut(&mut self, at: usize, len: usize) -> &mut [u8] {
        &mut self.bytes[at..at + len]
    }

    /// Copies `len` bytes from one offset to another. The ranges may
    /// overlap.
    pub fn copy(&mut self, src: usize, dst: usize, len: usize) {
        self.bytes.copy_within(src..src + len, dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_reports_new_length() {
        let mut arena = Arena::new(128);

        assert_eq!(arena.grow(64).unwrap(), 64);
        assert_eq!(arena.grow(64).unwrap(), 128);
        assert_eq!(arena.len(), 128);
    }

    #[test]
    fn grow_past_limit_fails_without_mutation() {
        let mut arena = Arena::new(100);

        arena.grow(96).unwrap();
        assert_eq!(arena.grow(8), Err(HeapError::OutOfMemory));
        assert_eq!(arena.len(), 96);
    }

    #[test]
    fn tags_and_links_round_trip() {
        let mut arena = Arena::new(64);
        arena.grow(64).unwrap();

        arena.write_tag(4, 4096 | 1);
        arena.write_link(16, 1234);

        assert_eq!(arena.read_tag(4), 4096 | 1);
        assert_eq!(arena.read_link(16), 1234);
    }

    #[test]
    fn copy_handles_overlap() {
        let mut arena = Arena::new(64);
        arena.grow(64).unwrap();

        arena.slice_mut(0, 4).copy_from_slice(b"abcd");
        arena.copy(0, 2, 4);

        assert_eq!(arena.slice(2, 4), b"abcd");
    }
}
