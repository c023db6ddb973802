use std::marker::PhantomData;

use bytemuck::Pod;

use crate::alloc::{AllocError, Allocator};

/// Which scratch buffer ran out of room.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferKind {
    Vertex,
    Element,
}

impl std::fmt::Display for BufferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BufferKind::Vertex => "vertex",
            BufferKind::Element => "element",
        })
    }
}

/// Fixed-budget scratch buffer of `T`s backed by allocator memory.
///
/// The byte budget is allocated once; [`clear`](Self::clear) rewinds it for
/// the next frame.
#[derive(Debug)]
pub struct FixedBuffer<T> {
    bytes: Vec<u8>,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> FixedBuffer<T> {
    pub fn new(budget: usize, allocator: &Allocator) -> Result<Self, AllocError> {
        Ok(Self { bytes: allocator.alloc(budget)?, len: 0, _marker: PhantomData })
    }

    /// Budget in bytes.
    #[inline]
    pub fn budget(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len() / size_of::<T>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Appends `value`. Callers check [`remaining`](Self::remaining) first;
    /// values past the budget are dropped.
    #[inline]
    pub fn push(&mut self, value: T) {
        let size = size_of::<T>();
        let start = self.len * size;
        debug_assert!(start + size <= self.bytes.len(), "fixed buffer overrun");
        if let Some(dst) = self.bytes.get_mut(start..start + size) {
            dst.copy_from_slice(bytemuck::bytes_of(&value));
            self.len += 1;
        }
    }

    pub fn get(&self, index: usize) -> Option<T> {
        let size = size_of::<T>();
        if index >= self.len {
            return None;
        }
        Some(bytemuck::pod_read_unaligned(&self.bytes[index * size..(index + 1) * size]))
    }

    /// Bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len * size_of::<T>()]
    }

    /// Hands the backing memory back to `allocator`.
    pub fn release(self, allocator: &Allocator) {
        allocator.free(self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_follows_budget() {
        let buf = FixedBuffer::<u16>::new(10, &Allocator::host()).unwrap();
        assert_eq!(buf.capacity(), 5);
        assert_eq!(buf.remaining(), 5);
        assert!(buf.is_empty());
    }

    #[test]
    fn push_writes_little_endian_bytes() {
        let mut buf = FixedBuffer::<u16>::new(8, &Allocator::host()).unwrap();
        buf.push(1);
        buf.push(0x0302);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(1), Some(0x0302));
        assert_eq!(buf.get(2), None);
        assert_eq!(buf.as_bytes().len(), 4);

        buf.clear();
        assert!(buf.as_bytes().is_empty());
        assert_eq!(buf.remaining(), 4);
    }
}
