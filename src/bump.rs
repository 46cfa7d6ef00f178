//! Bump allocator over a borrowed buffer.
//!
//! ```text
//!   ┌─────┬─────┬─────┬─────┬───────────────────────────────┐
//!   │ A1  │ A2  │ A3  │ A4  │          Free Space           │
//!   └─────┴─────┴─────┴─────┴───────────────────────────────┘
//!                           ▲                               ▲
//!                          top                          capacity
//! ```
//!
//! No headers are stored: each request moves `top` forward by its size
//! rounded up to a machine word. Individual frees do nothing; [`BumpHeap::reset`]
//! releases everything at once.

use crate::{
  align,
  block::Ptr,
  error::{Error, Result},
  logging,
};

pub struct BumpHeap<'buf> {
  buf: &'buf mut [u8],
  top: usize,
}

impl<'buf> BumpHeap<'buf> {
  pub fn new(buf: &'buf mut [u8]) -> Self {
    Self { buf, top: 0 }
  }

  #[inline]
  pub fn capacity(&self) -> usize {
    self.buf.len()
  }

  #[inline]
  pub fn top(&self) -> usize {
    self.top
  }

  #[inline]
  pub fn remaining(&self) -> usize {
    self.capacity() - self.top
  }

  pub fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Ptr> {
    let available = self.remaining();
    let step = match size.checked_add(std::mem::size_of::<usize>() - 1) {
      Some(_) => align!(size),
      None => usize::MAX,
    };

    if step > available {
      logging::log_exhausted(size, available);
      return Err(Error::OutOfMemory {
        requested: size,
        available,
      });
    }

    let ptr = Ptr::new(self.top);
    self.top += step;

    logging::log_allocation(size, ptr);
    Ok(ptr)
  }

  /// Does nothing: bump memory is only reclaimed by [`BumpHeap::reset`].
  pub fn free(
    &mut self,
    _ptr: Ptr,
  ) {
  }

  /// Forgets every allocation. Previously returned pointers must not be used
  /// afterwards.
  pub fn reset(&mut self) {
    self.top = 0;
  }

  /// `len` bytes starting at `ptr`, if they lie below `top`.
  pub fn bytes(
    &self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&[u8]> {
    let end = ptr.offset().checked_add(len)?;
    (end <= self.top).then(|| &self.buf[ptr.offset()..end])
  }

  pub fn bytes_mut(
    &mut self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&mut [u8]> {
    let end = ptr.offset().checked_add(len)?;
    if end > self.top {
      return None;
    }
    Some(&mut self.buf[ptr.offset()..end])
  }
}

#[cfg(test)]
mod tests {
  use std::mem;

  use super::*;

  #[test]
  fn test_alloc() {
    let mut buf = [0u8; 256];
    let mut heap = BumpHeap::new(&mut buf);
    let word = mem::size_of::<usize>();

    let first = heap.allocate(8).unwrap();
    heap.bytes_mut(first, 8).unwrap().copy_from_slice(&3u64.to_le_bytes());

    let second = heap.allocate(12).unwrap();
    for (i, byte) in heap.bytes_mut(second, 12).unwrap().iter_mut().enumerate() {
      *byte = (i + 1) as u8;
    }

    assert_eq!(first.offset(), 0);
    assert_eq!(second.offset(), align!(8usize));
    assert_eq!(heap.top(), align!(8usize) + align!(12usize));
    assert_eq!(heap.top() % word, 0);

    assert_eq!(heap.bytes(first, 8).unwrap(), &3u64.to_le_bytes());
    assert_eq!(heap.bytes(second, 12).unwrap()[11], 12);

    heap.free(first);
    let third = heap.allocate(4).unwrap();

    assert!(third > second);
  }

  #[test]
  fn test_exhaustion_and_reset() {
    let mut buf = [0u8; 32];
    let mut heap = BumpHeap::new(&mut buf);

    heap.allocate(24).unwrap();
    let top = heap.top();

    assert!(matches!(
      heap.allocate(16),
      Err(Error::OutOfMemory { requested: 16, .. })
    ));
    assert_eq!(heap.top(), top);
    assert!(heap.allocate(usize::MAX).is_err());

    heap.reset();

    assert_eq!(heap.top(), 0);
    assert_eq!(heap.allocate(32).unwrap(), Ptr::new(0));
    assert_eq!(heap.remaining(), 0);
  }

  #[test]
  fn test_bytes_stop_at_top() {
    let mut buf = [0u8; 64];
    let mut heap = BumpHeap::new(&mut buf);

    let ptr = heap.allocate(8).unwrap();

    assert!(heap.bytes(ptr, 8).is_some());
    assert!(heap.bytes(ptr, 9).is_none());
    assert!(heap.bytes(Ptr::new(usize::MAX), 1).is_none());
  }
}
