//! Common allocate/free interface and construction-time policy selection.

use crate::{
  block::Ptr,
  bump::BumpHeap,
  error::Result,
  heap::Heap,
};

/// What container code needs from an allocator: hand out bytes, take them
/// back.
pub trait RegionAllocator {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Ptr>;

  fn free(
    &mut self,
    ptr: Ptr,
  );

  /// `len` bytes starting at `ptr`, or `None` if they are not all in use.
  fn bytes(
    &self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&[u8]>;

  fn bytes_mut(
    &mut self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&mut [u8]>;

  fn capacity(&self) -> usize;

  /// Bytes between the start of the buffer and `top`.
  fn used(&self) -> usize;
}

impl RegionAllocator for Heap<'_> {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Ptr> {
    Heap::allocate(self, size)
  }

  fn free(
    &mut self,
    ptr: Ptr,
  ) {
    Heap::free(self, ptr)
  }

  fn bytes(
    &self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&[u8]> {
    self.payload(ptr)?.get(..len)
  }

  fn bytes_mut(
    &mut self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&mut [u8]> {
    self.payload_mut(ptr)?.get_mut(..len)
  }

  fn capacity(&self) -> usize {
    Heap::capacity(self)
  }

  fn used(&self) -> usize {
    self.top()
  }
}

impl RegionAllocator for BumpHeap<'_> {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Ptr> {
    BumpHeap::allocate(self, size)
  }

  fn free(
    &mut self,
    ptr: Ptr,
  ) {
    BumpHeap::free(self, ptr)
  }

  fn bytes(
    &self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&[u8]> {
    BumpHeap::bytes(self, ptr, len)
  }

  fn bytes_mut(
    &mut self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&mut [u8]> {
    BumpHeap::bytes_mut(self, ptr, len)
  }

  fn capacity(&self) -> usize {
    BumpHeap::capacity(self)
  }

  fn used(&self) -> usize {
    self.top()
  }
}

/// Allocation strategy picked when a [`Region`] is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
  /// Monotonic arena; `free` is a no-op.
  Bump,
  /// First-fit free list with splitting and coalescing.
  #[default]
  FreeList,
}

/// A buffer driven by one of the two policies.
pub enum Region<'buf> {
  Bump(BumpHeap<'buf>),
  FreeList(Heap<'buf>),
}

impl<'buf> Region<'buf> {
  pub fn new(
    buf: &'buf mut [u8],
    policy: Policy,
  ) -> Self {
    match policy {
      Policy::Bump => Self::Bump(BumpHeap::new(buf)),
      Policy::FreeList => Self::FreeList(Heap::new(buf)),
    }
  }

  pub fn policy(&self) -> Policy {
    match self {
      Self::Bump(_) => Policy::Bump,
      Self::FreeList(_) => Policy::FreeList,
    }
  }
}

impl RegionAllocator for Region<'_> {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Ptr> {
    match self {
      Self::Bump(heap) => heap.allocate(size),
      Self::FreeList(heap) => heap.allocate(size),
    }
  }

  fn free(
    &mut self,
    ptr: Ptr,
  ) {
    match self {
      Self::Bump(heap) => heap.free(ptr),
      Self::FreeList(heap) => heap.free(ptr),
    }
  }

  fn bytes(
    &self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&[u8]> {
    match self {
      Self::Bump(heap) => heap.bytes(ptr, len),
      Self::FreeList(heap) => RegionAllocator::bytes(heap, ptr, len),
    }
  }

  fn bytes_mut(
    &mut self,
    ptr: Ptr,
    len: usize,
  ) -> Option<&mut [u8]> {
    match self {
      Self::Bump(heap) => heap.bytes_mut(ptr, len),
      Self::FreeList(heap) => RegionAllocator::bytes_mut(heap, ptr, len),
    }
  }

  fn capacity(&self) -> usize {
    match self {
      Self::Bump(heap) => heap.capacity(),
      Self::FreeList(heap) => heap.capacity(),
    }
  }

  fn used(&self) -> usize {
    match self {
      Self::Bump(heap) => heap.top(),
      Self::FreeList(heap) => heap.top(),
    }
  }
}
