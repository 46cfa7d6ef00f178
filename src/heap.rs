//! General-purpose heap: first-fit allocation with splitting, and
//! coalescing deallocation, over a chain of headers embedded in a borrowed
//! buffer.
//!
//! ```text
//!   0                                                    top        capacity
//!   ┌────────┬──────────┬────────┬────────┬────────┬─────┬──────────┐
//!   │ header │ payload  │ header │payload │ header │ pay │  unused  │
//!   └────────┴──────────┴────────┴────────┴────────┴─────┴──────────┘
//!     ▲ prev = -1          ▲                 ▲ next = -1
//!     └──── next ──────────┘└──── next ──────┘
//!                                            last
//! ```
//!
//! `top` only ever grows: freeing the trailing block marks it free but does
//! not hand its bytes back to the unused tail.

use std::fmt;

use crate::{
  block::{self, Block, HEADER_SIZE, Ptr},
  error::{Error, Result},
  logging,
};

/// Coalescing free-list heap over `&'buf mut [u8]`.
///
/// Every operation takes `&mut self`; sharing a heap across threads needs an
/// external lock around each call.
pub struct Heap<'buf> {
  buf: &'buf mut [u8],
  last: Option<usize>,
  top: usize,
}

/// Summary of the chain, computed by walking it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
  pub blocks: usize,
  pub free_blocks: usize,
  /// Payload bytes held by allocated blocks.
  pub used_bytes: usize,
  /// Payload bytes held by free blocks.
  pub free_bytes: usize,
  pub top: usize,
  pub capacity: usize,
}

impl<'buf> Heap<'buf> {
  /// Binds an empty heap to `buf`. The whole slice is the capacity.
  ///
  /// A buffer shorter than one header is accepted but can never satisfy an
  /// allocation.
  pub fn new(buf: &'buf mut [u8]) -> Self {
    Self {
      buf,
      last: None,
      top: 0,
    }
  }

  #[inline]
  pub fn capacity(&self) -> usize {
    self.buf.len()
  }

  /// Offset of the first byte never handed to a block.
  #[inline]
  pub fn top(&self) -> usize {
    self.top
  }

  /// Offset of the block at the end of the chain, if any.
  #[inline]
  pub fn last(&self) -> Option<usize> {
    self.last
  }

  /// The whole backing buffer, headers included.
  pub fn as_bytes(&self) -> &[u8] {
    self.buf
  }

  /// Walks the chain from offset 0 up to `top`.
  pub fn blocks(&self) -> Blocks<'_> {
    Blocks {
      buf: self.buf,
      cursor: 0,
      top: self.top,
    }
  }

  /// Returns the first free block able to hold `size` bytes.
  fn find_free_block(
    &self,
    size: usize,
  ) -> Option<Block> {
    self
      .blocks()
      .find(|block| block.is_free && block.size >= size)
  }

  /// Allocates `size` payload bytes.
  ///
  /// Scans the chain first-fit. A free block with room for `size` plus a
  /// second header and a non-empty remainder is split; a smaller fitting one
  /// is reused whole. Otherwise a new block is appended at `top`. Payload
  /// bytes are never cleared.
  ///
  /// On [`Error::OutOfMemory`] the buffer, `top` and `last` are unchanged.
  pub fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Ptr> {
    let ptr = match self.find_free_block(size) {
      Some(block) if block.size >= size.saturating_add(2 * HEADER_SIZE) => self.split(block, size),
      Some(mut block) => {
        block.is_free = false;
        block::write(self.buf, &block);
        block.data()
      }
      None => self.append(size)?,
    };

    logging::log_allocation(size, ptr);
    Ok(ptr)
  }

  /// Carves an allocated block of `size` bytes off the front of `block`,
  /// leaving a free remainder right behind it.
  fn split(
    &mut self,
    block: Block,
    size: usize,
  ) -> Ptr {
    let allocated = Block::new(
      block.offset,
      size,
      false,
      block.prev,
      Some(block.offset + HEADER_SIZE + size),
    );
    let remainder = Block::new(
      allocated.end(),
      block.size - size - HEADER_SIZE,
      true,
      Some(allocated.offset),
      block.next,
    );

    block::write(self.buf, &allocated);
    block::write(self.buf, &remainder);

    match remainder.next {
      Some(next) => self.set_prev(next, Some(remainder.offset)),
      None => self.last = Some(remainder.offset),
    }

    logging::log_split(block.offset, size, remainder.size);
    allocated.data()
  }

  /// Appends a new allocated block at `top`.
  fn append(
    &mut self,
    size: usize,
  ) -> Result<Ptr> {
    let available = self.capacity() - self.top;
    let footprint = match HEADER_SIZE.checked_add(size) {
      Some(footprint) if footprint <= available => footprint,
      _ => {
        logging::log_exhausted(size, available);
        return Err(Error::OutOfMemory {
          requested: size,
          available,
        });
      }
    };

    let block = Block::new(self.top, size, false, self.last, None);
    block::write(self.buf, &block);

    if let Some(last) = self.last {
      self.set_next(last, Some(block.offset));
    }

    self.top += footprint;
    self.last = Some(block.offset);

    Ok(block.data())
  }

  /// Marks the block behind `ptr` free and merges it with free neighbours.
  ///
  /// A pointer past `top`, or one too close to the start of the buffer to
  /// have a header in front of it, is ignored.
  ///
  /// Freeing the same pointer twice, or a pointer that is inside the heap but
  /// was never returned by [`Heap::allocate`], is not detected and can
  /// corrupt the chain. Use [`Heap::try_free`] when that must be checked.
  pub fn free(
    &mut self,
    ptr: Ptr,
  ) {
    let offset = match ptr.offset().checked_sub(HEADER_SIZE) {
      Some(offset) if ptr.offset() <= self.top => offset,
      _ => {
        logging::log_ignored_free(ptr, self.top);
        return;
      }
    };

    let mut current = block::read(self.buf, offset);
    current.is_free = true;
    logging::log_deallocation(current.size, ptr);

    if let Some(prev_offset) = current.prev {
      let mut prev = block::read(self.buf, prev_offset);
      if prev.is_free {
        self.absorb(&mut prev, &current);
        current = prev;
      }
    }

    if let Some(next_offset) = current.next {
      let next = block::read(self.buf, next_offset);
      if next.is_free {
        self.absorb(&mut current, &next);
      }
    }

    block::write(self.buf, &current);
  }

  /// Grows `survivor` over the chain-adjacent `victim` that follows it and
  /// repoints the block after `victim` back at `survivor`. Only the
  /// neighbour's header is written; `survivor` is left to the caller.
  fn absorb(
    &mut self,
    survivor: &mut Block,
    victim: &Block,
  ) {
    survivor.size += victim.size + HEADER_SIZE;
    survivor.next = victim.next;

    match victim.next {
      Some(next) => self.set_prev(next, Some(survivor.offset)),
      None => self.last = Some(survivor.offset),
    }

    logging::log_coalesce(survivor.offset, victim.offset, survivor.size);
  }

  /// Like [`Heap::free`], but first checks that `ptr` is the payload of a
  /// live block in the chain.
  pub fn try_free(
    &mut self,
    ptr: Ptr,
  ) -> Result<()> {
    let block = self
      .blocks()
      .find(|block| block.data() == ptr)
      .ok_or(Error::InvalidPointer(ptr))?;

    if block.is_free {
      return Err(Error::DoubleFree(ptr));
    }

    self.free(ptr);
    Ok(())
  }

  /// Payload bytes of the block behind `ptr`.
  ///
  /// Returns `None` when `ptr` cannot belong to this heap or its block would
  /// run past `top`. The header in front of `ptr` is otherwise trusted.
  pub fn payload(
    &self,
    ptr: Ptr,
  ) -> Option<&[u8]> {
    let range = self.payload_range(ptr)?;
    self.buf.get(range)
  }

  /// Mutable payload bytes of the block behind `ptr`.
  pub fn payload_mut(
    &mut self,
    ptr: Ptr,
  ) -> Option<&mut [u8]> {
    let range = self.payload_range(ptr)?;
    self.buf.get_mut(range)
  }

  fn payload_range(
    &self,
    ptr: Ptr,
  ) -> Option<std::ops::Range<usize>> {
    let offset = ptr.offset().checked_sub(HEADER_SIZE)?;
    if ptr.offset() > self.top {
      return None;
    }

    let block = block::read(self.buf, offset);
    let end = block.end();
    (end <= self.top).then_some(ptr.offset()..end)
  }

  pub fn stats(&self) -> HeapStats {
    let mut stats = HeapStats {
      top: self.top,
      capacity: self.capacity(),
      ..HeapStats::default()
    };

    for block in self.blocks() {
      stats.blocks += 1;
      if block.is_free {
        stats.free_blocks += 1;
        stats.free_bytes += block.size;
      } else {
        stats.used_bytes += block.size;
      }
    }

    stats
  }

  fn set_prev(
    &mut self,
    offset: usize,
    prev: Option<usize>,
  ) {
    let mut block = block::read(self.buf, offset);
    block.prev = prev;
    block::write(self.buf, &block);
  }

  fn set_next(
    &mut self,
    offset: usize,
    next: Option<usize>,
  ) {
    let mut block = block::read(self.buf, offset);
    block.next = next;
    block::write(self.buf, &block);
  }
}

impl fmt::Debug for Heap<'_> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_struct("Heap")
      .field("capacity", &self.capacity())
      .field("top", &self.top)
      .field("last", &self.last)
      .finish()
  }
}

/// Iterator over the headers between offset 0 and `top`, in byte order.
///
/// While the chain is intact, byte order and `next` order coincide.
pub struct Blocks<'a> {
  buf: &'a [u8],
  cursor: usize,
  top: usize,
}

impl Iterator for Blocks<'_> {
  type Item = Block;

  fn next(&mut self) -> Option<Block> {
    if self.cursor >= self.top {
      return None;
    }

    let block = block::read(self.buf, self.cursor);
    self.cursor = block.end();
    Some(block)
  }
}
