//! Block headers and their on-buffer encoding.
//!
//! ```text
//!   offset +0  : prev   (8 bytes, LE signed, -1 = none)
//!   offset +8  : next   (8 bytes, LE signed, -1 = none)
//!   offset +16 : size   (8 bytes, LE unsigned)
//!   offset +24 : free   (4 bytes, LE unsigned, 0 or 1)
//!   offset +28 : payload (size bytes)
//! ```
//!
//! [`read`] and [`write`] do no bounds validation of their own. Callers must
//! pass an `offset` whose 28 header bytes lie inside the buffer; slice
//! indexing panics otherwise.

use std::fmt;

use crate::codec;

/// Size in bytes of an encoded header.
pub const HEADER_SIZE: usize = 28;

const PREV_AT: usize = 0;
const NEXT_AT: usize = 8;
const SIZE_AT: usize = 16;
const FREE_AT: usize = 24;

/// Encoded form of a missing link: `-1` as a signed 64-bit integer.
const NO_LINK: u64 = -1i64 as u64;

/// Handle to an allocated payload: the byte offset of its first byte within
/// the backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ptr(pub(crate) usize);

impl Ptr {
  /// Wraps a raw payload offset, e.g. one previously read from [`Ptr::offset`].
  #[inline]
  pub const fn new(offset: usize) -> Self {
    Self(offset)
  }

  /// Byte offset of the payload inside the backing buffer.
  #[inline]
  pub const fn offset(self) -> usize {
    self.0
  }
}

impl fmt::Display for Ptr {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "+{:#x}", self.0)
  }
}

/// Decoded block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
  pub offset: usize,
  pub prev: Option<usize>,
  pub next: Option<usize>,
  pub size: usize,
  pub is_free: bool,
}

impl Block {
  pub fn new(
    offset: usize,
    size: usize,
    is_free: bool,
    prev: Option<usize>,
    next: Option<usize>,
  ) -> Self {
    Self {
      offset,
      prev,
      next,
      size,
      is_free,
    }
  }

  /// Start of the payload, right after the header.
  #[inline]
  pub fn data(&self) -> Ptr {
    Ptr(self.offset + HEADER_SIZE)
  }

  /// First byte past the payload. Saturates on a corrupt `size`.
  #[inline]
  pub fn end(&self) -> usize {
    self.offset.saturating_add(HEADER_SIZE).saturating_add(self.size)
  }
}

fn decode_link(raw: u64) -> Option<usize> {
  if (raw as i64) < 0 {
    None
  } else {
    Some(raw as usize)
  }
}

fn encode_link(link: Option<usize>) -> u64 {
  link.map_or(NO_LINK, |offset| offset as u64)
}

/// Decodes the header stored at `offset`.
pub fn read(
  buf: &[u8],
  offset: usize,
) -> Block {
  Block {
    offset,
    prev: decode_link(codec::read_u64(buf, offset + PREV_AT)),
    next: decode_link(codec::read_u64(buf, offset + NEXT_AT)),
    size: codec::read_u64(buf, offset + SIZE_AT) as usize,
    is_free: codec::read_u32(buf, offset + FREE_AT) != 0,
  }
}

/// Encodes `block` at `block.offset`. Payload bytes are left untouched.
pub fn write(
  buf: &mut [u8],
  block: &Block,
) {
  let at = block.offset;
  codec::write_u64(buf, at + PREV_AT, encode_link(block.prev));
  codec::write_u64(buf, at + NEXT_AT, encode_link(block.next));
  codec::write_u64(buf, at + SIZE_AT, block.size as u64);
  codec::write_u32(buf, at + FREE_AT, block.is_free as u32);
}
