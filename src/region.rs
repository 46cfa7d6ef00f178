//! Backing buffers obtained straight from the OS.
//!
//! A [`MappedRegion`] is mapped once with `mmap(2)` and unmapped on drop. The
//! heaps never ask the OS for memory themselves; this is only a convenient
//! owner for the bytes they borrow.

use std::{io, ptr, slice};

use libc::{MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, c_void, mmap, munmap};

use crate::error::{Error, Result};

/// Anonymous, zero-filled, private mapping of `len` bytes.
pub struct MappedRegion {
  addr: *mut u8,
  len: usize,
}

impl MappedRegion {
  /// Maps `capacity` bytes. A zero capacity is rejected by the OS.
  pub fn new(capacity: usize) -> Result<Self> {
    let addr = unsafe {
      mmap(
        ptr::null_mut(),
        capacity,
        PROT_READ | PROT_WRITE,
        MAP_PRIVATE | MAP_ANONYMOUS,
        -1,
        0,
      )
    };

    if addr == MAP_FAILED {
      return Err(Error::Map(io::Error::last_os_error()));
    }

    tracing::debug!(target: "rheap", capacity, addr = ?addr, "mapped backing region");

    Ok(Self {
      addr: addr as *mut u8,
      len: capacity,
    })
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn as_slice(&self) -> &[u8] {
    unsafe { slice::from_raw_parts(self.addr, self.len) }
  }

  pub fn as_mut_slice(&mut self) -> &mut [u8] {
    unsafe { slice::from_raw_parts_mut(self.addr, self.len) }
  }
}

impl Drop for MappedRegion {
  fn drop(&mut self) {
    unsafe {
      munmap(self.addr as *mut c_void, self.len);
    }
  }
}
