//! Logging helpers for allocator events.
//!
//! Uses `tracing` for structured events; nothing is printed unless a
//! subscriber is installed (see [`init_logging`]).

use tracing::{debug, trace};

use crate::block::Ptr;

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Defaults to `rheap=debug` in debug builds and `rheap=info` otherwise.
/// Calling it again after a subscriber is set is harmless.
pub fn init_logging() {
  use tracing_subscriber::{EnvFilter, fmt};

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    #[cfg(debug_assertions)]
    {
      EnvFilter::new("rheap=debug")
    }
    #[cfg(not(debug_assertions))]
    {
      EnvFilter::new("rheap=info")
    }
  });

  fmt().with_env_filter(filter).compact().try_init().ok();
}

#[inline]
pub(crate) fn log_allocation(
  size: usize,
  ptr: Ptr,
) {
  trace!(target: "rheap", size, offset = ptr.offset(), "allocated");
}

#[inline]
pub(crate) fn log_deallocation(
  size: usize,
  ptr: Ptr,
) {
  trace!(target: "rheap", size, offset = ptr.offset(), "freed");
}

#[inline]
pub(crate) fn log_split(
  offset: usize,
  size: usize,
  remainder: usize,
) {
  trace!(target: "rheap", offset, size, remainder, "split free block");
}

#[inline]
pub(crate) fn log_coalesce(
  into: usize,
  from: usize,
  size: usize,
) {
  trace!(target: "rheap", into, from, size, "coalesced blocks");
}

#[inline]
pub(crate) fn log_exhausted(
  requested: usize,
  available: usize,
) {
  debug!(target: "rheap", requested, available, "out of memory");
}

#[inline]
pub(crate) fn log_ignored_free(
  ptr: Ptr,
  top: usize,
) {
  debug!(target: "rheap", offset = ptr.offset(), top, "ignored free of foreign pointer");
}
