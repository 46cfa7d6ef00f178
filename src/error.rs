use std::{fmt, io};

use crate::block::Ptr;

pub type Result<T> = std::result::Result<T, Error>;

/// Allocator errors
#[derive(Debug)]
pub enum Error {
  /// No free block fits and the buffer cannot hold another block.
  OutOfMemory { requested: usize, available: usize },
  /// The pointer is not the payload start of any block in the chain.
  InvalidPointer(Ptr),
  /// The pointer names a block that is already free.
  DoubleFree(Ptr),
  /// The backing region could not be mapped.
  Map(io::Error),
}

impl fmt::Display for Error {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Self::OutOfMemory {
        requested,
        available,
      } => write!(
        f,
        "out of memory: requested {requested} bytes, {available} bytes left at top"
      ),
      Self::InvalidPointer(ptr) => write!(f, "pointer {ptr} was not issued by this heap"),
      Self::DoubleFree(ptr) => write!(f, "pointer {ptr} is already free"),
      Self::Map(err) => write!(f, "failed to map backing region: {err}"),
    }
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Map(err) => Some(err),
      _ => None,
    }
  }
}
