//! # rheap - Region Heap Allocators
//!
//! This crate manages allocations inside one fixed, caller-supplied byte
//! buffer. Once the buffer exists no further memory is requested from the
//! platform allocator.
//!
//! ## Overview
//!
//! Two policies share the [`RegionAllocator`] interface:
//!
//! - [`Heap`]: a general-purpose **free-list** heap. Each block carries a
//!   28-byte header linking it to its neighbours by byte offset; freed blocks
//!   are reused first-fit, split when large, and merged with free neighbours.
//! - [`BumpHeap`]: a **bump** arena. Allocation moves a cursor forward and
//!   `free` does nothing.
//!
//! ```text
//!   Free-list heap:
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          BACKING BUFFER                              │
//!   │                                                                      │
//!   │   ┌──────┬─────┬──────┬─────────┬──────┬─────┬────────────────────┐  │
//!   │   │ hdr  │ A1  │ hdr  │  free   │ hdr  │ A3  │      unused        │  │
//!   │   └──────┴─────┴──────┴─────────┴──────┴─────┴────────────────────┘  │
//!   │   0                                          ▲                    ▲  │
//!   │                                              │                    │  │
//!   │                                             top               capacity│
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rheap
//!   ├── align      - Word alignment macro (align!)
//!   ├── codec      - Little-endian integer encoding
//!   ├── block      - Header layout, read/write, Ptr handles
//!   ├── heap       - Free-list Heap (allocate, free, try_free)
//!   ├── dump       - Diagnostic table of the chain
//!   ├── bump       - BumpHeap
//!   ├── policy     - RegionAllocator trait, Policy, Region
//!   ├── region     - MappedRegion backing buffers (unix)
//!   ├── error      - Error type
//!   └── logging    - tracing helpers
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rheap::Heap;
//!
//! let mut buf = [0u8; 1024];
//! let mut heap = Heap::new(&mut buf);
//!
//! let ptr = heap.allocate(16).unwrap();
//! heap.payload_mut(ptr).unwrap().copy_from_slice(b"sixteen bytes!!!");
//! assert_eq!(heap.payload(ptr).unwrap(), b"sixteen bytes!!!");
//!
//! heap.free(ptr);
//! println!("{}", heap.dump());
//! ```
//!
//! ## Header Layout
//!
//! ```text
//!   ┌──────────┬──────────┬──────────┬──────────┬──────────────────┐
//!   │ prev i64 │ next i64 │ size u64 │ free u32 │   size bytes     │
//!   │ -1: none │ -1: none │          │  0 or 1  │                  │
//!   └──────────┴──────────┴──────────┴──────────┴──────────────────┘
//!   +0         +8         +16        +24        +28
//!                                               ▲
//!                                               └── Ptr returned to user
//! ```
//!
//! All fields are little-endian regardless of the host, so a dumped buffer
//! reads the same everywhere.
//!
//! ## Limitations
//!
//! - **Single owner**: every operation takes `&mut self`; concurrent use
//!   needs an external lock around each call.
//! - **No growth**: the buffer never grows and `top` never shrinks.
//! - **Unchecked frees**: [`Heap::free`] trusts its argument. Double frees
//!   and foreign pointers inside the heap corrupt the chain;
//!   [`Heap::try_free`] detects them at the cost of a chain walk.

pub mod align;
mod block;
mod bump;
pub mod codec;
mod dump;
mod error;
mod heap;
pub mod logging;
mod policy;
#[cfg(unix)]
mod region;

pub use block::{Block, HEADER_SIZE, Ptr, read as read_block, write as write_block};
pub use bump::BumpHeap;
pub use dump::Dump;
pub use error::{Error, Result};
pub use heap::{Blocks, Heap, HeapStats};
pub use policy::{Policy, Region, RegionAllocator};
#[cfg(unix)]
pub use region::MappedRegion;
