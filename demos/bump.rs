//! Walks a bump arena backed by an `mmap`ed region through a few requests
//! and shows that freeing never hands memory back.

use rheap::{BumpHeap, MappedRegion, logging};

fn main() -> rheap::Result<()> {
  logging::init_logging();

  let mut region = MappedRegion::new(64 * 1024)?;
  let mut arena = BumpHeap::new(region.as_mut_slice());

  // --------------------------------------------------------------------
  // 1) A u32 worth of bytes. The cursor moves by a whole machine word.
  // --------------------------------------------------------------------
  let first = arena.allocate(4)?;
  if let Some(bytes) = arena.bytes_mut(first, 4) {
    bytes.copy_from_slice(&0xDEADBEEFu32.to_le_bytes());
  }
  println!("[1] u32 at {first}, top = {}", arena.top());

  // --------------------------------------------------------------------
  // 2) 12 odd-sized bytes.
  // --------------------------------------------------------------------
  let second = arena.allocate(12)?;
  if let Some(bytes) = arena.bytes_mut(second, 12) {
    bytes.fill(0xAB);
  }
  println!("[2] [u8; 12] at {second}, top = {}", arena.top());

  // --------------------------------------------------------------------
  // 3) Free the first block, then ask for 2 bytes: nothing is reused.
  // --------------------------------------------------------------------
  arena.free(first);
  let third = arena.allocate(2)?;
  println!(
    "[3] [u8; 2] at {third}, reused first block? {}",
    if third == first { "yes" } else { "no" }
  );

  // --------------------------------------------------------------------
  // 4) Reset rewinds the cursor to the start of the region.
  // --------------------------------------------------------------------
  arena.reset();
  println!("[4] after reset, remaining = {}", arena.remaining());

  Ok(())
}
