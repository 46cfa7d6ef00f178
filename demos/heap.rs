//! Replays a split-then-merge sequence on a 1 KiB heap and prints the chain
//! after every step. Run with `RUST_LOG=rheap=trace` to see each event.

use rheap::{Heap, logging};

fn main() -> rheap::Result<()> {
  logging::init_logging();

  let mut data = [0u8; 1024];
  let mut heap = Heap::new(&mut data);

  let _first = heap.allocate(128)?;
  let second = heap.allocate(128)?;
  let _third = heap.allocate(128)?;

  println!("Expecting 3 blocks (alloc 128, alloc 128, alloc 128)");
  println!("{}", heap.dump());

  heap.free(second);

  println!("\nExpecting 3 blocks, middle one is free (free second block)");
  println!("{}", heap.dump());

  let fourth = heap.allocate(32)?;
  let fifth = heap.allocate(8)?;

  println!("\nExpecting 5 blocks, middle one is split (alloc 32, alloc 8)");
  println!("{}", heap.dump());

  heap.free(fourth);
  heap.free(fifth);

  println!("\nExpecting 3 blocks, middle ones are coalesced (free 2 blocks)");
  println!("{}", heap.dump());

  println!("\n{:?}", heap.stats());

  Ok(())
}
