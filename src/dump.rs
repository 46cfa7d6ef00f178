//! Human-readable table of a heap's chain.

use std::fmt;

use crate::{block::Block, heap::Heap};

/// Lazily rendered view of every header between offset 0 and `top`.
///
/// Formatting walks the chain again; nothing is collected up front.
pub struct Dump<'a, 'buf> {
  heap: &'a Heap<'buf>,
}

impl<'buf> Heap<'buf> {
  pub fn dump(&self) -> Dump<'_, 'buf> {
    Dump { heap: self }
  }
}

struct Link(Option<usize>);

impl fmt::Display for Link {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self.0 {
      Some(offset) => fmt::Display::fmt(&offset, f),
      None => f.pad("-1"),
    }
  }
}

fn write_row(
  f: &mut fmt::Formatter<'_>,
  block: &Block,
) -> fmt::Result {
  writeln!(
    f,
    "{:>10} {:>10} {:>10} {:>10} {:>5}",
    block.offset,
    Link(block.prev),
    Link(block.next),
    block.size,
    block.is_free as u8,
  )
}

impl fmt::Display for Dump<'_, '_> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    writeln!(
      f,
      "{:>10} {:>10} {:>10} {:>10} {:>5}",
      "offset", "prev", "next", "size", "free"
    )?;

    for block in self.heap.blocks() {
      write_row(f, &block)?;
    }

    write!(
      f,
      "top = {}, capacity = {}",
      self.heap.top(),
      self.heap.capacity()
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_dump_table() {
    let mut buf = [0u8; 256];
    let mut heap = Heap::new(&mut buf);

    let a = heap.allocate(8).unwrap();
    heap.allocate(16).unwrap();
    heap.free(a);

    let text = heap.dump().to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(
      lines[1].split_whitespace().collect::<Vec<_>>(),
      ["0", "-1", "36", "8", "1"]
    );
    assert_eq!(
      lines[2].split_whitespace().collect::<Vec<_>>(),
      ["36", "0", "-1", "16", "0"]
    );
    assert_eq!(lines[3], "top = 80, capacity = 256");
  }

  #[test]
  fn test_dump_empty_heap() {
    let mut buf = [0u8; 64];
    let heap = Heap::new(&mut buf);

    assert_eq!(heap.dump().to_string().lines().count(), 2);
  }
}
