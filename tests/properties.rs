use proptest::prelude::*;
use rheap::{Block, Error, HEADER_SIZE, Heap, Ptr, read_block, write_block};

#[derive(Debug, Clone)]
enum Op {
  Alloc(usize),
  Free(usize),
}

fn op() -> impl Strategy<Value = Op> {
  prop_oneof![
    3 => (0usize..200).prop_map(Op::Alloc),
    2 => any::<usize>().prop_map(Op::Free),
  ]
}

fn check_chain(heap: &Heap) {
  let blocks: Vec<Block> = heap.blocks().collect();
  let mut footprint = 0;

  for (i, block) in blocks.iter().enumerate() {
    footprint += HEADER_SIZE + block.size;

    let prev = i.checked_sub(1).map(|j| blocks[j].offset);
    let next = blocks.get(i + 1).map(|b| b.offset);
    assert_eq!(block.prev, prev);
    assert_eq!(block.next, next);

    if let Some(after) = blocks.get(i + 1) {
      assert!(!(block.is_free && after.is_free), "adjacent free blocks at {}", block.offset);
    }
  }

  assert_eq!(footprint, heap.top());
  assert_eq!(heap.last(), blocks.last().map(|b| b.offset));
}

proptest! {
  #[test]
  fn live_payloads_never_overlap(ops in prop::collection::vec(op(), 1..120)) {
    let mut buf = vec![0u8; 4096];
    let mut heap = Heap::new(&mut buf);
    let mut live: Vec<(Ptr, usize, u8)> = Vec::new();
    let mut tag = 0u8;

    for op in ops {
      match op {
        Op::Alloc(size) => {
          if let Ok(ptr) = heap.allocate(size) {
            tag = tag.wrapping_add(1);
            heap.payload_mut(ptr).unwrap()[..size].fill(tag);
            live.push((ptr, size, tag));
          }
        }
        Op::Free(pick) if !live.is_empty() => {
          let (ptr, _, _) = live.swap_remove(pick % live.len());
          heap.free(ptr);
        }
        Op::Free(_) => {}
      }

      check_chain(&heap);

      for &(ptr, size, tag) in &live {
        let payload = heap.payload(ptr).unwrap();
        prop_assert!(payload.len() >= size);
        prop_assert!(payload[..size].iter().all(|&byte| byte == tag));
      }
    }
  }

  #[test]
  fn exhaustion_changes_nothing(sizes in prop::collection::vec(0usize..300, 1..64)) {
    let mut buf = vec![0u8; 1024];
    let mut heap = Heap::new(&mut buf);

    for size in sizes {
      let before = heap.as_bytes().to_vec();
      let (top, last) = (heap.top(), heap.last());

      match heap.allocate(size) {
        Ok(_) => {}
        Err(Error::OutOfMemory { .. }) => {
          prop_assert!(top + HEADER_SIZE + size > heap.capacity());
          prop_assert_eq!(heap.as_bytes(), &before[..]);
          prop_assert_eq!(heap.top(), top);
          prop_assert_eq!(heap.last(), last);
        }
        Err(err) => prop_assert!(false, "unexpected error {}", err),
      }
    }
  }

  #[test]
  fn header_round_trips(
    offset in 0usize..64,
    prev in prop::option::of(0..=i64::MAX as usize),
    next in prop::option::of(0..=i64::MAX as usize),
    size in any::<usize>(),
    is_free in any::<bool>(),
  ) {
    let mut buf = [0u8; 64 + HEADER_SIZE];
    let block = Block::new(offset, size, is_free, prev, next);

    write_block(&mut buf, &block);

    prop_assert_eq!(read_block(&buf, offset), block);
  }
}
