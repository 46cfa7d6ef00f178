use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rheap::{BumpHeap, Heap};

fn bench_free_list(c: &mut Criterion) {
  let mut buf = vec![0u8; 64 * 1024];

  c.bench_function("heap_alloc_free_churn", |b| {
    b.iter(|| {
      let mut heap = Heap::new(&mut buf);
      let mut ptrs = Vec::with_capacity(64);

      for i in 0..64 {
        ptrs.push(heap.allocate(16 + i % 48).unwrap());
      }
      for ptr in ptrs.iter().step_by(2) {
        heap.free(*ptr);
      }
      for i in 0..32 {
        black_box(heap.allocate(8 + i % 16).unwrap());
      }
    });
  });
}

fn bench_bump(c: &mut Criterion) {
  let mut buf = vec![0u8; 64 * 1024];

  c.bench_function("bump_alloc_16bytes", |b| {
    let mut heap = BumpHeap::new(&mut buf);
    b.iter(|| {
      if heap.allocate(16).is_err() {
        heap.reset();
      }
      black_box(heap.top());
    });
  });
}

criterion_group!(benches, bench_free_list, bench_bump);
criterion_main!(benches);
