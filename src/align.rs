/// Rounds `$value` up to the next multiple of the machine word size.
///
/// # Examples
///
/// ```rust
/// use rheap::align;
///
/// match std::mem::size_of::<usize>() {
///     8 => assert_eq!(align!(13), 16), // 64 bit machine.
///     4 => assert_eq!(align!(11), 12), // 32 bit machine.
///     _ => {},
/// };
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    ($value + ::core::mem::size_of::<usize>() - 1) & !(::core::mem::size_of::<usize>() - 1)
  };
}

#[cfg(test)]
mod tests {
  use std::mem;

  #[test]
  fn test_align() {
    let word = mem::size_of::<usize>();

    assert_eq!(align!(0usize), 0);

    for i in 0..10 {
      let expected = word * (i + 1);

      for size in (word * i + 1)..=(word * (i + 1)) {
        assert_eq!(expected, align!(size));
      }
    }
  }
}
