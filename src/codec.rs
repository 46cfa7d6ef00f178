//! Fixed-width little-endian integer codec.
//!
//! Every header field is stored least-significant byte first, so the byte
//! layout of a heap is the same on every host regardless of pointer width or
//! native byte order.

/// Encodes `value` as 8 little-endian bytes.
#[inline]
pub const fn encode_u64(value: u64) -> [u8; 8] {
  value.to_le_bytes()
}

/// Decodes 8 little-endian bytes.
#[inline]
pub const fn decode_u64(bytes: [u8; 8]) -> u64 {
  u64::from_le_bytes(bytes)
}

/// Encodes `value` as 4 little-endian bytes.
#[inline]
pub const fn encode_u32(value: u32) -> [u8; 4] {
  value.to_le_bytes()
}

/// Decodes 4 little-endian bytes.
#[inline]
pub const fn decode_u32(bytes: [u8; 4]) -> u32 {
  u32::from_le_bytes(bytes)
}

/// Reads a `u64` stored at `buf[at..at + 8]`.
///
/// Panics if the range is outside `buf`.
pub fn read_u64(
  buf: &[u8],
  at: usize,
) -> u64 {
  let mut raw = [0u8; 8];
  raw.copy_from_slice(&buf[at..at + 8]);
  decode_u64(raw)
}

/// Writes `value` to `buf[at..at + 8]`.
pub fn write_u64(
  buf: &mut [u8],
  at: usize,
  value: u64,
) {
  buf[at..at + 8].copy_from_slice(&encode_u64(value));
}

/// Reads a `u32` stored at `buf[at..at + 4]`.
pub fn read_u32(
  buf: &[u8],
  at: usize,
) -> u32 {
  let mut raw = [0u8; 4];
  raw.copy_from_slice(&buf[at..at + 4]);
  decode_u32(raw)
}

/// Writes `value` to `buf[at..at + 4]`.
pub fn write_u32(
  buf: &mut [u8],
  at: usize,
  value: u32,
) {
  buf[at..at + 4].copy_from_slice(&encode_u32(value));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_least_significant_byte_first() {
    assert_eq!(encode_u64(0x0102_0304_0506_0708), [8, 7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(encode_u32(0xAABB_CCDD), [0xDD, 0xCC, 0xBB, 0xAA]);
    assert_eq!(encode_u64(u64::MAX), [0xFF; 8]);
  }

  #[test]
  fn test_decode_inverts_encode() {
    for value in [0, 1, 28, 0x8000_0000_0000_0000, u64::MAX] {
      assert_eq!(decode_u64(encode_u64(value)), value);
    }

    for value in [0, 1, u32::MAX] {
      assert_eq!(decode_u32(encode_u32(value)), value);
    }
  }

  #[test]
  fn test_read_write_at_position() {
    let mut buf = [0u8; 16];

    write_u64(&mut buf, 3, 0xDEAD_BEEF);
    write_u32(&mut buf, 11, 7);

    assert_eq!(buf[3], 0xEF);
    assert_eq!(buf[0..3], [0, 0, 0]);
    assert_eq!(read_u64(&buf, 3), 0xDEAD_BEEF);
    assert_eq!(read_u32(&buf, 11), 7);
  }

  #[test]
  #[should_panic]
  fn test_read_past_end_panics() {
    let buf = [0u8; 7];
    read_u64(&buf, 0);
  }
}
