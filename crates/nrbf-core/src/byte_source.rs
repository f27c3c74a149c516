//! Sequential, bounds-checked reader over an immutable byte buffer.
//!
//! The cursor only ever moves forward and never past `len()`: every read
//! either advances by exactly the requested size or fails without moving
//! the cursor at all, so a failed read can be retried against a longer
//! buffer (see the prefix-determinism property in the crate's test suite).

use crate::error::{NrbfError, Result};

/// Marker trait for the fixed-width little-endian scalars `ByteSource::read`
/// knows how to decode. NRBF is little-endian on the wire regardless of
/// host endianness, so every impl below goes through `from_le_bytes`.
pub trait LittleEndian: Sized + Copy {
    /// Width of the wire representation, in bytes.
    const SIZE: usize;
    /// Decode `Self` from exactly `Self::SIZE` little-endian bytes.
    fn from_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_little_endian {
    ($($t:ty),+ $(,)?) => {
        $(
            impl LittleEndian for $t {
                const SIZE: usize = core::mem::size_of::<$t>();
                fn from_le(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; core::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_le_bytes(buf)
                }
            }
        )+
    };
}

impl_little_endian!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// A sequential reader over an in-memory, immutable byte buffer.
///
/// Invariants: `cursor` is always within `[0, data.len()]`; `eof()` holds
/// iff `cursor == data.len()`; every operation either advances the cursor
/// by exactly the requested size or returns an error without advancing it.
#[derive(Debug, Clone)]
pub struct ByteSource<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> ByteSource<'a> {
    /// Wrap a byte slice for sequential reading, starting at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// Current cursor position, in bytes from the start of the buffer.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// True iff the cursor has reached the end of the buffer.
    pub fn eof(&self) -> bool {
        self.cursor == self.data.len()
    }

    /// Number of bytes remaining before EOF.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Read and decode one little-endian scalar, advancing the cursor by
    /// `T::SIZE` bytes. Fails with [`NrbfError::Corrupt`] without advancing
    /// if fewer than `T::SIZE` bytes remain.
    pub fn read<T: LittleEndian>(&mut self) -> Result<T> {
        let bytes = self.take(T::SIZE)?;
        Ok(T::from_le(bytes))
    }

    /// Read `n` raw bytes and advance the cursor by `n`.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Advance the cursor by `n` bytes without inspecting them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(NrbfError::corrupt("premature end of file"));
        }
        let start = self.cursor;
        self.cursor += n;
        Ok(&self.data[start..self.cursor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_integers() {
        let mut src = ByteSource::new(&[0x01, 0x00, 0x00, 0x00]);
        assert_eq!(src.read::<i32>().unwrap(), 1);
        assert!(src.eof());
    }

    #[test]
    fn negative_i32_round_trips() {
        let mut src = ByteSource::new(&(-1i32).to_le_bytes());
        assert_eq!(src.read::<i32>().unwrap(), -1);
    }

    #[test]
    fn premature_eof_does_not_advance_cursor() {
        let mut src = ByteSource::new(&[0x01, 0x00]);
        assert!(src.read::<i32>().is_err());
        assert_eq!(src.position(), 0);
    }

    #[test]
    fn skip_advances_cursor() {
        let mut src = ByteSource::new(&[1, 2, 3, 4]);
        src.skip(3).unwrap();
        assert_eq!(src.read::<u8>().unwrap(), 4);
        assert!(src.eof());
    }

    #[test]
    fn skip_past_end_is_corrupt_and_does_not_advance() {
        let mut src = ByteSource::new(&[1, 2]);
        assert!(src.skip(5).is_err());
        assert_eq!(src.position(), 0);
    }

    #[test]
    fn empty_buffer_is_eof() {
        let src = ByteSource::new(&[]);
        assert!(src.eof());
    }
}
