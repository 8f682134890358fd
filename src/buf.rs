//! Fixed-capacity buffers.
//!
//! Lifecycle notifications may arrive while the host holds its loader lock,
//! so nothing on the logging path touches the heap. Paths and records are
//! assembled in these stack buffers instead; running out of room is an
//! [`Error::Overflow`](crate::Error::Overflow), never a truncation.

use crate::{Result, error::overflow_error};
use core::fmt;

/// A stack buffer of at most `N` code units.
pub struct FixedBuf<T, const N: usize> {
    data: [T; N],
    len: usize,
}

impl<T: Copy + Default, const N: usize> FixedBuf<T, N> {
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [T::default(); N],
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn push(&mut self, unit: T) -> Result<()> {
        if self.len == N {
            return Err(overflow_error(N));
        }
        self.data[self.len] = unit;
        self.len += 1;
        Ok(())
    }

    pub fn extend_from_slice(&mut self, units: &[T]) -> Result<()> {
        let end = self
            .len
            .checked_add(units.len())
            .filter(|&end| end <= N)
            .ok_or_else(|| overflow_error(N))?;
        self.data[self.len..end].copy_from_slice(units);
        self.len = end;
        Ok(())
    }

    /// Lets an OS call fill the buffer from the start.
    ///
    /// `fill` receives the whole backing storage and returns how many units
    /// it wrote. A count equal to the capacity is reported as an overflow,
    /// because the OS APIs used here signal truncation exactly that way.
    pub fn fill_with(&mut self, fill: impl FnOnce(&mut [T]) -> Result<usize>) -> Result<()> {
        self.len = 0;
        let written = fill(&mut self.data)?;
        if written >= N {
            return Err(overflow_error(N));
        }
        self.len = written;
        Ok(())
    }

    /// Returns the contents followed by a zero terminator, as C and Win32
    /// path arguments expect. The terminator is not counted in `len`.
    pub fn as_nul_terminated(&mut self) -> Result<&[T]> {
        if self.len == N {
            return Err(overflow_error(N));
        }
        self.data[self.len] = T::default();
        Ok(&self.data[..=self.len])
    }
}

impl<T: Copy + Default, const N: usize> Default for FixedBuf<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FixedBuf<u8, N> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<const N: usize> fmt::Write for FixedBuf<u8, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.extend_from_slice(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedBuf<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.data[..self.len]).finish()
    }
}
