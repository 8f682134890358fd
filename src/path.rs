//! Log destination derivation.
//!
//! The log file sits next to the module binary and shares its stem:
//! `C:\Foo\Bar.dll` logs to `C:\Foo\Bar.log`, `/opt/lib/libbar.so` to
//! `/opt/lib/libbar.log`. Everything here works on native path code units
//! so that the OS buffers are used as they come back, without conversion.

use crate::{LOG_EXTENSION, Result, buf::FixedBuf};
use core::{char::REPLACEMENT_CHARACTER, fmt};

/// A native path code unit: `u8` for unix paths, `u16` for Win32 wide paths.
pub trait CodeUnit: Copy + Default + Eq + fmt::Debug + 'static {
    /// The extension separator.
    const DOT: Self;

    /// Whether this unit separates path components.
    fn is_separator(self) -> bool;

    /// Widens an ASCII byte.
    fn from_ascii(byte: u8) -> Self;

    /// Writes the units as UTF-8, replacing anything undecodable with
    /// U+FFFD.
    fn write_lossy<W: fmt::Write>(units: &[Self], out: &mut W) -> fmt::Result;
}

impl CodeUnit for u8 {
    const DOT: Self = b'.';

    #[inline]
    fn is_separator(self) -> bool {
        self == b'/'
    }

    #[inline]
    fn from_ascii(byte: u8) -> Self {
        byte
    }

    fn write_lossy<W: fmt::Write>(units: &[Self], out: &mut W) -> fmt::Result {
        for chunk in units.utf8_chunks() {
            out.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                out.write_char(REPLACEMENT_CHARACTER)?;
            }
        }
        Ok(())
    }
}

impl CodeUnit for u16 {
    const DOT: Self = b'.' as u16;

    #[inline]
    fn is_separator(self) -> bool {
        // Win32 accepts both.
        self == b'\\' as u16 || self == b'/' as u16
    }

    #[inline]
    fn from_ascii(byte: u8) -> Self {
        byte as u16
    }

    fn write_lossy<W: fmt::Write>(units: &[Self], out: &mut W) -> fmt::Result {
        for c in char::decode_utf16(units.iter().copied()) {
            out.write_char(c.unwrap_or(REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

/// Index of the first unit of the final path component.
#[inline]
fn name_start<T: CodeUnit>(path: &[T]) -> usize {
    path.iter()
        .rposition(|unit| unit.is_separator())
        .map_or(0, |sep| sep + 1)
}

/// The final component of `path`, or all of it when it has no separator.
pub fn base_name<T: CodeUnit>(path: &[T]) -> &[T] {
    &path[name_start(path)..]
}

/// Writes the log destination for the module at `module` into `out`.
///
/// The extension of the file name, from its last dot onward, is replaced
/// with `.log`; a file name without a dot gets `.log` appended. Dots in
/// directory names are never touched. Deriving from a derived path yields
/// the same path.
pub fn derive_log_path<T: CodeUnit, const N: usize>(
    module: &[T],
    out: &mut FixedBuf<T, N>,
) -> Result<()> {
    let start = name_start(module);
    let stem_len = module[start..]
        .iter()
        .rposition(|&unit| unit == T::DOT)
        .map_or(module.len(), |dot| start + dot);

    out.clear();
    out.extend_from_slice(&module[..stem_len])?;
    out.push(T::DOT)?;
    for &byte in LOG_EXTENSION.as_bytes() {
        out.push(T::from_ascii(byte))?;
    }
    Ok(())
}
