/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::ops::{Bound, RangeBounds};
use std::path::Path;
use std::rc::Rc;

use crate::bytestream::{
    ByteIoError, ByteSource, FileBacking, MemoryBacking, OpenMode, SharedSource
};

/// The part of the root source a cursor can see
///
/// Offsets are always absolute into the root source, a slice of a slice
/// is folded into a single window when it is created.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Window {
    /// The whole source, growing with it
    Root,
    /// The fixed range `[start, end)` of the source
    Slice { start: u64, end: u64 }
}

/// A seekable cursor over a shared byte source
///
/// Reading and writing move the cursor's own position, other cursors
/// over the same source are unaffected.
///
/// Fixed size accessors come in two flavours, the `_err` ones return
/// an error when the source does not have enough bytes left and leave the
/// position untouched, the plain ones return `0` in that case.
///
/// # Example
/// ```
/// use vita_core::bytestream::ByteCursor;
///
/// let mut cursor = ByteCursor::from_bytes(&[0x01, 0x02, 0x03, 0x04]);
/// assert_eq!(cursor.get_u16_le_err().unwrap(), 0x0201);
/// assert_eq!(cursor.get_u16_be_err().unwrap(), 0x0304);
/// assert!(cursor.get_u8_err().is_err());
/// ```
pub struct ByteCursor {
    source:                    SharedSource,
    window:                    Window,
    position:                  u64,
    pub(crate) bits_data:      u32,
    pub(crate) available_bits: u8
}

impl ByteCursor {
    /// Create a cursor over the whole of `source`, positioned at zero
    pub fn new(source: SharedSource) -> ByteCursor {
        ByteCursor {
            source,
            window: Window::Root,
            position: 0,
            bits_data: 0,
            available_bits: 0
        }
    }

    /// Create a cursor over a copy of `data`
    pub fn from_bytes(data: &[u8]) -> ByteCursor {
        ByteCursor::from_backing(MemoryBacking::from_slice(data))
    }

    pub fn from_vec(data: Vec<u8>) -> ByteCursor {
        ByteCursor::from_backing(MemoryBacking::from_vec(data))
    }

    /// Create a cursor over an empty growable in-memory source
    pub fn memory() -> ByteCursor {
        ByteCursor::from_backing(MemoryBacking::new())
    }

    /// Create a cursor over the file at `path`
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<ByteCursor, ByteIoError> {
        Ok(ByteCursor::from_backing(FileBacking::open(path, mode)?))
    }

    pub fn from_backing<T: ByteSource + 'static>(backing: T) -> ByteCursor {
        ByteCursor::new(Rc::new(RefCell::new(backing)))
    }

    /// A handle to the source shared by this cursor and all its slices
    pub fn source(&self) -> SharedSource {
        Rc::clone(&self.source)
    }

    pub const fn window(&self) -> Window {
        self.window
    }

    pub const fn is_slice(&self) -> bool {
        matches!(self.window, Window::Slice { .. })
    }

    #[inline(always)]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Move to `position`, positions past the end are allowed and read nothing
    #[inline]
    pub fn set_position(&mut self, position: u64) {
        self.position = position;
    }

    #[inline]
    pub fn skip(&mut self, count: u64) {
        self.position = self.position.saturating_add(count);
    }

    /// Move back `count` bytes, failing if that would go before the start
    pub fn rewind(&mut self, count: u64) -> Result<(), ByteIoError> {
        self.position = self
            .position
            .checked_sub(count)
            .ok_or(ByteIoError::Generic("Cannot rewind before the start of the stream"))?;
        Ok(())
    }

    /// Length of the visible window
    ///
    /// For a root cursor this is the current source length, which grows
    /// with writes to growable sources.
    pub fn length(&self) -> Result<u64, ByteIoError> {
        match self.window {
            Window::Root => self.source.borrow_mut().source_len(),
            Window::Slice { start, end } => Ok(end - start)
        }
    }

    /// Bytes between the position and the end of the window
    pub fn remaining(&self) -> Result<u64, ByteIoError> {
        Ok(self.length()?.saturating_sub(self.position))
    }

    pub fn eof(&self) -> Result<bool, ByteIoError> {
        Ok(self.remaining()? == 0)
    }

    #[inline(always)]
    const fn base(&self) -> u64 {
        match self.window {
            Window::Root => 0,
            Window::Slice { start, .. } => start
        }
    }

    /// Read up to `buf.len()` bytes, returning how many were read
    ///
    /// Fewer bytes are only returned at the end of the window.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let limit = match self.window {
            Window::Root => buf.len(),
            Window::Slice { start, end } => {
                let available = end.saturating_sub(start.saturating_add(self.position));
                buf.len().min(usize::try_from(available).unwrap_or(usize::MAX))
            }
        };
        if limit == 0 {
            return Ok(0);
        }
        let absolute = self.base() + self.position;
        let count = self
            .source
            .borrow_mut()
            .read_at(absolute, &mut buf[..limit])?;

        self.position += count as u64;
        Ok(count)
    }

    /// Fill `buf` completely or fail with [`ByteIoError::NotEnoughBytes`]
    ///
    /// On failure the position is left where it was.
    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let start = self.position;
        let count = self.read_bytes(buf)?;

        if count != buf.len() {
            self.position = start;
            return Err(ByteIoError::NotEnoughBytes(buf.len(), count));
        }
        Ok(())
    }

    /// Read up to `count` bytes into a new vector
    pub fn read_vec(&mut self, count: usize) -> Result<Vec<u8>, ByteIoError> {
        let mut out = vec![0; count];
        let read = self.read_bytes(&mut out)?;
        out.truncate(read);
        Ok(out)
    }

    /// Read everything from the position to the end of the window
    pub fn read_remaining(&mut self) -> Result<Vec<u8>, ByteIoError> {
        let remaining = usize::try_from(self.remaining()?)?;
        self.read_vec(remaining)
    }

    #[inline]
    pub fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        self.read_exact_bytes(&mut byte_store)?;
        Ok(byte_store)
    }

    /// Copy of the whole window, the position is not changed
    pub fn to_vec(&mut self) -> Result<Vec<u8>, ByteIoError> {
        self.keep_position(|cursor| {
            cursor.set_position(0);
            cursor.read_remaining()
        })
    }

    /// Write all of `buf` at the position
    ///
    /// Root cursors over growable sources extend the source, writes through
    /// a slice that would cross its end fail with [`ByteIoError::OutOfBounds`]
    /// without writing anything.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        if let Window::Slice { start, end } = self.window {
            let write_end = start
                .saturating_add(self.position)
                .saturating_add(buf.len() as u64);

            if write_end > end {
                return Err(ByteIoError::OutOfBounds {
                    start: self.position,
                    end:   self.position.saturating_add(buf.len() as u64),
                    limit: end - start
                });
            }
        }
        let absolute = self.base() + self.position;
        self.source.borrow_mut().write_at(absolute, buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    #[inline]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        let [byte] = self.read_fixed_bytes::<1>()?;
        Ok(byte)
    }

    /// Read a byte, returning 0 at the end of the window
    #[inline]
    pub fn get_u8(&mut self) -> u8 {
        self.get_u8_err().unwrap_or(0)
    }

    #[inline]
    pub fn get_i8_err(&mut self) -> Result<i8, ByteIoError> {
        Ok(self.get_u8_err()? as i8)
    }

    #[inline]
    pub fn get_i8(&mut self) -> i8 {
        self.get_u8() as i8
    }

    /// Read an unsigned little endian 24 bit integer
    pub fn get_u24_le_err(&mut self) -> Result<u32, ByteIoError> {
        let bytes = self.read_fixed_bytes::<3>()?;
        Ok(u24_from_le_bytes(bytes))
    }

    /// Read an unsigned big endian 24 bit integer
    pub fn get_u24_be_err(&mut self) -> Result<u32, ByteIoError> {
        let mut bytes = self.read_fixed_bytes::<3>()?;
        bytes.reverse();
        Ok(u24_from_le_bytes(bytes))
    }

    /// Read a signed little endian 24 bit integer, sign extended from bit 23
    pub fn get_i24_le_err(&mut self) -> Result<i32, ByteIoError> {
        Ok(sign_extend_24(self.get_u24_le_err()?))
    }

    /// Read a signed big endian 24 bit integer, sign extended from bit 23
    pub fn get_i24_be_err(&mut self) -> Result<i32, ByteIoError> {
        Ok(sign_extend_24(self.get_u24_be_err()?))
    }

    pub fn write_u8(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.write_bytes(&[byte])
    }

    pub fn write_i8(&mut self, byte: i8) -> Result<(), ByteIoError> {
        self.write_bytes(&[byte as u8])
    }

    /// Write the low 24 bits of `value` in little endian
    pub fn write_u24_le(&mut self, value: u32) -> Result<(), ByteIoError> {
        let [a, b, c, _] = value.to_le_bytes();
        self.write_bytes(&[a, b, c])
    }

    /// Write the low 24 bits of `value` in big endian
    pub fn write_u24_be(&mut self, value: u32) -> Result<(), ByteIoError> {
        let [a, b, c, _] = value.to_le_bytes();
        self.write_bytes(&[c, b, a])
    }

    /// Read exactly `count` bytes and decode them as text up to the first zero
    ///
    /// Bytes after the first zero are consumed but discarded.
    pub fn read_stringz_fixed(&mut self, count: usize) -> Result<String, ByteIoError> {
        let mut bytes = vec![0; count];
        self.read_exact_bytes(&mut bytes)?;

        if let Some(zero) = bytes.iter().position(|x| *x == 0) {
            bytes.truncate(zero);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read text until a zero byte or the end of the window
    ///
    /// The zero byte is consumed.
    pub fn read_stringz(&mut self) -> Result<String, ByteIoError> {
        let mut out = Vec::new();
        let mut chunk = [0; 64];

        loop {
            let count = self.read_bytes(&mut chunk)?;
            if count == 0 {
                break;
            }
            if let Some(zero) = chunk[..count].iter().position(|x| *x == 0) {
                out.extend_from_slice(&chunk[..zero]);
                // give back what we read past the terminator
                self.rewind((count - zero - 1) as u64)?;
                break;
            }
            out.extend_from_slice(&chunk[..count]);
        }
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Write `text` followed by a zero byte
    pub fn write_stringz(&mut self, text: &str) -> Result<(), ByteIoError> {
        self.write_bytes(text.as_bytes())?;
        self.write_u8(0)
    }

    /// Write `text` into exactly `count` bytes, truncating or zero padding it
    pub fn write_stringz_fixed(&mut self, text: &str, count: usize) -> Result<(), ByteIoError> {
        let mut bytes = vec![0; count];
        let len = text.len().min(count);
        bytes[..len].copy_from_slice(&text.as_bytes()[..len]);
        self.write_bytes(&bytes)
    }

    /// Create a view of `range` of this cursor's window
    ///
    /// The view shares the source, starts at position zero and does not
    /// track this cursor's position afterwards. Slicing a slice produces a
    /// view on the root source directly.
    ///
    /// # Errors
    /// [`ByteIoError::OutOfBounds`] if the range is inverted or extends
    /// past the end of the window
    pub fn slice<R: RangeBounds<u64>>(&self, range: R) -> Result<ByteCursor, ByteIoError> {
        let limit = self.length()?;

        let start = match range.start_bound() {
            Bound::Included(start) => *start,
            Bound::Excluded(start) => start.saturating_add(1),
            Bound::Unbounded => 0
        };
        let end = match range.end_bound() {
            Bound::Included(end) => end.saturating_add(1),
            Bound::Excluded(end) => *end,
            Bound::Unbounded => limit
        };
        if start > end || end > limit {
            return Err(ByteIoError::OutOfBounds { start, end, limit });
        }
        let base = self.base();

        Ok(ByteCursor {
            source:         Rc::clone(&self.source),
            window:         Window::Slice {
                start: base + start,
                end:   base + end
            },
            position:       0,
            bits_data:      0,
            available_bits: 0
        })
    }

    /// A view from the current position to the end of the window
    pub fn slice_remaining(&self) -> Result<ByteCursor, ByteIoError> {
        self.slice(self.position..)
    }

    /// A view of the next `count` bytes, the position moves past them
    pub fn read_stream(&mut self, count: u64) -> Result<ByteCursor, ByteIoError> {
        let remaining = self.remaining()?;

        if remaining < count {
            return Err(ByteIoError::NotEnoughBytes(
                usize::try_from(count).unwrap_or(usize::MAX),
                usize::try_from(remaining).unwrap_or(usize::MAX)
            ));
        }
        let stream = self.slice(self.position..self.position + count)?;
        self.skip(count);
        Ok(stream)
    }

    /// Run `func` and restore the position afterwards, whatever it returned
    ///
    /// Only the position is restored, writes made by `func` stay.
    pub fn keep_position<F, R>(&mut self, func: F) -> R
    where
        F: FnOnce(&mut ByteCursor) -> R
    {
        let position = self.position;
        let result = func(self);
        self.position = position;
        result
    }

    /// Write `value` until the position is a multiple of `alignment`
    pub fn write_to_align(&mut self, alignment: u64, value: u8) -> Result<(), ByteIoError> {
        if alignment == 0 {
            return Ok(());
        }
        while self.position % alignment != 0 {
            self.write_u8(value)?;
        }
        Ok(())
    }

    /// Copy everything left in `other` to this cursor, returning the bytes copied
    pub fn write_stream(&mut self, other: &mut ByteCursor) -> Result<u64, ByteIoError> {
        let mut buffer = [0; 4096];
        let mut total = 0;

        loop {
            let count = other.read_bytes(&mut buffer)?;
            if count == 0 {
                break;
            }
            self.write_bytes(&buffer[..count])?;
            total += count as u64;
        }
        Ok(total)
    }
}

#[inline(always)]
fn u24_from_le_bytes(bytes: [u8; 3]) -> u32 {
    u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16)
}

#[inline(always)]
fn sign_extend_24(value: u32) -> i32 {
    ((value << 8) as i32) >> 8
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl ByteCursor
        {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type
            {
                self.$name2(mode).unwrap_or(0)
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, ByteIoError>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space = self.read_fixed_bytes::<SIZE_OF_VAL>()?;
                let value = $int_type::from_le_bytes(space);

                match mode {
                    // big endian is the byte reversal of the little endian decode
                    Mode::BE => Ok(value.swap_bytes()),
                    Mode::LE => Ok(value)
                }
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name2(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name4(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name2(Mode::LE)
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning 0 if the underlying  buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name5(&mut self) -> $int_type
            {
                self.$name(Mode::BE)
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning 0 if the underlying buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name6(&mut self) -> $int_type
            {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(
    get_u16_inner_or_default,
    get_u16_inner_or_die,
    get_u16_be_err,
    get_u16_le_err,
    get_u16_be,
    get_u16_le,
    u16
);
get_single_type!(
    get_i16_inner_or_default,
    get_i16_inner_or_die,
    get_i16_be_err,
    get_i16_le_err,
    get_i16_be,
    get_i16_le,
    i16
);
get_single_type!(
    get_u32_inner_or_default,
    get_u32_inner_or_die,
    get_u32_be_err,
    get_u32_le_err,
    get_u32_be,
    get_u32_le,
    u32
);
get_single_type!(
    get_i32_inner_or_default,
    get_i32_inner_or_die,
    get_i32_be_err,
    get_i32_le_err,
    get_i32_be,
    get_i32_le,
    i32
);
get_single_type!(
    get_u64_inner_or_default,
    get_u64_inner_or_die,
    get_u64_be_err,
    get_u64_le_err,
    get_u64_be,
    get_u64_le,
    u64
);
get_single_type!(
    get_i64_inner_or_default,
    get_i64_inner_or_die,
    get_i64_be_err,
    get_i64_le_err,
    get_i64_be,
    get_i64_le,
    i64
);

macro_rules! write_single_type {
    ($name:tt,$name2:tt,$int_type:tt) => {
        impl ByteCursor
        {
            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[inline]
            pub fn $name(&mut self, value: $int_type) -> Result<(), ByteIoError>
            {
                self.write_bytes(&value.to_le_bytes())
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[inline]
            pub fn $name2(&mut self, value: $int_type) -> Result<(), ByteIoError>
            {
                self.write_bytes(&value.to_be_bytes())
            }
        }
    };
}

write_single_type!(write_u16_le, write_u16_be, u16);
write_single_type!(write_i16_le, write_i16_be, i16);
write_single_type!(write_u32_le, write_u32_be, u32);
write_single_type!(write_i32_le, write_i32_be, i32);
write_single_type!(write_u64_le, write_u64_be, u64);
write_single_type!(write_i64_le, write_i64_be, i64);

impl Debug for ByteCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = self.source.borrow().name();

        f.debug_struct("ByteCursor")
            .field("source", &name)
            .field("window", &self.window)
            .field("position", &self.position)
            .field("available_bits", &self.available_bits)
            .finish()
    }
}

impl std::io::Read for ByteCursor {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.read_bytes(buf).map_err(std::io::Error::from)
    }
}

impl std::io::Write for ByteCursor {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::io::Seek for ByteCursor {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        use std::io::{Error, ErrorKind, SeekFrom};

        let new_position = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(offset) => self.length()?.checked_add_signed(offset),
            SeekFrom::Current(offset) => self.position.checked_add_signed(offset)
        };
        match new_position {
            Some(position) => {
                self.position = position;
                Ok(position)
            }
            None => Err(Error::new(
                ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position"
            ))
        }
    }
}
