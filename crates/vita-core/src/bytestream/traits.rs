/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for the byte sources backing a cursor
//!
//! This exposes the absolute position contract implemented by
//! the in-memory and file backings.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bytestream::ByteIoError;

/// A backing store shared between cursors.
///
/// Each cursor keeps its own position, so many cursors (and slices)
/// can read the same source without interfering with each other.
pub type SharedSource = Rc<RefCell<dyn ByteSource>>;

/// The absolute-position read/write contract of a byte source.
///
/// Positions are always absolute, a source has no cursor of its own.
/// That is what lets [`ByteCursor`](crate::bytestream::ByteCursor) slices
/// share one source.
pub trait ByteSource {
    /// Read bytes starting at `position` into `buf`
    ///
    /// ## Returns
    ///  - `Ok(usize)` - Bytes actually read, this is only less than `buf.len()`
    ///    when the end of the source was reached, and `0` when `position` is
    ///    at or past the end.
    ///  - `Err()` - The underlying storage failed
    fn read_at(&mut self, position: u64, buf: &mut [u8]) -> Result<usize, ByteIoError>;

    /// Write all of `buf` starting at `position`
    ///
    /// Growable sources extend their length to `position + buf.len()`
    fn write_at(&mut self, position: u64, buf: &[u8]) -> Result<(), ByteIoError>;

    /// Current length of the source in bytes
    fn source_len(&mut self) -> Result<u64, ByteIoError>;

    /// A short name used in logs and debug output
    fn name(&self) -> &'static str;
}
