/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Error classification shared by every codec
//!
//! Each crate has its own error enum, all of them expose a `kind()`
//! returning one of these so callers can act on the class of failure
//! without knowing every variant.

/// The class of a decode or encode failure
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The input is not in the expected format or uses an unsupported feature.
    ///
    /// A format dispatcher may move on to the next codec.
    Format,
    /// The input is of the right format but ends before a fixed size field
    ///
    /// Trying other codecs is pointless, the data is corrupt.
    Truncated,
    /// A slice read or write outside its window, a caller bug
    Bounds,
    /// The underlying storage failed
    Io
}

impl ErrorKind {
    /// Whether trying another format may succeed
    pub const fn is_format(self) -> bool {
        matches!(self, ErrorKind::Format)
    }
}
