/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use crate::errors::ErrorKind;

/// Errors raised by byte sources and cursors
pub enum ByteIoError {
    StdIoError(std::io::Error),
    TryFromIntError(core::num::TryFromIntError),
    // requested, found
    NotEnoughBytes(usize, usize),
    /// A slice or a write through a slice that would leave `[start, end)`
    OutOfBounds {
        start: u64,
        end:   u64,
        limit: u64
    },
    UnsupportedBitWidth(u32),
    Generic(&'static str)
}

impl ByteIoError {
    /// Classify this error, see [`ErrorKind`]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ByteIoError::StdIoError(_) => ErrorKind::Io,
            ByteIoError::NotEnoughBytes(_, _) => ErrorKind::Truncated,
            ByteIoError::OutOfBounds { .. } => ErrorKind::Bounds,
            ByteIoError::UnsupportedBitWidth(_) => ErrorKind::Format,
            ByteIoError::TryFromIntError(_) | ByteIoError::Generic(_) => ErrorKind::Bounds
        }
    }
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {}", err)
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::OutOfBounds { start, end, limit } => {
                writeln!(
                    f,
                    "Range {start}..{end} is out of bounds for a stream of {limit} bytes"
                )
            }
            ByteIoError::UnsupportedBitWidth(width) => {
                writeln!(f, "Unsupported bit width {width}, at most 32 bits can be read")
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ByteIoError {}

impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for ByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        ByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

impl From<ByteIoError> for std::io::Error {
    fn from(value: ByteIoError) -> Self {
        match value {
            ByteIoError::StdIoError(err) => err,
            ByteIoError::NotEnoughBytes(_, _) => {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, format!("{:?}", value))
            }
            other => std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", other))
        }
    }
}
