/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use vita_core::bytestream::ByteIoError;
use vita_core::errors::ErrorKind;

use crate::constants::PSF_MAGIC;

/// Errors that can occur while reading a PSF file
pub enum PsfDecodeErrors {
    WrongMagicBytes([u8; 4]),
    /// An entry's key offset lies outside the key table
    KeyOutOfRange {
        key_offset: u64,
        table_len:  u64
    },
    /// An entry's value runs past the end of the value table
    ValueOutOfRange {
        offset:    u64,
        size:      u64,
        table_len: u64
    },
    IoErrors(ByteIoError)
}

impl PsfDecodeErrors {
    /// Classify this error, see [`ErrorKind`]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WrongMagicBytes(_) => ErrorKind::Format,
            Self::KeyOutOfRange { .. } | Self::ValueOutOfRange { .. } => ErrorKind::Truncated,
            Self::IoErrors(err) => err.kind()
        }
    }
}

impl Debug for PsfDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongMagicBytes(bytes) => {
                writeln!(
                    f,
                    "Expected {:?} but found {:?}, not a PSF file",
                    PSF_MAGIC, bytes
                )
            }
            Self::KeyOutOfRange {
                key_offset,
                table_len
            } => writeln!(
                f,
                "Key offset {key_offset} is outside the key table of {table_len} bytes"
            ),
            Self::ValueOutOfRange {
                offset,
                size,
                table_len
            } => writeln!(
                f,
                "Value of {size} bytes at {offset} overruns the value table of {table_len} bytes"
            ),
            Self::IoErrors(err) => writeln!(f, "I/O error {err:?}")
        }
    }
}

impl Display for PsfDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for PsfDecodeErrors {}

impl From<ByteIoError> for PsfDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        PsfDecodeErrors::IoErrors(value)
    }
}
