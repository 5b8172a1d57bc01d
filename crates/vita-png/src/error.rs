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
use zune_inflate::errors::InflateDecodeErrors;

/// Errors possible when decoding or encoding png images
pub enum PngErrors {
    /// The first eight bytes are not the png signature
    BadSignature,
    UnsupportedBitDepth(u8),
    UnsupportedColorType(u8),
    /// A non zero compression, filter or interlace method
    UnsupportedMethod(&'static str, u8),
    UnknownFilter(u8),
    BadIhdrLength(usize),
    ZeroDimensions,
    /// width, height
    LargeDimensions(usize, usize),
    ChunkOrdering(&'static str),
    MissingHeader,
    NoImageData,
    MissingTerminator,
    UnknownCriticalChunk([u8; 4]),
    BadCrc {
        chunk:    [u8; 4],
        expected: u32,
        found:    u32
    },
    /// expected, found
    ShortImageData(usize, usize),
    ZlibDecodeErrors(InflateDecodeErrors),
    IoErrors(ByteIoError)
}

impl PngErrors {
    /// Classify this error, see [`ErrorKind`]
    pub fn kind(&self) -> ErrorKind {
        match self {
            PngErrors::ShortImageData(_, _) => ErrorKind::Truncated,
            PngErrors::IoErrors(err) => err.kind(),
            _ => ErrorKind::Format
        }
    }
}

impl Debug for PngErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::UnsupportedBitDepth(depth) => {
                writeln!(f, "Unsupported bit depth {depth}, only 8 bit images are supported")
            }
            Self::UnsupportedColorType(color) => {
                writeln!(f, "Unsupported color type {color}, only RGB(2) and RGBA(6) are supported")
            }
            Self::UnsupportedMethod(method, value) => {
                writeln!(f, "Unsupported {method} method {value}")
            }
            Self::UnknownFilter(filter) => writeln!(f, "Unknown filter {filter}"),
            Self::BadIhdrLength(length) => {
                writeln!(f, "Bad IHDR length {length}, expected 13")
            }
            Self::ZeroDimensions => writeln!(f, "Width or height cannot be zero"),
            Self::LargeDimensions(width, height) => writeln!(
                f,
                "Image dimensions {width}x{height} larger than the configured maximum, aborting"
            ),
            Self::ChunkOrdering(reason) => writeln!(f, "Bad chunk order: {reason}"),
            Self::MissingHeader => writeln!(f, "No IHDR chunk found"),
            Self::NoImageData => writeln!(f, "No IDAT chunks found"),
            Self::MissingTerminator => writeln!(f, "Stream ended without an IEND chunk"),
            Self::UnknownCriticalChunk(chunk) => writeln!(
                f,
                "Marker {} unknown but deemed necessary",
                String::from_utf8_lossy(chunk)
            ),
            Self::BadCrc {
                chunk,
                expected,
                found
            } => writeln!(
                f,
                "CRC does not match for chunk {}, expected {expected:08X} but found {found:08X}",
                String::from_utf8_lossy(chunk)
            ),
            Self::ShortImageData(expected, found) => writeln!(
                f,
                "Not enough pixels, expected {expected} bytes but found {found}"
            ),
            Self::ZlibDecodeErrors(err) => writeln!(f, "Error decoding idat chunks {err:?}"),
            Self::IoErrors(err) => writeln!(f, "I/O error {err:?}")
        }
    }
}

impl Display for PngErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for PngErrors {}

impl From<ByteIoError> for PngErrors {
    fn from(value: ByteIoError) -> Self {
        PngErrors::IoErrors(value)
    }
}

impl From<std::io::Error> for PngErrors {
    fn from(value: std::io::Error) -> Self {
        PngErrors::IoErrors(ByteIoError::StdIoError(value))
    }
}

impl From<InflateDecodeErrors> for PngErrors {
    fn from(value: InflateDecodeErrors) -> Self {
        PngErrors::ZlibDecodeErrors(value)
    }
}
