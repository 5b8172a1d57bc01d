/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image detection, decoding and encoding

use std::fmt::{Debug, Display, Formatter};

use vita_core::bytestream::ByteIoError;
use vita_core::errors::ErrorKind;
use vita_png::error::PngErrors;

use crate::codecs::bmp::BmpDecoderErrors;
use crate::codecs::tga::TgaDecoderErrors;
use crate::codecs::ImageFormat;

/// All possible image errors that can occur
pub enum ImageErrors {
    /// No format in the capability set recognised the data
    UnknownFormat,
    NoEncoderForFormat(ImageFormat),
    PngErrors(PngErrors),
    BmpErrors(BmpDecoderErrors),
    TgaErrors(TgaDecoderErrors),
    IoErrors(ByteIoError)
}

impl ImageErrors {
    /// Classify this error, see [`ErrorKind`]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownFormat | Self::NoEncoderForFormat(_) => ErrorKind::Format,
            Self::PngErrors(err) => err.kind(),
            Self::BmpErrors(err) => err.kind(),
            Self::TgaErrors(err) => err.kind(),
            Self::IoErrors(err) => err.kind()
        }
    }
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFormat => writeln!(f, "Unknown image format"),
            Self::NoEncoderForFormat(format) => {
                writeln!(f, "No encoder for format {format:?}")
            }
            Self::PngErrors(err) => writeln!(f, "{err:?}"),
            Self::BmpErrors(err) => writeln!(f, "{err:?}"),
            Self::TgaErrors(err) => writeln!(f, "{err:?}"),
            Self::IoErrors(err) => writeln!(f, "I/O error {err:?}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ImageErrors {}

impl From<PngErrors> for ImageErrors {
    fn from(value: PngErrors) -> Self {
        Self::PngErrors(value)
    }
}

impl From<BmpDecoderErrors> for ImageErrors {
    fn from(value: BmpDecoderErrors) -> Self {
        Self::BmpErrors(value)
    }
}

impl From<TgaDecoderErrors> for ImageErrors {
    fn from(value: TgaDecoderErrors) -> Self {
        Self::TgaErrors(value)
    }
}

impl From<ByteIoError> for ImageErrors {
    fn from(value: ByteIoError) -> Self {
        Self::IoErrors(value)
    }
}

impl From<std::io::Error> for ImageErrors {
    fn from(value: std::io::Error) -> Self {
        Self::IoErrors(ByteIoError::StdIoError(value))
    }
}
