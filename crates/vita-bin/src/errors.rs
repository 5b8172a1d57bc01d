/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use vita_core::bytestream::ByteIoError;
use vita_image::errors::ImageErrors;
use vita_psf::errors::PsfDecodeErrors;

/// Everything that can stop a command
pub enum CliErrors {
    ImageErrors(ImageErrors),
    PsfErrors(PsfDecodeErrors),
    IoErrors(ByteIoError),
    JsonErrors(serde_json::Error),
    Generic(String)
}

impl Debug for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageErrors(err) => writeln!(f, "{err:?}"),
            Self::PsfErrors(err) => writeln!(f, "{err:?}"),
            Self::IoErrors(err) => writeln!(f, "{err:?}"),
            Self::JsonErrors(err) => writeln!(f, "Could not serialize output: {err}"),
            Self::Generic(reason) => writeln!(f, "{reason}")
        }
    }
}

impl From<ImageErrors> for CliErrors {
    fn from(value: ImageErrors) -> Self {
        CliErrors::ImageErrors(value)
    }
}

impl From<PsfDecodeErrors> for CliErrors {
    fn from(value: PsfDecodeErrors) -> Self {
        CliErrors::PsfErrors(value)
    }
}

impl From<ByteIoError> for CliErrors {
    fn from(value: ByteIoError) -> Self {
        CliErrors::IoErrors(value)
    }
}

impl From<serde_json::Error> for CliErrors {
    fn from(value: serde_json::Error) -> Self {
        CliErrors::JsonErrors(value)
    }
}

impl From<String> for CliErrors {
    fn from(value: String) -> Self {
        CliErrors::Generic(value)
    }
}
