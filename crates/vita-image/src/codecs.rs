/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for all supported codecs
//!
//! Every format exposes the same three capabilities through [`ImageFormat`]
//! - `probe`: does this data look like the format, never moves the caller's cursor
//! - `decode`: turn the data into an [`Image`]
//! - `encode`: turn an [`Image`] into the format's bytes, PNG only
//!
//! Each capability works on a fresh zero-position slice of the caller's
//! cursor, so a failed probe or decode leaves the cursor as it was.

use log::trace;
use vita_core::bytestream::ByteCursor;
use vita_core::image::Image;
use vita_core::options::{DecoderOptions, EncoderOptions};
use vita_png::{probe_png, PngDecoder, PngEncoder};

use crate::codecs::bmp::{probe_bmp, BmpDecoder};
use crate::codecs::tga::{probe_tga, TgaDecoder};
use crate::errors::ImageErrors;

pub mod bmp;
pub mod tga;

/// All supported image formats
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    PNG,
    /// Windows Bitmap Files
    BMP,
    /// Truevision TGA
    TGA
}

/// Format and dimensions of an image, read from its headers
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width:  usize,
    pub height: usize
}

impl ImageFormat {
    /// Every format, in the order [`guess_format`] tries them
    ///
    /// TGA has no magic bytes, so it comes last.
    pub const ALL: [ImageFormat; 3] = [ImageFormat::PNG, ImageFormat::BMP, ImageFormat::TGA];

    /// Check whether `data` looks like this format
    pub fn probe(&self, data: &ByteCursor) -> bool {
        match self {
            ImageFormat::PNG => probe_png(data),
            ImageFormat::BMP => probe_bmp(data),
            ImageFormat::TGA => probe_tga(data)
        }
    }

    /// Decode `data` as this format
    pub fn decode(&self, data: &ByteCursor, options: DecoderOptions) -> Result<Image, ImageErrors> {
        let stream = data.slice(..)?;

        let image = match self {
            ImageFormat::PNG => PngDecoder::new_with_options(stream, options).decode()?,
            ImageFormat::BMP => BmpDecoder::new_with_options(stream, options).decode()?,
            ImageFormat::TGA => TgaDecoder::new_with_options(stream, options).decode()?
        };
        Ok(image)
    }

    /// Read the headers of `data` without decoding pixels
    pub fn read_info(
        &self, data: &ByteCursor, options: DecoderOptions
    ) -> Result<ImageInfo, ImageErrors> {
        let stream = data.slice(..)?;

        let (width, height) = match self {
            ImageFormat::PNG => {
                let mut decoder = PngDecoder::new_with_options(stream, options);
                decoder.decode_headers()?;
                decoder.dimensions()
            }
            ImageFormat::BMP => {
                let mut decoder = BmpDecoder::new_with_options(stream, options);
                decoder.decode_headers()?;
                decoder.dimensions()
            }
            ImageFormat::TGA => {
                let mut decoder = TgaDecoder::new_with_options(stream, options);
                decoder.decode_headers()?;
                decoder.dimensions()
            }
        }
        .ok_or(ImageErrors::UnknownFormat)?;

        Ok(ImageInfo {
            format: *self,
            width,
            height
        })
    }

    pub const fn has_encoder(&self) -> bool {
        matches!(self, ImageFormat::PNG)
    }

    /// Encode `image` in this format
    pub fn encode(&self, image: &Image, options: EncoderOptions) -> Result<Vec<u8>, ImageErrors> {
        match self {
            ImageFormat::PNG => Ok(PngEncoder::new(image, options).encode_to_vec()?),
            _ => Err(ImageErrors::NoEncoderForFormat(*self))
        }
    }

    /// The format usually stored under a file extension
    pub fn from_extension<P: AsRef<str>>(extension: P) -> Option<ImageFormat> {
        match extension.as_ref().to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::PNG),
            "bmp" => Some(ImageFormat::BMP),
            "tga" => Some(ImageFormat::TGA),
            _ => None
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            ImageFormat::PNG => "png",
            ImageFormat::BMP => "bmp",
            ImageFormat::TGA => "tga"
        }
    }
}

/// Guess the format of `data`
///
/// Formats are probed in [`ImageFormat::ALL`] order, the first one
/// accepting the data wins. The position of `data` is not changed.
pub fn guess_format(data: &ByteCursor) -> Option<ImageFormat> {
    for format in ImageFormat::ALL {
        let Ok(view) = data.slice(..) else {
            return None;
        };
        if format.probe(&view) {
            trace!("Detected format {:?}", format);
            return Some(format);
        }
    }
    None
}

/// Decode `data` with the first format that accepts it
pub fn decode_any(
    data: &ByteCursor, options: DecoderOptions
) -> Result<(ImageFormat, Image), ImageErrors> {
    let format = guess_format(data).ok_or(ImageErrors::UnknownFormat)?;
    let image = format.decode(data, options)?;

    Ok((format, image))
}
