/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A small TGA reader
//!
//! Only uncompressed true colour images (image type 2) at 24 or 32 bits
//! per pixel are read. The image ID and any colour map are skipped.

use std::fmt::{Debug, Display, Formatter};

use log::{trace, warn};
use vita_core::bytestream::{ByteCursor, ByteIoError};
use vita_core::errors::ErrorKind;
use vita_core::image::{pack_rgba, Image};
use vita_core::options::DecoderOptions;

const TRUE_COLOR_IMAGE: u8 = 2;

/// Descriptor bit set when the first row is the top one
const TOP_ORIGIN_BIT: u8 = 1 << 5;
/// Descriptor bit set when rows run right to left
const RIGHT_ORIGIN_BIT: u8 = 1 << 4;

pub enum TgaDecoderErrors {
    UnsupportedImageType(u8),
    UnsupportedColorMapType(u8),
    UnsupportedPixelDepth(u8),
    ZeroDimensions,
    /// width, height
    TooLargeDimensions(usize, usize),
    IoErrors(ByteIoError)
}

impl TgaDecoderErrors {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IoErrors(err) => err.kind(),
            _ => ErrorKind::Format
        }
    }
}

impl Debug for TgaDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedImageType(kind) => match kind {
                1 => writeln!(f, "Unsupported indexed TGA"),
                9..=11 => writeln!(f, "Unsupported RLE TGA"),
                _ => writeln!(f, "Unknown TGA image type {kind}")
            },
            Self::UnsupportedColorMapType(kind) => {
                writeln!(f, "Unknown TGA color map type {kind}")
            }
            Self::UnsupportedPixelDepth(depth) => {
                writeln!(f, "Pixel depth {depth} unsupported, not an RGB(A) TGA")
            }
            Self::ZeroDimensions => writeln!(f, "Width or height is zero, invalid image"),
            Self::TooLargeDimensions(width, height) => {
                writeln!(f, "Too large dimensions {width}x{height}")
            }
            Self::IoErrors(err) => writeln!(f, "{err:?}")
        }
    }
}

impl Display for TgaDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for TgaDecoderErrors {}

impl From<ByteIoError> for TgaDecoderErrors {
    fn from(value: ByteIoError) -> Self {
        TgaDecoderErrors::IoErrors(value)
    }
}

/// Check whether the data starts with a readable TGA header
///
/// TGA has no magic bytes, a header that parses is the only hint.
/// The position of `data` is not changed.
pub fn probe_tga(data: &ByteCursor) -> bool {
    match data.slice(..) {
        Ok(view) => TgaDecoder::new(view).decode_headers().is_ok(),
        Err(_) => false
    }
}

#[derive(Copy, Clone, Debug)]
struct TgaInfo {
    width:        usize,
    height:       usize,
    pixel_depth:  u8,
    /// Rows are stored bottom up
    flip_y:       bool,
    pixel_offset: u64
}

/// A TGA decoder
pub struct TgaDecoder {
    stream:  ByteCursor,
    options: DecoderOptions,
    info:    Option<TgaInfo>
}

impl TgaDecoder {
    pub fn new(stream: ByteCursor) -> TgaDecoder {
        TgaDecoder::new_with_options(stream, DecoderOptions::default())
    }

    pub fn new_with_options(stream: ByteCursor, options: DecoderOptions) -> TgaDecoder {
        TgaDecoder {
            stream,
            options,
            info: None
        }
    }

    pub fn decode_headers(&mut self) -> Result<(), TgaDecoderErrors> {
        if self.info.is_some() {
            return Ok(());
        }
        let id_length = self.stream.get_u8_err()?;
        let color_map_type = self.stream.get_u8_err()?;
        let image_type = self.stream.get_u8_err()?;

        if image_type != TRUE_COLOR_IMAGE {
            return Err(TgaDecoderErrors::UnsupportedImageType(image_type));
        }
        if color_map_type > 1 {
            return Err(TgaDecoderErrors::UnsupportedColorMapType(color_map_type));
        }
        let _first_entry = self.stream.get_u16_le_err()?;
        let color_map_length = self.stream.get_u16_le_err()?;
        // in bits
        let color_map_entry_size = self.stream.get_u8_err()?;

        let _x_origin = self.stream.get_i16_le_err()?;
        let _y_origin = self.stream.get_i16_le_err()?;
        let width = usize::from(self.stream.get_u16_le_err()?);
        let height = usize::from(self.stream.get_u16_le_err()?);
        let pixel_depth = self.stream.get_u8_err()?;
        let descriptor = self.stream.get_u8_err()?;

        if !matches!(pixel_depth, 24 | 32) {
            return Err(TgaDecoderErrors::UnsupportedPixelDepth(pixel_depth));
        }
        if width == 0 || height == 0 {
            return Err(TgaDecoderErrors::ZeroDimensions);
        }
        if width > self.options.get_max_width() || height > self.options.get_max_height() {
            return Err(TgaDecoderErrors::TooLargeDimensions(width, height));
        }
        if descriptor & RIGHT_ORIGIN_BIT != 0 {
            warn!("Right to left TGA rows are read left to right");
        }
        let color_map_bytes = if color_map_type == 1 {
            u64::from(color_map_length) * u64::from(color_map_entry_size).div_ceil(8)
        } else {
            0
        };
        let pixel_offset = self.stream.position() + u64::from(id_length) + color_map_bytes;
        let flip_y = descriptor & TOP_ORIGIN_BIT == 0;

        trace!("Width: {}", width);
        trace!("Height: {}", height);
        trace!("Pixel depth: {}", pixel_depth);
        trace!("Flip: {}", flip_y);

        self.info = Some(TgaInfo {
            width,
            height,
            pixel_depth,
            flip_y,
            pixel_offset
        });
        Ok(())
    }

    /// `(width, height)`, `None` until the headers are decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.info.map(|info| (info.width, info.height))
    }

    pub fn decode(&mut self) -> Result<Image, TgaDecoderErrors> {
        self.decode_headers()?;

        let Some(info) = self.info else {
            return Err(TgaDecoderErrors::ZeroDimensions);
        };
        let bytes_per_pixel = usize::from(info.pixel_depth / 8);

        self.stream.set_position(info.pixel_offset);
        // fails before allocating when the stream is shorter than the header claims
        let data = self
            .stream
            .read_stream((info.width * info.height * bytes_per_pixel) as u64)?
            .read_remaining()?;

        let pixels = data
            .chunks_exact(bytes_per_pixel)
            .map(|px| {
                // stored as blue, green, red
                let alpha = if bytes_per_pixel == 4 { px[3] } else { 255 };
                pack_rgba(px[2], px[1], px[0], alpha)
            })
            .collect();

        let mut image = Image::from_pixels(info.width, info.height, pixels)
            .ok_or(TgaDecoderErrors::ZeroDimensions)?;

        if info.flip_y {
            image.flip_y();
        }
        Ok(image)
    }
}
