/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A small BMP reader
//!
//! Reads uncompressed (`BI_RGB`) images with a BITMAPINFOHEADER or one of
//! its larger successors, at 8 bits per pixel with a palette, 24 or 32
//! bits per pixel. Rows are padded to four bytes and stored bottom up
//! unless the height is negative.

use std::fmt::{Debug, Display, Formatter};

use log::{trace, warn};
use vita_core::bytestream::{ByteCursor, ByteIoError};
use vita_core::errors::ErrorKind;
use vita_core::image::{pack_rgba, Image};
use vita_core::options::DecoderOptions;

/// Size of the file header before the information header
const FILE_HEADER_SIZE: u64 = 14;

/// BMP errors that can occur during decoding
pub enum BmpDecoderErrors {
    /// The file/bytes do not start with `BM`
    InvalidMagicBytes,
    UnsupportedHeaderSize(u32),
    UnsupportedDepth(u16),
    UnsupportedCompression(u32),
    ZeroDimensions,
    /// width, height
    TooLargeDimensions(usize, usize),
    GenericStatic(&'static str),
    IoErrors(ByteIoError)
}

impl BmpDecoderErrors {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IoErrors(err) => err.kind(),
            _ => ErrorKind::Format
        }
    }
}

impl Debug for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, file does not start with BM")
            }
            Self::UnsupportedHeaderSize(size) => {
                writeln!(f, "Unsupported information header size {size}")
            }
            Self::UnsupportedDepth(depth) => {
                writeln!(f, "Depth {depth} unsupported, supported depths are 8, 24 and 32")
            }
            Self::UnsupportedCompression(compression) => {
                writeln!(f, "Unsupported BMP compression scheme {compression}")
            }
            Self::ZeroDimensions => writeln!(f, "Width or height is zero, invalid image"),
            Self::TooLargeDimensions(width, height) => {
                writeln!(f, "Too large dimensions {width}x{height}")
            }
            Self::GenericStatic(reason) => writeln!(f, "{reason}"),
            Self::IoErrors(err) => writeln!(f, "{err:?}")
        }
    }
}

impl Display for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for BmpDecoderErrors {}

impl From<ByteIoError> for BmpDecoderErrors {
    fn from(value: ByteIoError) -> Self {
        BmpDecoderErrors::IoErrors(value)
    }
}

/// Check for the `BM` magic followed by a known information header size
///
/// The position of `data` is not changed.
pub fn probe_bmp(data: &ByteCursor) -> bool {
    let Ok(mut view) = data.slice(..) else {
        return false;
    };
    if view.read_fixed_bytes::<2>().ok() != Some(*b"BM") {
        return false;
    }
    view.set_position(FILE_HEADER_SIZE);
    matches!(view.get_u32_le_err(), Ok(40 | 52 | 56 | 108 | 124))
}

/// Header information needed to read the pixels
#[derive(Copy, Clone, Debug)]
struct BmpInfo {
    width:       usize,
    height:      usize,
    depth:       u16,
    bottom_up:   bool,
    data_offset: u64
}

/// A BMP decoder
///
/// # Example
/// ```no_run
/// use vita_core::bytestream::{ByteCursor, OpenMode};
/// use vita_image::codecs::bmp::BmpDecoder;
///
/// let mut decoder = BmpDecoder::new(ByteCursor::open("pic0.bmp", OpenMode::Read).unwrap());
/// decoder.decode_headers().unwrap();
/// // after decoding headers, we can safely access the image metadata
/// let (w, h) = decoder.dimensions().unwrap();
/// println!("Image width: {w}\t Image height: {h}");
/// ```
pub struct BmpDecoder {
    stream:  ByteCursor,
    options: DecoderOptions,
    info:    Option<BmpInfo>,
    /// Palette for 8 bit images, already packed
    palette: Vec<u32>
}

impl BmpDecoder {
    pub fn new(stream: ByteCursor) -> BmpDecoder {
        BmpDecoder::new_with_options(stream, DecoderOptions::default())
    }

    pub fn new_with_options(stream: ByteCursor, options: DecoderOptions) -> BmpDecoder {
        BmpDecoder {
            stream,
            options,
            info: None,
            palette: vec![]
        }
    }

    /// Decode the file and information headers and the palette
    pub fn decode_headers(&mut self) -> Result<(), BmpDecoderErrors> {
        if self.info.is_some() {
            return Ok(());
        }
        if self.stream.read_fixed_bytes::<2>()? != *b"BM" {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }
        // 4 bytes file size
        // skip 4 reserved bytes
        self.stream.skip(8);

        let data_offset = u64::from(self.stream.get_u32_le_err()?);
        let ihsize = self.stream.get_u32_le_err()?;

        if !matches!(ihsize, 40 | 52 | 56 | 108 | 124) {
            return Err(BmpDecoderErrors::UnsupportedHeaderSize(ihsize));
        }
        let width = self.stream.get_i32_le_err()?;
        let height = self.stream.get_i32_le_err()?;

        if width <= 0 || height == 0 {
            return Err(BmpDecoderErrors::ZeroDimensions);
        }
        let bottom_up = height > 0;
        let width = width.unsigned_abs() as usize;
        let height = height.unsigned_abs() as usize;

        if width > self.options.get_max_width() || height > self.options.get_max_height() {
            return Err(BmpDecoderErrors::TooLargeDimensions(width, height));
        }
        // planes
        if self.stream.get_u16_le_err()? != 1 {
            return Err(BmpDecoderErrors::GenericStatic("Invalid BMP header"));
        }
        let depth = self.stream.get_u16_le_err()?;

        if !matches!(depth, 8 | 24 | 32) {
            return Err(BmpDecoderErrors::UnsupportedDepth(depth));
        }
        let compression = self.stream.get_u32_le_err()?;

        if compression != 0 {
            return Err(BmpDecoderErrors::UnsupportedCompression(compression));
        }
        // image size and resolution
        self.stream.skip(12);
        let colors_used = self.stream.get_u32_le_err()?;

        trace!("Width: {}", width);
        trace!("Height: {}", height);
        trace!("Depth: {}", depth);
        trace!("Bottom up: {}", bottom_up);

        if depth == 8 {
            self.read_palette(ihsize, colors_used)?;
        }
        self.info = Some(BmpInfo {
            width,
            height,
            depth,
            bottom_up,
            data_offset
        });
        Ok(())
    }

    fn read_palette(&mut self, ihsize: u32, colors_used: u32) -> Result<(), BmpDecoderErrors> {
        let count = match colors_used {
            0 => 256,
            n if n > 256 => {
                warn!("Palette of {n} colors, only reading 256");
                256
            }
            n => n as usize
        };
        self.stream.set_position(FILE_HEADER_SIZE + u64::from(ihsize));
        self.palette = Vec::with_capacity(count);

        for _ in 0..count {
            let [b, g, r, _] = self.stream.read_fixed_bytes::<4>()?;
            // the fourth byte is reserved, palettes carry no alpha
            self.palette.push(pack_rgba(r, g, b, 255));
        }
        Ok(())
    }

    /// `(width, height)`, `None` until the headers are decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.info.map(|info| (info.width, info.height))
    }

    /// Bits per pixel, `None` until the headers are decoded
    pub fn depth(&self) -> Option<u16> {
        self.info.map(|info| info.depth)
    }

    pub fn decode(&mut self) -> Result<Image, BmpDecoderErrors> {
        self.decode_headers()?;

        let info = self
            .info
            .ok_or(BmpDecoderErrors::GenericStatic("Headers not decoded"))?;

        let bytes_per_pixel = usize::from(info.depth / 8);
        // rows are padded to a multiple of 4 bytes
        let stride = (info.width * bytes_per_pixel + 3) & !3;

        self.stream.set_position(info.data_offset);

        let needed = (stride as u64).saturating_mul(info.height as u64);
        let remaining = self.stream.remaining()?;

        if remaining < needed {
            return Err(BmpDecoderErrors::IoErrors(ByteIoError::NotEnoughBytes(
                usize::try_from(needed).unwrap_or(usize::MAX),
                usize::try_from(remaining).unwrap_or(usize::MAX)
            )));
        }
        let mut image = Image::new(info.width, info.height);
        let mut row_bytes = vec![0; stride];

        for i in 0..info.height {
            self.stream.read_exact_bytes(&mut row_bytes)?;

            let y = if info.bottom_up { info.height - 1 - i } else { i };
            let row = image
                .row_mut(y)
                .ok_or(BmpDecoderErrors::GenericStatic("Row outside the image"))?;

            match info.depth {
                8 => {
                    for (out, index) in row.iter_mut().zip(&row_bytes) {
                        *out = self
                            .palette
                            .get(usize::from(*index))
                            .copied()
                            .ok_or(BmpDecoderErrors::GenericStatic("Palette index out of range"))?;
                    }
                }
                24 => {
                    for (out, px) in row.iter_mut().zip(row_bytes.chunks_exact(3)) {
                        *out = pack_rgba(px[2], px[1], px[0], 255);
                    }
                }
                _ => {
                    // the fourth byte of BI_RGB images is not alpha
                    for (out, px) in row.iter_mut().zip(row_bytes.chunks_exact(4)) {
                        *out = pack_rgba(px[2], px[1], px[0], 255);
                    }
                }
            }
        }
        Ok(image)
    }
}
