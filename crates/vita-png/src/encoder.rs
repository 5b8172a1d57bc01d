/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;
use vita_core::bytestream::ByteCursor;
use vita_core::image::{unpack_rgba, Image};
use vita_core::options::EncoderOptions;

use crate::constants::PNG_SIGNATURE;
use crate::enums::{FilterMethod, PngColor};
use crate::error::PngErrors;
use crate::headers::writers::{write_chunk, write_header_fn, write_iend, write_ihdr};

/// A png encoder
///
/// Images are always written as 8 bit RGBA, non interlaced, with every
/// scanline using filter 0 and a single `IDAT` chunk. The order of the
/// colour bytes comes from the encoder options, by default blue, green, red
/// followed by alpha.
///
/// # Example
/// ```
/// use vita_core::image::{pack_rgba, Image};
/// use vita_core::options::EncoderOptions;
/// use vita_png::PngEncoder;
///
/// let image = Image::from_pixels(1, 1, vec![pack_rgba(1, 2, 3, 4)]).unwrap();
/// let bytes = PngEncoder::new(&image, EncoderOptions::default())
///     .encode_to_vec()
///     .unwrap();
/// assert_eq!(&bytes[1..4], b"PNG");
/// ```
pub struct PngEncoder<'a> {
    pub(crate) image:   &'a Image,
    pub(crate) options: EncoderOptions
}

impl<'a> PngEncoder<'a> {
    pub fn new(image: &'a Image, options: EncoderOptions) -> PngEncoder<'a> {
        PngEncoder { image, options }
    }

    /// Encode the image to `sink` at its current position
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, sink: &mut ByteCursor) -> Result<usize, PngErrors> {
        let (width, height) = self.image.dimensions();

        if width == 0 || height == 0 {
            return Err(PngErrors::ZeroDimensions);
        }
        if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
            return Err(PngErrors::LargeDimensions(width, height));
        }
        let start = sink.position();

        // write signature
        sink.write_bytes(&PNG_SIGNATURE)?;
        // write ihdr
        write_header_fn(self, sink, b"IHDR", write_ihdr)?;

        let compressed = self.compress_scanlines()?;
        write_chunk(b"IDAT", &compressed, sink)?;

        write_header_fn(self, sink, b"IEND", write_iend)?;

        let written = (sink.position() - start) as usize;
        debug!("Encoded {}x{} png in {} bytes", width, height, written);

        Ok(written)
    }

    /// Encode the image into a new vector
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, PngErrors> {
        let mut sink = ByteCursor::memory();
        self.encode(&mut sink)?;
        Ok(sink.to_vec()?)
    }

    /// Lay out the filtered scanlines and deflate them
    fn compress_scanlines(&self) -> Result<Vec<u8>, PngErrors> {
        let (width, height) = self.image.dimensions();
        let components = PngColor::RGBA.num_components();
        let order = self.options.get_channel_order();

        let mut filter_scanline = Vec::with_capacity((width * components + 1) * height);

        for row in self.image.rows() {
            filter_scanline.push(FilterMethod::None.to_int());

            for pixel in row {
                let [r, g, b, a] = unpack_rgba(*pixel);
                filter_scanline.extend_from_slice(&order.from_rgb(r, g, b));
                filter_scanline.push(a);
            }
        }
        let level = Compression::new(u32::from(self.options.get_compression_level()));
        let mut encoder = ZlibEncoder::new(Vec::new(), level);

        encoder.write_all(&filter_scanline)?;
        Ok(encoder.finish()?)
    }
}
