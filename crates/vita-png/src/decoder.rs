/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{trace, warn};
use vita_core::bytestream::{ByteCursor, ByteIoError};
use vita_core::image::{pack_rgba, Image};
use vita_core::options::DecoderOptions;
use zune_inflate::{DeflateDecoder, DeflateOptions};

use crate::constants::{MAX_SIZE_HINT, PNG_SIGNATURE};
#[cfg(feature = "crc")]
use crate::crc::calc_crc_with_bytes;
use crate::enums::{is_critical, FilterMethod, PngChunkType, PngColor};
use crate::error::PngErrors;
use crate::filters::{handle_avg, handle_none, handle_paeth, handle_sub, handle_up};

/// A chunk whose header has been read
///
/// `data` is a view over the chunk payload, the decoder's own stream
/// already points past the chunk's crc.
pub(crate) struct PngChunk {
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4],
    pub crc:        u32,
    pub data:       ByteCursor
}

/// Image information from the IHDR chunk
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PngInfo {
    pub width:           usize,
    pub height:          usize,
    pub depth:           u8,
    pub color:           PngColor,
    pub bytes_per_pixel: usize
}

/// Check whether `stream` starts with the png signature
///
/// The check runs on a fresh view of the stream, its position is
/// not changed.
pub fn probe_png(stream: &ByteCursor) -> bool {
    match stream.slice(..) {
        Ok(mut view) => matches!(view.read_fixed_bytes::<8>(), Ok(sig) if sig == PNG_SIGNATURE),
        Err(_) => false
    }
}

/// A png decoder for 8 bit RGB and RGBA images
///
/// # Example
/// ```no_run
/// use vita_core::bytestream::{ByteCursor, OpenMode};
/// use vita_png::PngDecoder;
///
/// let cursor = ByteCursor::open("icon0.png", OpenMode::Read).unwrap();
/// let mut decoder = PngDecoder::new(cursor);
/// let image = decoder.decode().unwrap();
/// println!("{:?}", image.dimensions());
/// ```
pub struct PngDecoder {
    pub(crate) stream:       ByteCursor,
    pub(crate) options:      DecoderOptions,
    pub(crate) png_info:     Option<PngInfo>,
    pub(crate) seen_iend:    bool,
    pub(crate) read_headers: bool,
    pub(crate) idat_chunks:  Vec<u8>
}

impl PngDecoder {
    /// Create a decoder reading from the current position of `stream`
    pub fn new(stream: ByteCursor) -> PngDecoder {
        PngDecoder::new_with_options(stream, DecoderOptions::default())
    }

    pub fn new_with_options(stream: ByteCursor, options: DecoderOptions) -> PngDecoder {
        PngDecoder {
            stream,
            options,
            png_info: None,
            seen_iend: false,
            read_headers: false,
            idat_chunks: Vec::new()
        }
    }

    /// Image information, `None` until the headers are decoded
    pub const fn info(&self) -> Option<PngInfo> {
        self.png_info
    }

    /// `(width, height)`, `None` until the headers are decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.png_info.map(|info| (info.width, info.height))
    }

    pub const fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Read the chunk stream
    ///
    /// This validates the signature and walks every chunk up to `IEND`
    /// (or the end of the stream), parsing `IHDR` and collecting the
    /// `IDAT` payloads. Calling it again is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), PngErrors> {
        if self.read_headers {
            return Ok(());
        }
        self.read_signature()?;

        while !self.stream.eof()? {
            let chunk = self.read_chunk_header()?;

            match chunk.chunk_type {
                PngChunkType::IHDR => {
                    self.parse_ihdr(chunk)?;
                }
                PngChunkType::IDAT => {
                    self.parse_idat(chunk)?;
                }
                PngChunkType::IEND => {
                    self.seen_iend = true;
                    break;
                }
                PngChunkType::PLTE | PngChunkType::unkn => self.skip_chunk(chunk)?
            }
        }
        if self.png_info.is_none() {
            return Err(PngErrors::MissingHeader);
        }
        if self.idat_chunks.is_empty() {
            return Err(PngErrors::NoImageData);
        }
        if !self.seen_iend {
            if self.options.get_strict_mode() {
                return Err(PngErrors::MissingTerminator);
            }
            warn!("No IEND chunk, the png may be truncated");
        }
        self.read_headers = true;

        Ok(())
    }

    /// Decode the image
    ///
    /// Pixels are packed as described in [`Image`], the colour bytes in the
    /// file are read in the order given by the decoder options.
    ///
    /// The compressed data is kept, calling this again decodes the same image.
    pub fn decode(&mut self) -> Result<Image, PngErrors> {
        self.decode_headers()?;

        let info = self.png_info.ok_or(PngErrors::MissingHeader)?;
        let deflate_data = self.inflate(&info)?;

        let pixels = self.create_png_image(&info, &deflate_data)?;

        Image::from_pixels(info.width, info.height, pixels).ok_or(PngErrors::ShortImageData(
            info.width.saturating_mul(info.height),
            0
        ))
    }

    fn read_signature(&mut self) -> Result<(), PngErrors> {
        let mut signature = [0; 8];
        let read = self.stream.read_bytes(&mut signature)?;

        // a prefix of the signature is a truncated png, anything else is not a png
        if signature[..read] != PNG_SIGNATURE[..read] {
            return Err(PngErrors::BadSignature);
        }
        if read != signature.len() {
            return Err(PngErrors::IoErrors(ByteIoError::NotEnoughBytes(
                signature.len(),
                read
            )));
        }
        Ok(())
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngErrors> {
        // Format is length - chunk type - [data] -  crc chunk
        let length = self.stream.get_u32_be_err()? as usize;
        let chunk = self.stream.read_fixed_bytes::<4>()?;
        let mut data = self.stream.read_stream(length as u64)?;
        let crc = self.stream.get_u32_be_err()?;

        let chunk_type = PngChunkType::from_bytes(&chunk);

        #[cfg(feature = "crc")]
        {
            if self.options.get_confirm_crc() {
                let calc_crc = chunk_crc(&chunk, &mut data)?;

                if crc != calc_crc {
                    return Err(PngErrors::BadCrc {
                        chunk,
                        expected: crc,
                        found: calc_crc
                    });
                }
            }
        }
        trace!(
            "Chunk {} of {} bytes",
            String::from_utf8_lossy(&chunk),
            length
        );

        Ok(PngChunk {
            length,
            chunk_type,
            chunk,
            crc,
            data
        })
    }

    fn parse_idat(&mut self, mut chunk: PngChunk) -> Result<(), PngErrors> {
        if self.png_info.is_none() {
            return Err(PngErrors::ChunkOrdering("IDAT chunk before IHDR"));
        }
        let payload = chunk.data.read_remaining()?;
        self.idat_chunks.extend_from_slice(&payload);
        Ok(())
    }

    fn skip_chunk(&mut self, chunk: PngChunk) -> Result<(), PngErrors> {
        let name = String::from_utf8_lossy(&chunk.chunk);

        if chunk.chunk_type == PngChunkType::unkn
            && is_critical(&chunk.chunk)
            && self.options.get_strict_mode()
        {
            return Err(PngErrors::UnknownCriticalChunk(chunk.chunk));
        }
        trace!(
            "Skipping chunk {} ({} bytes, crc {:08X})",
            name,
            chunk.length,
            chunk.crc
        );
        Ok(())
    }

    fn inflate(&self, info: &PngInfo) -> Result<Vec<u8>, PngErrors> {
        let size_hint = info
            .width
            .saturating_mul(info.bytes_per_pixel)
            .saturating_add(1)
            .saturating_mul(info.height);

        let option = DeflateOptions::default()
            .set_size_hint(size_hint.min(MAX_SIZE_HINT))
            .set_confirm_checksum(self.options.get_confirm_crc());

        let mut decoder = DeflateDecoder::new_with_options(&self.idat_chunks, option);

        decoder.decode_zlib().map_err(PngErrors::ZlibDecodeErrors)
    }

    /// De-filter the scanlines and pack them into pixels
    fn create_png_image(&self, info: &PngInfo, deflate_data: &[u8]) -> Result<Vec<u32>, PngErrors> {
        let components = info.bytes_per_pixel;
        let too_large = || PngErrors::LargeDimensions(info.width, info.height);

        let width_stride = info.width.checked_mul(components).ok_or_else(too_large)?;
        // filter byte plus the row
        let chunk_size = width_stride.checked_add(1).ok_or_else(too_large)?;
        let expected = chunk_size.checked_mul(info.height).ok_or_else(too_large)?;

        if deflate_data.len() < expected {
            return Err(PngErrors::ShortImageData(expected, deflate_data.len()));
        }
        let mut prev_row = vec![0_u8; width_stride];
        let mut current = vec![0_u8; width_stride];
        let mut pixels = Vec::with_capacity(info.width * info.height);

        for in_stride in deflate_data.chunks_exact(chunk_size).take(info.height) {
            let filter_byte = in_stride[0];
            let raw = &in_stride[1..];

            let filter =
                FilterMethod::from_int(filter_byte).ok_or(PngErrors::UnknownFilter(filter_byte))?;

            match filter {
                FilterMethod::None => handle_none(raw, &mut current),
                FilterMethod::Sub => handle_sub(raw, &mut current, components),
                FilterMethod::Up => handle_up(&prev_row, raw, &mut current),
                FilterMethod::Average => handle_avg(&prev_row, raw, &mut current, components),
                FilterMethod::Paeth => handle_paeth(&prev_row, raw, &mut current, components)
            }
            self.expand_row(info, &current, &mut pixels);

            std::mem::swap(&mut prev_row, &mut current);
        }
        Ok(pixels)
    }

    fn expand_row(&self, info: &PngInfo, row: &[u8], pixels: &mut Vec<u32>) {
        let order = self.options.get_channel_order();

        match info.color {
            PngColor::RGB => {
                for px in row.chunks_exact(3) {
                    let (r, g, b) = order.to_rgb(px[0], px[1], px[2]);
                    pixels.push(pack_rgba(r, g, b, 255));
                }
            }
            PngColor::RGBA => {
                for px in row.chunks_exact(4) {
                    let (r, g, b) = order.to_rgb(px[0], px[1], px[2]);
                    pixels.push(pack_rgba(r, g, b, px[3]));
                }
            }
        }
    }
}

/// CRC of the chunk type followed by the chunk data
///
/// The position of `data` is restored afterwards.
#[cfg(feature = "crc")]
fn chunk_crc(chunk: &[u8; 4], data: &mut ByteCursor) -> Result<u32, ByteIoError> {
    data.keep_position(|data| {
        let mut crc = calc_crc_with_bytes(chunk, u32::MAX);
        let mut buffer = [0; 4096];

        loop {
            let count = data.read_bytes(&mut buffer)?;
            if count == 0 {
                break;
            }
            crc = calc_crc_with_bytes(&buffer[..count], crc);
        }
        Ok(!crc)
    })
}
