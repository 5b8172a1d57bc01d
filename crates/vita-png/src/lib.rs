/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A png decoder and encoder
//!
//! This is a small png codec for the 8 bit RGB and RGBA images found in
//! application bundles (icons, backgrounds), built on the
//! [`vita_core`] byte cursor.
//!
//! # Features
//! - Chunk CRC confirmation (can be turned off via [`DecoderOptions`](vita_core::options::DecoderOptions))
//! - All five scanline filters
//! - Configurable on-disk channel order
//!
//! Interlaced images, palettes, greyscale and bit depths other than 8
//! are rejected.
//!
//! # Decoding
//!
//!```no_run
//! use vita_core::bytestream::ByteCursor;
//! use vita_png::PngDecoder;
//!
//! let cursor = ByteCursor::from_vec(std::fs::read("pic0.png").unwrap());
//! let mut decoder = PngDecoder::new(cursor);
//!
//! let image = decoder.decode().unwrap();
//! ```
//!
//! # Encoding
//!
//!```no_run
//! use vita_core::image::Image;
//! use vita_core::options::EncoderOptions;
//! use vita_png::PngEncoder;
//!
//! let image = Image::new(128, 128);
//! let bytes = PngEncoder::new(&image, EncoderOptions::default()).encode_to_vec().unwrap();
//! ```
#![allow(clippy::op_ref, clippy::identity_op)]

pub use decoder::{probe_png, PngDecoder, PngInfo};
pub use encoder::PngEncoder;
pub use enums::PngColor;
pub use vita_core;

pub mod constants;
pub mod crc;
mod decoder;
mod encoder;
pub mod enums;
pub mod error;
pub mod filters;
mod headers;
