/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image format detection and decoding
//!
//! This ties the individual codecs together behind [`ImageFormat`], the
//! set of formats that can appear as icons and backgrounds in a package.
//!
//! - PNG: decode and encode, via `vita-png`
//! - BMP: decode, uncompressed 8, 24 and 32 bit images
//! - TGA: decode, uncompressed true colour images
//!
//! # Example
//! ```no_run
//! use vita_core::bytestream::{ByteCursor, OpenMode};
//! use vita_core::options::DecoderOptions;
//! use vita_image::codecs::decode_any;
//!
//! let cursor = ByteCursor::open("icon0.png", OpenMode::Read).unwrap();
//! let (format, image) = decode_any(&cursor, DecoderOptions::default()).unwrap();
//! println!("{format:?} {:?}", image.dimensions());
//! ```
pub use vita_core;

pub mod codecs;
pub mod errors;
mod serde;
