/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and encoder options
//!
//! This module exposes the option structs shared by all codecs, the same
//! [`DecoderOptions`] can be handed to every decoder and each option
//! documents which codecs respect it.
pub use decoder::DecoderOptions;
pub use encoder::EncoderOptions;

mod decoder;
mod encoder;

/// Order of the colour bytes of a pixel as stored in a file
///
/// Decoded images always use the in-memory packing described in
/// [`Image`](crate::image::Image), this only affects the bytes on disk.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum ChannelOrder {
    /// red, green, blue, alpha
    #[default]
    Rgba,
    /// blue, green, red, alpha
    Bgra
}

impl ChannelOrder {
    /// Map a `(first, second, third)` colour byte triple in this order
    /// to `(red, green, blue)`
    #[inline(always)]
    pub const fn to_rgb(self, first: u8, second: u8, third: u8) -> (u8, u8, u8) {
        match self {
            ChannelOrder::Rgba => (first, second, third),
            ChannelOrder::Bgra => (third, second, first)
        }
    }

    /// Inverse of [`to_rgb`](Self::to_rgb)
    #[inline(always)]
    pub const fn from_rgb(self, r: u8, g: u8, b: u8) -> [u8; 3] {
        match self {
            ChannelOrder::Rgba => [r, g, b],
            ChannelOrder::Bgra => [b, g, r]
        }
    }
}
