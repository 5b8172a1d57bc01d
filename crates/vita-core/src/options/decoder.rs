/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

use crate::options::ChannelOrder;

/// Decoder options
///
/// Not all options are respected by all decoders
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 131072
    /// - Respected by: `all decoders`
    max_width:     usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 131072
    /// - Respected by: `all decoders`
    max_height:    usize,
    /// Treat recoverable oddities as errors
    ///
    /// - Default value: false
    /// - Respected by: `png`
    strict_mode:   bool,
    /// Confirm the CRC of every png chunk
    ///
    /// - Default value: true
    /// - Respected by: `png`
    confirm_crc:   bool,
    /// Order of the colour bytes in the file
    ///
    /// - Default value: `ChannelOrder::Bgra`, matching the encoder default
    ///   so our own files read back unchanged. Files from other writers
    ///   need `ChannelOrder::Rgba`
    /// - Respected by: `png`
    channel_order: ChannelOrder
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:     1 << 17,
            max_height:    1 << 17,
            strict_mode:   false,
            confirm_crc:   true,
            channel_order: ChannelOrder::Bgra
        }
    }
}

/// Initializers
impl DecoderOptions {
    /// Options accepting whatever can be decoded
    ///
    /// - Chunk checksums are not confirmed
    /// - Strict mode is off
    pub fn new_lenient() -> DecoderOptions {
        DecoderOptions::default()
            .set_confirm_crc(false)
            .set_strict_mode(false)
    }

    /// Options rejecting anything out of the ordinary
    pub fn new_strict() -> DecoderOptions {
        DecoderOptions::default()
            .set_confirm_crc(true)
            .set_strict_mode(true)
    }
}

/// Global options respected by all decoders
impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject most errors
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    pub const fn get_confirm_crc(&self) -> bool {
        self.confirm_crc
    }

    pub const fn get_channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in strict mode
    ///
    /// In strict mode the png decoder rejects unknown critical chunks
    /// and streams missing the `IEND` terminator instead of logging a warning.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Set whether chunk checksums are confirmed
    ///
    /// When disabled, corrupt chunks are accepted as long as they parse.
    pub fn set_confirm_crc(mut self, yes: bool) -> Self {
        self.confirm_crc = yes;
        self
    }

    /// Set the order of the colour bytes as stored in the file
    pub fn set_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }
}
