/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::options::ChannelOrder;

/// Options shared by encoders
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    /// Order in which colour bytes are written
    ///
    /// - Default value: `ChannelOrder::Bgra`, the layout existing
    ///   consumers of our png files expect
    channel_order:     ChannelOrder,
    /// Compression level, from 0 (store) to 9 (smallest)
    ///
    /// - Default value: 1
    compression_level: u8
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            channel_order:     ChannelOrder::Bgra,
            compression_level: 1
        }
    }
}

impl EncoderOptions {
    pub const fn get_channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    pub const fn get_compression_level(&self) -> u8 {
        self.compression_level
    }

    pub fn set_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    /// Set the compression level, values above 9 are clamped to 9
    pub fn set_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level.min(9);
        self
    }
}
