/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use vita_core::options::{ChannelOrder, DecoderOptions, EncoderOptions};

pub mod global_options;

pub fn get_decoder_options(options: &ArgMatches) -> DecoderOptions {
    let max_width = *options.get_one::<usize>("max-width").unwrap();
    let max_height = *options.get_one::<usize>("max-height").unwrap();
    let strict_mode = options.get_flag("strict");
    let confirm_crc = !options.get_flag("no-crc");

    let channel_order = if options.get_flag("from-bgra") {
        ChannelOrder::Bgra
    } else {
        ChannelOrder::Rgba
    };

    DecoderOptions::default()
        .set_max_width(max_width)
        .set_max_height(max_height)
        .set_strict_mode(strict_mode)
        .set_confirm_crc(confirm_crc)
        .set_channel_order(channel_order)
}

pub fn get_encoder_options(options: &ArgMatches) -> EncoderOptions {
    let level = *options.get_one::<u8>("level").unwrap();

    // standard viewers expect red first
    let channel_order = if options.get_flag("bgra") {
        ChannelOrder::Bgra
    } else {
        ChannelOrder::Rgba
    };

    EncoderOptions::default()
        .set_channel_order(channel_order)
        .set_compression_level(level)
}
