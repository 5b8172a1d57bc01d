/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::info;

use crate::constants::{IHDR_LENGTH, SUPPORTED_DEPTH};
use crate::decoder::{PngChunk, PngInfo};
use crate::enums::PngColor;
use crate::error::PngErrors;
use crate::PngDecoder;

pub(crate) mod writers;

impl PngDecoder {
    pub(crate) fn parse_ihdr(&mut self, mut chunk: PngChunk) -> Result<(), PngErrors> {
        if self.png_info.is_some() {
            return Err(PngErrors::ChunkOrdering("Multiple IHDR, corrupt PNG"));
        }
        if chunk.length != IHDR_LENGTH {
            return Err(PngErrors::BadIhdrLength(chunk.length));
        }
        let stream = &mut chunk.data;

        let width = stream.get_u32_be_err()? as usize;
        let height = stream.get_u32_be_err()? as usize;

        if width == 0 || height == 0 {
            return Err(PngErrors::ZeroDimensions);
        }
        if width > self.options.get_max_width() || height > self.options.get_max_height() {
            return Err(PngErrors::LargeDimensions(width, height));
        }

        let depth = stream.get_u8_err()?;

        if depth != SUPPORTED_DEPTH {
            return Err(PngErrors::UnsupportedBitDepth(depth));
        }
        let color_int = stream.get_u8_err()?;
        let color = PngColor::from_int(color_int).ok_or(PngErrors::UnsupportedColorType(color_int))?;

        let compression = stream.get_u8_err()?;
        if compression != 0 {
            return Err(PngErrors::UnsupportedMethod("compression", compression));
        }
        let filter_method = stream.get_u8_err()?;
        if filter_method != 0 {
            return Err(PngErrors::UnsupportedMethod("filter", filter_method));
        }
        let interlace_method = stream.get_u8_err()?;
        if interlace_method != 0 {
            return Err(PngErrors::UnsupportedMethod("interlace", interlace_method));
        }

        info!("Width: {}", width);
        info!("Height: {}", height);
        info!("Color type: {:?}", color);
        info!("Depth: {:?}", depth);

        self.png_info = Some(PngInfo {
            width,
            height,
            depth,
            color,
            bytes_per_pixel: color.num_components()
        });

        Ok(())
    }
}
