/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

/// Chunk types the decoder knows about
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngChunkType {
    IHDR,
    PLTE,
    IDAT,
    IEND,
    unkn
}

impl PngChunkType {
    pub fn from_bytes(chunk: &[u8; 4]) -> PngChunkType {
        match chunk {
            b"IHDR" => PngChunkType::IHDR,
            b"PLTE" => PngChunkType::PLTE,
            b"IDAT" => PngChunkType::IDAT,
            b"IEND" => PngChunkType::IEND,
            _ => PngChunkType::unkn
        }
    }
}

/// Whether a chunk must be understood to display the image
///
/// Bit 5 of the first type byte (lowercase letter) marks ancillary chunks.
pub const fn is_critical(chunk: &[u8; 4]) -> bool {
    chunk[0] & (1 << 5) == 0
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterMethod {
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterMethod {
    pub fn from_int(int: u8) -> Option<FilterMethod> {
        match int {
            0 => Some(FilterMethod::None),
            1 => Some(FilterMethod::Sub),
            2 => Some(FilterMethod::Up),
            3 => Some(FilterMethod::Average),
            4 => Some(FilterMethod::Paeth),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            FilterMethod::None => 0,
            FilterMethod::Sub => 1,
            FilterMethod::Up => 2,
            FilterMethod::Average => 3,
            FilterMethod::Paeth => 4
        }
    }
}

/// Colour types we can decode
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngColor {
    RGB,
    RGBA
}

impl PngColor {
    /// Bytes per pixel at a depth of 8
    pub const fn num_components(self) -> usize {
        match self {
            PngColor::RGB => 3,
            PngColor::RGBA => 4
        }
    }

    pub fn from_int(int: u8) -> Option<PngColor> {
        match int {
            2 => Some(PngColor::RGB),
            6 => Some(PngColor::RGBA),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            PngColor::RGB => 2,
            PngColor::RGBA => 6
        }
    }
}
