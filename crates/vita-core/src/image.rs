/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A decoded image
//!
//! Pixels are stored row-major as one `u32` per pixel with red, green, blue
//! and alpha as the bytes from least to most significant.
//! `0xAABBGGRR` when written as a hex literal.

/// Pack four channels into a pixel cell
#[inline(always)]
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

/// Split a pixel cell into `[r, g, b, a]`
#[inline(always)]
pub const fn unpack_rgba(pixel: u32) -> [u8; 4] {
    pixel.to_le_bytes()
}

/// A decoded RGBA image
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    width:  usize,
    height: usize,
    pixels: Vec<u32>
}

impl Image {
    /// Create a fully transparent black image
    pub fn new(width: usize, height: usize) -> Image {
        Image {
            width,
            height,
            pixels: vec![0; width * height]
        }
    }

    /// Wrap existing pixels
    ///
    /// Returns `None` if `pixels.len()` is not `width * height`
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Option<Image> {
        if width.checked_mul(height)? != pixels.len() {
            return None;
        }
        Some(Image {
            width,
            height,
            pixels
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, `None` outside the image
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Set the pixel at `(x, y)`, returns false outside the image
    pub fn set(&mut self, x: usize, y: usize, pixel: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y * self.width + x] = pixel;
        true
    }

    /// Row `y`, `None` outside the image
    pub fn row(&self, y: usize) -> Option<&[u32]> {
        if y >= self.height {
            return None;
        }
        Some(&self.pixels[y * self.width..(y + 1) * self.width])
    }

    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u32]> {
        if y >= self.height {
            return None;
        }
        Some(&mut self.pixels[y * self.width..(y + 1) * self.width])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        (0..self.height).filter_map(|y| self.row(y))
    }

    /// Copy `row` into row `y`
    ///
    /// Returns false, leaving the image untouched, when `y` is outside the
    /// image or `row` is not `width` pixels long.
    pub fn set_row(&mut self, y: usize, row: &[u32]) -> bool {
        match self.row_mut(y) {
            Some(dest) if dest.len() == row.len() => {
                dest.copy_from_slice(row);
                true
            }
            _ => false
        }
    }

    /// Mirror the image vertically
    pub fn flip_y(&mut self) {
        let width = self.width;
        if width == 0 {
            return;
        }
        let (mut top, mut bottom) = (0, self.height);

        while top + 1 < bottom {
            bottom -= 1;
            let (upper, lower) = self.pixels.split_at_mut(bottom * width);
            upper[top * width..(top + 1) * width].swap_with_slice(&mut lower[..width]);
            top += 1;
        }
    }

    /// Pixels as `r, g, b, a` bytes
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|x| unpack_rgba(*x)).collect()
    }
}
