/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline de-filtering
//!
//! Every function reconstructs one row, `raw` is the filtered row as
//! stored (without the filter byte), `current` receives the reconstructed
//! bytes and `prev_row` is the previously reconstructed row, all zeros for
//! the first row of an image.
//!
//! All arithmetic wraps at 256.

/// The paeth predictor
///
/// Returns whichever of `a` (left), `b` (above) or `c` (upper left) is
/// closest to `a + b - c`, ties resolved in the order `a`, `b`, `c`.
#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let a_i = i16::from(a);
    let b_i = i16::from(b);
    let c_i = i16::from(c);

    let p = a_i + b_i - c_i;
    let pa = (p - a_i).abs();
    let pb = (p - b_i).abs();
    let pc = (p - c_i).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

pub fn handle_none(raw: &[u8], current: &mut [u8]) {
    current.copy_from_slice(raw);
}

#[allow(clippy::manual_memcpy)]
pub fn handle_sub(raw: &[u8], current: &mut [u8], components: usize) {
    let end = current.len().min(raw.len());
    let components = components.min(end);

    // the leftmost pixel has no left neighbour
    for i in 0..components {
        current[i] = raw[i];
    }
    for i in components..end {
        let a = current[i - components];
        current[i] = raw[i].wrapping_add(a);
    }
}

pub fn handle_up(prev_row: &[u8], raw: &[u8], current: &mut [u8]) {
    for ((filt, recon), up) in raw.iter().zip(current).zip(prev_row) {
        *recon = (*filt).wrapping_add(*up)
    }
}

pub fn handle_avg(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    let end = current.len().min(raw.len()).min(prev_row.len());
    let components = components.min(end);

    // handle leftmost byte explicitly
    for i in 0..components {
        current[i] = raw[i].wrapping_add(prev_row[i] >> 1);
    }
    for i in components..end {
        // sum before halving, needs 9 bits
        let a = u16::from(current[i - components]);
        let b = u16::from(prev_row[i]);

        current[i] = raw[i].wrapping_add(((a + b) >> 1) as u8);
    }
}

pub fn handle_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    let end = current.len().min(raw.len()).min(prev_row.len());
    let components = components.min(end);

    for i in 0..components {
        current[i] = raw[i].wrapping_add(paeth(0, prev_row[i], 0));
    }
    for i in components..end {
        let paeth_res = paeth(
            current[i - components],
            prev_row[i],
            prev_row[i - components]
        );
        current[i] = raw[i].wrapping_add(paeth_res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paeth_tie_break_order() {
        assert_eq!(paeth(10, 10, 10), 10);
        assert_eq!(paeth(0, 0, 0), 0);
        // p = 7, pa = 2, pb = 2, pc = 4, a wins the tie with b
        assert_eq!(paeth(5, 5, 3), 5);
        // p = 8, pa = 4, pb = 2, pc = 2, b wins the tie with c
        assert_eq!(paeth(12, 6, 10), 6);
        // p = 15, pc = 0
        assert_eq!(paeth(10, 20, 15), 15);
        // p = 0, pb = 0
        assert_eq!(paeth(10, 0, 10), 0);
    }

    #[test]
    fn sub_wraps() {
        let raw = [200, 100, 0, 100];
        let mut current = [0; 4];
        handle_sub(&raw, &mut current, 2);
        assert_eq!(current, [200, 100, 200, 200]);
        handle_sub(&[250, 10], &mut current[..2], 1);
        assert_eq!(&current[..2], &[250, 4]);
    }

    #[test]
    fn avg_uses_the_full_sum() {
        let prev = [255, 255];
        let raw = [0, 0];
        let mut current = [0; 2];
        handle_avg(&prev, &raw, &mut current, 1);
        // first byte: 255 / 2, second: (127 + 255) / 2
        assert_eq!(current, [127, 191]);
    }

    #[test]
    fn up_adds_previous_row() {
        let mut current = [0; 3];
        handle_up(&[1, 2, 255], &[1, 1, 2], &mut current);
        assert_eq!(current, [2, 3, 1]);
    }

    #[test]
    fn paeth_first_pixel_uses_above() {
        let mut current = [0; 2];
        handle_paeth(&[7, 9], &[1, 1], &mut current, 1);
        // paeth(0, 7, 0) = 7, paeth(8, 9, 7) -> p = 10, pa = 2, pb = 1, pc = 3
        assert_eq!(current, [8, 10]);
    }
}
