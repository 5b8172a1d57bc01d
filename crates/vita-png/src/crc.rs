/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 as used by png chunks (ISO 3309, reflected polynomial `0xEDB88320`)

const fn make_crc_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut n = 0;

    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;

        while k < 8 {
            if c & 1 == 1 {
                c = 0xEDB8_8320 ^ (c >> 1);
            } else {
                c >>= 1;
            }
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = make_crc_table();

/// Update a running crc with `bytes`
///
/// Start with `u32::MAX` and invert the final value, this lets a crc span
/// several buffers, e.g. the chunk type and then the chunk data.
pub fn calc_crc_with_bytes(bytes: &[u8], crc: u32) -> u32 {
    let mut crc = crc;

    for byte in bytes {
        crc = CRC_TABLE[((crc ^ u32::from(*byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc
}

/// The crc of a single buffer
pub fn calc_crc(bytes: &[u8]) -> u32 {
    !calc_crc_with_bytes(bytes, u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(calc_crc(b""), 0);
        assert_eq!(calc_crc(b"123456789"), 0xCBF4_3926);
        // the crc of every empty IEND chunk
        assert_eq!(calc_crc(b"IEND"), 0xAE42_6082);
    }

    #[test]
    fn running_crc_matches_single_pass() {
        let running = !calc_crc_with_bytes(b"6789", calc_crc_with_bytes(b"12345", u32::MAX));
        assert_eq!(running, calc_crc(b"123456789"));
    }
}
