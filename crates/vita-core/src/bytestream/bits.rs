/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bit level reads and writes
//!
//! Two bit orders are supported and they are not interchangeable
//!
//! - [`BitOrder::High`], MSB-first. Bits are taken from the most significant
//!   end of each byte and the first bit read ends up as the most significant
//!   bit of the result (JPEG style).
//! - [`BitOrder::Low`], LSB-first. Bits are taken from the least significant
//!   end of each byte and the first bit read ends up as bit 0 of the
//!   result (DEFLATE style).
//!
//! The reader state lives in the cursor, call [`ByteCursor::align_bits`]
//! before going back to byte reads or switching order.

use crate::bytestream::{ByteCursor, ByteIoError};

/// Widest value a single bit read or write supports
const MAX_BITS: u32 = 32;

/// Order in which bits are packed into bytes
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BitOrder {
    /// Most significant bit first
    High,
    /// Least significant bit first
    Low
}

#[inline(always)]
const fn mask(bits: u8) -> u32 {
    (1_u32 << bits) - 1
}

impl ByteCursor {
    /// Read `bits` bits MSB-first
    ///
    /// # Errors
    /// - [`ByteIoError::UnsupportedBitWidth`] when `bits > 32`
    /// - [`ByteIoError::NotEnoughBytes`] when the stream runs out, the
    ///   cursor is left as it was before the call
    pub fn read_bits_high(&mut self, bits: u32) -> Result<u32, ByteIoError> {
        self.read_bits(bits, BitOrder::High)
    }

    /// Read `bits` bits LSB-first
    ///
    /// # Errors
    /// Same as [`read_bits_high`](Self::read_bits_high)
    pub fn read_bits_low(&mut self, bits: u32) -> Result<u32, ByteIoError> {
        self.read_bits(bits, BitOrder::Low)
    }

    /// Discard any buffered bits, the next read starts on a byte boundary
    pub fn align_bits(&mut self) {
        self.bits_data = 0;
        self.available_bits = 0;
    }

    /// Number of bits buffered but not yet consumed
    pub const fn available_bits(&self) -> u8 {
        self.available_bits
    }

    fn read_bits(&mut self, bits: u32, order: BitOrder) -> Result<u32, ByteIoError> {
        if bits > MAX_BITS {
            return Err(ByteIoError::UnsupportedBitWidth(bits));
        }
        let saved = (self.position(), self.bits_data, self.available_bits);

        match self.read_bits_inner(bits, order) {
            Ok(value) => Ok(value),
            Err(e) => {
                self.set_position(saved.0);
                self.bits_data = saved.1;
                self.available_bits = saved.2;
                Err(e)
            }
        }
    }

    fn read_bits_inner(&mut self, bits: u32, order: BitOrder) -> Result<u32, ByteIoError> {
        let mut result = 0_u32;
        let mut remaining = bits as u8;

        while remaining > 0 {
            if self.available_bits == 0 {
                self.bits_data = u32::from(self.get_u8_err()?);
                self.available_bits = 8;
            }
            let take = remaining.min(self.available_bits);

            match order {
                BitOrder::High => {
                    // the unread bits sit at the bottom of bits_data, the
                    // oldest of them being the most significant
                    let shift = self.available_bits - take;
                    let chunk = (self.bits_data >> shift) & mask(take);

                    result = (result << take) | chunk;
                    self.available_bits -= take;
                    self.bits_data &= mask(self.available_bits);
                }
                BitOrder::Low => {
                    let chunk = self.bits_data & mask(take);

                    result |= chunk << (bits as u8 - remaining);
                    self.bits_data >>= take;
                    self.available_bits -= take;
                }
            }
            remaining -= take;
        }
        Ok(result)
    }
}

/// Packs values of up to 32 bits into bytes
///
/// The counterpart of [`ByteCursor::read_bits_high`] and
/// [`ByteCursor::read_bits_low`], values written in one order read back
/// unchanged in the same order.
///
/// # Example
/// ```
/// use vita_core::bytestream::{BitOrder, BitWriter, ByteCursor};
///
/// let mut writer = BitWriter::new(BitOrder::High);
/// writer.put_bits(3, 0b101).unwrap();
/// writer.put_bits(5, 0b00011).unwrap();
/// let bytes = writer.finish();
/// assert_eq!(bytes, [0b1010_0011]);
///
/// let mut cursor = ByteCursor::from_bytes(&bytes);
/// assert_eq!(cursor.read_bits_high(3).unwrap(), 0b101);
/// assert_eq!(cursor.read_bits_high(5).unwrap(), 0b00011);
/// ```
pub struct BitWriter {
    order:  BitOrder,
    output: Vec<u8>,
    buffer: u64,
    bits:   u8
}

impl BitWriter {
    pub fn new(order: BitOrder) -> BitWriter {
        BitWriter {
            order,
            output: vec![],
            buffer: 0,
            bits: 0
        }
    }

    /// Append the low `bits` bits of `value`
    pub fn put_bits(&mut self, bits: u32, value: u32) -> Result<(), ByteIoError> {
        if bits > MAX_BITS {
            return Err(ByteIoError::UnsupportedBitWidth(bits));
        }
        if bits == 0 {
            return Ok(());
        }
        let value = u64::from(value) & ((1_u64 << bits) - 1);

        match self.order {
            BitOrder::High => {
                self.buffer = (self.buffer << bits) | value;
                self.bits += bits as u8;

                while self.bits >= 8 {
                    self.bits -= 8;
                    self.output.push((self.buffer >> self.bits) as u8);
                }
                self.buffer &= (1_u64 << self.bits) - 1;
            }
            BitOrder::Low => {
                self.buffer |= value << self.bits;
                self.bits += bits as u8;

                while self.bits >= 8 {
                    self.output.push(self.buffer as u8);
                    self.buffer >>= 8;
                    self.bits -= 8;
                }
            }
        }
        Ok(())
    }

    /// Flush the last partial byte, padding it with zero bits
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits > 0 {
            let last = match self.order {
                BitOrder::High => (self.buffer << (8 - self.bits)) as u8,
                BitOrder::Low => self.buffer as u8
            };
            self.output.push(last);
        }
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_order_reads_from_the_top() {
        let mut cursor = ByteCursor::from_bytes(&[0b1100_0000, 0xFF]);
        assert_eq!(cursor.read_bits_high(2).unwrap(), 0b11);
        assert_eq!(cursor.read_bits_high(6).unwrap(), 0);
        assert_eq!(cursor.read_bits_high(4).unwrap(), 0xF);
    }

    #[test]
    fn low_order_reads_from_the_bottom() {
        let mut cursor = ByteCursor::from_bytes(&[0b0000_0011, 0x80]);
        assert_eq!(cursor.read_bits_low(2).unwrap(), 0b11);
        assert_eq!(cursor.read_bits_low(6).unwrap(), 0);
        assert_eq!(cursor.read_bits_low(8).unwrap(), 0x80);
    }

    #[test]
    fn orders_differ_on_the_same_bytes() {
        let mut high = ByteCursor::from_bytes(&[0x12, 0x34]);
        let mut low = ByteCursor::from_bytes(&[0x12, 0x34]);
        assert_eq!(high.read_bits_high(16).unwrap(), 0x1234);
        assert_eq!(low.read_bits_low(16).unwrap(), 0x3412);
    }

    #[test]
    fn reads_full_32_bits_after_partial_byte() {
        let mut cursor = ByteCursor::from_bytes(&[0xAB, 0xCD, 0xEF, 0x01, 0x23]);
        assert_eq!(cursor.read_bits_high(4).unwrap(), 0xA);
        assert_eq!(cursor.read_bits_high(32).unwrap(), 0xBCDE_F012);
        assert_eq!(cursor.read_bits_high(4).unwrap(), 0x3);
    }

    #[test]
    fn wider_than_32_is_rejected() {
        let mut cursor = ByteCursor::from_bytes(&[0; 8]);
        assert!(matches!(
            cursor.read_bits_high(33),
            Err(ByteIoError::UnsupportedBitWidth(33))
        ));
        assert!(matches!(
            cursor.read_bits_low(40),
            Err(ByteIoError::UnsupportedBitWidth(40))
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn failed_read_leaves_state_intact() {
        let mut cursor = ByteCursor::from_bytes(&[0xF0]);
        assert_eq!(cursor.read_bits_high(2).unwrap(), 0b11);
        assert!(cursor.read_bits_high(12).is_err());
        assert_eq!(cursor.available_bits(), 6);
        assert_eq!(cursor.read_bits_high(6).unwrap(), 0b110000);
    }

    #[test]
    fn align_discards_partial_byte() {
        let mut cursor = ByteCursor::from_bytes(&[0xFF, 0x42]);
        cursor.read_bits_low(3).unwrap();
        cursor.align_bits();
        assert_eq!(cursor.available_bits(), 0);
        assert_eq!(cursor.get_u8_err().unwrap(), 0x42);
    }

    #[test]
    fn zero_width_read_is_zero() {
        let mut cursor = ByteCursor::from_bytes(&[]);
        assert_eq!(cursor.read_bits_high(0).unwrap(), 0);
        assert_eq!(cursor.read_bits_low(0).unwrap(), 0);
    }

    #[test]
    fn writer_pads_last_byte() {
        let mut high = BitWriter::new(BitOrder::High);
        high.put_bits(3, 0b111).unwrap();
        assert_eq!(high.finish(), [0b1110_0000]);

        let mut low = BitWriter::new(BitOrder::Low);
        low.put_bits(3, 0b111).unwrap();
        assert_eq!(low.finish(), [0b0000_0111]);
    }
}
