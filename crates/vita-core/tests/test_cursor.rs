/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{Read, Seek, SeekFrom, Write};

use vita_core::bytestream::{ByteCursor, ByteIoError};
use vita_core::errors::ErrorKind;

fn numbered(len: usize) -> ByteCursor {
    let data: Vec<u8> = (0..len).map(|x| x as u8).collect();
    ByteCursor::from_vec(data)
}

#[test]
fn test_little_and_big_endian_accessors() {
    let mut cursor = ByteCursor::from_bytes(&[
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xFF, 0xFE
    ]);
    assert_eq!(cursor.get_u32_le_err().unwrap(), 0x0403_0201);
    cursor.set_position(0);
    assert_eq!(cursor.get_u32_be_err().unwrap(), 0x0102_0304);
    cursor.set_position(0);
    assert_eq!(cursor.get_u64_le_err().unwrap(), 0x0807_0605_0403_0201);
    cursor.set_position(0);
    assert_eq!(cursor.get_u64_be_err().unwrap(), 0x0102_0304_0506_0708);
    assert_eq!(cursor.get_i16_le_err().unwrap(), -257);
    cursor.set_position(8);
    assert_eq!(cursor.get_i16_be_err().unwrap(), -2);
    assert!(cursor.eof().unwrap());
}

#[test]
fn test_24_bit_reads() {
    let mut cursor = ByteCursor::from_bytes(&[0x01, 0x02, 0x83, 0x83, 0x02, 0x01]);
    assert_eq!(cursor.get_u24_le_err().unwrap(), 0x83_0201);
    assert_eq!(cursor.get_u24_be_err().unwrap(), 0x83_0201);
    cursor.set_position(0);
    assert_eq!(cursor.get_i24_le_err().unwrap(), 0x83_0201 - 0x100_0000);
    assert_eq!(cursor.get_i24_be_err().unwrap(), 0x83_0201 - 0x100_0000);

    let mut positive = ByteCursor::from_bytes(&[0xFF, 0xFF, 0x7F]);
    assert_eq!(positive.get_i24_le_err().unwrap(), 0x7F_FFFF);
}

#[test]
fn test_writes_extend_memory() {
    let mut cursor = ByteCursor::memory();
    assert_eq!(cursor.length().unwrap(), 0);
    cursor.write_u32_be(0xDEAD_BEEF).unwrap();
    cursor.write_u16_le(0x0102).unwrap();
    cursor.write_u24_le(0x0A0B0C).unwrap();
    cursor.write_u24_be(0x0A0B0C).unwrap();
    cursor.write_i8(-1).unwrap();
    assert_eq!(cursor.length().unwrap(), 13);
    assert_eq!(
        cursor.to_vec().unwrap(),
        [0xDE, 0xAD, 0xBE, 0xEF, 0x02, 0x01, 0x0C, 0x0B, 0x0A, 0x0A, 0x0B, 0x0C, 0xFF]
    );
    // to_vec leaves the position alone
    assert_eq!(cursor.position(), 13);
}

#[test]
fn test_write_past_end_zero_fills() {
    let mut cursor = ByteCursor::memory();
    cursor.set_position(4);
    cursor.write_u8(9).unwrap();
    assert_eq!(cursor.to_vec().unwrap(), [0, 0, 0, 0, 9]);
}

#[test]
fn test_stringz() {
    let mut cursor = ByteCursor::from_bytes(b"IHDRabc\0def\0ghi");
    assert_eq!(cursor.read_stringz_fixed(4).unwrap(), "IHDR");
    assert_eq!(cursor.read_stringz().unwrap(), "abc");
    assert_eq!(cursor.position(), 8);
    assert_eq!(cursor.read_stringz().unwrap(), "def");
    // no terminator, runs to the end
    assert_eq!(cursor.read_stringz().unwrap(), "ghi");
    assert!(cursor.eof().unwrap());
    assert_eq!(cursor.read_stringz().unwrap(), "");
}

#[test]
fn test_fixed_stringz_truncates_at_zero() {
    let mut cursor = ByteCursor::from_bytes(b"ab\0cdefg");
    assert_eq!(cursor.read_stringz_fixed(6).unwrap(), "ab");
    assert_eq!(cursor.position(), 6);
    let err = cursor.read_stringz_fixed(6).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn test_long_stringz() {
    let text = "x".repeat(200);
    let mut cursor = ByteCursor::memory();
    cursor.write_stringz(&text).unwrap();
    cursor.write_stringz_fixed("hello", 3).unwrap();
    cursor.write_stringz_fixed("hi", 4).unwrap();
    cursor.set_position(0);
    assert_eq!(cursor.read_stringz().unwrap(), text);
    assert_eq!(cursor.read_stringz_fixed(3).unwrap(), "hel");
    assert_eq!(cursor.read_stringz_fixed(4).unwrap(), "hi");
}

#[test]
fn test_slice_folding() {
    let cursor = numbered(64);
    let (a, b, d, e) = (4_u64, 10_u64, 30_u64, 50_u64);

    let nested = cursor.slice(a..e).unwrap().slice(b - a..d - a).unwrap();
    let direct = cursor.slice(b..d).unwrap();

    assert_eq!(nested.window(), direct.window());
    let mut nested = nested;
    let mut direct = direct;
    assert_eq!(nested.read_remaining().unwrap(), direct.read_remaining().unwrap());
}

#[test]
fn test_slice_does_not_track_parent() {
    let mut cursor = numbered(16);
    cursor.set_position(2);
    let mut view = cursor.slice_remaining().unwrap();
    cursor.set_position(10);
    assert_eq!(view.get_u8_err().unwrap(), 2);
    assert_eq!(view.length().unwrap(), 14);
    assert_eq!(cursor.position(), 10);
}

#[test]
fn test_slice_reads_are_short_at_window_end() {
    let cursor = numbered(16);
    let mut view = cursor.slice(4..8).unwrap();
    let mut buf = [0; 10];
    assert_eq!(view.read_bytes(&mut buf).unwrap(), 4);
    assert_eq!(&buf[..4], &[4, 5, 6, 7]);
    assert_eq!(view.read_bytes(&mut buf).unwrap(), 0);
    assert!(view.get_u8_err().is_err());
}

#[test]
fn test_slice_out_of_bounds() {
    let cursor = numbered(16);
    let err = cursor.slice(4..17).unwrap_err();
    assert!(matches!(
        err,
        ByteIoError::OutOfBounds {
            start: 4,
            end:   17,
            limit: 16
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Bounds);
    assert!(cursor.slice(8..4).is_err());
    assert!(cursor.slice(16..).unwrap().eof().unwrap());
    assert_eq!(cursor.slice(2..=3).unwrap().length().unwrap(), 2);
}

#[test]
fn test_slice_writes_are_bounded() {
    let mut cursor = numbered(16);
    let mut view = cursor.slice(4..8).unwrap();
    view.write_u16_be(0xAABB).unwrap();
    let err = view.write_u32_le(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Bounds);
    // the rejected write did not land
    assert_eq!(view.position(), 2);

    cursor.set_position(4);
    assert_eq!(cursor.read_vec(5).unwrap(), [0xAA, 0xBB, 6, 7, 8]);
}

#[test]
fn test_read_stream() {
    let mut cursor = numbered(10);
    cursor.skip(2);
    let mut stream = cursor.read_stream(3).unwrap();
    assert_eq!(cursor.position(), 5);
    assert_eq!(stream.read_remaining().unwrap(), [2, 3, 4]);

    let err = cursor.read_stream(6).unwrap_err();
    assert!(matches!(err, ByteIoError::NotEnoughBytes(6, 5)));
    assert_eq!(cursor.position(), 5);
}

#[test]
fn test_keep_position_restores_on_error() {
    let mut cursor = numbered(4);
    let result = cursor.keep_position(|c| {
        c.skip(2);
        c.get_u32_le_err()
    });
    assert!(result.is_err());
    assert_eq!(cursor.position(), 0);

    let value = cursor.keep_position(|c| c.get_u16_be_err()).unwrap();
    assert_eq!(value, 0x0001);
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_keep_position_does_not_roll_back_writes() {
    let mut cursor = numbered(4);
    cursor
        .keep_position(|c| {
            let mut view = c.slice(1..3)?;
            view.write_u8(0xFF)
        })
        .unwrap();
    assert_eq!(cursor.to_vec().unwrap(), [0, 0xFF, 2, 3]);
}

#[test]
fn test_write_to_align_and_write_stream() {
    let mut cursor = ByteCursor::memory();
    cursor.write_u8(1).unwrap();
    cursor.write_to_align(4, 0xEE).unwrap();
    assert_eq!(cursor.position(), 4);
    cursor.write_to_align(4, 0xEE).unwrap();
    assert_eq!(cursor.position(), 4);

    let mut other = numbered(6);
    other.skip(3);
    assert_eq!(cursor.write_stream(&mut other).unwrap(), 3);
    assert_eq!(cursor.to_vec().unwrap(), [1, 0xEE, 0xEE, 0xEE, 3, 4, 5]);
}

#[test]
fn test_rewind_before_start_fails() {
    let mut cursor = numbered(4);
    cursor.skip(1);
    assert!(cursor.rewind(2).is_err());
    assert_eq!(cursor.position(), 1);
    cursor.rewind(1).unwrap();
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_std_io_traits() {
    let mut cursor = ByteCursor::memory();
    cursor.write_all(b"hello world").unwrap();
    cursor.seek(SeekFrom::Start(6)).unwrap();

    let mut text = String::new();
    cursor.read_to_string(&mut text).unwrap();
    assert_eq!(text, "world");

    assert_eq!(cursor.seek(SeekFrom::End(-5)).unwrap(), 6);
    assert_eq!(cursor.seek(SeekFrom::Current(-6)).unwrap(), 0);
    assert!(cursor.seek(SeekFrom::Current(-1)).is_err());

    let mut view = cursor.slice(0..5).unwrap();
    assert!(view.write_all(b"too long for the view").is_err());
}
