/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::cell::RefCell;
use std::rc::Rc;

use tempdir::TempDir;
use vita_core::bytestream::{ByteCursor, ByteSource, FileBacking, MemoryBacking, OpenMode};

#[test]
fn test_file_backing_round_trip() {
    let dir = TempDir::new("vita_file_backing").unwrap();
    let path = dir.path().join("data.bin");

    {
        let mut cursor = ByteCursor::open(&path, OpenMode::Create).unwrap();
        cursor.write_u32_le(0x0403_0201).unwrap();
        cursor.write_stringz("file").unwrap();
        assert_eq!(cursor.length().unwrap(), 9);
    }
    let mut cursor = ByteCursor::open(&path, OpenMode::Read).unwrap();
    assert_eq!(cursor.length().unwrap(), 9);
    assert_eq!(cursor.get_u32_le_err().unwrap(), 0x0403_0201);
    assert_eq!(cursor.read_stringz().unwrap(), "file");
    // read only files refuse writes
    assert!(cursor.write_u8(0).is_err());
}

#[test]
fn test_file_backing_from_open_file() {
    let dir = TempDir::new("vita_from_file").unwrap();
    let path = dir.path().join("data.bin");
    std::fs::write(&path, [9, 8, 7, 6]).unwrap();

    let file = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(&path)
        .unwrap();
    let mut cursor = ByteCursor::from_backing(FileBacking::from_file(file));

    assert_eq!(cursor.get_u16_be_err().unwrap(), 0x0908);
    cursor.write_u8(1).unwrap();
    drop(cursor);
    assert_eq!(std::fs::read(&path).unwrap(), [9, 8, 1, 6]);
}

#[test]
fn test_file_backing_seeks_for_every_operation() {
    let dir = TempDir::new("vita_file_seek").unwrap();
    let path = dir.path().join("data.bin");
    std::fs::write(&path, [10, 11, 12, 13, 14, 15]).unwrap();

    let mut backing = FileBacking::open(&path, OpenMode::ReadWrite).unwrap();
    let mut buf = [0; 2];
    assert_eq!(backing.read_at(4, &mut buf).unwrap(), 2);
    assert_eq!(buf, [14, 15]);
    assert_eq!(backing.read_at(1, &mut buf).unwrap(), 2);
    assert_eq!(buf, [11, 12]);
    assert_eq!(backing.read_at(5, &mut buf).unwrap(), 1);
    assert_eq!(backing.read_at(9, &mut buf).unwrap(), 0);

    backing.write_at(0, &[0xFF]).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), [0xFF, 11, 12, 13, 14, 15]);
}

#[test]
fn test_open_missing_file_fails() {
    let dir = TempDir::new("vita_missing").unwrap();
    assert!(ByteCursor::open(dir.path().join("nope.bin"), OpenMode::Read).is_err());
}

#[test]
fn test_cursors_share_a_backing() {
    let source = Rc::new(RefCell::new(MemoryBacking::from_slice(&[1, 2, 3, 4])));
    let mut first = ByteCursor::new(source.clone());
    let mut second = ByteCursor::new(first.source());
    // slices hand out the same backing
    assert!(Rc::ptr_eq(&first.slice(1..3).unwrap().source(), &first.source()));

    first.skip(2);
    assert_eq!(second.get_u8_err().unwrap(), 1);
    assert_eq!(first.get_u8_err().unwrap(), 3);

    second.set_position(4);
    second.write_u8(5).unwrap();
    assert_eq!(first.length().unwrap(), 5);
    assert_eq!(source.borrow().as_slice(), &[1, 2, 3, 4, 5]);
}

#[test]
fn test_file_slices() {
    let dir = TempDir::new("vita_file_slices").unwrap();
    let path = dir.path().join("data.bin");
    std::fs::write(&path, (0..32).collect::<Vec<u8>>()).unwrap();

    let cursor = ByteCursor::open(&path, OpenMode::Read).unwrap();
    let mut view = cursor.slice(8..24).unwrap().slice(4..8).unwrap();
    assert_eq!(view.get_u32_be_err().unwrap(), 0x0C0D_0E0F);
}
