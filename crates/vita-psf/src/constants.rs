/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// First four bytes of every PSF file
pub const PSF_MAGIC: [u8; 4] = *b"\0PSF";

/// Magic, version, key table offset, value table offset and pair count
pub const PSF_HEADER_SIZE: usize = 20;

/// Size of one entry record on disk
pub const PSF_ENTRY_SIZE: usize = 16;

/// Version written by [`PsfEncoder`](crate::PsfEncoder) unless told otherwise
pub const DEFAULT_VERSION: u32 = 0x0101;

/// Format byte written before the data type, seen on every known file
pub(crate) const PARAM_FMT: u8 = 0x04;

/// Alignment of the key and value tables and of each value
pub(crate) const TABLE_ALIGNMENT: u64 = 4;

pub const DATA_TYPE_BINARY: u8 = 0;
pub const DATA_TYPE_TEXT: u8 = 2;
pub const DATA_TYPE_INT: u8 = 4;
/// Any type not listed above decodes to [`PsfValue::Unit`](crate::PsfValue::Unit),
/// the writer uses this one for such values
pub const DATA_TYPE_UNIT: u8 = 1;
