/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::BTreeMap;

use log::{debug, trace, warn};
use vita_core::bytestream::{ByteCursor, ByteIoError};

use crate::constants::{
    DATA_TYPE_BINARY, DATA_TYPE_INT, DATA_TYPE_TEXT, PSF_ENTRY_SIZE, PSF_HEADER_SIZE, PSF_MAGIC
};
use crate::errors::PsfDecodeErrors;
use crate::value::PsfValue;

/// The fixed header following the magic bytes
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PsfHeader {
    pub version:     u32,
    /// Offset of the key table from the start of the file
    pub key_table:   u32,
    /// Offset of the value table from the start of the file
    pub value_table: u32,
    pub pair_count:  u32
}

/// One entry record
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PsfEntry {
    /// Offset of the key inside the key table
    pub key_offset:     u16,
    pub param_fmt:      u8,
    pub data_type:      u8,
    /// Bytes used by the value
    pub value_size:     u32,
    /// Bytes reserved for the value
    pub value_size_pad: u32,
    /// Offset of the value inside the value table
    pub value_offset:   u32
}

/// Check whether `stream` starts with the PSF magic
///
/// The position of `stream` is not changed.
pub fn probe_psf(stream: &ByteCursor) -> bool {
    match stream.slice(..) {
        Ok(mut view) => matches!(view.read_fixed_bytes::<4>(), Ok(magic) if magic == PSF_MAGIC),
        Err(_) => false
    }
}

/// A PSF (param.sfo) reader
///
/// The file is expected to start at position zero of the cursor's window,
/// the table offsets in the header are relative to it.
///
/// # Example
/// ```no_run
/// use vita_core::bytestream::{ByteCursor, OpenMode};
/// use vita_psf::PsfDecoder;
///
/// let cursor = ByteCursor::open("param.sfo", OpenMode::Read).unwrap();
/// let values = PsfDecoder::new(cursor).decode().unwrap();
///
/// println!("{:?}", values.get("TITLE_ID"));
/// ```
pub struct PsfDecoder {
    stream:          ByteCursor,
    header:          Option<PsfHeader>,
    entries:         Vec<PsfEntry>,
    decoded_headers: bool
}

impl PsfDecoder {
    pub fn new(stream: ByteCursor) -> PsfDecoder {
        PsfDecoder {
            stream,
            header: None,
            entries: vec![],
            decoded_headers: false
        }
    }

    /// Read the header and the entry records
    ///
    /// Calling it again is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), PsfDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        self.stream.set_position(0);

        let magic = self.stream.read_fixed_bytes::<4>()?;

        if magic != PSF_MAGIC {
            return Err(PsfDecodeErrors::WrongMagicBytes(magic));
        }
        let header = PsfHeader {
            version:     self.stream.get_u32_le_err()?,
            key_table:   self.stream.get_u32_le_err()?,
            value_table: self.stream.get_u32_le_err()?,
            pair_count:  self.stream.get_u32_le_err()?
        };
        debug!("PSF version: {:#06X}", header.version);
        debug!("PSF key table: {}", header.key_table);
        debug!("PSF value table: {}", header.value_table);
        debug!("PSF entries: {}", header.pair_count);

        // refuse counts the stream cannot hold before allocating for them
        let needed = u64::from(header.pair_count) * PSF_ENTRY_SIZE as u64;
        let remaining = self.stream.remaining()?;

        if needed > remaining {
            return Err(PsfDecodeErrors::IoErrors(ByteIoError::NotEnoughBytes(
                PSF_HEADER_SIZE + usize::try_from(needed).unwrap_or(usize::MAX),
                PSF_HEADER_SIZE + usize::try_from(remaining).unwrap_or(usize::MAX)
            )));
        }
        let mut entries = Vec::with_capacity(header.pair_count as usize);

        for _ in 0..header.pair_count {
            entries.push(PsfEntry {
                key_offset:     self.stream.get_u16_le_err()?,
                param_fmt:      self.stream.get_u8_err()?,
                data_type:      self.stream.get_u8_err()?,
                value_size:     self.stream.get_u32_le_err()?,
                value_size_pad: self.stream.get_u32_le_err()?,
                value_offset:   self.stream.get_u32_le_err()?
            });
        }
        self.header = Some(header);
        self.entries = entries;
        self.decoded_headers = true;

        Ok(())
    }

    /// The header, `None` until [`decode_headers`](Self::decode_headers) succeeds
    pub const fn header(&self) -> Option<PsfHeader> {
        self.header
    }

    /// Entry records in file order
    pub fn entries(&self) -> &[PsfEntry] {
        &self.entries
    }

    /// Decode every entry into `(key, value)` pairs, in file order
    ///
    /// Duplicate keys are kept.
    pub fn decode_pairs(&mut self) -> Result<Vec<(String, PsfValue)>, PsfDecodeErrors> {
        self.decode_headers()?;

        let header = self
            .header
            .ok_or(PsfDecodeErrors::IoErrors(ByteIoError::Generic("missing header")))?;

        // tables starting past the end mean the file was cut short
        let length = self.stream.length()?;
        let table_end = u64::from(header.key_table.max(header.value_table));

        if table_end > length {
            return Err(PsfDecodeErrors::IoErrors(ByteIoError::NotEnoughBytes(
                usize::try_from(table_end).unwrap_or(usize::MAX),
                usize::try_from(length).unwrap_or(usize::MAX)
            )));
        }
        let key_table = self.stream.slice(u64::from(header.key_table)..)?;
        let value_table = self.stream.slice(u64::from(header.value_table)..)?;

        let mut pairs = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let key = read_key(&key_table, entry)?;
            let value = read_value(&value_table, entry)?;

            trace!("{key} (type {}) = {value:?}", entry.data_type);
            pairs.push((key, value));
        }
        Ok(pairs)
    }

    /// Decode the file into a key to value mapping
    ///
    /// When a key appears more than once the last entry wins.
    pub fn decode(&mut self) -> Result<BTreeMap<String, PsfValue>, PsfDecodeErrors> {
        let mut values = BTreeMap::new();

        for (key, value) in self.decode_pairs()? {
            if let Some(previous) = values.insert(key.clone(), value) {
                warn!("Duplicate PSF key {key}, replacing {previous:?}");
            }
        }
        Ok(values)
    }
}

fn read_key(key_table: &ByteCursor, entry: &PsfEntry) -> Result<String, PsfDecodeErrors> {
    let table_len = key_table.length()?;
    let key_offset = u64::from(entry.key_offset);

    if key_offset >= table_len {
        return Err(PsfDecodeErrors::KeyOutOfRange {
            key_offset,
            table_len
        });
    }
    Ok(key_table.slice(key_offset..)?.read_stringz()?)
}

fn read_value(value_table: &ByteCursor, entry: &PsfEntry) -> Result<PsfValue, PsfDecodeErrors> {
    let table_len = value_table.length()?;
    let offset = u64::from(entry.value_offset);
    let size = u64::from(entry.value_size);

    if offset + size > table_len {
        return Err(PsfDecodeErrors::ValueOutOfRange {
            offset,
            size,
            table_len
        });
    }
    let mut value = value_table.slice(offset..offset + size)?;

    let decoded = match entry.data_type {
        DATA_TYPE_BINARY => PsfValue::Binary(value.read_remaining()?),
        DATA_TYPE_TEXT => PsfValue::Text(value.read_stringz()?),
        DATA_TYPE_INT => PsfValue::Int(value.get_i32_le_err()?),
        _ => PsfValue::Unit
    };
    Ok(decoded)
}
