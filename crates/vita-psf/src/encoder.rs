/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::BTreeMap;

use log::debug;
use vita_core::bytestream::{ByteCursor, ByteIoError};

use crate::constants::{
    DEFAULT_VERSION, PARAM_FMT, PSF_ENTRY_SIZE, PSF_HEADER_SIZE, PSF_MAGIC, TABLE_ALIGNMENT
};
use crate::value::PsfValue;

/// A minimal PSF writer
///
/// Entries are written sorted by key, the key table, the value table and
/// every value are aligned to four bytes.
///
/// # Example
/// ```
/// use vita_psf::{PsfDecoder, PsfEncoder, PsfValue};
/// use vita_core::bytestream::ByteCursor;
///
/// let mut encoder = PsfEncoder::new();
/// encoder.add("TITLE", "Hello");
/// let bytes = encoder.encode_to_vec().unwrap();
///
/// let values = PsfDecoder::new(ByteCursor::from_vec(bytes)).decode().unwrap();
/// assert_eq!(values["TITLE"], PsfValue::from("Hello"));
/// ```
#[derive(Clone, Debug)]
pub struct PsfEncoder {
    version: u32,
    values:  BTreeMap<String, PsfValue>
}

impl PsfEncoder {
    pub fn new() -> PsfEncoder {
        PsfEncoder {
            version: DEFAULT_VERSION,
            values:  BTreeMap::new()
        }
    }

    pub fn from_map(values: BTreeMap<String, PsfValue>) -> PsfEncoder {
        PsfEncoder {
            version: DEFAULT_VERSION,
            values
        }
    }

    #[must_use]
    pub fn set_version(mut self, version: u32) -> PsfEncoder {
        self.version = version;
        self
    }

    /// Add or replace a value
    pub fn add<V: Into<PsfValue>>(&mut self, key: &str, value: V) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Write the file at the current position of `sink`, returning the bytes written
    pub fn encode(&self, sink: &mut ByteCursor) -> Result<usize, ByteIoError> {
        let count = u32::try_from(self.values.len())?;

        let mut keys = ByteCursor::memory();
        let mut values = ByteCursor::memory();
        let mut entries = ByteCursor::memory();

        for (key, value) in &self.values {
            let key_offset = u16::try_from(keys.position())?;
            keys.write_stringz(key)?;

            let value_offset = u32::try_from(values.position())?;
            match value {
                PsfValue::Binary(bytes) => values.write_bytes(bytes)?,
                PsfValue::Text(text) => values.write_stringz(text)?,
                PsfValue::Int(int) => values.write_i32_le(*int)?,
                PsfValue::Unit => ()
            }
            let value_size = u32::try_from(values.position())? - value_offset;
            values.write_to_align(TABLE_ALIGNMENT, 0)?;
            let value_size_pad = u32::try_from(values.position())? - value_offset;

            entries.write_u16_le(key_offset)?;
            entries.write_u8(PARAM_FMT)?;
            entries.write_u8(value.data_type())?;
            entries.write_u32_le(value_size)?;
            entries.write_u32_le(value_size_pad)?;
            entries.write_u32_le(value_offset)?;
        }
        keys.write_to_align(TABLE_ALIGNMENT, 0)?;

        let key_table = PSF_HEADER_SIZE + PSF_ENTRY_SIZE * self.values.len();
        let value_table = key_table + usize::try_from(keys.position())?;

        let start = sink.position();

        sink.write_bytes(&PSF_MAGIC)?;
        sink.write_u32_le(self.version)?;
        sink.write_u32_le(u32::try_from(key_table)?)?;
        sink.write_u32_le(u32::try_from(value_table)?)?;
        sink.write_u32_le(count)?;

        entries.set_position(0);
        keys.set_position(0);
        values.set_position(0);

        sink.write_stream(&mut entries)?;
        sink.write_stream(&mut keys)?;
        sink.write_stream(&mut values)?;

        let written = usize::try_from(sink.position() - start)?;
        debug!("Wrote PSF with {count} entries in {written} bytes");

        Ok(written)
    }

    /// Write the file into a new vector
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, ByteIoError> {
        let mut sink = ByteCursor::memory();
        self.encode(&mut sink)?;
        sink.to_vec()
    }
}

impl Default for PsfEncoder {
    fn default() -> Self {
        PsfEncoder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DATA_TYPE_TEXT;

    #[test]
    fn layout_is_aligned() {
        let mut encoder = PsfEncoder::new();
        encoder.add("B", "xyz");
        encoder.add("A", 7);

        let bytes = encoder.encode_to_vec().unwrap();
        let mut cursor = ByteCursor::from_vec(bytes);

        assert_eq!(cursor.read_fixed_bytes::<4>().unwrap(), PSF_MAGIC);
        assert_eq!(cursor.get_u32_le_err().unwrap(), DEFAULT_VERSION);
        // 20 byte header, two 16 byte entries
        assert_eq!(cursor.get_u32_le_err().unwrap(), 52);
        // "A\0B\0" is already aligned
        assert_eq!(cursor.get_u32_le_err().unwrap(), 56);
        assert_eq!(cursor.get_u32_le_err().unwrap(), 2);

        // first entry is "A", an int at offset 0
        assert_eq!(cursor.get_u16_le_err().unwrap(), 0);
        cursor.skip(2);
        assert_eq!(cursor.get_u32_le_err().unwrap(), 4);
        assert_eq!(cursor.get_u32_le_err().unwrap(), 4);
        assert_eq!(cursor.get_u32_le_err().unwrap(), 0);

        // second is "B", text of 4 bytes after the int
        assert_eq!(cursor.get_u16_le_err().unwrap(), 2);
        assert_eq!(cursor.get_u8_err().unwrap(), PARAM_FMT);
        assert_eq!(cursor.get_u8_err().unwrap(), DATA_TYPE_TEXT);
        assert_eq!(cursor.get_u32_le_err().unwrap(), 4);
        assert_eq!(cursor.get_u32_le_err().unwrap(), 4);
        assert_eq!(cursor.get_u32_le_err().unwrap(), 4);

        assert_eq!(cursor.length().unwrap(), 56 + 8);
    }
}
