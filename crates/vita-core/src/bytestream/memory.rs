/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::trace;

use crate::bytestream::{ByteIoError, ByteSource};

/// Initial buffer size of an empty memory backing
const INITIAL_SIZE: usize = 1024;

/// Growth factor applied when a write lands past the buffer end
const GROWTH_FACTOR: usize = 16;

/// A growable in-memory byte source
///
/// `length` is the high-water mark of everything written (or the size of
/// the vector it was created from), not the capacity of the buffer.
/// Writing past the end grows the buffer geometrically and leaves any gap
/// zero filled.
pub struct MemoryBacking {
    data:   Vec<u8>,
    length: usize
}

impl MemoryBacking {
    /// Create an empty backing with a small preallocated buffer
    pub fn new() -> MemoryBacking {
        MemoryBacking::with_capacity(INITIAL_SIZE)
    }

    /// Create an empty backing with a buffer of `capacity` bytes
    pub fn with_capacity(capacity: usize) -> MemoryBacking {
        MemoryBacking {
            data:   vec![0; capacity],
            length: 0
        }
    }

    /// Wrap an existing vector, its contents become readable
    pub fn from_vec(data: Vec<u8>) -> MemoryBacking {
        let length = data.len();
        MemoryBacking { data, length }
    }

    pub fn from_slice(data: &[u8]) -> MemoryBacking {
        MemoryBacking::from_vec(data.to_vec())
    }

    /// The bytes written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.length]
    }

    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.length);
        self.data
    }

    /// Size of the buffer, always at least `length`
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    fn ensure(&mut self, required: usize) {
        if required > self.data.len() {
            let new_size = required.max(self.data.len().saturating_mul(GROWTH_FACTOR));
            trace!("Growing memory backing from {} to {} bytes", self.data.len(), new_size);
            self.data.resize(new_size, 0);
        }
    }
}

impl Default for MemoryBacking {
    fn default() -> Self {
        MemoryBacking::new()
    }
}

impl ByteSource for MemoryBacking {
    fn read_at(&mut self, position: u64, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let position = usize::try_from(position)?;

        if position >= self.length {
            return Ok(0);
        }
        let count = buf.len().min(self.length - position);
        buf[..count].copy_from_slice(&self.data[position..position + count]);
        Ok(count)
    }

    fn write_at(&mut self, position: u64, buf: &[u8]) -> Result<(), ByteIoError> {
        let position = usize::try_from(position)?;
        let end = position
            .checked_add(buf.len())
            .ok_or(ByteIoError::Generic("Write position overflows"))?;

        self.ensure(end);
        self.data[position..end].copy_from_slice(buf);
        self.length = self.length.max(end);
        Ok(())
    }

    fn source_len(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.length as u64)
    }

    fn name(&self) -> &'static str {
        "Memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_by_sixteen_times() {
        let mut backing = MemoryBacking::with_capacity(4);
        backing.write_at(0, &[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(backing.capacity(), 64);
        assert_eq!(backing.source_len().unwrap(), 5);
    }

    #[test]
    fn grows_to_required_size_when_larger() {
        let mut backing = MemoryBacking::with_capacity(2);
        backing.write_at(100, &[9]).unwrap();
        assert_eq!(backing.capacity(), 101);
        // the gap reads back as zeros
        let mut buf = [0xFF; 4];
        assert_eq!(backing.read_at(97, &mut buf).unwrap(), 4);
        assert_eq!(buf, [0, 0, 0, 9]);
    }

    #[test]
    fn length_is_high_water_mark() {
        let mut backing = MemoryBacking::new();
        backing.write_at(0, &[1, 2, 3, 4]).unwrap();
        backing.write_at(1, &[7]).unwrap();
        assert_eq!(backing.source_len().unwrap(), 4);
        assert_eq!(backing.as_slice(), &[1, 7, 3, 4]);
    }

    #[test]
    fn into_vec_drops_spare_capacity() {
        let mut backing = MemoryBacking::with_capacity(4);
        backing.write_at(2, &[5, 6, 7]).unwrap();
        assert!(backing.capacity() > 5);
        assert_eq!(backing.into_vec(), [0, 0, 5, 6, 7]);
    }

    #[test]
    fn read_past_end_is_short() {
        let mut backing = MemoryBacking::from_slice(&[1, 2, 3]);
        let mut buf = [0; 8];
        assert_eq!(backing.read_at(1, &mut buf).unwrap(), 2);
        assert_eq!(backing.read_at(3, &mut buf).unwrap(), 0);
        assert_eq!(backing.read_at(30, &mut buf).unwrap(), 0);
    }
}
