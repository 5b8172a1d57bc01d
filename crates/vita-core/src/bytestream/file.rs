/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use crate::bytestream::{ByteIoError, ByteSource};

/// How a file backing opens its file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OpenMode {
    /// Existing file, read only
    Read,
    /// Existing file, readable and writable
    ReadWrite,
    /// Create the file (truncating an existing one), readable and writable
    Create
}

/// A random access file used as a byte source
///
/// Every read and write seeks to its absolute target first, so any number
/// of cursors may share one file handle.
pub struct FileBacking {
    file: File
}

impl FileBacking {
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<FileBacking, ByteIoError> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();

        match mode {
            OpenMode::Read => options.read(true),
            OpenMode::ReadWrite => options.read(true).write(true),
            OpenMode::Create => options.read(true).write(true).create(true).truncate(true)
        };
        debug!("Opening {:?} in {:?} mode", path, mode);

        Ok(FileBacking {
            file: options.open(path)?
        })
    }

    pub fn from_file(file: File) -> FileBacking {
        FileBacking { file }
    }
}

impl ByteSource for FileBacking {
    fn read_at(&mut self, position: u64, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.file.seek(SeekFrom::Start(position))?;

        let mut total = 0;
        // a single read may return less than asked even before the end,
        // keep going until the buffer is full or the file is exhausted
        while total < buf.len() {
            match self.file.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ByteIoError::StdIoError(e))
            }
        }
        Ok(total)
    }

    fn write_at(&mut self, position: u64, buf: &[u8]) -> Result<(), ByteIoError> {
        self.file.seek(SeekFrom::Start(position))?;
        self.file.write_all(buf)?;
        Ok(())
    }

    fn source_len(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.file.metadata()?.len())
    }

    fn name(&self) -> &'static str {
        "File"
    }
}
