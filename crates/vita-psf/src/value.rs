/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Display, Formatter};

use crate::constants::{DATA_TYPE_BINARY, DATA_TYPE_INT, DATA_TYPE_TEXT, DATA_TYPE_UNIT};

/// A decoded PSF value
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PsfValue {
    /// Data type 0, the raw bytes
    Binary(Vec<u8>),
    /// Data type 2, text up to the first zero byte
    Text(String),
    /// Data type 4, a little endian signed integer
    Int(i32),
    /// Any other data type
    Unit
}

impl PsfValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PsfValue::Text(text) => Some(text),
            _ => None
        }
    }

    pub const fn as_int(&self) -> Option<i32> {
        match self {
            PsfValue::Int(value) => Some(*value),
            _ => None
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PsfValue::Binary(bytes) => Some(bytes),
            _ => None
        }
    }

    /// The data type byte this value is stored with
    pub const fn data_type(&self) -> u8 {
        match self {
            PsfValue::Binary(_) => DATA_TYPE_BINARY,
            PsfValue::Text(_) => DATA_TYPE_TEXT,
            PsfValue::Int(_) => DATA_TYPE_INT,
            PsfValue::Unit => DATA_TYPE_UNIT
        }
    }
}

impl Display for PsfValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PsfValue::Binary(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            PsfValue::Text(text) => write!(f, "{text}"),
            PsfValue::Int(value) => write!(f, "{value}"),
            PsfValue::Unit => Ok(())
        }
    }
}

impl From<&str> for PsfValue {
    fn from(value: &str) -> Self {
        PsfValue::Text(value.to_string())
    }
}

impl From<String> for PsfValue {
    fn from(value: String) -> Self {
        PsfValue::Text(value)
    }
}

impl From<i32> for PsfValue {
    fn from(value: i32) -> Self {
        PsfValue::Int(value)
    }
}

impl From<Vec<u8>> for PsfValue {
    fn from(value: Vec<u8>) -> Self {
        PsfValue::Binary(value)
    }
}
