/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde")]

use serde::ser::*;

use crate::decoder::{PsfEntry, PsfHeader};
use crate::sfo::{AppKind, ParamSfo};
use crate::value::PsfValue;

impl Serialize for PsfValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        match self {
            PsfValue::Binary(bytes) => serializer.serialize_bytes(bytes),
            PsfValue::Text(text) => serializer.serialize_str(text),
            PsfValue::Int(value) => serializer.serialize_i32(*value),
            PsfValue::Unit => serializer.serialize_unit()
        }
    }
}

impl Serialize for ParamSfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        self.values().serialize(serializer)
    }
}

impl Serialize for AppKind {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        match self {
            AppKind::Other(category) => serializer.serialize_str(category),
            // the variant name is enough
            _ => serializer.serialize_str(&format!("{:?}", self))
        }
    }
}

impl Serialize for PsfHeader {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("PsfHeader", 4)?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("key_table", &self.key_table)?;
        state.serialize_field("value_table", &self.value_table)?;
        state.serialize_field("pair_count", &self.pair_count)?;
        state.end()
    }
}

impl Serialize for PsfEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("PsfEntry", 6)?;
        state.serialize_field("key_offset", &self.key_offset)?;
        state.serialize_field("param_fmt", &self.param_fmt)?;
        state.serialize_field("data_type", &self.data_type)?;
        state.serialize_field("value_size", &self.value_size)?;
        state.serialize_field("value_size_pad", &self.value_size_pad)?;
        state.serialize_field("value_offset", &self.value_offset)?;
        state.end()
    }
}
