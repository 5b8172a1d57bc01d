/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use vita_image::codecs::ImageInfo;
use vita_psf::{ParamSfo, PsfEntry, PsfHeader};

/// What `probe` found in a file
pub enum Probed {
    Image(ImageInfo),
    /// A PSF file and its number of entries
    Psf(u32)
}

pub struct ProbeOutput {
    file:   OsString,
    size:   u64,
    probed: Probed
}

impl ProbeOutput {
    pub fn new(file: OsString, size: u64, probed: Probed) -> ProbeOutput {
        ProbeOutput { file, size, probed }
    }
}

impl Serialize for ProbeOutput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("ProbeOutput", 3)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("size", &self.size)?;

        match &self.probed {
            Probed::Image(info) => state.serialize_field("image", info)?,
            Probed::Psf(entries) => state.serialize_field("psf_entries", entries)?
        }
        state.end()
    }
}

pub struct SfoOutput<'a> {
    file:    OsString,
    sfo:     &'a ParamSfo,
    /// Header and entry records, when asked for
    records: Option<(PsfHeader, &'a [PsfEntry])>
}

impl<'a> SfoOutput<'a> {
    pub fn new(
        file: OsString, sfo: &'a ParamSfo, records: Option<(PsfHeader, &'a [PsfEntry])>
    ) -> SfoOutput<'a> {
        SfoOutput { file, sfo, records }
    }
}

impl<'a> Serialize for SfoOutput<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let fields = if self.records.is_some() { 5 } else { 3 };
        let mut state = serializer.serialize_struct("SfoOutput", fields)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("kind", &self.sfo.app_kind())?;
        state.serialize_field("values", self.sfo)?;

        if let Some((header, entries)) = self.records {
            state.serialize_field("header", &header)?;
            state.serialize_field("entries", entries)?;
        }
        state.end()
    }
}
