/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Readers for the well known `param.sfo` keys

use std::collections::BTreeMap;

use vita_core::bytestream::ByteCursor;

use crate::decoder::PsfDecoder;
use crate::errors::PsfDecodeErrors;
use crate::value::PsfValue;

/// The `ATTRIBUTE` value homebrew applications carry
pub const HOMEBREW_ATTRIBUTE: i32 = 0x8000;

/// What kind of package a `param.sfo` describes, from its `CATEGORY`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppKind {
    /// Category `gd` with the homebrew attribute
    Homebrew,
    /// Category `gd`
    Game,
    /// Category `gda`
    System,
    /// Category `gp`
    Update,
    /// Any other category
    Other(String),
    /// No category
    Unknown
}

/// A decoded `param.sfo`
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParamSfo {
    values: BTreeMap<String, PsfValue>
}

impl ParamSfo {
    pub fn new(values: BTreeMap<String, PsfValue>) -> ParamSfo {
        ParamSfo { values }
    }

    /// Decode a `param.sfo` from `stream`
    pub fn decode(stream: ByteCursor) -> Result<ParamSfo, PsfDecodeErrors> {
        Ok(ParamSfo::new(PsfDecoder::new(stream).decode()?))
    }

    pub fn get(&self, key: &str) -> Option<&PsfValue> {
        self.values.get(key)
    }

    pub fn values(&self) -> &BTreeMap<String, PsfValue> {
        &self.values
    }

    pub fn into_values(self) -> BTreeMap<String, PsfValue> {
        self.values
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PsfValue::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.text("TITLE")
    }

    pub fn title_id(&self) -> Option<&str> {
        self.text("TITLE_ID")
    }

    /// `APP_VER`, falling back to `VERSION`
    pub fn app_ver(&self) -> Option<&str> {
        self.text("APP_VER").or_else(|| self.text("VERSION"))
    }

    pub fn category(&self) -> Option<&str> {
        self.text("CATEGORY")
    }

    pub fn attribute(&self) -> Option<i32> {
        self.get("ATTRIBUTE").and_then(PsfValue::as_int)
    }

    pub fn app_kind(&self) -> AppKind {
        match self.category() {
            Some("gd") if self.attribute() == Some(HOMEBREW_ATTRIBUTE) => AppKind::Homebrew,
            Some("gd") => AppKind::Game,
            Some("gda") => AppKind::System,
            Some("gp") => AppKind::Update,
            Some(other) => AppKind::Other(other.to_string()),
            None => AppKind::Unknown
        }
    }
}
