/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A PSF (`param.sfo`) reader
//!
//! PSF is the small key/value container Vita packages use to describe
//! themselves. A file is a fixed header, an array of entry records and two
//! tables, one holding the keys and one holding the values, each entry
//! pointing into both.
//!
//! Values are binary blobs, text or 32 bit integers, see [`PsfValue`].
//!
//! # Features
//!  - `serde`: Serialize decoded values, headers and entries
//!
//! # Example
//! ```no_run
//! use vita_core::bytestream::{ByteCursor, OpenMode};
//! use vita_psf::ParamSfo;
//!
//! let cursor = ByteCursor::open("sce_sys/param.sfo", OpenMode::Read).unwrap();
//! let sfo = ParamSfo::decode(cursor).unwrap();
//!
//! println!("{:?} {:?}", sfo.title_id(), sfo.title());
//! ```
pub use decoder::{probe_psf, PsfDecoder, PsfEntry, PsfHeader};
pub use encoder::PsfEncoder;
pub use sfo::{AppKind, ParamSfo};
pub use value::PsfValue;
pub use vita_core;

pub mod constants;
mod decoder;
mod encoder;
pub mod errors;
pub mod serde;
mod sfo;
mod value;
