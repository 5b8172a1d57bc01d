/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all vita codecs
//!
//! This crate provides the pieces the container codecs are built on
//!
//! - A seekable byte cursor with endian aware reads and writes over
//!   an in-memory buffer or a random access file
//! - Zero-copy slices of a cursor which share the same backing store
//! - Bit level reads in both MSB-first and LSB-first order
//! - A decoded image type and decoder/encoder options shared by the codecs
//! - An error classification shared by every codec so callers can tell
//!   "wrong format" apart from "truncated data".
//!
//! Everything here is single threaded and synchronous, a backing store
//! may be shared by many cursors but a cursor is never shared between threads.
pub mod bytestream;
pub mod errors;
pub mod image;
pub mod options;
