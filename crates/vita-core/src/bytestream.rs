/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a seekable bytestream
//!
//! This module contains the [`ByteCursor`] used by every decoder and
//! encoder, the two backing stores it can sit on and the bit level
//! helpers.
//!
//! A cursor never owns its bytes directly, it holds a shared handle to a
//! [`ByteSource`] and a window into it. Slicing a cursor creates a new
//! window over the same source, so carving sub-streams out of a file
//! never copies data.
pub use bits::{BitOrder, BitWriter};
pub use cursor::{ByteCursor, Window};
pub use errors::ByteIoError;
pub use file::{FileBacking, OpenMode};
pub use memory::MemoryBacking;
pub use traits::{ByteSource, SharedSource};

mod bits;
mod cursor;
mod errors;
mod file;
mod memory;
mod traits;
