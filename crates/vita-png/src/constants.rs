/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// The eight bytes every png starts with, two big endian words
/// `0x89504E47` and `0x0D0A1A0A`
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Payload size of an IHDR chunk
pub(crate) const IHDR_LENGTH: usize = 13;

/// The only bit depth we decode and encode
pub(crate) const SUPPORTED_DEPTH: u8 = 8;

/// Largest output buffer reserved up front when inflating, the header
/// dimensions are not trusted beyond this
pub(crate) const MAX_SIZE_HINT: usize = 1 << 26;
