/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use vita_core::bytestream::{ByteCursor, ByteIoError};

use crate::constants::SUPPORTED_DEPTH;
use crate::crc::calc_crc_with_bytes;
use crate::encoder::PngEncoder;
use crate::enums::{FilterMethod, PngColor};

pub(crate) fn write_ihdr(ctx: &PngEncoder, output: &mut ByteCursor) -> Result<(), ByteIoError> {
    let (width, height) = ctx.image.dimensions();
    // write width and height
    output.write_u32_be(u32::try_from(width)?)?;
    output.write_u32_be(u32::try_from(height)?)?;
    // write depth
    output.write_u8(SUPPORTED_DEPTH)?;
    // write color, we always write alpha
    output.write_u8(PngColor::RGBA.to_int())?;
    // compression method
    output.write_u8(0)?;
    // filter method
    output.write_u8(FilterMethod::None.to_int())?;
    // interlace method, always Standard
    output.write_u8(0)
}

// iend is a no-op
pub(crate) fn write_iend(_: &PngEncoder, _: &mut ByteCursor) -> Result<(), ByteIoError> {
    Ok(())
}

/// Write header writes the boilerplate for each png chunk
///
/// The chunk payload is produced by `func` into an in-memory cursor,
/// then written out with its length and crc by [`write_chunk`].
pub(crate) fn write_header_fn<F>(
    v: &PngEncoder, writer: &mut ByteCursor, name: &[u8; 4], func: F
) -> Result<(), ByteIoError>
where
    F: Fn(&PngEncoder, &mut ByteCursor) -> Result<(), ByteIoError>
{
    let mut local_writer = ByteCursor::memory();
    (func)(v, &mut local_writer)?;

    let payload = local_writer.to_vec()?;
    write_chunk(name, &payload, writer)
}

/// Write `length | name | data | crc(name ++ data)`
pub(crate) fn write_chunk(
    name: &[u8; 4], data: &[u8], writer: &mut ByteCursor
) -> Result<(), ByteIoError> {
    // write length
    writer.write_u32_be(u32::try_from(data.len())?)?;
    // write chunk name
    writer.write_bytes(name)?;
    // write chunk data
    writer.write_bytes(data)?;
    // crc is a continuous function, so first crc the chunk name
    // and then crc that with the chunk bytes passing in the previous crc
    let crc = calc_crc_with_bytes(name, u32::MAX);
    let crc = !calc_crc_with_bytes(data, crc);
    writer.write_u32_be(crc)
}
