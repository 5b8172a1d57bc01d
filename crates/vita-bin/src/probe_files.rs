/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::path::Path;

use log::{info, warn};
use vita_core::bytestream::{ByteCursor, OpenMode};
use vita_core::options::DecoderOptions;
use vita_image::codecs::guess_format;
use vita_psf::{probe_psf, PsfDecoder};

use crate::errors::CliErrors;
use crate::serde::{ProbeOutput, Probed};

/// Find out what a file holds, `None` when no format recognises it
pub fn probe_file(path: &Path) -> Result<Option<ProbeOutput>, CliErrors> {
    let cursor = ByteCursor::open(path, OpenMode::Read)?;
    let size = cursor.length()?;
    let file = OsString::from(path.as_os_str());

    if let Some(format) = guess_format(&cursor) {
        // we are only reading headers, so lift the size restrictions
        let options = DecoderOptions::default()
            .set_max_width(usize::MAX)
            .set_max_height(usize::MAX);

        let image = format.read_info(&cursor, options)?;
        return Ok(Some(ProbeOutput::new(file, size, Probed::Image(image))));
    }
    if probe_psf(&cursor) {
        let mut decoder = PsfDecoder::new(cursor.slice(..)?);
        decoder.decode_headers()?;

        let entries = decoder.header().map_or(0, |header| header.pair_count);
        return Ok(Some(ProbeOutput::new(file, size, Probed::Psf(entries))));
    }
    Ok(None)
}

/// Probe input files, extract metadata, and print to standard output.
pub fn probe_input_files(args: &clap::ArgMatches) -> Result<(), CliErrors> {
    for in_file in args.get_raw("files").into_iter().flatten() {
        let path = Path::new(in_file);

        if !path.exists() {
            warn!("{} does not exist, skipping", path.display());
            continue;
        }
        info!("Probing {}", path.display());

        match probe_file(path)? {
            Some(output) => println!("{}", serde_json::to_string_pretty(&output)?),
            None => warn!("Unknown format for {}", path.display())
        }
    }
    Ok(())
}
